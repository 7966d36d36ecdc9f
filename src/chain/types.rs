//! Parsed ledger records, in the `jsonParsed` shape Solana RPC returns

use serde::{Deserialize, Serialize};

pub const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";
/// Wrapped SOL mint, used as the asset id for native transfers
pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";
pub const NATIVE_DECIMALS: u8 = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTokenAmount {
    #[serde(default)]
    pub ui_amount: Option<f64>,
    pub decimals: u8,
    #[serde(default)]
    pub amount: Option<String>,
}

impl UiTokenAmount {
    pub fn ui(&self) -> f64 {
        self.ui_amount.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub account_index: u32,
    pub mint: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub ui_token_amount: UiTokenAmount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub pre_balances: Vec<u64>,
    #[serde(default)]
    pub post_balances: Vec<u64>,
    #[serde(default)]
    pub pre_token_balances: Vec<TokenBalance>,
    #[serde(default)]
    pub post_token_balances: Vec<TokenBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKey {
    pub pubkey: String,
    #[serde(default)]
    pub signer: bool,
    #[serde(default)]
    pub writable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInstruction {
    pub program_id: String,
    #[serde(default)]
    pub program: Option<String>,
    pub parsed: serde_json::Value,
}

impl ParsedInstruction {
    pub fn is_token_program(&self) -> bool {
        self.program_id == TOKEN_PROGRAM || self.program_id == TOKEN_2022_PROGRAM
    }

    fn info_str(&self, field: &str) -> Option<&str> {
        self.parsed
            .get("info")
            .and_then(|info| info.get(field))
            .and_then(|value| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn mint(&self) -> Option<&str> {
        self.info_str("mint")
    }

    /// Authority if present, otherwise the source account
    pub fn sender(&self) -> Option<&str> {
        self.info_str("authority").or_else(|| self.info_str("source"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiallyDecodedInstruction {
    pub program_id: String,
    #[serde(default)]
    pub accounts: Vec<String>,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instruction {
    Parsed(ParsedInstruction),
    PartiallyDecoded(PartiallyDecodedInstruction),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub account_keys: Vec<AccountKey>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub message: Message,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
    pub transaction: TransactionBody,
}

impl ParsedTransaction {
    pub fn failed(&self) -> bool {
        self.meta
            .as_ref()
            .is_some_and(|meta| meta.err.as_ref().is_some_and(|err| !err.is_null()))
    }

    pub fn instruction_count(&self) -> usize {
        self.transaction.message.instructions.len()
    }

    pub fn parsed_instructions(&self) -> impl Iterator<Item = &ParsedInstruction> {
        self.transaction
            .message
            .instructions
            .iter()
            .filter_map(|ix| match ix {
                Instruction::Parsed(parsed) => Some(parsed),
                Instruction::PartiallyDecoded(_) => None,
            })
    }
}

/// A token account owned by a wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccount {
    pub mint: String,
    pub ui_token_amount: UiTokenAmount,
}
