//! Chain-data collaborator
//!
//! The engine never talks to a ledger directly. Anything that can list a
//! wallet's signatures and hand back parsed transactions plugs in here.

mod types;
mod fixture;

pub use types::{
    AccountKey, Instruction, Message, ParsedInstruction, ParsedTransaction,
    PartiallyDecodedInstruction, SignatureInfo, TokenAccount, TokenBalance, TransactionBody,
    TransactionMeta, UiTokenAmount, NATIVE_DECIMALS, NATIVE_MINT, TOKEN_2022_PROGRAM, TOKEN_PROGRAM,
};
pub use fixture::{FixtureChain, WalletSnapshot};

use async_trait::async_trait;
use crate::utils::Result;

#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// Most recent signatures for an address, newest first
    async fn signatures_for_address(&self, address: &str, limit: usize) -> Result<Vec<SignatureInfo>>;
    
    /// Parsed transactions for a batch of signatures, positionally aligned.
    /// Missing transactions come back as `None`.
    async fn parsed_transactions(&self, signatures: &[String]) -> Result<Vec<Option<ParsedTransaction>>>;
    
    /// Native balance in lamports
    async fn balance_lamports(&self, address: &str) -> Result<u64>;
    
    /// Token accounts owned by an address
    async fn token_accounts_by_owner(&self, address: &str) -> Result<Vec<TokenAccount>>;
    
    /// Raw data of a mint's Metaplex metadata account, if one exists
    async fn metadata_account(&self, _mint: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}
