//! Inbound transfer extraction and airdrop scoring

use std::collections::{HashMap, HashSet};

use crate::chain::{ParsedTransaction, NATIVE_DECIMALS, NATIVE_MINT};
use crate::models::{TransferEvent, LAMPORTS_PER_SOL};
use crate::scoring::round_confidence;
use crate::scoring::transfer::*;

/// Pull every inbound value movement for `wallet` out of one transaction.
///
/// Failed transactions yield nothing. `fallback_block_time` comes from the
/// signature listing and is used when the transaction body carries no time.
pub fn extract_inbound_transfers(
    tx: &ParsedTransaction,
    wallet: &str,
    signature: &str,
    fallback_block_time: Option<i64>,
) -> Vec<TransferEvent> {
    if tx.failed() {
        return Vec::new();
    }

    let Some(meta) = tx.meta.as_ref() else {
        return Vec::new();
    };

    let timestamp = tx.block_time.or(fallback_block_time).unwrap_or(0);
    let senders = senders_by_mint(tx);
    let multi_instruction = tx.instruction_count() > MULTI_INSTRUCTION_THRESHOLD;

    let pre_balances: HashMap<(u32, &str), f64> = meta
        .pre_token_balances
        .iter()
        .map(|b| ((b.account_index, b.mint.as_str()), b.ui_token_amount.ui()))
        .collect();

    let mut events = Vec::new();

    for post in &meta.post_token_balances {
        if post.owner.as_deref() != Some(wallet) {
            continue;
        }

        let pre_ui = pre_balances
            .get(&(post.account_index, post.mint.as_str()))
            .copied()
            .unwrap_or(0.0);
        let post_ui = post.ui_token_amount.ui();
        if post_ui <= pre_ui {
            continue;
        }

        let received = post_ui - pre_ui;
        let decimals = post.ui_token_amount.decimals;
        let sender = senders.get(post.mint.as_str()).copied().flatten();

        let mut confidence = BASE_CONFIDENCE;
        let mut reasons = vec!["Inbound token balance increase detected".to_string()];

        match sender {
            None => {
                confidence += UNKNOWN_SENDER_BONUS;
                reasons.push("Sender unavailable in parsed instructions".to_string());
            }
            Some(sender) if sender != wallet => {
                confidence += EXTERNAL_SENDER_BONUS;
                reasons.push("Sender differs from recipient wallet".to_string());
            }
            Some(_) => {}
        }

        if received > LARGE_AMOUNT_THRESHOLD {
            confidence += LARGE_AMOUNT_BONUS;
            reasons.push("Large token distribution size".to_string());
        }

        if multi_instruction {
            confidence += MULTI_INSTRUCTION_BONUS;
            reasons.push("Multi-instruction distribution transaction".to_string());
        }

        events.push(TransferEvent {
            signature: signature.to_string(),
            timestamp,
            mint: post.mint.clone(),
            amount: to_base_units(received, decimals),
            decimals,
            ui_amount: received,
            sender_address: sender.map(String::from),
            confidence: round_confidence(confidence),
            reasons,
        });
    }

    events.extend(native_transfer(tx, wallet, signature, timestamp));
    events
}

/// Sender per mint from token-program instructions; later instructions win.
/// A mint mapped to `None` had a transfer instruction with no usable sender.
fn senders_by_mint(tx: &ParsedTransaction) -> HashMap<&str, Option<&str>> {
    tx.parsed_instructions()
        .filter(|ix| ix.is_token_program())
        .filter_map(|ix| ix.mint().map(|mint| (mint, ix.sender())))
        .collect()
}

fn native_transfer(
    tx: &ParsedTransaction,
    wallet: &str,
    signature: &str,
    timestamp: i64,
) -> Option<TransferEvent> {
    let meta = tx.meta.as_ref()?;
    let index = tx
        .transaction
        .message
        .account_keys
        .iter()
        .position(|key| key.pubkey == wallet)?;

    let pre = meta.pre_balances.get(index).copied().unwrap_or(0);
    let post = meta.post_balances.get(index).copied().unwrap_or(0);
    if post <= pre {
        return None;
    }

    let lamports = post - pre;
    let received = lamports as f64 / LAMPORTS_PER_SOL;
    if received < NATIVE_MIN_SOL {
        return None;
    }

    let mut confidence = BASE_CONFIDENCE;
    let mut reasons = vec!["Inbound SOL balance increase detected".to_string()];

    if received >= NATIVE_AIRDROP_SOL {
        confidence += NATIVE_AIRDROP_BONUS;
        reasons.push("SOL received".to_string());
    }
    if received >= NATIVE_DISTRIBUTION_SOL {
        confidence += NATIVE_DISTRIBUTION_BONUS;
        reasons.push("SOL distribution / reward".to_string());
    }

    Some(TransferEvent {
        signature: signature.to_string(),
        timestamp,
        mint: NATIVE_MINT.to_string(),
        amount: lamports,
        decimals: NATIVE_DECIMALS,
        ui_amount: received,
        sender_address: None,
        confidence: round_confidence(confidence),
        reasons,
    })
}

fn to_base_units(ui_amount: f64, decimals: u8) -> u64 {
    (ui_amount * 10f64.powi(decimals as i32)).round() as u64
}

/// Newest first, then drop repeats of the same (signature, mint) keeping the
/// first one seen. The sort is stable so ties keep their scan order.
pub fn merge_events(mut events: Vec<TransferEvent>) -> Vec<TransferEvent> {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut seen = HashSet::new();
    events.retain(|event| {
        let (signature, mint) = event.dedupe_key();
        seen.insert((signature.to_string(), mint.to_string()))
    });
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{
        AccountKey, Instruction, Message, ParsedInstruction, TokenBalance, TransactionBody,
        TransactionMeta, UiTokenAmount, TOKEN_PROGRAM,
    };
    use serde_json::json;

    const WALLET: &str = "Wallet1111111111111111111111111111111111111";
    const MINT: &str = "Mint11111111111111111111111111111111111111";

    fn balance(index: u32, ui: f64, owner: &str) -> TokenBalance {
        TokenBalance {
            account_index: index,
            mint: MINT.into(),
            owner: Some(owner.into()),
            ui_token_amount: UiTokenAmount {
                ui_amount: Some(ui),
                decimals: 6,
                amount: None,
            },
        }
    }

    fn token_ix(info: serde_json::Value) -> Instruction {
        Instruction::Parsed(ParsedInstruction {
            program_id: TOKEN_PROGRAM.into(),
            program: Some("spl-token".into()),
            parsed: json!({ "type": "transferChecked", "info": info }),
        })
    }

    fn token_tx(pre: f64, post: f64, instructions: Vec<Instruction>) -> ParsedTransaction {
        ParsedTransaction {
            block_time: Some(1_700_000_000),
            meta: Some(TransactionMeta {
                pre_token_balances: vec![balance(1, pre, WALLET)],
                post_token_balances: vec![balance(1, post, WALLET)],
                ..Default::default()
            }),
            transaction: TransactionBody {
                message: Message {
                    account_keys: vec![],
                    instructions,
                },
            },
        }
    }

    #[test]
    fn test_external_sender_transfer() {
        let tx = token_tx(
            1.0,
            3.0,
            vec![token_ix(json!({ "mint": MINT, "authority": "Distributor1" }))],
        );

        let events = extract_inbound_transfers(&tx, WALLET, "sig-1", None);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.mint, MINT);
        assert_eq!(event.ui_amount, 2.0);
        assert_eq!(event.amount, 2_000_000);
        assert_eq!(event.sender_address.as_deref(), Some("Distributor1"));
        assert!(event.confidence >= 0.55);
        assert!(!event.is_likely_airdrop());
    }

    #[test]
    fn test_unknown_sender_large_batch_transfer() {
        let mut instructions = vec![token_ix(json!({ "mint": MINT }))];
        for _ in 0..3 {
            instructions.push(Instruction::Parsed(ParsedInstruction {
                program_id: "ComputeBudget111111111111111111111111111111".into(),
                program: None,
                parsed: json!({}),
            }));
        }
        let tx = token_tx(0.0, 500.0, instructions);

        let event = &extract_inbound_transfers(&tx, WALLET, "sig-1", None)[0];

        // 0.4 + 0.2 + 0.15 + 0.1
        assert_eq!(event.confidence, 0.85);
        assert_eq!(event.sender_address, None);
        assert_eq!(event.reasons.len(), 4);
        assert!(event.is_likely_airdrop());
    }

    #[test]
    fn test_self_transfer_gets_no_sender_bonus() {
        let tx = token_tx(1.0, 2.0, vec![token_ix(json!({ "mint": MINT, "source": WALLET }))]);
        let event = &extract_inbound_transfers(&tx, WALLET, "sig-1", None)[0];
        assert_eq!(event.confidence, 0.4);
    }

    #[test]
    fn test_decrease_and_foreign_accounts_ignored() {
        let mut tx = token_tx(5.0, 3.0, vec![]);
        if let Some(meta) = tx.meta.as_mut() {
            meta.post_token_balances.push(balance(2, 10.0, "SomeoneElse"));
        }
        assert!(extract_inbound_transfers(&tx, WALLET, "sig-1", None).is_empty());
    }

    #[test]
    fn test_failed_transaction_skipped() {
        let mut tx = token_tx(0.0, 10.0, vec![]);
        if let Some(meta) = tx.meta.as_mut() {
            meta.err = Some(json!({ "InstructionError": [0, "Custom"] }));
        }
        assert!(extract_inbound_transfers(&tx, WALLET, "sig-1", None).is_empty());
    }

    #[test]
    fn test_fallback_block_time() {
        let mut tx = token_tx(0.0, 1.0, vec![]);
        tx.block_time = None;
        let events = extract_inbound_transfers(&tx, WALLET, "sig-1", Some(42));
        assert_eq!(events[0].timestamp, 42);
    }

    fn native_tx(pre: u64, post: u64) -> ParsedTransaction {
        ParsedTransaction {
            block_time: Some(1_700_000_000),
            meta: Some(TransactionMeta {
                pre_balances: vec![9_000_000_000, pre],
                post_balances: vec![8_000_000_000, post],
                ..Default::default()
            }),
            transaction: TransactionBody {
                message: Message {
                    account_keys: vec![
                        AccountKey {
                            pubkey: "Funder".into(),
                            signer: true,
                            writable: true,
                        },
                        AccountKey {
                            pubkey: WALLET.into(),
                            signer: false,
                            writable: true,
                        },
                    ],
                    instructions: vec![],
                },
            },
        }
    }

    #[test]
    fn test_native_thresholds() {
        // 0.005 SOL is fee-refund noise
        assert!(extract_inbound_transfers(&native_tx(0, 5_000_000), WALLET, "s", None).is_empty());

        let small = &extract_inbound_transfers(&native_tx(0, 20_000_000), WALLET, "s", None)[0];
        assert_eq!(small.mint, NATIVE_MINT);
        assert!(!small.is_likely_airdrop());

        let airdrop = &extract_inbound_transfers(&native_tx(0, 50_000_000), WALLET, "s", None)[0];
        assert!(airdrop.is_likely_airdrop());
        assert_eq!(airdrop.confidence, 0.6);

        let reward = &extract_inbound_transfers(&native_tx(1, 250_000_001), WALLET, "s", None)[0];
        assert_eq!(reward.confidence, 0.7);
        assert_eq!(reward.amount, 250_000_000);
        assert!(reward.reasons.contains(&"SOL distribution / reward".to_string()));
    }

    fn event(signature: &str, mint: &str, timestamp: i64, confidence: f64) -> TransferEvent {
        TransferEvent {
            signature: signature.into(),
            timestamp,
            mint: mint.into(),
            amount: 1,
            decimals: 0,
            ui_amount: 1.0,
            sender_address: None,
            confidence,
            reasons: vec![],
        }
    }

    #[test]
    fn test_merge_dedupes_signature_and_mint() {
        let merged = merge_events(vec![
            event("sig-a", MINT, 10, 0.4),
            event("sig-a", MINT, 10, 0.9),
            event("sig-a", NATIVE_MINT, 10, 0.6),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].confidence, 0.4);
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let merged = merge_events(vec![
            event("old", MINT, 1, 0.4),
            event("new", MINT, 3, 0.4),
            event("mid", MINT, 2, 0.4),
        ]);
        let order: Vec<_> = merged.iter().map(|e| e.signature.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
    }
}
