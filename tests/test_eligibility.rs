use airdrop_sentinel::chain::FixtureChain;
use airdrop_sentinel::metadata::TokenMetadataResolver;
use airdrop_sentinel::models::{LifecycleStatus, RuleChecks, VerificationMethod};
use airdrop_sentinel::rules::builtin_rules;
use airdrop_sentinel::verification::evaluate_claim_safety;
use airdrop_sentinel::*;
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

fn jupiter_rule() -> AirdropRule {
    AirdropRule::new(
        "jupiter-jupuary",
        "Jupiter Exchange",
        "https://jup.ag/claim",
        "https://x.com/JupiterExchange",
    )
    .with_trusted_domains(&["jup.ag"])
}

#[test]
fn test_wallet_passing_every_check_is_eligible() {
    let rule = jupiter_rule().with_checks(RuleChecks {
        min_sol_balance: Some(1.0),
        min_recent_transactions: Some(10),
        ..Default::default()
    });
    let profile = WalletProfile {
        address: WALLET.into(),
        sol_balance: 4.25,
        recent_transaction_count: 72,
        ..Default::default()
    };

    let evaluations = AirdropEvaluator::new().evaluate_profile(&profile, &[rule]);

    let evaluation = &evaluations[0];
    assert_eq!(evaluation.status, EligibilityStatus::Eligible);
    assert_eq!(evaluation.confidence, 100);
    assert_eq!(evaluation.proof.met.len(), 2);
    assert!(evaluation.proof.unmet.is_empty());
    assert_eq!(evaluation.claim_safety.grade, SafetyGrade::Safe);
    assert!(evaluation.claim_action_enabled);
}

#[test]
fn test_plain_http_claim_url_is_risky() {
    let rule = AirdropRule::new("jup", "Jupiter Exchange", "http://jup.ag/claim", "https://jup.ag")
        .with_trusted_domains(&["jup.ag"]);

    assert_eq!(evaluate_claim_safety(&rule).grade, SafetyGrade::Risky);

    let profile = WalletProfile {
        address: WALLET.into(),
        sol_balance: 10.0,
        ..Default::default()
    };
    let rule = rule.with_checks(RuleChecks {
        min_sol_balance: Some(1.0),
        ..Default::default()
    });
    let evaluation = &AirdropEvaluator::new().evaluate_profile(&profile, &[rule])[0];

    // Eligible, but the claim link must never be offered
    assert_eq!(evaluation.status, EligibilityStatus::Eligible);
    assert!(!evaluation.claim_action_enabled);
}

#[tokio::test]
async fn test_claim_api_server_error_degrades_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let rule = jupiter_rule().with_claim_api(format!("{}/eligibility", server.uri()));
    let evaluations = AirdropEvaluator::new().evaluate_live(WALLET, &[rule]).await;

    let evaluation = &evaluations[0];
    assert_eq!(evaluation.status, EligibilityStatus::Unknown);
    assert_eq!(evaluation.confidence, 15);
    assert!(evaluation.reason.contains("500"));
    assert!(!evaluation.claim_action_enabled);
}

#[tokio::test]
async fn test_live_batch_survives_one_failing_campaign() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "eligible": true,
            "claimable": [{ "symbol": "JUP", "amount": 1000, "usd": 820.0 }]
        })))
        .mount(&server)
        .await;

    let working = jupiter_rule().with_claim_api(server.uri());

    let mut unreachable = AirdropRule::new(
        "drift-rewards",
        "Drift Protocol",
        "https://drift.trade/airdrop",
        "https://drift.trade",
    )
    .with_claim_api("http://127.0.0.1:9/eligibility");
    unreachable.trusted_domains = vec!["drift.trade".into()];

    let mut manual = AirdropRule::new("pyth", "Pyth Network", "https://pyth.network/claim", "https://pyth.network");
    manual.verification_method = VerificationMethod::ManualVerified;

    let mut upcoming = jupiter_rule().with_claim_api(server.uri());
    upcoming.id = "jupiter-next".into();
    upcoming.status = LifecycleStatus::Upcoming;

    let evaluations = AirdropEvaluator::new()
        .evaluate_live(WALLET, &[manual, unreachable, working, upcoming])
        .await;

    let order: Vec<_> = evaluations.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["jupiter-jupuary", "jupiter-next", "drift-rewards", "pyth"]);

    assert!(evaluations[0].claim_action_enabled);
    assert_eq!(evaluations[0].verified_usd_total, Some(820.0));
    assert!(!evaluations[1].claim_action_enabled, "upcoming campaigns stay locked");
    assert_eq!(evaluations[2].confidence, 10);
    assert_eq!(evaluations[3].confidence, 0);
}

#[tokio::test]
async fn test_unreadable_claim_payload_does_not_stop_the_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/eligibility"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "eligible": false,
            "reason": "Wallet missed the snapshot"
        })))
        .mount(&server)
        .await;

    let mut broken = jupiter_rule().with_claim_api(format!("{}/broken", server.uri()));
    broken.id = "jupiter-broken".into();
    let answering = jupiter_rule().with_claim_api(format!("{}/eligibility", server.uri()));

    let evaluations = AirdropEvaluator::new()
        .evaluate_live(WALLET, &[broken, answering])
        .await;

    assert_eq!(evaluations.len(), 2);
    assert_eq!(evaluations[0].id, "jupiter-jupuary");
    assert_eq!(evaluations[0].status, EligibilityStatus::NotEligible);
    assert_eq!(evaluations[0].confidence, 90);

    assert_eq!(evaluations[1].id, "jupiter-broken");
    assert_eq!(evaluations[1].status, EligibilityStatus::Unknown);
    assert_eq!(evaluations[1].confidence, 10);
    assert!(!evaluations[1].claim_action_enabled);
}

#[tokio::test]
async fn test_profile_from_snapshot_against_builtin_rules() {
    let snapshot = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/wallet_snapshot.json");
    let chain = FixtureChain::from_file(snapshot).expect("fixture loads");

    // Token list unavailable; symbols fall back to mint prefixes
    let server = MockServer::start().await;
    let config = EngineConfig {
        token_list_url: server.uri(),
        ..Default::default()
    };
    let metadata = TokenMetadataResolver::new(reqwest::Client::new(), &config);

    let now = 1_737_504_000 + 86_400 * 3;
    let profile = build_wallet_profile(&chain, &metadata, WALLET, 100, now)
        .await
        .expect("profile builds");

    assert_eq!(profile.sol_balance, 4.25);
    assert_eq!(profile.nft_approx_count, 1);
    assert_eq!(profile.last_active_days, Some(3));
    assert!(profile.token_symbols.contains(&"JUPY".to_string()));

    let evaluations = AirdropEvaluator::new().evaluate_profile(&profile, builtin_rules());

    assert_eq!(evaluations.len(), builtin_rules().len());
    assert!(evaluations
        .windows(2)
        .all(|pair| pair[0].confidence >= pair[1].confidence));
}
