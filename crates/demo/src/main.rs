use stashpay_client::{ClaimLinkFlow, TracingNotifier, TransferFlow, TransferRequest};
use stashpay_ledger_mock::{MockLedger, TestnetScenario};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_target(false)
        .compact()
        .init();

    let notifier = TracingNotifier;

    info!("Transferring 1.5 to {}", "0xabc");
    let scenario = TestnetScenario::new().with_ledger(MockLedger::new().with_digest("TX1"));
    let mut transfer = TransferFlow::new(
        &scenario.keys,
        &scenario.ledger,
        &notifier,
        scenario.network,
    );
    let outcome = transfer
        .run(&TransferRequest {
            recipient_address: "0xabc".to_string(),
            amount: "1.5".to_string(),
        })
        .await;
    info!("Transfer outcome: {outcome:?}");

    info!("Creating a claimable link for {}", scenario.sender);
    let scenario = TestnetScenario::new();
    let mut claim = ClaimLinkFlow::new(
        &scenario.faucet,
        &scenario.keys,
        &scenario.ledger,
        &notifier,
        scenario.network,
        scenario.sender.as_str(),
    );
    let outcome = claim.run().await;
    info!("Claim-link outcome: {outcome:?}");
    if let Some(link) = claim.link() {
        info!("Share this link: {link}");
    }

    Ok(())
}
