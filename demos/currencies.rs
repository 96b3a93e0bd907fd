//! List supported currencies using the continuation API

use ccpayment::{CcPaymentClient, Continuation};
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = CcPaymentClient::from_env()?;
    let (done_tx, done_rx) = oneshot::channel();

    let call_id = client.get_all_supported_currencies(Continuation::split(
        "onCoins",
        move |response| {
            println!("code {:?}: {}", response.code, response.data);
            let _ = done_tx.send(());
        },
        |error| eprintln!("Listing currencies failed: {}", error),
    ))?;
    println!("Dispatched call {}", call_id);

    // The error handler drops the sender, which also ends the wait.
    let _ = done_rx.await;
    Ok(())
}
