//! Look up a coin balance
//!
//! Reads `CCPAYMENT_APP_ID` / `CCPAYMENT_APP_SECRET` from the environment and
//! takes the coin id as the first argument.

use ccpayment::CcPaymentClient;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let coin_id = std::env::args().nth(1).unwrap_or_else(|| "1280".to_string());

    let client = CcPaymentClient::from_env()?;

    println!("Fetching balance for coin {}...", coin_id);
    match client.coin_balance(&coin_id).await {
        Ok(balance) => println!("Balance of {}: {}", balance.coin_id, balance.balance),
        Err(e) => println!("Request failed: {}", e),
    }

    Ok(())
}
