//! Log in against a running FinGestor backend and list a few records.
//!
//! ```text
//! FINGESTOR_API_URL=http://localhost:8000/api/v1 \
//! FINGESTOR_SESSION_DIR=/tmp/fingestor \
//! cargo run -p fingestor-client --example session_cli -- admin@example.com admin123
//! ```
//!
//! With a session directory set, a second run without credentials reuses
//! the stored session.

use std::sync::Arc;

use fingestor_client::{ClientConfig, FinGestorClient, MemoryNavigator, RouteAccess};
use shared::models::Page;
use shared::util::format_brl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fingestor_client=info".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "Starting session demo");

    let navigator = Arc::new(MemoryNavigator::new(config.login_path.clone()));
    let client = FinGestorClient::from_config(config, navigator.clone())?;

    if let Some(revalidation) = client.session().rehydrate().await {
        revalidation.await?;
    }

    let mut args = std::env::args().skip(1);
    if let (Some(email), Some(password)) = (args.next(), args.next()) {
        let outcome = client.session().login(&email, &password).await;
        if let Some(error) = outcome.error {
            anyhow::bail!("login failed: {error}");
        }
    }

    if let Some(target) = client.redirect_for(RouteAccess::Protected) {
        println!("Not logged in (would redirect to {target}). Pass email and password.");
        return Ok(());
    }
    navigator.set_path(client.config().home_path.clone());

    if let Some(user) = client.session().user() {
        println!("Logged in as {}", user.display_name());
    }

    let kpis = client.dashboard().kpis().await?;
    println!(
        "Revenue this month: {} ({})",
        format_brl(kpis.financial_kpis.revenue.current),
        kpis.financial_kpis.revenue.formatted_variation()
    );

    for customer in client.customers().list(Page::new(0, 10)).await? {
        println!("  {:<40} {}", customer.name, customer.formatted_document());
    }

    Ok(())
}
