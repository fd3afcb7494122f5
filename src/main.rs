use std::sync::Arc;

use tower_http::cors::CorsLayer;

use veriflow::config::{AppConfig, FlowConfig};
use veriflow::notify::{Notifier, TracingNotifier};
use veriflow::wallet::{DisconnectedWalletProvider, RpcWalletProvider, WalletProvider};
use veriflow::wizard::{WizardManager, WizardRouteState, wizard_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig {
        bind_addr: std::env::var("VERIFLOW_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        wallet_rpc_url: std::env::var("VERIFLOW_WALLET_RPC").ok(),
    };

    let wallet: Arc<dyn WalletProvider> = match &config.wallet_rpc_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "using JSON-RPC wallet provider");
            Arc::new(RpcWalletProvider::new(url.clone()))
        }
        None => {
            tracing::info!("no wallet provider configured; connect attempts will be refused");
            Arc::new(DisconnectedWalletProvider)
        }
    };
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);

    let kyc = Arc::new(WizardManager::new(
        FlowConfig::individual(),
        Arc::clone(&wallet),
        Arc::clone(&notifier),
    ));
    let kyb = Arc::new(WizardManager::new(FlowConfig::business(), wallet, notifier));

    let app = wizard_routes(WizardRouteState { kyc, kyb }).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("veriflow v{} listening on {}", env!("CARGO_PKG_VERSION"), config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
