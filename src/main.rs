mod app_state;
mod config;
mod console;
mod error;
mod handlers;
mod issuer;
mod monitor;
mod session;

use axum::{
    Router,
    routing::{delete, get, post},
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_state::AppState;
use config::Config;
use console::ConsoleStore;
use handlers::{links, payment};
use monitor::{SimulatedConfirmation, StaticAddressBook};
use session::SessionRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "owl_pay_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse configuration
    let config = Arc::new(Config::parse());

    // Confirmation feed (simulated until a chain monitor is wired in)
    let confirmations: Arc<dyn monitor::ConfirmationSource> = Arc::new(
        SimulatedConfirmation::new(Duration::from_secs(config.confirm_delay_secs)),
    );

    // Destination addresses and amounts for display
    let addresses: Arc<dyn monitor::AddressProvider> = Arc::new(StaticAddressBook);

    // Create shared state
    let state = AppState {
        config: config.clone(),
        sessions: Arc::new(SessionRegistry::new()),
        confirmations,
        addresses,
        console: Arc::new(ConsoleStore::new()),
    };

    // Build router
    let app = Router::new()
        // Payment link issuing
        .route("/api/links", post(links::create_link))
        // Payment widget endpoints
        .route(
            "/payment/{id}",
            get(payment::open_payment).delete(payment::close_payment),
        )
        .route("/payment/{id}/status", get(payment::payment_status))
        .route("/payment/{id}/confirm", post(payment::confirm_payment))
        // Merchant console
        .route("/api/transactions", get(handlers::console::list_transactions))
        .route("/api/balances", get(handlers::console::list_balances))
        .route(
            "/api/keys",
            get(handlers::console::list_api_keys).post(handlers::console::create_api_key),
        )
        .route("/api/keys/{id}", delete(handlers::console::delete_api_key))
        .route(
            "/api/plans",
            get(handlers::console::list_plans).post(handlers::console::create_plan),
        )
        .route("/api/plans/{id}", delete(handlers::console::delete_plan))
        .route(
            "/api/payouts/wallets",
            get(handlers::console::list_wallets).post(handlers::console::create_wallet),
        )
        .route(
            "/api/payouts/wallets/{id}",
            delete(handlers::console::delete_wallet),
        )
        .route(
            "/api/payouts/rules",
            get(handlers::console::list_rules).post(handlers::console::create_rule),
        )
        .route(
            "/api/payouts/rules/{id}",
            delete(handlers::console::delete_rule),
        )
        // Add middleware
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        // Add shared state
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.socket_addr()).await?;

    tracing::info!("Server running on {}", config.socket_addr());
    tracing::info!("Domain: {}", config.domain);
    tracing::info!("Payment base: {}", config.payment_base());

    axum::serve(listener, app).await?;

    Ok(())
}
