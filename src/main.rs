//! Service entry point: configuration, tracing, the event-loop thread, and
//! the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mealplan_bot::adapters::http::{app_router, WebhookAppState};
use mealplan_bot::adapters::supabase::{
    SupabaseActionLog, SupabaseClient, SupabasePaymentLedger, SupabasePurchaserRepository,
};
use mealplan_bot::adapters::telegram::TelegramClient;
use mealplan_bot::application::handlers::payment::{
    AdminNotifier, FulfillmentDispatcher, ProcessPaymentEventHandler,
};
use mealplan_bot::application::handlers::telegram::DispatchUpdateHandler;
use mealplan_bot::application::{BotContext, EventLoopBridge};
use mealplan_bot::config::AppConfig;
use mealplan_bot::domain::conversation::ConversationStateStore;
use mealplan_bot::domain::payment::{Plan, PriceBook, StripeSignatureVerifier};
use mealplan_bot::ports::{ActionLog, BotGateway, Messenger, PaymentLedger, PurchaserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.is_production());
    config.validate()?;

    let addr = config.server.socket_addr();
    let process_timeout = Duration::from_secs(config.server.request_timeout_secs);
    let verifier = Arc::new(StripeSignatureVerifier::new(
        config.payment.stripe_webhook_secret.clone(),
    ));
    let bot_webhook_url = config.telegram.webhook_url.clone().unwrap_or_default();

    let bridge = EventLoopBridge::start("bot-event-loop", {
        let config = config.clone();
        move || build_bot_context(&config)
    })?;

    let state = WebhookAppState {
        verifier,
        bridge: bridge.clone(),
        bot_webhook_url,
        process_timeout,
    };

    let app = app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs + 5,
        )));

    tracing::info!(%addr, environment = ?config.server.environment, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped, shutting down event loop");
    bridge.shutdown();
    Ok(())
}

/// Builds everything that lives on the event-loop thread.
fn build_bot_context(config: &AppConfig) -> BotContext {
    let telegram = Arc::new(TelegramClient::new(config.telegram.bot_token.clone()));
    let messenger: Arc<dyn Messenger> = telegram.clone();
    let gateway: Arc<dyn BotGateway> = telegram;

    let supabase = Arc::new(SupabaseClient::new(
        config.store.supabase_url.clone(),
        config.store.service_key.clone(),
    ));
    let ledger: Arc<dyn PaymentLedger> = Arc::new(SupabasePaymentLedger::new(supabase.clone()));
    let purchasers: Arc<dyn PurchaserRepository> =
        Arc::new(SupabasePurchaserRepository::new(supabase.clone()));
    let actions: Arc<dyn ActionLog> = Arc::new(SupabaseActionLog::new(supabase));

    let fulfillment = FulfillmentDispatcher::new(
        messenger.clone(),
        config.fulfillment.artifact_dir.clone(),
        Duration::from_millis(config.fulfillment.send_delay_ms),
        config.fulfillment.followup_form_url.clone(),
    );
    let notifier = AdminNotifier::new(messenger.clone(), config.telegram.admin_id_list());

    let mut price_entries = Vec::new();
    if let Some(price_id) = &config.payment.basic_price_id {
        price_entries.push((price_id.clone(), Plan::Basic));
    }
    if let Some(price_id) = &config.payment.premium_price_id {
        price_entries.push((price_id.clone(), Plan::Premium));
    }
    let price_book = PriceBook::new(price_entries, config.payment.pricing_mode.is_uniform_nominal());

    let payments = ProcessPaymentEventHandler::new(
        ledger,
        purchasers,
        actions,
        fulfillment,
        notifier,
        price_book,
        config.payment.pricing_mode.is_test_mode(),
    );
    let updates = DispatchUpdateHandler::new(messenger, Arc::new(ConversationStateStore::new()));

    BotContext {
        payments,
        updates,
        gateway,
    }
}

fn init_tracing(log_level: &str, production: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if production {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
