use sea_orm::Database;
use tracing::info;

use filmcrew_api::chat::ChatRegistry;
use filmcrew_api::config::ApiConfig;
use filmcrew_api::infra::email::{EmailConfig, Mailer};
use filmcrew_api::infra::storage::StorageClient;
use filmcrew_api::router::build_router;
use filmcrew_api::state::AppState;
use filmcrew_api::usecase::maintenance::MarkStaleProjectsUseCase;
use filmcrew_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = match EmailConfig::from_env() {
        Some(email_config) => Some(Mailer::new(&email_config).expect("invalid SMTP configuration")),
        None => {
            info!("SMTP_HOST not set; verification codes will only be logged");
            None
        }
    };

    let storage = StorageClient::new(
        config.storage_url.clone(),
        config.storage_key.clone(),
        config.storage_bucket.clone(),
    );

    let state = AppState {
        db: db.clone(),
        jwt_secret: config.jwt_secret,
        chat: ChatRegistry::new(),
        mailer,
        storage,
    };

    spawn_stale_project_sweep(state.clone());

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

/// Hourly sweep marking long-untouched active projects dead. Failures are
/// logged and retried on the next tick.
fn spawn_stale_project_sweep(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            let usecase = MarkStaleProjectsUseCase {
                projects: state.project_repo(),
            };
            match usecase.execute().await {
                Ok(0) => {}
                Ok(swept) => info!(swept, "marked stale projects dead"),
                Err(e) => tracing::error!(error = %e, "stale project sweep failed"),
            }
        }
    });
}
