//! Todo API Server
//!
//! Serves the HTTP API on a local listener, or as a Lambda function when
//! started by the Lambda runtime.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::{AppState, create_router};
use todo_core::auth::Authorizer;
use todo_core::storage::{StorageConfig, StorageService};
use todo_core::todo::TodoService;
use todo_db::{DynamoTodoRepository, connect};
use todo_shared::AppConfig;

const DEFAULT_FILTER: &str = "todo=debug,todo_api=debug,todo_core=debug,todo_db=debug,tower_http=debug";

/// Set by the Lambda runtime in every function environment.
fn running_on_lambda() -> bool {
    std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_some()
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    // CloudWatch stamps each line itself.
    if json {
        registry
            .with(fmt::layer().json().without_time().with_ansi(false))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let on_lambda = running_on_lambda();
    init_tracing(on_lambda);

    let config = AppConfig::load().context("Failed to load configuration")?;

    let client = connect(&config.table).await;
    let repo = Arc::new(DynamoTodoRepository::new(client, config.table.name.clone()));
    info!(table = %config.table.name, "Item table configured");

    let storage = StorageService::from_config(StorageConfig::from(&config.storage))
        .context("Failed to configure attachment storage")?;
    info!(
        bucket = %storage.bucket(),
        url_expiration_secs = config.storage.url_expiration_secs,
        "Attachment storage configured"
    );

    let certificate = config
        .auth
        .certificate_pem()
        .context("Failed to load auth certificate")?;
    let authorizer = Authorizer::from_pem(&certificate).context("Invalid auth certificate")?;

    let state = AppState::new(TodoService::new(repo, Arc::new(storage)), authorizer);
    let app = create_router(state);

    if on_lambda {
        info!("Starting Lambda HTTP handler");
        return lambda_http::run(app).await.map_err(|e| anyhow::anyhow!(e));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
