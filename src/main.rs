mod application;
mod domain;
mod infrastructure;
mod interfaces;

use crate::application::ChatService;
use crate::infrastructure::config::Settings;
use crate::infrastructure::db::ConnectionManager;
use crate::infrastructure::llm_clients::OpenAIClient;
use crate::interfaces::http::{start_server, HttpState};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let settings = Settings::from_env();

    let connections = Arc::new(ConnectionManager::new());
    let chat = Arc::new(ChatService::new(
        connections.clone(),
        Arc::new(OpenAIClient::new()),
        settings.llm.clone(),
    ));

    let server = start_server(
        HttpState { chat, connections },
        &settings.host,
        settings.port,
    )?;

    info!(
        "schemachat listening on http://{}:{}",
        settings.host, settings.port
    );

    server.await
}
