use crate::application::ChatService;
use crate::domain::chat::ChatMessage;
use crate::domain::connection::{ConnectParams, ConnectResult};
use crate::domain::error::AppError;
use crate::infrastructure::db::ConnectionManager;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

pub struct HttpState {
    pub chat: Arc<ChatService>,
    pub connections: Arc<ConnectionManager>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub connected: bool,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../../static/index.html"))
}

#[post("/connect")]
async fn connect(data: web::Data<HttpState>, req: web::Json<ConnectParams>) -> impl Responder {
    info!(
        "Connect requested: {}:{}/{}",
        req.host, req.port, req.database
    );

    match data.connections.connect(&req).await {
        Ok(()) => HttpResponse::Ok().json(ConnectResult {
            success: true,
            message: format!("Connected to database '{}'", req.database.trim()),
        }),
        Err(e) => {
            error!("Connect failed: {}", e);
            HttpResponse::Ok().json(ConnectResult {
                success: false,
                message: e.to_string(),
            })
        }
    }
}

#[post("/chat")]
async fn chat(data: web::Data<HttpState>, req: web::Json<ChatRequest>) -> impl Responder {
    match data.chat.submit(&req.message).await {
        Ok((user, assistant)) => HttpResponse::Ok().json(ChatResponse { user, assistant }),
        Err(AppError::ValidationError(msg)) => HttpResponse::BadRequest().body(msg),
        Err(e) => {
            error!("Chat turn failed: {}", e);
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/history")]
async fn history(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.chat.history().await)
}

#[get("/status")]
async fn status(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        connected: data.connections.is_connected().await,
    })
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(index)
            .service(
                web::scope("/api")
                    .service(connect)
                    .service(chat)
                    .service(history)
                    .service(status),
            )
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
