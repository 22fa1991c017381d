pub mod chat;
pub mod connection;
pub mod error;
pub mod llm_config;
