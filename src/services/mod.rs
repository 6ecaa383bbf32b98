// src/services/mod.rs
pub mod chat_api;
pub mod chat_session;
