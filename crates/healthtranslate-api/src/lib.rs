pub mod accounts;
pub mod auth;
pub mod chat;
pub mod chat_history;
pub mod error;
pub mod extract;
pub mod languages;
pub mod middleware;
pub mod routes;
pub mod together;
pub mod token;
pub mod translation;
pub mod tts;
