//! API client, wire models and shared error types

pub mod client;
pub mod clipboard;
pub mod config;
pub mod detect;
pub mod errors;
pub mod models;
