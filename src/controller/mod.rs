//! Interaction controllers behind the translation form and health widget

pub mod health;
pub mod translation;
