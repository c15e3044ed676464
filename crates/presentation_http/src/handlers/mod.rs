//! HTTP request handlers

pub mod health;
pub mod search;
pub mod settings;
