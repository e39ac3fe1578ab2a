//! Core sign-in library (validation, auth backends, config, logging).

pub mod auth;
pub mod config;
pub mod logging;
pub mod validation;
