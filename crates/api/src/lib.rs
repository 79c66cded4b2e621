//! Backoffice API library.
//!
//! This crate provides the REST administration backend as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Layers
//!
//! - [`routes`] - axum handlers; parse and validate input, map errors
//! - [`api`] - the [`api::AdminApi`] operation surface and response DTOs
//! - [`services`] - business rules and the per-request context
//! - [`db`] - `PostgreSQL` repositories and the filtered-listing builder
//! - [`models`] - domain entities and their inputs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
