//! Backoffice Core - Shared types library.
//!
//! This crate provides common types used across all Backoffice components:
//! - `api` - The REST administration backend
//! - `cli` - Command-line tools for migrations and seeding
//! - `integration-tests` - Database-backed scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, entity enums and pagination math

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
