//! TechShop Core - Shared types library.
//!
//! This crate provides common types used across all TechShop components:
//! - `storefront` - Storefront and admin console binary
//! - `cli` - Command-line maintenance tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no file access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails,
//!   ratings, and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
