//! Meadowlark Core - Shared types library.
//!
//! This crate provides common types used across all Meadowlark Travel
//! components:
//! - `site` - Public-facing travel storefront
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, the closed
//!   [`types::Role`] and [`types::Currency`] sets, and currency conversion

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
