//! Core types for Meadowlark Travel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod email;
pub mod id;
pub mod role;

pub use currency::{Currency, convert_from_usd};
pub use email::{Email, EmailError};
pub use id::*;
pub use role::{Role, RoleParseError};
