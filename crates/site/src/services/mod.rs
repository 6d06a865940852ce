//! External collaborators.
//!
//! - [`email`] - Transactional email delivery over a mail API

pub mod email;

pub use email::{EmailClient, EmailError};
