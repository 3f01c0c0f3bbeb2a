//! The model prelude re-exports all types in the model sub-modules.
//!
//! This allows for quick and easy access to all of the model types.
//!
//! # Examples
//!
//! Import all model types into scope:
//!
//! ```rust,no_run
//! use riposte::model::prelude::*;
//! ```

pub use super::application::*;
pub use super::channel::*;
pub use super::guild::*;
pub use super::id::*;
pub use super::user::*;
pub use super::{ModelError, Timestamp};
