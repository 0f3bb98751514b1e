//! Application layer: services and use cases
//!
//! This layer combines domain logic with loaded settings.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
