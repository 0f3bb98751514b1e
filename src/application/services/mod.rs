//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services are configured from `Settings` but are themselves concrete structs, not traits.

mod demo;
mod tax;
mod tree;

pub use demo::{Check, DemoReport, DemoService};
pub use tax::{Assessment, TaxService};
pub use tree::TreeService;
