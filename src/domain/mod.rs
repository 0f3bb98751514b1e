//! Domain layer: entities, strategies, trees and visitors
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod money;
pub mod strategy;
pub mod tree;
pub mod visitors;

pub use entities::{EntityBuilder, Person, Taxable, Trust};
pub use error::{DomainError, DomainResult};
pub use money::{Cents, Rate};
pub use strategy::{DefaultStrategy, DodgingStrategy, StrategyKind, TaxStrategy, TrustStrategy};
pub use tree::{Tree, TreeRef, TryVisitor, Visitor};
pub use visitors::{AsF64, CheckedSum, Depth, FnVisitor, LeafCount, Render, Sum, TreeDisplay};
