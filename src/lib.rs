//! Strategy-parameterized taxable entities and visitor folds over immutable binary trees.
//!
//! - [`domain`]: entities bound to tax strategies, trees and their visitors
//! - [`application`]: services that apply configured rates and depth limits
//! - [`cli`]: the two demonstration entry points

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
