//! Tree folding service
//!
//! Runs the stock visitors over trees, refusing trees taller than the configured limit.

use std::fmt;

use termtree::Tree as DisplayTree;
use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{AsF64, CheckedSum, DomainError, Render, Sum, Tree, TreeDisplay};

#[derive(Debug, Clone, Copy)]
pub struct TreeService {
    max_depth: usize,
}

impl TreeService {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tree.max_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Fail if `tree` is deeper than the configured limit.
    pub fn check_depth<E>(&self, tree: &Tree<E>) -> ApplicationResult<usize> {
        let depth = tree.depth();
        debug!("check_depth: depth={} limit={}", depth, self.max_depth);
        if depth > self.max_depth {
            return Err(DomainError::TooDeep {
                depth,
                limit: self.max_depth,
            }
            .into());
        }
        Ok(depth)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn render<E: fmt::Display>(&self, tree: &Tree<E>) -> ApplicationResult<String> {
        self.check_depth(tree)?;
        Ok(tree.visit(&Render))
    }

    #[instrument(level = "debug", skip_all)]
    pub fn sum<E: AsF64>(&self, tree: &Tree<E>) -> ApplicationResult<f64> {
        self.check_depth(tree)?;
        Ok(tree.visit(&Sum))
    }

    #[instrument(level = "debug", skip_all)]
    pub fn checked_sum<E: Copy + Into<i64>>(&self, tree: &Tree<E>) -> ApplicationResult<i64> {
        self.check_depth(tree)?;
        Ok(tree.try_visit(&CheckedSum)?)
    }

    pub fn display<E: fmt::Display>(&self, tree: &Tree<E>) -> ApplicationResult<DisplayTree<String>> {
        self.check_depth(tree)?;
        Ok(tree.visit(&TreeDisplay))
    }
}
