//! Fixed demonstration scenarios
//!
//! Each scenario computes a handful of values and compares them with
//! hard-coded expectations. A report lists every check; turning it into a
//! result fails on the first divergence.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::application::services::{TaxService, TreeService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Cents, StrategyKind, Tree};

/// One expectation compared against a computed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

impl Check {
    fn new(name: impl Into<String>, expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

#[derive(Debug, Clone, Default)]
pub struct DemoReport {
    pub checks: Vec<Check>,
    /// Optional structural picture of the scenario input, for display.
    pub picture: Option<String>,
}

impl DemoReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(Check::passed)
    }

    /// Err with the first failing check, Ok with the report otherwise.
    pub fn into_result(self) -> ApplicationResult<Self> {
        if let Some(failed) = self.checks.iter().find(|c| !c.passed()) {
            return Err(ApplicationError::ScenarioMismatch {
                scenario: failed.name.clone(),
                expected: failed.expected.clone(),
                actual: failed.actual.clone(),
            });
        }
        Ok(self)
    }
}

pub struct DemoService {
    tax: TaxService,
    tree: TreeService,
}

impl DemoService {
    pub fn new(tax: TaxService, tree: TreeService) -> Self {
        Self { tax, tree }
    }

    /// Taxable entity scenario: every strategy against representative incomes.
    #[instrument(level = "debug", skip(self))]
    pub fn run_entities(&self) -> ApplicationResult<DemoReport> {
        let cases: [(&str, ApplicationResult<Cents>, i64); 6] = [
            (
                "person/default income 125",
                self.tax.assess_person(125, StrategyKind::Default).map(|a| a.tax),
                50,
            ),
            (
                "person/default income 5",
                self.tax.assess_person(5, StrategyKind::Default).map(|a| a.tax),
                2,
            ),
            (
                "person/dodging income 1000000",
                self.tax.assess_person(1_000_000, StrategyKind::Dodging).map(|a| a.tax),
                0,
            ),
            (
                "trust/trust non-profit income 1000000",
                self.tax.assess_trust(1_000_000, true, StrategyKind::Trust).map(|a| a.tax),
                0,
            ),
            (
                "trust/trust for-profit income 1000",
                self.tax.assess_trust(1_000, false, StrategyKind::Trust).map(|a| a.tax),
                400,
            ),
            (
                "trust/default non-profit income 1000",
                self.tax.assess_trust(1_000, true, StrategyKind::Default).map(|a| a.tax),
                400,
            ),
        ];

        let mut report = DemoReport::default();
        for (name, actual, expected) in cases {
            report.checks.push(Check::new(name, Cents(expected), actual?));
        }
        self.log_outcome("entities", &report);
        Ok(report)
    }

    /// Tree scenario: `((1^2)^3)` rendered and summed.
    #[instrument(level = "debug", skip(self))]
    pub fn run_tree(&self) -> ApplicationResult<DemoReport> {
        let tree = Tree::branch(Tree::branch(Tree::leaf(1), Tree::leaf(2)), Tree::leaf(3));

        let mut report = DemoReport::default();
        report
            .checks
            .push(Check::new("render", "((1^2)^3)", self.tree.render(&tree)?));
        report
            .checks
            .push(Check::new("sum", 6.0_f64, self.tree.sum(&tree)?));
        report
            .checks
            .push(Check::new("checked sum", 6_i64, self.tree.checked_sum(&tree)?));
        report.picture = Some(self.tree.display(&tree)?.to_string());

        self.log_outcome("tree", &report);
        Ok(report)
    }

    fn log_outcome(&self, scenario: &str, report: &DemoReport) {
        if report.all_passed() {
            info!("{}: {} checks passed", scenario, report.checks.len());
        } else {
            warn!("{}: scenario diverged from expectations", scenario);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rate;

    #[test]
    fn test_into_result_names_first_failure() {
        let report = DemoReport {
            checks: vec![
                Check::new("ok", 1, 1),
                Check::new("bad", 2, 3),
                Check::new("worse", 4, 5),
            ],
            picture: None,
        };
        assert!(!report.all_passed());
        let err = report.into_result().unwrap_err();
        assert_eq!(err.to_string(), "scenario 'bad' diverged: expected 2, got 3");
    }

    #[test]
    fn test_changed_rate_diverges_from_expectations() {
        let demo = DemoService::new(
            TaxService::new(Rate::from_bps(5_000).unwrap()),
            TreeService::new(16),
        );
        let report = demo.run_entities().unwrap();
        assert!(!report.all_passed());
    }
}
