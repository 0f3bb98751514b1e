//! Pluggable tax computation strategies.
//!
//! A strategy is parameterized by the concrete entity type it accepts. Generic
//! strategies (`DefaultStrategy`, `DodgingStrategy`) work for any [`Taxable`];
//! `TrustStrategy` only exists for [`Trust`], so it can read the non-profit flag
//! and can never be attached to a [`Person`](crate::domain::Person).

use std::fmt;

use crate::domain::entities::{Taxable, Trust};
use crate::domain::money::{Cents, Rate};

/// Pure function from an entity to the tax it owes.
pub trait TaxStrategy<E: ?Sized>: fmt::Debug + Send + Sync {
    fn compute_tax(&self, entity: &E) -> Cents;

    fn kind(&self) -> StrategyKind;
}

/// Names of the available strategies, as used in assessments and log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Default,
    Dodging,
    Trust,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Default => "default",
            StrategyKind::Dodging => "dodging",
            StrategyKind::Trust => "trust",
        };
        f.write_str(name)
    }
}

/// Flat rate on income, rounded half-up to the nearest minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultStrategy {
    rate: Rate,
}

impl DefaultStrategy {
    pub fn new(rate: Rate) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    fn tax_on(&self, income: Cents) -> Cents {
        self.rate.apply(income)
    }
}

impl<E: Taxable> TaxStrategy<E> for DefaultStrategy {
    fn compute_tax(&self, entity: &E) -> Cents {
        self.tax_on(entity.income())
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Default
    }
}

/// Owes nothing, whatever the income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DodgingStrategy;

impl<E: Taxable> TaxStrategy<E> for DodgingStrategy {
    fn compute_tax(&self, _entity: &E) -> Cents {
        Cents::ZERO
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Dodging
    }
}

/// Default taxation, except that non-profit trusts owe nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrustStrategy {
    base: DefaultStrategy,
}

impl TrustStrategy {
    pub fn new(rate: Rate) -> Self {
        Self {
            base: DefaultStrategy::new(rate),
        }
    }
}

impl TaxStrategy<Trust> for TrustStrategy {
    fn compute_tax(&self, trust: &Trust) -> Cents {
        if trust.is_non_profit() {
            Cents::ZERO
        } else {
            self.base.tax_on(trust.income())
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Trust
    }
}
