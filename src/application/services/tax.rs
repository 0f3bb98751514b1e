//! Tax assessment service
//!
//! Binds configured strategies to entities and computes what they owe.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    Cents, DefaultStrategy, DodgingStrategy, Person, Rate, StrategyKind, TaxStrategy, Taxable,
    Trust, TrustStrategy,
};

/// Outcome of assessing one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub entity: &'static str,
    pub strategy: StrategyKind,
    pub income: Cents,
    pub tax: Cents,
}

/// Service for constructing strategies and assessing entities.
#[derive(Debug, Clone, Copy)]
pub struct TaxService {
    rate: Rate,
}

impl Default for TaxService {
    fn default() -> Self {
        Self::new(Rate::DEFAULT)
    }
}

impl TaxService {
    pub fn new(rate: Rate) -> Self {
        Self { rate }
    }

    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        Ok(Self::new(Rate::from_bps(settings.tax.rate_bps)?))
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Strategy for a person. The trust strategy needs a trust and is refused.
    pub fn person_strategy(&self, kind: StrategyKind) -> ApplicationResult<Box<dyn TaxStrategy<Person>>> {
        match kind {
            StrategyKind::Default => Ok(Box::new(DefaultStrategy::new(self.rate))),
            StrategyKind::Dodging => Ok(Box::new(DodgingStrategy)),
            StrategyKind::Trust => Err(ApplicationError::StrategyNotApplicable {
                strategy: kind.to_string(),
                entity: Person::KIND,
            }),
        }
    }

    pub fn trust_strategy(&self, kind: StrategyKind) -> Box<dyn TaxStrategy<Trust>> {
        match kind {
            StrategyKind::Default => Box::new(DefaultStrategy::new(self.rate)),
            StrategyKind::Dodging => Box::new(DodgingStrategy),
            StrategyKind::Trust => Box::new(TrustStrategy::new(self.rate)),
        }
    }

    /// Compute the tax owed by an already constructed entity.
    pub fn assess<E: Taxable>(&self, entity: &E) -> Assessment {
        let assessment = Assessment {
            entity: E::KIND,
            strategy: entity.strategy().kind(),
            income: entity.income(),
            tax: entity.compute_tax(),
        };
        debug!(
            "assess: {} income={} strategy={} tax={}",
            assessment.entity, assessment.income, assessment.strategy, assessment.tax
        );
        assessment
    }

    #[instrument(level = "debug", skip(self))]
    pub fn assess_person(&self, income: i64, kind: StrategyKind) -> ApplicationResult<Assessment> {
        let person = Person::new(income, self.person_strategy(kind)?)?;
        Ok(self.assess(&person))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn assess_trust(
        &self,
        income: i64,
        non_profit: bool,
        kind: StrategyKind,
    ) -> ApplicationResult<Assessment> {
        let trust = Trust::new(income, non_profit, self.trust_strategy(kind))?;
        Ok(self.assess(&trust))
    }
}
