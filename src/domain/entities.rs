//! Domain entities: taxable parties bound to a strategy

use std::marker::PhantomData;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::money::Cents;
use crate::domain::strategy::TaxStrategy;

/// Base abstraction of every taxable party.
///
/// `Self` plays the role of the concrete subtype: the strategy returned by
/// [`Taxable::strategy`] accepts exactly `Self`, and [`Taxable::this`] hands the
/// strategy the receiver typed as that subtype. A strategy bound to one entity
/// kind therefore only ever sees instances of that kind.
pub trait Taxable: Sized {
    /// Human-readable entity kind, used in errors and logs.
    const KIND: &'static str;

    fn income(&self) -> Cents;

    fn strategy(&self) -> &dyn TaxStrategy<Self>;

    /// The receiver, typed as the concrete entity.
    fn this(&self) -> &Self;

    /// Tax owed under the bound strategy. Pure; repeated calls agree.
    fn compute_tax(&self) -> Cents {
        self.strategy().compute_tax(self.this())
    }
}

fn validate_income(income: i64) -> DomainResult<Cents> {
    if income < 0 {
        return Err(DomainError::NegativeIncome(income));
    }
    Ok(Cents(income))
}

/// A natural person.
#[derive(Debug)]
pub struct Person {
    income: Cents,
    strategy: Box<dyn TaxStrategy<Person>>,
}

impl Person {
    pub fn new(income: i64, strategy: Box<dyn TaxStrategy<Person>>) -> DomainResult<Self> {
        Ok(Self {
            income: validate_income(income)?,
            strategy,
        })
    }

    pub fn builder() -> EntityBuilder<Person> {
        EntityBuilder::new()
    }
}

impl Taxable for Person {
    const KIND: &'static str = "person";

    fn income(&self) -> Cents {
        self.income
    }

    fn strategy(&self) -> &dyn TaxStrategy<Person> {
        self.strategy.as_ref()
    }

    fn this(&self) -> &Self {
        self
    }
}

/// A trust, optionally registered as non-profit.
#[derive(Debug)]
pub struct Trust {
    income: Cents,
    non_profit: bool,
    strategy: Box<dyn TaxStrategy<Trust>>,
}

impl Trust {
    pub fn new(
        income: i64,
        non_profit: bool,
        strategy: Box<dyn TaxStrategy<Trust>>,
    ) -> DomainResult<Self> {
        Ok(Self {
            income: validate_income(income)?,
            non_profit,
            strategy,
        })
    }

    pub fn builder() -> EntityBuilder<Trust> {
        EntityBuilder::new()
    }

    pub fn is_non_profit(&self) -> bool {
        self.non_profit
    }
}

impl Taxable for Trust {
    const KIND: &'static str = "trust";

    fn income(&self) -> Cents {
        self.income
    }

    fn strategy(&self) -> &dyn TaxStrategy<Trust> {
        self.strategy.as_ref()
    }

    fn this(&self) -> &Self {
        self
    }
}

/// Step-wise construction of an entity whose strategy may not be known yet.
///
/// `build` fails fast when no strategy was supplied, so a half-configured
/// entity can never reach `compute_tax`.
pub struct EntityBuilder<E: Taxable> {
    income: i64,
    non_profit: bool,
    strategy: Option<Box<dyn TaxStrategy<E>>>,
    _entity: PhantomData<E>,
}

impl<E: Taxable> Default for EntityBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Taxable> EntityBuilder<E> {
    pub fn new() -> Self {
        Self {
            income: 0,
            non_profit: false,
            strategy: None,
            _entity: PhantomData,
        }
    }

    pub fn income(mut self, income: i64) -> Self {
        self.income = income;
        self
    }

    pub fn strategy(mut self, strategy: Box<dyn TaxStrategy<E>>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn maybe_strategy(mut self, strategy: Option<Box<dyn TaxStrategy<E>>>) -> Self {
        self.strategy = strategy;
        self
    }

    fn take_strategy(&mut self) -> DomainResult<Box<dyn TaxStrategy<E>>> {
        self.strategy
            .take()
            .ok_or(DomainError::MissingStrategy { entity: E::KIND })
    }
}

impl EntityBuilder<Person> {
    pub fn build(mut self) -> DomainResult<Person> {
        let strategy = self.take_strategy()?;
        Person::new(self.income, strategy)
    }
}

impl EntityBuilder<Trust> {
    pub fn non_profit(mut self, non_profit: bool) -> Self {
        self.non_profit = non_profit;
        self
    }

    pub fn build(mut self) -> DomainResult<Trust> {
        let strategy = self.take_strategy()?;
        Trust::new(self.income, self.non_profit, strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::{DefaultStrategy, DodgingStrategy, StrategyKind, TrustStrategy};

    #[test]
    fn test_person_with_default_strategy() {
        let person = Person::new(125, Box::new(DefaultStrategy::default())).unwrap();
        assert_eq!(person.compute_tax(), Cents(50));
        assert_eq!(person.strategy().kind(), StrategyKind::Default);
    }

    #[test]
    fn test_negative_income_fails_at_construction() {
        let err = Person::new(-1, Box::new(DodgingStrategy)).unwrap_err();
        assert_eq!(err, DomainError::NegativeIncome(-1));
    }

    #[test]
    fn test_builder_without_strategy_fails_fast() {
        let err = Trust::builder().income(100).non_profit(true).build().unwrap_err();
        assert_eq!(err, DomainError::MissingStrategy { entity: "trust" });

        let err = Person::builder().maybe_strategy(None).build().unwrap_err();
        assert_eq!(err, DomainError::MissingStrategy { entity: "person" });
    }

    #[test]
    fn test_builder_with_strategy() {
        let trust = Trust::builder()
            .income(1_000)
            .non_profit(false)
            .strategy(Box::new(TrustStrategy::default()))
            .build()
            .unwrap();
        assert_eq!(trust.income(), Cents(1_000));
        assert!(!trust.is_non_profit());
        assert_eq!(trust.compute_tax(), Cents(400));
    }

    #[test]
    fn test_this_is_the_receiver() {
        let person = Person::new(7, Box::new(DodgingStrategy)).unwrap();
        assert!(std::ptr::eq(person.this(), &person));
    }
}
