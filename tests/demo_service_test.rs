//! Tests for the demonstration scenarios and the services behind them

use anyhow::Result;
use rstest::{fixture, rstest};

use polyfold::application::services::{DemoService, TaxService, TreeService};
use polyfold::application::ApplicationError;
use polyfold::config::Settings;
use polyfold::domain::{Cents, DomainError, StrategyKind, Tree};
use polyfold::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn demo() -> DemoService {
    let settings = Settings::default();
    DemoService::new(
        TaxService::from_settings(&settings).expect("default rate is valid"),
        TreeService::from_settings(&settings),
    )
}

#[rstest]
fn given_default_settings_when_running_entities_then_all_checks_pass(demo: DemoService) -> Result<()> {
    let report = demo.run_entities()?.into_result()?;
    assert_eq!(report.checks.len(), 6);
    assert!(report.checks.iter().all(|c| c.passed()));
    assert!(report.picture.is_none());
    Ok(())
}

#[rstest]
fn given_default_settings_when_running_tree_then_all_checks_pass(demo: DemoService) -> Result<()> {
    let report = demo.run_tree()?.into_result()?;
    let render = report.checks.iter().find(|c| c.name == "render").unwrap();
    assert_eq!(render.actual, "((1^2)^3)");
    let sum = report.checks.iter().find(|c| c.name == "sum").unwrap();
    assert_eq!(sum.actual, "6");
    assert!(report.picture.as_deref().unwrap().starts_with('^'));
    Ok(())
}

#[test]
fn given_shallow_limit_when_running_tree_then_too_deep() {
    let demo = DemoService::new(TaxService::default(), TreeService::new(2));
    let err = demo.run_tree().unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::TooDeep { depth: 3, limit: 2 })
    ));
}

#[test]
fn given_other_rate_when_running_entities_then_mismatch_error() {
    let mut settings = Settings::default();
    settings.tax.rate_bps = 5_000;
    let demo = DemoService::new(
        TaxService::from_settings(&settings).unwrap(),
        TreeService::from_settings(&settings),
    );

    let err = demo.run_entities().unwrap().into_result().unwrap_err();
    match err {
        ApplicationError::ScenarioMismatch {
            scenario,
            expected,
            actual,
        } => {
            assert_eq!(scenario, "person/default income 125");
            assert_eq!(expected, "50");
            assert_eq!(actual, "63");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[rstest]
#[case(StrategyKind::Default, 1_000, false, 400)]
#[case(StrategyKind::Default, 1_000, true, 400)]
#[case(StrategyKind::Dodging, 1_000, false, 0)]
#[case(StrategyKind::Trust, 1_000, false, 400)]
#[case(StrategyKind::Trust, 1_000, true, 0)]
fn given_trust_when_assessing_then_strategy_applies(
    #[case] kind: StrategyKind,
    #[case] income: i64,
    #[case] non_profit: bool,
    #[case] expected: i64,
) -> Result<()> {
    let assessment = TaxService::default().assess_trust(income, non_profit, kind)?;
    assert_eq!(assessment.entity, "trust");
    assert_eq!(assessment.strategy, kind);
    assert_eq!(assessment.tax, Cents(expected));
    Ok(())
}

#[test]
fn given_tree_service_when_checked_sum_overflows_then_domain_error() {
    let tree = Tree::branch(Tree::leaf(i64::MAX), Tree::leaf(i64::MAX));
    let err = TreeService::new(8).checked_sum(&tree).unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Overflow(_))
    ));
}
