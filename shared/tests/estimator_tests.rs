//! Estimator integration tests
//!
//! Tests for the unit-cost estimator including:
//! - Amount rounding for any non-negative area and rate
//! - Cost line only for positive prices
//! - Type defaults never overwriting a positive rate
//! - Type preference surviving a reload

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    round2, EstimateKind, EstimatorForm, MemoryStore, Preferences, ESTIMATOR_KIND_KEY,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn form(kind: EstimateKind, area: &str, rate: &str, price: &str) -> EstimatorForm {
    EstimatorForm {
        kind,
        area: area.to_string(),
        rate: rate.to_string(),
        price: price.to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_seed_estimate_for_two_hectares() {
        let mut f = EstimatorForm::new(EstimateKind::Seed);
        f.area = "2".into();
        f.apply_defaults();
        f.price = "60".into();

        let estimate = f.calculate();
        assert_eq!(estimate.amount, dec("50"));
        assert_eq!(estimate.cost, Some(dec("3000")));
    }

    #[test]
    fn test_type_switch_then_calculate() {
        let mut f = EstimatorForm::new(EstimateKind::Seed);
        f.apply_defaults();
        assert_eq!(f.rate, "25");

        // A filled rate survives the switch
        f.select_kind(EstimateKind::Fertilizer);
        assert_eq!(f.rate, "25");
        assert_eq!(f.calculate().amount_display(), "25 kg");

        // A cleared rate picks up the new default
        f.clear();
        f.select_kind(EstimateKind::Labor);
        assert_eq!(f.rate, "40");
        assert_eq!(f.calculate().amount_display(), "40 hrs");
    }

    #[test]
    fn test_kind_preference_survives_reload() {
        let store = MemoryStore::new();
        Preferences::new(&store).save_estimator_kind(EstimateKind::Irrigation);

        // Reload: a fresh view over the same storage
        let restored = Preferences::new(&store).estimator_kind().unwrap_or_default();
        let mut f = EstimatorForm::new(restored);
        f.apply_defaults();

        assert_eq!(f.kind, EstimateKind::Irrigation);
        assert_eq!(f.rate, "10");
        assert_eq!(f.labels().unit, "hrs");
    }

    #[test]
    fn test_clear_keeps_saved_kind() {
        let store = MemoryStore::new();
        let prefs = Preferences::new(&store);
        let mut f = form(EstimateKind::Labor, "3", "40", "120");
        prefs.save_estimator_kind(f.kind);

        f.clear();
        assert_eq!(prefs.estimator_kind(), Some(EstimateKind::Labor));
        assert_eq!(
            store.snapshot().get(ESTIMATOR_KIND_KEY).map(String::as_str),
            Some("labor")
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn kind_strategy() -> impl Strategy<Value = EstimateKind> {
        prop::sample::select(EstimateKind::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The amount is area * rate rounded to two places
        #[test]
        fn prop_amount_is_rounded_product(
            area in 0.0f64..10_000.0,
            rate in 0.0f64..1_000.0,
            kind in kind_strategy()
        ) {
            let estimate = form(kind, &area.to_string(), &rate.to_string(), "").calculate();

            prop_assert_eq!(estimate.amount, round2(area * rate));
            prop_assert!(estimate.amount >= Decimal::ZERO);
            prop_assert!(estimate.amount.scale() <= 2);

            let exact = Decimal::from_f64_retain(area * rate).unwrap();
            prop_assert!((estimate.amount - exact).abs() <= dec("0.005"));
        }

        /// Zero, negative or non-numeric prices omit the cost
        #[test]
        fn prop_no_cost_without_positive_price(
            area in 0.0f64..100.0,
            rate in 0.0f64..100.0,
            price in prop_oneof![
                (-1_000.0f64..=0.0).prop_map(|p| p.to_string()),
                "[a-z]{0,6}",
            ]
        ) {
            let estimate = form(EstimateKind::Other, &area.to_string(), &rate.to_string(), &price)
                .calculate();
            prop_assert_eq!(estimate.cost, None);
        }

        /// Positive prices price the rounded amount
        #[test]
        fn prop_cost_uses_rounded_amount(
            area in 0.0f64..1_000.0,
            rate in 0.0f64..500.0,
            price in 0.01f64..1_000.0
        ) {
            let estimate = form(EstimateKind::Seed, &area.to_string(), &rate.to_string(), &price.to_string())
                .calculate();
            let amount = round2(area * rate);
            let amount_f64: f64 = amount.to_string().parse().unwrap();

            prop_assert_eq!(estimate.cost, Some(round2(amount_f64 * price)));
        }

        /// Switching type never overwrites a positive rate
        #[test]
        fn prop_type_switch_keeps_positive_rate(
            rate in 0.01f64..10_000.0,
            from in kind_strategy(),
            to in kind_strategy()
        ) {
            let text = rate.to_string();
            let mut f = form(from, "1", &text, "");

            prop_assert!(!f.select_kind(to));
            prop_assert_eq!(f.rate, text);
        }

        /// Switching type fills the default into empty or non-positive rates
        #[test]
        fn prop_type_switch_fills_default(
            rate in prop_oneof![
                Just(String::new()),
                Just("0".to_string()),
                (-100.0f64..0.0).prop_map(|r| r.to_string()),
            ],
            to in kind_strategy()
        ) {
            let mut f = form(EstimateKind::Seed, "1", &rate, "");
            prop_assert!(f.select_kind(to));
            prop_assert_eq!(f.rate, to.default_rate().to_string());
        }

        /// Garbage in area or rate yields zero, never a panic
        #[test]
        fn prop_garbage_is_zero(area in "[a-z ]{0,8}", rate in "\\PC{0,8}") {
            let estimate = form(EstimateKind::Fertilizer, &area, &rate, "10").calculate();
            prop_assert_eq!(estimate.amount, Decimal::ZERO);
        }
    }
}
