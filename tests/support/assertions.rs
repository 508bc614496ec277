use std::collections::BTreeMap;

use rust_decimal::Decimal;
use surebet::domain::Opportunity;

pub fn assert_decimal_near(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Every outcome must return the same payout for the given stakes.
pub fn assert_equal_payouts(opp: &Opportunity, stakes: &BTreeMap<String, Decimal>, tolerance: Decimal) {
    let payouts: Vec<Decimal> = stakes
        .iter()
        .map(|(outcome, stake)| {
            let best = opp
                .outcome(outcome)
                .unwrap_or_else(|| panic!("no best odds for {outcome}"));
            stake * best.odds
        })
        .collect();

    for payout in &payouts {
        assert_decimal_near(*payout, payouts[0], tolerance);
    }
}
