// Property-based tests for the daily schedule hour cap.
//
// The invariant under test: for any sequence of accepted schedule writes,
// the total scheduled hours for one employee and day never exceed 24, and
// a rejected write changes nothing.

use kadra::schedules::services::{check_hours, MAX_DAILY_HOURS};
use proptest::prelude::*;

#[test]
fn accepts_the_documented_scenarios() {
    // Employee already has 10h + 14h on day D: one more hour must not fit
    assert!(check_hours(10.0 + 14.0, 1.0).is_err());

    // A fresh day takes 20h without complaint
    assert!(check_hours(0.0, 20.0).is_ok());
}

#[test]
fn accepts_exactly_the_cap() {
    assert!(check_hours(0.0, 24.0).is_ok());
    assert!(check_hours(23.5, 0.5).is_ok());
}

#[test]
fn rejects_out_of_range_blocks() {
    assert!(check_hours(0.0, 0.0).is_err());
    assert!(check_hours(0.0, -3.0).is_err());
    assert!(check_hours(0.0, 24.01).is_err());
}

proptest! {
    #[test]
    fn accepted_sequences_never_exceed_the_cap(
        blocks in prop::collection::vec(0.25f64..30.0, 0..40)
    ) {
        let mut total = 0.0f64;

        for hours in blocks {
            match check_hours(total, hours) {
                Ok(()) => total += hours,
                Err(_) => {
                    // A rejected block must not have fit
                    prop_assert!(
                        hours <= 0.0
                            || hours > MAX_DAILY_HOURS
                            || total + hours > MAX_DAILY_HOURS
                    );
                }
            }
            prop_assert!(total <= MAX_DAILY_HOURS, "cap exceeded: {}", total);
        }
    }

    #[test]
    fn single_blocks_within_cap_are_accepted(hours in 0.25f64..=24.0) {
        prop_assert!(check_hours(0.0, hours).is_ok());
    }

    #[test]
    fn rejection_is_stable(existing in 0.0f64..=24.0, hours in 0.25f64..30.0) {
        // Same inputs, same verdict: validation is a pure function
        let first = check_hours(existing, hours).is_ok();
        let second = check_hours(existing, hours).is_ok();
        prop_assert_eq!(first, second);
    }
}
