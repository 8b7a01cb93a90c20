//! Weekly dose distribution
//!
//! Splits a weekly total into seven daily doses that are each a multiple of a
//! step size (1.25 mg = ¼ of a 5 mg tablet, or 2.5 mg). Days receive either a
//! base dose or one step more; the higher days are spread with a fixed
//! hand-tuned index table so that patients see a regular pattern.
//!
//! # Known limitation
//!
//! The run correction is a heuristic. A week is circular (Sunday is adjacent to
//! Monday) and a run of more than three equal days triggers one re-placement of
//! the minority dose on the table entry for its own count. When the higher dose
//! is already the minority that entry is the balanced placement itself, so only
//! weeks with four or more higher days can change. Uniform weeks and weeks with
//! one or six higher days cannot be broken up this way and keep their long run;
//! the schedule is returned as is.

mod error;
mod tablets;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub use error::DistributionError;
pub use tablets::{describe_tablets, format_tablets, TABLET_MG};

/// Days in a dosing week
pub const DAYS_PER_WEEK: usize = 7;

/// Quarter of a 5 mg tablet
pub const QUARTER_TABLET_STEP: Decimal = dec!(1.25);

/// Half of a 5 mg tablet
pub const HALF_TABLET_STEP: Decimal = dec!(2.5);

/// Longest acceptable run of equal consecutive doses
pub const MAX_EQUAL_RUN: usize = 3;

/// Day indices (0 = Monday) receiving the minority dose, per count
const BALANCED_INDICES: [&[usize]; DAYS_PER_WEEK] = [
    &[],
    &[3],
    &[2, 5],
    &[1, 3, 5],
    &[0, 2, 3, 5],
    &[0, 1, 3, 4, 5],
    &[0, 1, 2, 3, 4, 5],
];

/// Split `weekly_total` into seven daily doses, Monday first
///
/// Every dose is a multiple of `step` and the doses sum exactly to
/// `weekly_total`.
///
/// # Errors
/// The step must be positive and the total non-negative and a whole number of
/// steps.
pub fn distribute(
    weekly_total: Decimal,
    step: Decimal,
) -> Result<[Decimal; DAYS_PER_WEEK], DistributionError> {
    if step <= Decimal::ZERO {
        return Err(DistributionError::NonPositiveStep { step });
    }
    if weekly_total < Decimal::ZERO {
        return Err(DistributionError::NegativeTotal {
            total: weekly_total,
        });
    }
    if !(weekly_total % step).is_zero() {
        return Err(DistributionError::MisalignedTotal {
            total: weekly_total,
            step,
        });
    }

    let units = (weekly_total / step)
        .to_usize()
        .ok_or(DistributionError::TooLarge {
            total: weekly_total,
            step,
        })?;
    let base_units = units / DAYS_PER_WEEK;
    let high_count = units % DAYS_PER_WEEK;

    let low = step * Decimal::from(base_units);
    let high = low + step;

    let balanced = place(high, low, high_count);
    if high_count == 0 || longest_circular_run(&balanced) <= MAX_EQUAL_RUN {
        return Ok(balanced);
    }

    // Higher dose in the minority: its table entry is the balanced placement
    let low_count = DAYS_PER_WEEK - high_count;
    if high_count <= low_count {
        return Ok(balanced);
    }

    let packed = place(low, high, low_count);
    tracing::trace!(
        %weekly_total,
        %step,
        before = longest_circular_run(&balanced),
        after = longest_circular_run(&packed),
        "dose distribution run correction"
    );
    Ok(packed)
}

/// `minority` on the balanced indices for `count`, `majority` elsewhere
fn place(minority: Decimal, majority: Decimal, count: usize) -> [Decimal; DAYS_PER_WEEK] {
    let mut days = [majority; DAYS_PER_WEEK];
    for &i in BALANCED_INDICES[count] {
        days[i] = minority;
    }
    days
}

/// Longest run of equal doses, treating Sunday as adjacent to Monday
pub fn longest_circular_run(days: &[Decimal; DAYS_PER_WEEK]) -> usize {
    if days.iter().all(|d| *d == days[0]) {
        return DAYS_PER_WEEK;
    }

    let mut longest = 0;
    for start in 0..DAYS_PER_WEEK {
        // Only start counting at the beginning of a run
        if days[start] == days[(start + DAYS_PER_WEEK - 1) % DAYS_PER_WEEK] {
            continue;
        }
        let mut len = 1;
        while len < DAYS_PER_WEEK && days[(start + len) % DAYS_PER_WEEK] == days[start] {
            len += 1;
        }
        longest = longest.max(len);
    }
    longest
}
