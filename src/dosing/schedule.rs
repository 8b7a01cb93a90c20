//! Weekly schedule generation

use chrono::Weekday;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::DosageError;
use super::types::{DailyDose, WeeklyDoseSchedule};
use crate::distribution::{distribute, QUARTER_TABLET_STEP};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Describe a daily dose in terms of standard tablets
///
/// 2.5, 5, 7.5 and 10 mg map to tablet counts; anything else is given in mg.
pub fn describe_daily_dose(dose_mg: Decimal) -> String {
    match dose_mg {
        d if d.is_zero() => "No dose".to_string(),
        d if d == dec!(2.5) => "½ tablet".to_string(),
        d if d == dec!(5) => "1 tablet".to_string(),
        d if d == dec!(7.5) => "1 ½ tablets".to_string(),
        d if d == dec!(10) => "2 tablets".to_string(),
        d => format!("{} mg", d.normalize()),
    }
}

/// Seven-day schedule in quarter-tablet steps
///
/// A zero dose yields a valid all-zero schedule.
pub fn generate_weekly_schedule(weekly_dose_mg: Decimal) -> Result<WeeklyDoseSchedule, DosageError> {
    generate_weekly_schedule_with_step(weekly_dose_mg, QUARTER_TABLET_STEP)
}

/// Seven-day schedule in steps of `step_mg`
pub fn generate_weekly_schedule_with_step(
    weekly_dose_mg: Decimal,
    step_mg: Decimal,
) -> Result<WeeklyDoseSchedule, DosageError> {
    let doses = distribute(weekly_dose_mg, step_mg)?;

    let days = WEEK
        .iter()
        .zip(doses)
        .map(|(day, dose_mg)| DailyDose {
            day: *day,
            dose_mg,
            description: describe_daily_dose(dose_mg),
        })
        .collect();

    Ok(WeeklyDoseSchedule {
        total_weekly_dose: weekly_dose_mg,
        days,
    })
}
