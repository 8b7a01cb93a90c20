use anticoag::prelude::*;
use anticoag::ttr::TtrOptions;
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AnticoagError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap_or_default();

    let history = InrHistory::builder()
        .phase(TherapyPhase::Induction)
        .observation(date(1, 8), dec!(1.4), dec!(35))
        .observation(date(1, 15), dec!(1.9), dec!(38.75))
        .phase(TherapyPhase::Maintenance)
        .observation(date(1, 29), dec!(2.4), dec!(40))
        .observation(date(2, 26), dec!(2.8), dec!(40))
        .missed_doses(date(3, 25), dec!(1.7), dec!(40))
        .build()?;

    let range = TherapeuticRange::standard();
    println!("{}", history.ttr(&range, &TtrOptions::default()));
    println!("{}", history.inr_statistics(&range));

    for guideline in [Guideline::Fcsa, Guideline::Accp] {
        let suggestion = WarfarinDosageCalculator::new(guideline).calculate_latest(&history, range)?;
        println!("{}", suggestion);
    }

    let critical = DosageInput::new(dec!(7.0), dec!(40))
        .with_thromboembolic_risk(ThromboembolicRisk::High);
    let suggestion = WarfarinDosageCalculator::new(Guideline::Fcsa).calculate(&critical)?;
    println!("{}", suggestion);

    Ok(())
}
