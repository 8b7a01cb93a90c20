use anticoag::doac::{DoacCalculator, DosageSchemeTable};
use anticoag::prelude::*;
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AnticoagError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let calculator = DoacCalculator::new(DosageSchemeTable::standard());
    let visit_date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap_or_default();

    let patients = [
        (
            "elderly, low weight",
            Patient {
                hypertension: true,
                ..Patient::new(83, Gender::Female)
                    .with_weight(dec!(57))
                    .with_creatinine(dec!(1.2))
            },
            DoacDrug::Apixaban,
        ),
        (
            "cirrhosis on rivaroxaban",
            Patient {
                cirrhosis: true,
                ..Patient::new(64, Gender::Male)
                    .with_weight(dec!(80))
                    .with_creatinine(dec!(1.0))
            },
            DoacDrug::Rivaroxaban,
        ),
        (
            "end-stage renal disease",
            Patient::new(71, Gender::Male)
                .with_weight(dec!(70))
                .with_creatinine(dec!(5.8)),
            DoacDrug::Dabigatran,
        ),
    ];

    for (label, patient, drug) in &patients {
        let record = DoacMonitoringRecord::new(
            visit_date,
            *drug,
            Indication::NonValvularAtrialFibrillation,
        )
        .with_labs(LabValues {
            hemoglobin: Some(dec!(11.4)),
            ..Default::default()
        });

        let enriched = calculator.enrich(&record, patient);
        println!("== {} ==", label);
        match enriched.crcl {
            Some(crcl) => println!("CrCl: {} mL/min", crcl),
            None => println!("CrCl: unavailable"),
        }
        println!("{}", enriched.has_bled);
        println!("{}", enriched.dosage);
        println!(
            "Next control in {} months ({}): {}",
            enriched.interval.months,
            enriched.interval.next_control,
            enriched.interval.reasons.join("; ")
        );
        if let Some(drug) = enriched.evaluation.suggested_drug {
            println!("Suggested alternative: {}", drug);
        }
        if let Some(switch) = &enriched.evaluation.vka_switch {
            println!("Switch to warfarin: {}", switch.rationale);
            if let Some(schedule) = &switch.starting_schedule {
                print!("{}", schedule);
            }
        }
        for alert in &enriched.alerts {
            println!("  ! {}", alert);
        }
    }

    println!("{}", DosageSchemeTable::standard().to_json()?);
    Ok(())
}
