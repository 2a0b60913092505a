use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use discharge_lib::care_plan::StandardCarePlan;
use discharge_lib::commands;
use discharge_lib::config;
use discharge_lib::i18n::{IdentityTranslator, Locale};
use discharge_lib::models::{DietItem, Medication};
use discharge_lib::registry::PatientStore;
use discharge_lib::report::render_preview;

#[derive(Parser, Debug)]
#[command(name = "discharge", version, about = "Hospital discharge summary generator")]
struct Cli {
    /// Patient registry CSV.
    #[arg(long, global = true, env = "DISCHARGE_REGISTRY", default_value = config::DEFAULT_REGISTRY_FILE)]
    registry: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that a doctor ID has patients in the registry
    Verify {
        #[arg(long)]
        doctor: String,
    },
    /// List a doctor's patients
    Patients {
        #[arg(long)]
        doctor: String,
    },
    /// Preview and export a patient's discharge report
    Report {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        patient: String,
        /// Replaces the estimated recovery narrative.
        #[arg(long)]
        narrative: Option<String>,
        /// JSON file with the medication plan (array of name/dosage/timing).
        #[arg(long)]
        medications: Option<PathBuf>,
        /// JSON file with the diet plan (array of meal/quantity/timing).
        #[arg(long)]
        diet: Option<PathBuf>,
        /// Output directory. Defaults to ~/Discharge/reports.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Preview language, by code or name.
        #[arg(long, default_value = "en", value_parser = parse_locale)]
        lang: Locale,
        /// Also write the registry with the narrative stored as doctor_summary.
        #[arg(long, num_args = 0..=1, default_missing_value = config::DEFAULT_SUMMARY_EXPORT_FILE)]
        save_summary: Option<PathBuf>,
    },
}

fn parse_locale(input: &str) -> Result<Locale, String> {
    Locale::lookup(input).ok_or_else(|| format!("unsupported language: {input}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    discharge_lib::init_tracing();

    let mut store = PatientStore::load(&cli.registry)
        .with_context(|| format!("Cannot load registry {:?}", cli.registry))?;

    match cli.command {
        Command::Verify { doctor } => {
            let id = commands::verify_doctor(&store, &doctor)?;
            println!("Doctor {id} verified");
        }
        Command::Patients { doctor } => {
            let patients = commands::list_patients(&store, &doctor)?;
            for p in patients {
                println!(
                    "{}\t{}\t{}",
                    p.patient_id,
                    p.display_name(),
                    p.disease.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Report {
            doctor,
            patient,
            narrative,
            medications,
            diet,
            out,
            lang,
            save_summary,
        } => {
            let today = chrono::Local::now().date_naive();
            let mut summary =
                commands::prepare_discharge(&store, &doctor, &patient, &StandardCarePlan, today)?;

            if let Some(text) = narrative {
                summary.set_narrative(text);
            }
            if let Some(path) = medications {
                summary.medications = commands::load_plan::<Medication>(&path)?;
            }
            if let Some(path) = diet {
                summary.diet = commands::load_plan::<DietItem>(&path)?;
            }

            print!("{}", render_preview(&summary, &IdentityTranslator, lang));

            let out_dir = out.unwrap_or_else(config::reports_dir);
            let path = commands::export_report(&summary, &out_dir)
                .with_context(|| format!("Cannot export report to {:?}", out_dir))?;
            println!("\nReport saved to {}", path.display());

            if let Some(csv_path) = save_summary {
                commands::persist_summary(&mut store, &summary, &csv_path)
                    .with_context(|| format!("Cannot save summary to {:?}", csv_path))?;
                println!("Summary saved to {}", csv_path.display());
            }
        }
    }

    Ok(())
}
