mod config;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use rx_check_core::{Formulary, InstructionSheet, Patient, Prescription, Verifier};
use rx_check_core::models::{MAX_PATIENT_AGE, MIN_PATIENT_AGE};
use rx_check_ocr::{default_recognizer, OcrConfig, TextExtractor};

use config::{Config, LogFormat};
use output::VerifyReport;

#[derive(Parser)]
#[command(name = "rx-check")]
#[command(about = "Prescription verification against a medication formulary")]
#[command(version)]
struct Cli {
    /// Formulary JSON file (defaults to RX_CHECK_FORMULARY, then the built-in table)
    #[arg(long, global = true)]
    formulary: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a prescription for a patient
    Verify(VerifyArgs),
    /// Print the text recognized in a prescription image
    Extract {
        /// Prescription image (JPEG or PNG)
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        ocr: OcrArgs,
    },
    /// List the medication formulary
    Formulary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct VerifyArgs {
    /// Patient name
    #[arg(long, default_value = "John Doe")]
    name: String,
    /// Patient age
    #[arg(
        long,
        default_value_t = 45,
        value_parser = clap::value_parser!(u32).range(MIN_PATIENT_AGE as i64..=MAX_PATIENT_AGE as i64)
    )]
    age: u32,
    /// Current medications, comma separated
    #[arg(long, default_value = "")]
    current_medications: String,
    /// Allergies, comma separated
    #[arg(long, default_value = "")]
    allergies: String,
    /// Medication name
    #[arg(long, default_value = "")]
    medication: String,
    /// Dosage, e.g. 20mg
    #[arg(long, default_value = "")]
    dosage: String,
    /// Frequency, e.g. daily
    #[arg(long, default_value = "")]
    frequency: String,
    /// Prescription image; its text is shown alongside the results
    #[arg(long)]
    image: Option<PathBuf>,
    /// Directory to write `<name>_instructions.txt` into
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    ocr: OcrArgs,
}

#[derive(Args)]
struct OcrArgs {
    /// Tesseract data directory (defaults to RX_CHECK_TESSDATA)
    #[arg(long)]
    tessdata: Option<PathBuf>,
    /// OCR language(s) (defaults to RX_CHECK_OCR_LANG, then eng)
    #[arg(long)]
    lang: Option<String>,
}

impl OcrArgs {
    fn resolve(&self, config: &Config) -> OcrConfig {
        let mut ocr = config.ocr_config();
        if let Some(dir) = &self.tessdata {
            ocr.tessdata_dir = Some(dir.clone());
        }
        if let Some(lang) = &self.lang {
            ocr.language = lang.clone();
        }
        ocr
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config);

    let cli = Cli::parse();
    let formulary_path = cli.formulary.as_deref().or(config.formulary_path.as_deref());
    let formulary = load_formulary(formulary_path)?;

    match cli.command {
        Commands::Verify(args) => run_verify(&config, &formulary, args)?,
        Commands::Extract { image, ocr } => {
            let text = extract_text(&image, &ocr.resolve(&config))?;
            print!("{}", text);
        }
        Commands::Formulary { json } => {
            if json {
                let entries = output::formulary_entries(&formulary);
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", output::render_formulary(&formulary));
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn load_formulary(path: Option<&Path>) -> Result<Formulary> {
    match path {
        Some(path) => Formulary::load(path)
            .with_context(|| format!("Failed to load formulary from {}", path.display())),
        None => {
            debug!("Using built-in formulary");
            Ok(Formulary::builtin())
        }
    }
}

fn extract_text(image: &Path, ocr: &OcrConfig) -> Result<String> {
    let recognizer = default_recognizer(ocr)?;
    let extractor = TextExtractor::new(recognizer);
    info!(image = %image.display(), language = %ocr.language, "Extracting prescription text");
    extractor
        .extract_from_path(image)
        .with_context(|| format!("Failed to extract text from {}", image.display()))
}

fn run_verify(config: &Config, formulary: &Formulary, args: VerifyArgs) -> Result<()> {
    let extracted_text = match &args.image {
        Some(image) => Some(extract_text(image, &args.ocr.resolve(config))?),
        None => None,
    };

    let prescription = Prescription::new(args.medication, args.dosage, args.frequency);
    if !prescription.has_medication() {
        bail!("Please enter a medication name.");
    }

    let patient = Patient::from_form(&args.name, args.age, &args.current_medications, &args.allergies);
    let verification = Verifier::new(formulary).verify(&prescription, &patient);
    info!(
        medication = %prescription.medication,
        issues = verification.issues.len(),
        "Prescription verified"
    );

    let suggestion = if verification.is_known_medication() {
        None
    } else {
        formulary.suggest(&prescription.medication).map(String::from)
    };

    let instruction_sheet = InstructionSheet::from_verification(&patient, &prescription, &verification);
    let exported_to = match (&args.export_dir, &instruction_sheet) {
        (Some(dir), Some(sheet)) => {
            let path = sheet
                .write_to_dir(dir)
                .with_context(|| format!("Failed to write instructions to {}", dir.display()))?;
            Some(path.display().to_string())
        }
        _ => None,
    };

    let report = VerifyReport {
        patient,
        prescription,
        extracted_text,
        verification,
        suggestion,
        instruction_sheet,
        exported_to,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render_report(&report));
    }

    Ok(())
}
