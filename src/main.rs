// Identity-document field extraction CLI

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use cardex::models::{DocumentKind, ExtractedRecord};
use cardex::processing::OcrConfig;
use cardex::DocumentScanner;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DocumentArg {
    IdentityCard,
    TaxCard,
    Licence,
}

impl From<DocumentArg> for DocumentKind {
    fn from(arg: DocumentArg) -> Self {
        match arg {
            DocumentArg::IdentityCard => DocumentKind::IdentityCard,
            DocumentArg::TaxCard => DocumentKind::TaxCard,
            DocumentArg::Licence => DocumentKind::Licence,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "cardex",
    about = "Extract identity fields from a photographed document and save them as CSV"
)]
struct Cli {
    /// Document type on the image
    #[arg(value_enum)]
    document: DocumentArg,

    /// Path to the document photograph
    image: PathBuf,

    /// Output CSV path; defaults to a file named after the document type
    #[arg(long)]
    out: Option<PathBuf>,

    /// OCR language
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Tesseract trained-data directory
    #[arg(long)]
    tessdata: Option<PathBuf>,

    /// Page segmentation mode override (the OCR engine's --psm number)
    #[arg(long)]
    psm: Option<u8>,

    /// Print the extracted record as JSON
    #[arg(long)]
    json: bool,
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn print_record(record: &ExtractedRecord) {
    match record {
        ExtractedRecord::IdentityCard(r) => {
            println!("  Name:          {}", opt(&r.name));
            println!("  ID Number:     {}", opt(&r.id_number));
            println!("  Date of Birth: {}", opt(&r.date_of_birth));
            println!("  Age:           {}", r.age.map_or("-".to_string(), |a| a.to_string()));
            println!("  Gender:        {}", opt(&r.gender));
        }
        ExtractedRecord::TaxCard(r) => {
            println!("  Name:          {}", opt(&r.name));
            println!("  Tax ID Number: {}", opt(&r.tax_id_number));
            println!("  Date of Birth: {}", opt(&r.date_of_birth));
            println!("  Age:           {}", r.age.map_or("-".to_string(), |a| a.to_string()));
            println!("  Father's Name: {}", opt(&r.father_name));
        }
        ExtractedRecord::Licence(r) => {
            println!("  Licence Number:      {}", opt(&r.licence_number));
            println!("  Name:                {}", opt(&r.name));
            println!("  Father/Husband Name: {}", opt(&r.father_husband_name));
            println!("  Date of Birth:       {}", opt(&r.date_of_birth));
            println!("  Age:                 {}", r.age.map_or("-".to_string(), |a| a.to_string()));
            println!("  Blood Group:         {}", opt(&r.blood_group));
            println!("  Date of Issue:       {}", opt(&r.date_of_issue));
            println!("  Valid Till:          {}", opt(&r.valid_till));
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = OcrConfig {
        language: cli.lang,
        tessdata_dir: cli
            .tessdata
            .map(|p| p.to_string_lossy().into_owned()),
        page_seg_mode: cli.psm,
    };
    let scanner = DocumentScanner::new(config);

    let kind = DocumentKind::from(cli.document);
    match scanner.scan_to_csv(kind, &cli.image, cli.out.as_deref()) {
        Ok(record) => {
            if cli.json {
                match serde_json::to_string_pretty(&record) {
                    Ok(json) => println!("{}", json),
                    Err(err) => eprintln!("Failed to serialize record: {}", err),
                }
            } else {
                println!("Extracted record:");
                print_record(&record);
            }
        }
        Err(err) => {
            eprintln!("Error extracting document: {}", err);
            process::exit(1);
        }
    }
}
