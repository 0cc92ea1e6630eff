//! Process command - extract records from a directory of page files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use addrbook_core::{Corpus, Dictionaries, EmissionPolicy, FieldKind, LineParser, Record, Statistics};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Directory of proofread page files (default: from config)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Only process page files of this publication year
    #[arg(short, long)]
    year: Option<i32>,

    /// Family-name dictionary
    #[arg(long)]
    families: Option<PathBuf>,

    /// Given-name dictionary
    #[arg(long)]
    given_names: Option<PathBuf>,

    /// Address table
    #[arg(long)]
    addresses: Option<PathBuf>,

    /// Emit records even without a known surname, given name, or address
    #[arg(long)]
    relaxed: bool,

    /// Print the N most frequent unknown tokens per field
    #[arg(long, default_value = "0")]
    report: usize,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with a header row
    Csv,
    /// One JSON object per line
    Json,
}

const CSV_HEADER: [&str; 13] = [
    "surname",
    "surname_id",
    "given_name",
    "date",
    "street",
    "housenumber",
    "postcode",
    "city",
    "lat",
    "lon",
    "phone",
    "page_id",
    "page_label",
];

enum RecordWriter {
    Csv(csv::Writer<Box<dyn Write>>),
    Json(Box<dyn Write>),
}

impl RecordWriter {
    fn new(out: Box<dyn Write>, format: OutputFormat) -> anyhow::Result<Self> {
        Ok(match format {
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(out);
                wtr.write_record(CSV_HEADER)?;
                RecordWriter::Csv(wtr)
            }
            OutputFormat::Json => RecordWriter::Json(out),
        })
    }

    fn write(&mut self, record: &Record) -> anyhow::Result<()> {
        match self {
            RecordWriter::Csv(wtr) => wtr.write_record(csv_row(record))?,
            RecordWriter::Json(out) => {
                serde_json::to_writer(&mut *out, record)?;
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn finish(self) -> anyhow::Result<()> {
        match self {
            RecordWriter::Csv(mut wtr) => wtr.flush()?,
            RecordWriter::Json(mut out) => out.flush()?,
        }
        Ok(())
    }
}

fn csv_row(record: &Record) -> Vec<String> {
    let address = record.address.as_ref();
    vec![
        record.surname.clone(),
        record.surname_id.clone().unwrap_or_default(),
        record.given_name.clone().unwrap_or_default(),
        record.date.to_string(),
        address.map(|a| a.street.clone()).unwrap_or_default(),
        address.map(|a| a.house_number.clone()).unwrap_or_default(),
        address.map(|a| a.postcode.clone()).unwrap_or_default(),
        address.map(|a| a.city.clone()).unwrap_or_default(),
        address.map(|a| a.latitude.to_string()).unwrap_or_default(),
        address.map(|a| a.longitude.to_string()).unwrap_or_default(),
        record.phone(),
        record.page_id.to_string(),
        record.page_label.clone(),
    ]
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(path) = args.families {
        config.dictionaries.families = path;
    }
    if let Some(path) = args.given_names {
        config.dictionaries.given_names = path;
    }
    if let Some(path) = args.addresses {
        config.dictionaries.addresses = path;
    }
    if let Some(dir) = args.input {
        config.corpus.input_dir = dir;
    }
    if args.year.is_some() {
        config.corpus.year = args.year;
    }
    if args.relaxed {
        config.extraction.emission = EmissionPolicy::relaxed();
    }

    let dictionaries = Dictionaries::load(&config.dictionaries)?;
    let corpus = Corpus::from_dir(&config.corpus.input_dir, config.corpus.year)?;
    if corpus.is_empty() {
        anyhow::bail!(
            "No page files found in {}",
            config.corpus.input_dir.display()
        );
    }
    info!("Processing {} page files", corpus.len());

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = RecordWriter::new(out, args.format)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));

    let parser = LineParser::new(&dictionaries).with_config(config.extraction.clone());
    let mut records = corpus.records(parser);
    let mut count = 0usize;
    for record in records.by_ref() {
        let record = record?;
        writer.write(&record)?;
        count += 1;
        if count % 1000 == 0 {
            pb.set_message(format!("{} records", count));
        }
    }
    writer.finish()?;
    pb.finish_and_clear();

    let stats = records.into_statistics();
    print_summary(&stats, args.report);

    if let Some(path) = &args.output {
        eprintln!(
            "{} {} records written to {}",
            style("✓").green(),
            count,
            path.display()
        );
    }
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_summary(stats: &Statistics, top: usize) {
    eprintln!();
    eprintln!(
        "{} {} lines, {} records ({}%)",
        style("ℹ").blue(),
        stats.lines,
        stats.records,
        stats.yield_percent()
    );

    for kind in FieldKind::ALL {
        let counts = stats.counts(kind);
        eprintln!(
            "{}: total {}; known: {} = {}%",
            kind.label(),
            counts.total(),
            counts.good,
            counts.percent()
        );
    }

    if top == 0 {
        return;
    }
    for kind in FieldKind::ALL {
        let Some(unknown) = stats.unknown(kind) else {
            continue;
        };
        if unknown.is_empty() {
            continue;
        }
        eprintln!();
        eprintln!("{}", style(format!("Unknown {}:", kind.label())).yellow());
        for (token, n) in unknown.most_common(top) {
            eprintln!("  {:>6}  {}", n, token);
        }
    }
}
