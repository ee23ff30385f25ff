//! `survey-clean` command line: clean one spreadsheet export into a labeled Parquet file.
//!
//! ```sh
//! survey-clean responses.xlsx responses.parquet --threshold 8 --codebook
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use survey_clean::ingestion::{ReadOptions, SheetSelection};
use survey_clean::pipeline::{
    CleaningObserver, CleaningOptions, CleaningRequest, CompositeObserver, FileObserver, StdErrObserver,
};
use survey_clean::processing::{DEFAULT_CATEGORICAL_THRESHOLD, DEFAULT_MISSING_LABEL, MissingPolicy};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MissingMode {
    /// Missing counts toward cardinality and is coded to its own level (see --missing-label)
    Level,
    /// Missing is neither counted nor a level
    Ignore,
}

#[derive(Parser, Debug)]
#[command(name = "survey-clean", version)]
#[command(about = "Turn a raw survey spreadsheet export into a labeled, analysis-ready Parquet dataset")]
struct Args {
    /// Source spreadsheet (.xlsx/.xls/.xlsm/.xlsb/.ods) or delimited text (.csv/.tsv)
    input: PathBuf,

    /// Destination file (.parquet)
    output: PathBuf,

    /// Maximum number of distinct values for a column to become categorical
    #[arg(short, long, default_value_t = DEFAULT_CATEGORICAL_THRESHOLD)]
    threshold: usize,

    /// Workbook sheet to read (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// How missing answers are treated when inferring categoricals
    #[arg(long, value_enum, default_value = "level")]
    missing: MissingMode,

    /// Level name used for missing answers with `--missing level`
    #[arg(long, default_value = DEFAULT_MISSING_LABEL)]
    missing_label: String,

    /// Also write `<output stem>.codebook.json`
    #[arg(long)]
    codebook: bool,

    /// Append run events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not log run events to stderr
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn into_request(self) -> CleaningRequest {
        let missing = match self.missing {
            MissingMode::Ignore => MissingPolicy::Ignore,
            MissingMode::Level => MissingPolicy::Level(self.missing_label),
        };

        let mut observers: Vec<Arc<dyn CleaningObserver>> = Vec::new();
        if !self.quiet {
            observers.push(Arc::new(StdErrObserver));
        }
        if let Some(path) = self.log_file {
            observers.push(Arc::new(FileObserver::new(path)));
        }
        let observer: Option<Arc<dyn CleaningObserver>> = match observers.len() {
            0 => None,
            _ => Some(Arc::new(CompositeObserver::new(observers))),
        };

        CleaningRequest {
            input: self.input,
            output: self.output,
            options: CleaningOptions {
                categorical_threshold: self.threshold,
                missing,
                read: ReadOptions {
                    format: None,
                    sheet: self.sheet.map_or(SheetSelection::First, SheetSelection::Named),
                },
                write_codebook: self.codebook,
                observer,
                ..Default::default()
            },
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let quiet = args.quiet;
    let request = args.into_request();
    let outcome = request
        .run()
        .with_context(|| format!("cleaning {} failed", request.input.display()))?;

    if !quiet {
        for label in outcome.table.labels() {
            let col = outcome.table.column(&label.short_id);
            let kind = col.map(|c| c.kind().as_str()).unwrap_or("text");
            println!("{:<6} {:<12} {}", label.short_id, kind, label.text);
        }
        for path in &outcome.written {
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
