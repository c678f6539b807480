//! casebrief: extractive summaries of court decisions.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use casebrief_core::SummaryConfig;
use casebrief_eval::{evaluate_corpus, render_table, DEFAULT_REFERENCE_FILE};
use casebrief_ingest::read_case_text;
use casebrief_runtime::{
    assemble, render_preprocessed, render_sections, BatchRunner, CaseStatus, CaseSummarizer, DEFAULT_CASE_FILE,
    DEFAULT_SUMMARY_FILE,
};

#[derive(Parser)]
#[command(name = "casebrief")]
#[command(version, about = "Segment and summarize court decisions", long_about = None)]
struct Cli {
    /// Summary config file (JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Latent topic count
    #[arg(long, global = true)]
    num_topics: Option<usize>,

    /// Heading match threshold (0-100)
    #[arg(long, global = true)]
    threshold: Option<u8>,

    /// List summary sentences in reading order
    #[arg(long, global = true)]
    preserve_order: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one case file
    Summarize {
        /// Case text file
        input: PathBuf,

        /// Write the summary here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Summarize every case folder under a corpus root
    Batch {
        /// Corpus root, one sub-folder per case
        root: PathBuf,

        #[arg(long, default_value = DEFAULT_CASE_FILE)]
        case_file: String,

        #[arg(long, default_value = DEFAULT_SUMMARY_FILE)]
        summary_file: String,

        /// Process cases on all cores
        #[arg(long)]
        parallel: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the segmented sections of a case file
    Segment {
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write the cleaned token sentences of a case file
    Preprocess {
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// ROUGE-1 of generated summaries against human references
    Evaluate {
        /// Corpus root, one sub-folder per case
        root: PathBuf,

        #[arg(long, default_value = DEFAULT_REFERENCE_FILE)]
        reference_file: String,

        #[arg(long, default_value = DEFAULT_SUMMARY_FILE)]
        summary_file: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// File and env config, then command-line overrides.
    fn summary_config(&self) -> anyhow::Result<SummaryConfig> {
        let mut config = SummaryConfig::load(self.config.as_deref())
            .with_context(|| "Failed to load summary config")?;
        if let Some(n) = self.num_topics {
            config.num_topics = n;
        }
        if let Some(t) = self.threshold {
            config.similarity_threshold = t;
        }
        if self.preserve_order {
            config.preserve_document_order = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.summary_config()?;
    let summarizer = CaseSummarizer::new(config)?;

    match &cli.command {
        Commands::Summarize { input, output } => {
            let summary = summarizer.summarize_file(input)?;
            write_output(output.as_deref(), &assemble(&summary))?;
        }

        Commands::Batch {
            root,
            case_file,
            summary_file,
            parallel,
            json,
        } => {
            let report = BatchRunner::new(summarizer)
                .with_case_file(case_file.as_str())
                .with_summary_file(summary_file.as_str())
                .with_parallel(*parallel)
                .run(root)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for outcome in &report.cases {
                    match &outcome.status {
                        CaseStatus::Written { digest } => println!("written  {}  {}", outcome.case, digest),
                        CaseStatus::Skipped => println!("skipped  {}", outcome.case),
                        CaseStatus::Failed { error } => println!("failed   {}  {}", outcome.case, error),
                    }
                }
                println!(
                    "{} written, {} skipped, {} failed",
                    report.written, report.skipped, report.failed
                );
            }
            if report.failed > 0 {
                std::process::exit(1);
            }
        }

        Commands::Segment { input, output } => {
            let text = read_case_text(input)?;
            let sections = summarizer.segment(&text);
            let rendered = render_sections(
                sections
                    .iter()
                    .map(|(section, lines)| (section, lines.iter().map(String::as_str))),
            );
            write_output(output.as_deref(), &rendered)?;
        }

        Commands::Preprocess { input, output } => {
            let text = read_case_text(input)?;
            let sections = summarizer.segment(&text);
            write_output(output.as_deref(), &render_preprocessed(&sections))?;
        }

        Commands::Evaluate {
            root,
            reference_file,
            summary_file,
            json,
        } => {
            let report = evaluate_corpus(root, reference_file, summary_file)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_table(&report));
            }
        }
    }

    Ok(())
}
