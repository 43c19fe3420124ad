//! newsprint CLI - newspaper page to transcript, JSON, CSV and charts

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use newsprint::export::{read_json, write_json};
use newsprint::pipeline::{DEFAULT_IMAGE_PATH, DEFAULT_OUTPUT_DIR};
use newsprint::{
    ChartRenderer, ContentType, JsonFormat, Pipeline, PipelineOptions, SegmenterRules,
    ServiceConfig, Stage, Structurer, SummaryStats, Table,
};

#[derive(Parser)]
#[command(name = "newsprint")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn a scanned newspaper page into transcript, JSON, CSV and charts", long_about = None)]
struct Cli {
    /// Page image (PNG or JPEG); the demonstration text is used when it is missing
    #[arg(value_name = "IMAGE", default_value = DEFAULT_IMAGE_PATH)]
    image: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Messages API credential
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Model used for transcription and structuring
    #[arg(long, env = "NEWSPRINT_MODEL", global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Structure a text file and print the document as JSON
    Structure {
        /// Transcript to structure
        #[arg(value_name = "TEXT_FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Use the offline segmenter even when a credential is set
        #[arg(long)]
        offline: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render the three charts from an existing CSV table
    Charts {
        /// CSV written by a previous run
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Output directory (defaults to the CSV's directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show a summary of a structured JSON document
    Info {
        /// Structured JSON written by a previous run
        #[arg(value_name = "JSON")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = service_config(cli.api_key.clone(), cli.model.clone());
    log::debug!("Service credential configured: {}", config.is_some());

    let result = match cli.command {
        Some(Commands::Structure {
            input,
            output,
            offline,
            compact,
        }) => {
            let config = if offline { None } else { config };
            cmd_structure(&input, output.as_deref(), config, compact)
        }
        Some(Commands::Charts { input, output }) => cmd_charts(&input, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_run(&cli.image, &cli.output, config),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn service_config(api_key: Option<String>, model: Option<String>) -> Option<ServiceConfig> {
    let config = ServiceConfig::from_credential(api_key)?;
    match model.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()) {
        Some(model) => Some(config.with_model(model)),
        None => Some(config),
    }
}

fn banner(title: &str) {
    println!("\n{}", "=".repeat(80).dimmed());
    println!("{}", title.cyan().bold());
    println!("{}", "=".repeat(80).dimmed());
}

fn cmd_run(
    image: &Path,
    output: &Path,
    config: Option<ServiceConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    banner("NEWSPAPER PAGE PROCESSING");

    if config.is_none() {
        println!(
            "{} {}",
            "Note:".yellow().bold(),
            "ANTHROPIC_API_KEY is not set; structuring offline".yellow()
        );
    }

    let options = PipelineOptions::new()
        .with_image(image)
        .with_output_dir(output);

    let pb = ProgressBar::new(Stage::COUNT);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let progress = pb.clone();
    let pipeline = Pipeline::from_config(options, config)?.with_progress(move |stage| {
        if stage != Stage::Acquire {
            progress.inc(1);
        }
        progress.set_message(stage.describe());
    });

    let report = match pipeline.run() {
        Ok(report) => report,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };
    pb.inc(1);
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} ({} structurer)",
        "Text source:".bold(),
        report.source,
        report.structurer
    );
    println!("{} {}", "Records:".bold(), report.record_count());
    for (content_type, count) in &report.type_counts {
        println!("  {} {}: {}", "•".dimmed(), content_type, count);
    }

    println!("\n{}", "Output files:".green().bold());
    let artifacts = report.artifacts();
    for (i, path) in artifacts.iter().enumerate() {
        let branch = if i + 1 == artifacts.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), path.display());
    }

    Ok(())
}

fn cmd_structure(
    input: &Path,
    output: Option<&Path>,
    config: Option<ServiceConfig>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let structurer = Structurer::from_credential(config, SegmenterRules::default())?;
    let doc = structurer.structure(&text)?;

    if let Some(path) = output {
        write_json(path, &doc)?;
        println!(
            "{} {} ({} records, {} structurer)",
            "Saved to".green(),
            path.display(),
            doc.len(),
            structurer.name()
        );
    } else {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", newsprint::export::to_json(&doc, format)?);
    }

    Ok(())
}

fn cmd_charts(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let table = Table::read_csv(input)?;
    println!("{} {} rows from {}", "Loaded".green(), table.len(), input.display());

    let paths = ChartRenderer::default().render_all(&table, &output_dir)?;
    for path in paths {
        println!("{} {}", "Saved".green(), path.display());
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_json(input)?;
    let table = Table::from_document(&doc);
    let stats = SummaryStats::from_table(&table);

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Newspaper".bold(), doc.metadata.newspaper_name);
    println!("{}: {}", "Date".bold(), doc.metadata.date_label());
    if let Some(issue) = doc.metadata.issue_number {
        println!("{}: {}", "Issue".bold(), issue);
    }
    println!("{}: {}", "Location".bold(), doc.metadata.location);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (label, value) in stats.entries() {
        println!("{}: {}", label.bold(), value);
    }

    let authors: Vec<&str> = doc
        .content
        .iter()
        .filter(|r| r.content_type == ContentType::Article && !r.author.is_empty())
        .map(|r| r.author.as_str())
        .collect();
    if !authors.is_empty() {
        println!("{}: {}", "Authors".bold(), authors.join(", "));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "newsprint".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Newspaper page structuring tool");
    println!();
    println!("License: MIT");
}
