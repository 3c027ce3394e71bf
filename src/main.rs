use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pagereflow::{process_document, write_stats, LoaderConfig, ProcessOptions, ReflowConfig};

#[derive(Parser, Debug)]
#[command(name = "pagereflow")]
#[command(about = "Reflow PDF-extracted page text into one sentence per paragraph")]
#[command(version)]
struct Args {
    /// Extracted document: form-feed separated text, or a JSON array of page strings
    input: PathBuf,

    /// Output path (default: input path with the configured extension)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Running-header phrase to treat as boilerplate (repeatable)
    #[arg(long = "header-phrase")]
    header_phrases: Vec<String>,

    /// Use memory-mapped I/O instead of async buffered
    #[arg(long)]
    use_mmap: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,

    /// Do not write the stats file
    #[arg(long)]
    no_stats: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting pagereflow");
    info!(?args, "Parsed CLI arguments");

    if !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = match &args.config {
        Some(path) => ReflowConfig::load(path).await?,
        None => ReflowConfig::default(),
    }
    .with_header_phrases(args.header_phrases.clone());

    let options = ProcessOptions {
        loader: LoaderConfig {
            use_mmap: args.use_mmap,
            ..Default::default()
        },
        output_path: args.output.clone(),
    };

    let stats = process_document(&args.input, &config, &options).await?;

    println!("Loaded {} pages", stats.report.pages);
    println!("Total sentences extracted: {}", stats.report.sentences);
    println!("Sentences saved to: {}", stats.output_path);
    println!("Total characters: {}", stats.report.sentence_chars);

    if !args.no_stats {
        write_stats(&args.stats_out, &stats).await?;
        info!("Stats written to {}", args.stats_out.display());
    }

    Ok(())
}
