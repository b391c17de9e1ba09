use anyhow::Context;
use clap::Parser;
use colored::*;
use imf_processor::cli::Args;
use imf_processor::models::ProcessingStats;
use imf_processor::{ImfError, ImfProcessor};
use std::process;

fn main() {
    let args = Args::parse();
    init_tracing(&args);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(anyhow::Error::from(ImfError::ProcessingInterrupted {
                    reason: "Processing interrupted by user".to_string(),
                }))
            }
        }
    });

    match result {
        Ok(stats) => {
            print_summary(&stats);
            process::exit(if stats.files_failed > 0 { 2 } else { 0 });
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ProcessingStats> {
    let config = args.to_config().context("Invalid arguments")?;

    let mut processor = ImfProcessor::new(args.input_path.clone(), args.archive_path.clone())
        .context("Failed to set up conversion")?
        .with_config(config);

    let stats = processor
        .process()
        .await
        .with_context(|| format!("Failed to convert {}", args.input_path.display()))?;

    Ok(stats)
}

fn init_tracing(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("imf_processor={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Conversion summary".bright_green().bold());
    println!(
        "  {} {}/{}",
        "Files converted:".bright_cyan(),
        stats.files_processed.to_string().bright_white().bold(),
        stats.files_discovered
    );
    println!(
        "  {} {}",
        "Samples per channel:".bright_cyan(),
        stats.total_samples
    );
    if stats.missing_samples > 0 {
        println!(
            "  {} {}",
            "Missing-value samples:".bright_yellow(),
            stats.missing_samples
        );
    }
    println!("  {} {}", "Files written:".bright_cyan(), stats.series_written);
    println!(
        "  {} {}",
        "Archive:".bright_cyan(),
        stats.archive_path.display()
    );
    println!(
        "  {} {:.1}s",
        "Elapsed:".bright_cyan(),
        stats.processing_time_ms as f64 / 1000.0
    );

    if stats.files_failed > 0 {
        println!(
            "\n{} {}",
            "Failed files:".bright_red().bold(),
            stats.files_failed
        );
        for failed in &stats.failed_files {
            println!("  {} {}", failed.path.display(), failed.reason.bright_black());
        }
    }
}
