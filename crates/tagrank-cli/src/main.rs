mod output;
mod rank;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "tagrank")]
#[command(about = "Rank hashtags by engagement per minute")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every tag in a hashtag list, then write the worst-to-best ranking
    Rank {
        /// Hashtag list, one tag per line (falls back to `TAGRANK_HASHTAGS_PATH`)
        #[arg(short = 'f', long)]
        hashtags_path: Option<PathBuf>,

        /// Report destination, overwritten if present (falls back to `TAGRANK_OUT_PATH`)
        #[arg(short, long)]
        out_path: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,

        /// Print the parsed tags without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = tagrank_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Commands::Rank {
            hashtags_path,
            out_path,
            format,
            dry_run,
        }) => {
            rank::run_rank(
                &config,
                hashtags_path.as_deref(),
                out_path.as_deref(),
                format,
                dry_run,
            )
            .await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
