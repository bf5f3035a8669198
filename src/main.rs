use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use hero_stats::analysis::hero_stats::MAX_WINDOW_DAYS;
use hero_stats::api::DotabuffClient;
use hero_stats::config::Config;
use hero_stats::display::output::{
    display_diagnostics, display_error, display_hero_stats, display_info, display_success,
};
use hero_stats::{logging, pipeline};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser, Debug)]
#[command(name = "Hero Stats")]
#[command(about = "Most played heroes and win rates from a Dotabuff match list", long_about = None)]
struct Args {
    /// Dotabuff player ID (the number in the profile URL)
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    player_id: Option<String>,

    /// Read a saved match-list page instead of fetching it
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of heroes to list (default: 5)
    #[arg(short, long)]
    top_n: Option<usize>,

    /// Size of the trailing window in days (default: 7)
    #[arg(short, long)]
    window_days: Option<i64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log every skipped row to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let mut options = config.pipeline_options();
    if let Some(top_n) = args.top_n {
        options.top_n = top_n;
    }
    if let Some(days) = args.window_days {
        anyhow::ensure!(
            (1..=MAX_WINDOW_DAYS).contains(&days),
            "--window-days must be between 1 and {}",
            MAX_WINDOW_DAYS
        );
        options.window_days = days;
    }

    let quiet = args.json;
    let (markup, player) = match (args.player_id, args.file) {
        (_, Some(path)) => {
            if !quiet {
                display_info(&format!("Reading match page from {}", path.display()));
            }
            let markup = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (markup, path.display().to_string())
        }
        (Some(player_id), None) => {
            let client = DotabuffClient::new(config.clone());
            let spinner = ProgressBar::new_spinner();
            if quiet {
                spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
            }
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Fetching matches for player {}", player_id.trim()));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let page = client.fetch_matches_page(&player_id);
            spinner.finish_and_clear();
            let markup = page?;
            if !quiet {
                display_success(&format!("Downloaded match page ({} bytes)", markup.len()));
            }
            (markup, player_id.trim().to_string())
        }
        (None, None) => anyhow::bail!("either a player ID or --file is required"),
    };

    let report = pipeline::run_with(&markup, Utc::now(), &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display_hero_stats(&report, &player);
    display_diagnostics(&report.diagnostics);

    Ok(())
}
