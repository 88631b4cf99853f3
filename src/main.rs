//! Auction clearing entry point.
//!
//! 1. Load settings and the site/bidder catalog.
//! 2. Read the auction batch (file or stdin).
//! 3. Clear every auction and write one winner list per auction.
//!
//! Any configuration or input failure aborts the whole batch; nothing is
//! written in that case.

mod config;
mod io;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use clearing::{clear_batch, BatchSummary};
use common::Error;
use tracing::{error, info, warn};

use crate::config::{load_config, AppConfig};

#[derive(Parser, Debug, Default)]
#[command(name = "auction-clearing", about = "Clear a batch of sealed-bid auctions")]
struct Cli {
    /// Catalog JSON with sites and bidders.
    #[arg(long)]
    catalog: Option<String>,

    /// Auction batch JSON (`-` for stdin).
    #[arg(long)]
    input: Option<String>,

    /// Result JSON path (stdout when omitted).
    #[arg(long)]
    output: Option<String>,

    #[arg(long)]
    pretty: bool,

    /// Add each winner's adjusted value to the output.
    #[arg(long)]
    include_adjusted: bool,

    /// Append a JSON-lines run report to this file.
    #[arg(long)]
    report: Option<String>,

    /// Driver settings TOML (defaults to ./clearing.toml when present).
    #[arg(long)]
    settings: Option<PathBuf>,
}

impl Cli {
    /// CLI flags take priority over settings file and environment.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref path) = self.catalog {
            config.catalog_path = path.clone();
        }
        if let Some(ref path) = self.input {
            config.input_path = Some(path.clone());
        }
        if let Some(ref path) = self.output {
            config.output_path = Some(path.clone());
        }
        if let Some(ref path) = self.report {
            config.report_path = Some(path.clone());
        }
        if self.pretty {
            config.pretty = true;
        }
        if self.include_adjusted {
            config.clearing.include_adjusted_value = true;
        }
    }
}

fn run(cli: &Cli) -> Result<BatchSummary, Error> {
    let mut cfg = load_config(cli.settings.as_deref())?;
    cli.apply(&mut cfg);

    let catalog = io::load_catalog(&cfg.catalog_path)?;
    info!(
        "Catalog {}: {} sites, {} bidders",
        cfg.catalog_path,
        catalog.site_count(),
        catalog.bidder_count()
    );

    let auctions = io::read_batch(&cfg)?;
    info!(
        "Read {} auctions from {}",
        auctions.len(),
        if cfg.reads_stdin() { "stdin" } else { cfg.input_path.as_deref().unwrap_or("-") }
    );

    let outcome = clear_batch(&catalog, &auctions, &cfg.clearing);
    io::write_results(&outcome.results, &cfg)?;

    if let Some(ref path) = cfg.report_path {
        let event = report::batch_event(&cfg, &outcome.summary);
        if let Err(e) = report::append_event(Path::new(path), &event) {
            warn!("Run report write failed: {}", e);
        }
    }

    Ok(outcome.summary)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auction_clearing=info,clearing=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            info!(
                "Done: {} auctions, {} winners",
                summary.auctions, summary.winners
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Clearing failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("auction-clearing-main-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "auction-clearing",
            "--catalog",
            "cat.json",
            "--input",
            "-",
            "--pretty",
            "--include-adjusted",
        ])
        .unwrap();
        assert_eq!(cli.catalog.as_deref(), Some("cat.json"));
        assert_eq!(cli.input.as_deref(), Some("-"));
        assert!(cli.pretty);
        assert!(cli.include_adjusted);
        assert!(cli.settings.is_none());
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = AppConfig::default();
        let cli = Cli {
            catalog: Some("cli.json".into()),
            output: Some("out.json".into()),
            include_adjusted: true,
            ..Cli::default()
        };
        cli.apply(&mut config);

        assert_eq!(config.catalog_path, "cli.json");
        assert_eq!(config.output_path.as_deref(), Some("out.json"));
        assert!(config.clearing.include_adjusted_value);
        assert!(!config.pretty, "unset flag leaves config alone");
    }

    #[test]
    fn test_run_end_to_end() {
        let catalog = temp_path("config.json");
        let input = temp_path("auctions.json");
        let output = temp_path("result.json");
        std::fs::write(
            &catalog,
            r#"{"sites":[{"name":"s1","bidders":["b1","b2"],"floor":10}],
                "bidders":[{"name":"b1","adjustment":0},{"name":"b2","adjustment":0.5}]}"#,
        )
        .unwrap();
        std::fs::write(
            &input,
            r#"[{"site":"s1","units":["u1"],"bids":[
                    {"bidder":"b1","unit":"u1","bid":12},
                    {"bidder":"b2","unit":"u1","bid":8}]},
                {"site":"s9","units":["u1"],"bids":[]}]"#,
        )
        .unwrap();

        let cli = Cli {
            catalog: Some(catalog.to_string_lossy().into_owned()),
            input: Some(input.to_string_lossy().into_owned()),
            output: Some(output.to_string_lossy().into_owned()),
            ..Cli::default()
        };
        let summary = run(&cli).unwrap();
        assert_eq!(summary.auctions, 2);
        assert_eq!(summary.unknown_sites, 1);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!([[{"bidder": "b2", "unit": "u1", "bid": 8.0}], []])
        );

        for path in [catalog, input, output] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn test_run_fails_on_malformed_input() {
        let catalog = temp_path("config-bad-input.json");
        let input = temp_path("auctions-bad.json");
        let output = temp_path("result-bad.json");
        std::fs::write(&catalog, r#"{"sites":[],"bidders":[]}"#).unwrap();
        std::fs::write(&input, r#"[{"units":["u1"]}]"#).unwrap();

        let cli = Cli {
            catalog: Some(catalog.to_string_lossy().into_owned()),
            input: Some(input.to_string_lossy().into_owned()),
            output: Some(output.to_string_lossy().into_owned()),
            ..Cli::default()
        };
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, Error::InputMalformed(_)), "got {}", err);
        assert!(!output.exists(), "no partial output on failure");

        for path in [catalog, input] {
            let _ = std::fs::remove_file(path);
        }
    }
}
