// Wed Jan 15 2026 - Alex

use super::args::Args;
use crate::config::Config;
use crate::pattern::Signature;
use crate::scanner::{sort_directory_offsets, sort_offsets, MultiScanner};
use crate::ui::display::{DisplayRenderer, ScanReport};
use crate::ui::progress::ProgressSpinner;
use anyhow::Context;
use std::path::Path;
use std::time::Duration;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.load_config(&args)?;
        if !config.enable_colors {
            colored::control::set_override(false);
        }

        let signature = Signature::parse(&args.signature)
            .with_context(|| format!("Invalid signature \"{}\"", args.signature))?;
        let mut scanner = MultiScanner::new().with_signature(signature);
        scanner.add_signatures(config.parsed_signatures());

        check_target(&args.path)?;

        let (report, elapsed) = self.scan(&args, &config, &scanner);
        self.print(&args, &config, &report, elapsed);
        Ok(())
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    fn load_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Could not use config {}", path.display()))?,
            None => Config::default(),
        };
        args.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn scan(&self, args: &Args, config: &Config, scanner: &MultiScanner) -> (ScanReport, Duration) {
        let options = config.to_scan_options();
        let show_progress = config.enable_progress && !args.quiet && !config.json_output;
        let spinner = ProgressSpinner::for_terminal(&format!("Scanning {}", args.path.display()), show_progress);

        log::debug!(
            "Scanning {} for {} signatures with {} threads ({:?})",
            args.path.display(),
            scanner.len(),
            options.thread_count(),
            options.threading_mode()
        );

        let mut report = if args.path.is_dir() {
            let mut results = scanner.scan_directory(&args.path, &options);
            sort_directory_offsets(&mut results);
            ScanReport::Directory(results)
        } else {
            let mut results = scanner.scan_file(&args.path, &options);
            sort_offsets(&mut results);
            ScanReport::File(results)
        };
        if args.reverse {
            report.reverse();
        }

        let elapsed = spinner.elapsed();
        spinner.finish_and_clear();
        (report, elapsed)
    }

    fn print(&self, args: &Args, config: &Config, report: &ScanReport, elapsed: Duration) {
        let renderer = DisplayRenderer::new().with_color(config.enable_colors);

        if config.json_output {
            let value = renderer.render_json(&args.path, report);
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{}", text),
                Err(e) => log::error!("Failed to serialize results: {}", e),
            }
            return;
        }

        print!("{}", renderer.render(&args.path, report));
        if !args.quiet {
            println!();
            println!("{}", renderer.render_summary(report, elapsed));
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Only regular files and directories can be scanned.
fn check_target(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    if !path.is_file() && !path.is_dir() {
        anyhow::bail!("File of invalid type specified: {}", path.display());
    }
    Ok(())
}
