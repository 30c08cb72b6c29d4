#![forbid(unsafe_code)]

mod output;
mod plot;
mod report;
mod run;

use clap::Parser;
use lanes_core::config::{self, ConfigOverrides};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lanes: lane-preference survey analysis",
    long_about = "Read a lane survey, write incidence/similarity/co-occurrence reports and \
                  graph metrics, and draw the survey graphs.",
    after_help = "EXAMPLES:\n    # Analyse data/DataSet.txt into output/ and plots/\n    lanes\n\n    # Analyse another file, reports only\n    lanes --data survey.txt --no-plots\n\n    # Emit a machine-readable summary\n    lanes --json"
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit the run summary as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Config file (default: lanes.toml in the working directory, if present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Survey file to read.
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Directory for the text reports.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory for the PNG plots.
    #[arg(long, value_name = "DIR")]
    plots_dir: Option<PathBuf>,

    /// Skip PNG rendering.
    #[arg(long)]
    no_plots: bool,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data: self.data.clone(),
            output: self.output_dir.clone(),
            plots: self.plots_dir.clone(),
            no_plots: self.no_plots,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LANES_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "lanes=debug,info"
        } else {
            "lanes=info,warn"
        })
    });

    let format = env::var("LANES_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let root = env::current_dir()?;
    let result = config::load_config(&root, cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|cfg| {
            let cfg = cfg.with_overrides(cli.overrides());
            run::run(&cfg, &root)
        });

    match result {
        Ok(summary) => {
            output::render_summary(cli.output_mode(), &summary, &mut std::io::stdout().lock())?;
            Ok(())
        }
        Err(err) => {
            let code = output::error_code(&err);
            error!(code = %code, "{}", code.message());
            if let Some(hint) = code.hint() {
                eprintln!("hint: {hint}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_is_a_valid_invocation() {
        let cli = Cli::parse_from(["lanes"]);
        assert!(!cli.json);
        assert!(!cli.no_plots);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["lanes", "--json"]);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn path_flags_become_overrides() {
        let cli = Cli::parse_from([
            "lanes",
            "--data",
            "survey.txt",
            "--output-dir",
            "out",
            "--plots-dir",
            "img",
            "--no-plots",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.data, Some(PathBuf::from("survey.txt")));
        assert_eq!(overrides.output, Some(PathBuf::from("out")));
        assert_eq!(overrides.plots, Some(PathBuf::from("img")));
        assert!(overrides.no_plots);
    }

    #[test]
    fn config_flag_parsed() {
        let cli = Cli::parse_from(["lanes", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn verbose_short_flag() {
        let cli = Cli::parse_from(["lanes", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["lanes", "--frobnicate"]).is_err());
    }
}
