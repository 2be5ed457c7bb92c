//! Concrete Strength Calculator - Main Entry Point
//!
//! Loads the trained regressor and scaler, predicts strength evolution for the
//! given mix and its control, and prints the comparison.

use anyhow::Result;
use clap::Parser;
use concrete_strength_pipeline::{
    cli::Cli,
    config::{AppConfig, ColorMode},
    models::ArtifactStore,
    pipeline::ComparisonPipeline,
    report::{self, OutputFormat, ReportOptions},
    CalculatorError,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit status when the artifacts cannot be loaded
const EXIT_ARTIFACTS_UNAVAILABLE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_from_path(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("concrete-strength error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&config, cli.verbose) {
        eprintln!("concrete-strength error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CalculatorError>() {
            Some(err) if err.is_fatal() => {
                debug!(error = %err, "Calculation disabled");
                eprintln!(
                    "{}",
                    artifacts_unavailable_message(err, &config, &cli.config)
                );
                ExitCode::from(EXIT_ARTIFACTS_UNAVAILABLE)
            }
            _ => {
                eprintln!("concrete-strength error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let store = ArtifactStore::global(&config.artifacts)?;

    let mix = cli.mix()?;
    mix.validate()?;
    info!(?mix, "Running strength comparison");

    let result = ComparisonPipeline::from_store(store).run(&mix)?;

    let rendered = match cli.format {
        OutputFormat::Json => report::render_json(&result)?,
        OutputFormat::Table => {
            let color_mode = cli.color.unwrap_or(config.output.color);
            report::render_report(
                &result,
                ReportOptions {
                    color: use_color(color_mode),
                    chart_width: config.output.chart_width,
                },
            )
        }
    };
    println!("{rendered}");

    Ok(())
}

/// Plain two-line diagnostic shown when the artifacts cannot be loaded
fn artifacts_unavailable_message(
    err: &CalculatorError,
    config: &AppConfig,
    config_path: &Path,
) -> String {
    format!(
        "Error: {err}\nPlace '{}' and '{}' in '{}' (or set [artifacts] in {}).",
        config.artifacts.model_file,
        config.artifacts.scaler_file,
        config.artifacts.dir,
        config_path.display()
    )
}

fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    }
}

fn init_tracing(config: &AppConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("concrete_strength_pipeline={level}").parse()?)
        .add_directive(format!("concrete_strength={level}").parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_artifacts_unavailable_message_is_two_plain_lines() {
        let config = AppConfig::default();
        let err = CalculatorError::ArtifactNotFound {
            path: PathBuf::from("concrete_strength_model.onnx"),
            source: None,
        };

        let message =
            artifacts_unavailable_message(&err, &config, Path::new("config/config.toml"));
        let lines: Vec<&str> = message.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error: "));
        assert!(lines[0].contains("concrete_strength_model.onnx"));
        assert!(lines[1].contains(&config.artifacts.model_file));
        assert!(lines[1].contains(&config.artifacts.scaler_file));
        assert!(lines[1].contains("config/config.toml"));
        assert!(!message.contains('\u{1b}'));
    }
}
