//! Command-line arguments

use crate::config::{ColorMode, DEFAULT_CONFIG_PATH};
use crate::error::{CalculatorError, Result};
use crate::report::OutputFormat;
use crate::types::MixInputs;
use clap::Parser;
use std::path::PathBuf;

/// Predict concrete compressive-strength evolution for a mix with PAC sludge,
/// compared against the same mix without PAC sludge or activator.
#[derive(Debug, Parser)]
#[command(name = "concrete-strength", version, allow_negative_numbers = true)]
pub struct Cli {
    /// Cement (kg/m³)
    #[arg(long, default_value_t = 350.0)]
    pub cement: f64,

    /// PAC sludge (kg/m³)
    #[arg(long, default_value_t = 50.0)]
    pub pac: f64,

    /// Chemical activator (%)
    #[arg(long, default_value_t = 3.0)]
    pub activator: f64,

    /// Blast-furnace slag (kg/m³)
    #[arg(long, default_value_t = 0.0)]
    pub slag: f64,

    /// Fly ash (kg/m³)
    #[arg(long, default_value_t = 0.0)]
    pub fly_ash: f64,

    /// Water (kg/m³)
    #[arg(long, default_value_t = 170.0)]
    pub water: f64,

    /// Superplasticizer (kg/m³)
    #[arg(long, default_value_t = 0.0)]
    pub superplasticizer: f64,

    /// Coarse aggregate (kg/m³)
    #[arg(long, default_value_t = 1050.0)]
    pub coarse_aggregate: f64,

    /// Fine aggregate (kg/m³)
    #[arg(long, default_value_t = 750.0)]
    pub fine_aggregate: f64,

    /// Read the mix design from a JSON file instead of the options above
    #[arg(long, value_name = "PATH")]
    pub mix_file: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Color the results table (overrides the configured mode)
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The mix to evaluate: `--mix-file` when given, otherwise the individual options.
    pub fn mix(&self) -> Result<MixInputs> {
        match &self.mix_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    CalculatorError::malformed(format!(
                        "cannot read mix file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                MixInputs::from_json(&raw)
            }
            None => Ok(MixInputs {
                cement: self.cement,
                pac_sludge: self.pac,
                slag: self.slag,
                fly_ash: self.fly_ash,
                water: self.water,
                superplasticizer: self.superplasticizer,
                coarse_aggregate: self.coarse_aggregate,
                fine_aggregate: self.fine_aggregate,
                activator_pct: self.activator,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_reference_mix() {
        let cli = Cli::parse_from(["concrete-strength"]);
        let mix = cli.mix().unwrap();

        assert_eq!(mix.cement, 350.0);
        assert_eq!(mix.pac_sludge, 50.0);
        assert_eq!(mix.water, 170.0);
        assert_eq!(mix.coarse_aggregate, 1050.0);
        assert_eq!(mix.fine_aggregate, 750.0);
        assert_eq!(mix.activator_pct, 3.0);
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.color.is_none());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::parse_from([
            "concrete-strength",
            "--pac",
            "0",
            "--activator",
            "0",
            "--fly-ash",
            "40",
            "--format",
            "json",
            "--color",
            "never",
        ]);
        let mix = cli.mix().unwrap();

        assert_eq!(mix.pac_sludge, 0.0);
        assert_eq!(mix.fly_ash, 40.0);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.color, Some(ColorMode::Never));
    }

    #[test]
    fn test_mix_file_takes_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mix.json");
        fs::write(
            &path,
            r#"{"cement": 400, "pac_sludge": 20, "slag": 0, "fly_ash": 0, "water": 160,
                "superplasticizer": 2, "coarse_aggregate": 1000, "fine_aggregate": 700,
                "activator_pct": 1.5}"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "concrete-strength",
            "--cement",
            "999",
            "--mix-file",
            path.to_str().unwrap(),
        ]);
        let mix = cli.mix().unwrap();

        assert_eq!(mix.cement, 400.0);
        assert_eq!(mix.superplasticizer, 2.0);
    }

    #[test]
    fn test_unreadable_mix_file_is_malformed() {
        let cli = Cli::parse_from(["concrete-strength", "--mix-file", "/nonexistent/mix.json"]);
        assert!(matches!(cli.mix(), Err(CalculatorError::MalformedInput(_))));
    }
}
