// Command-line surface.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use savant_core::WeightField;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "savant", version, about = "Percentile rankings for scouting exports")]
pub struct Cli {
    /// Directory containing config/savant.toml (defaults to the current directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the suggested column mapping for a file as TOML.
    Map {
        file: PathBuf,

        /// Write the mapping here instead of stdout.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Build the percentile table.
    Rank {
        file: PathBuf,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Build the synthetic xwOBA table.
    Composite {
        file: PathBuf,

        /// Override one weight, e.g. `--set w_power=0.4`. Repeatable.
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_weight_override)]
        overrides: Vec<(WeightField, String)>,

        #[command(flatten)]
        table: TableArgs,
    },
}

/// Options shared by the table-producing subcommands.
#[derive(Debug, clap::Args)]
pub struct TableArgs {
    /// Mapping TOML (as printed by `savant map`); suggested when absent.
    #[arg(long, value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Write the table here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Split `FIELD=VALUE`. The field must name a weight; the value is kept raw
/// so a bad number is reported and skipped rather than aborting the run.
pub fn parse_weight_override(s: &str) -> Result<(WeightField, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{s}`"))?;
    let field = field.parse::<WeightField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_override_pair() {
        let (field, value) = parse_weight_override("w_power=0.4").unwrap();
        assert_eq!(field, WeightField::Power);
        assert_eq!(value, "0.4");
    }

    #[test]
    fn keeps_invalid_value_raw() {
        let (field, value) = parse_weight_override("base_woba=abc").unwrap();
        assert_eq!(field, WeightField::BaseWoba);
        assert_eq!(value, "abc");
    }

    #[test]
    fn rejects_unknown_field() {
        let err = parse_weight_override("w_speed=1").unwrap_err();
        assert!(err.contains("w_speed"));
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(parse_weight_override("w_bb").is_err());
    }

    #[test]
    fn composite_command_collects_overrides() {
        let cli = Cli::try_parse_from([
            "savant",
            "composite",
            "players.csv",
            "--set",
            "w_bb=0.5",
            "--set",
            "w_k=oops",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Composite {
                file,
                overrides,
                table,
            } => {
                assert_eq!(file, PathBuf::from("players.csv"));
                assert_eq!(
                    overrides,
                    vec![
                        (WeightField::Bb, "0.5".to_string()),
                        (WeightField::K, "oops".to_string()),
                    ]
                );
                assert_eq!(table.format, OutputFormat::Json);
                assert!(table.mapping.is_none());
            }
            other => panic!("expected Composite, got {other:?}"),
        }
    }

    #[test]
    fn unknown_override_field_fails_parsing() {
        let result = Cli::try_parse_from(["savant", "composite", "a.csv", "--set", "nope=1"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_dir_is_global() {
        let cli = Cli::try_parse_from(["savant", "rank", "a.csv", "--config-dir", "/tmp/cfg"])
            .unwrap();
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/cfg")));
        assert!(matches!(cli.command, Command::Rank { .. }));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
