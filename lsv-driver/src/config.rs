// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ArgMatches;
use lsv_aig::network::builder::BuilderOptions;
use lsv_aig::network::node::Network;
use lsv_aig::serdes::load_network_auto::load_network_from_path;
use serde::Deserialize;

use crate::report_cli_error::report_cli_error_and_exit;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "lsv-config.toml";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LsvConfig {
    /// Fold constants and trivial ANDs while loading AIGER files.
    pub fold: Option<bool>,

    /// Structurally hash AND nodes while loading AIGER files. Without hashing
    /// the loaded network is not accepted by `print-multi-output-cuts`.
    pub hash: Option<bool>,

    /// Emit `print-multi-output-cuts` reports as JSON by default.
    pub json: Option<bool>,
}

#[derive(Deserialize)]
struct LsvConfigFile {
    lsv: LsvConfig,
}

pub fn parse_config(text: &str) -> anyhow::Result<LsvConfig> {
    let file: LsvConfigFile = toml::from_str(text).context("parse [lsv] config table")?;
    Ok(file.lsv)
}

pub fn load_config(path: &Path) -> anyhow::Result<LsvConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in config file {}", path.display()))
}

/// The explicitly requested config path, else `lsv-config.toml` in the
/// current directory if one exists.
pub fn find_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    let cwd_path = std::env::current_dir().ok()?.join(DEFAULT_CONFIG_FILE_NAME);
    if cwd_path.exists() {
        log::info!(
            "Using {} in current directory: {}",
            DEFAULT_CONFIG_FILE_NAME,
            cwd_path.display()
        );
        Some(cwd_path)
    } else {
        None
    }
}

/// Reads a `--flag true|false` value, falling back to the config value and
/// then to `default`. Subcommands that do not define `name` use the fallback.
pub fn get_bool(
    matches: &ArgMatches,
    name: &str,
    config_value: Option<bool>,
    default: bool,
) -> bool {
    let flag = matches.try_get_one::<String>(name).ok().flatten();
    match flag.map(|s| s.as_str()) {
        Some("true") => true,
        Some("false") => false,
        _ => config_value.unwrap_or(default),
    }
}

pub fn get_builder_options(matches: &ArgMatches, config: &Option<LsvConfig>) -> BuilderOptions {
    let config = config.as_ref();
    BuilderOptions {
        fold: get_bool(matches, "fold", config.and_then(|c| c.fold), true),
        hash: get_bool(matches, "hash", config.and_then(|c| c.hash), true),
    }
}

/// Loads the subcommand's `network_input_file` with the folding and hashing
/// options resolved from flags and config, exiting with a CLI error if the
/// file cannot be read or parsed.
pub fn load_network_or_exit(
    matches: &ArgMatches,
    config: &Option<LsvConfig>,
    subcommand: &str,
) -> Network {
    let input_file = matches.get_one::<String>("network_input_file").unwrap();
    let options = get_builder_options(matches, config);
    match load_network_from_path(Path::new(input_file), options) {
        Ok(network) => network,
        Err(e) => report_cli_error_and_exit(
            "could not load network",
            Some(subcommand),
            &[("path", input_file.as_str()), ("error", e.as_str())],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_config_table() {
        let config = parse_config("[lsv]\nhash = false\njson = true\n").unwrap();
        assert_eq!(
            config,
            LsvConfig {
                fold: None,
                hash: Some(false),
                json: Some(true),
            }
        );
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse_config("[lsv]\nstrash = true\n").unwrap_err();
        assert!(format!("{:#}", err).contains("strash"), "{:#}", err);
    }

    #[test]
    fn test_flag_overrides_config() {
        let command = clap::Command::new("t").arg(
            clap::Arg::new("hash")
                .long("hash")
                .action(clap::ArgAction::Set)
                .value_parser(["true", "false"]),
        );
        let config = Some(LsvConfig {
            fold: None,
            hash: Some(false),
            json: None,
        });
        let from_config = command.clone().get_matches_from(["t"]);
        assert!(!get_builder_options(&from_config, &config).hash);
        let from_flag = command.get_matches_from(["t", "--hash", "true"]);
        assert!(get_builder_options(&from_flag, &config).hash);
        assert!(get_builder_options(&from_flag, &config).fold);
    }
}
