use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::{CatalogError, ReconcileError};
use crate::parser::{MergePolicy, NameParser};
use crate::RuleSet;

const DEFAULT_PREFER_DIRECTORY: &str = "series_name,extra_info,release_group,version";

/// Configuration for rule loading and path reconciliation
#[derive(Debug, Clone)]
pub struct Config {
    pub rule_set: RuleSet,
    pub rules_file: Option<PathBuf>,
    pub strict_rules: bool,
    pub prefer_directory: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Result<Self> {
        let rule_set = match env::var("TVNAME_RULE_SET") {
            Ok(value) => RuleSet::from_str(&value, true)
                .map_err(|e| anyhow!("Invalid TVNAME_RULE_SET '{}': {}", value, e))?,
            Err(_) => RuleSet::default(),
        };

        let strict_rules = match env::var("TVNAME_STRICT_RULES") {
            Ok(value) => parse_flag(&value)
                .ok_or_else(|| anyhow!("Invalid TVNAME_STRICT_RULES '{}', expected true or false", value))?,
            Err(_) => false,
        };

        let prefer_directory = split_fields(
            &env::var("TVNAME_PREFER_DIRECTORY").unwrap_or_else(|_| DEFAULT_PREFER_DIRECTORY.to_string()),
        );

        let config = Self {
            rule_set,
            rules_file: env::var_os("TVNAME_RULES_FILE").map(PathBuf::from),
            strict_rules,
            prefer_directory,
        };

        config
            .merge_policy()
            .context("Invalid TVNAME_PREFER_DIRECTORY")?;

        Ok(config)
    }

    /// Load the catalog selected by this configuration
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.rules_file {
            Some(path) => Catalog::from_json_file(path, self.strict_rules),
            None => Catalog::for_rule_set(self.rule_set, self.strict_rules),
        }
    }

    pub fn merge_policy(&self) -> Result<MergePolicy, ReconcileError> {
        MergePolicy::prefer_directory(&self.prefer_directory)
    }

    /// Build a parser from the configured catalog and merge policy
    pub fn build_parser(&self) -> Result<NameParser> {
        let catalog = self.load_catalog().context("Failed to load naming rules")?;
        for rejected in catalog.rejected() {
            info!("Naming rule '{}' is disabled: {}", rejected.name, rejected.reason);
        }
        let policy = self.merge_policy()?;
        Ok(NameParser::new(Arc::new(catalog)).with_merge_policy(policy))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule_set: RuleSet::Standard,
            rules_file: None,
            strict_rules: false,
            prefer_directory: split_fields(DEFAULT_PREFER_DIRECTORY),
        }
    }
}

fn split_fields(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MergeField;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "TVNAME_RULE_SET",
        "TVNAME_RULES_FILE",
        "TVNAME_STRICT_RULES",
        "TVNAME_PREFER_DIRECTORY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.rule_set, RuleSet::Standard);
        assert!(config.rules_file.is_none());
        assert!(!config.strict_rules);
        assert_eq!(config.merge_policy().unwrap(), MergePolicy::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("TVNAME_RULE_SET", "ANIME");
        env::set_var("TVNAME_STRICT_RULES", "yes");
        env::set_var("TVNAME_PREFER_DIRECTORY", "season_number, series_name");

        let config = Config::from_env().unwrap();
        assert_eq!(config.rule_set, RuleSet::Anime);
        assert!(config.strict_rules);

        let policy = config.merge_policy().unwrap();
        assert!(policy.prefers_directory(MergeField::SeasonNumber));
        assert!(!policy.prefers_directory(MergeField::ReleaseGroup));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_rejected() {
        clear_env();
        env::set_var("TVNAME_PREFER_DIRECTORY", "series_name,quality");
        assert!(Config::from_env().is_err());

        clear_env();
        env::set_var("TVNAME_RULE_SET", "cartoons");
        assert!(Config::from_env().is_err());

        clear_env();
        env::set_var("TVNAME_STRICT_RULES", "maybe");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_build_parser() {
        let parser = Config::default().build_parser().unwrap();
        assert!(!parser.catalog().is_empty());
        assert_eq!(parser.merge_policy(), &MergePolicy::default());
    }
}
