//! CLI argument parsing module for reqgen

use crate::config::DEFAULT_CONFIG_FILE;
use crate::manifest::DEFAULT_OUTPUT_FILE;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Pinned requirements generator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reqgen",
    version,
    about = "Generate a pinned requirements file from a dependency configuration"
)]
pub struct CliArgs {
    /// Dependency configuration file (.yml, .yaml, .toml or .json)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output requirements file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Target environment (overrides `environment` in the configuration)
    #[arg(short, long = "env")]
    pub environment: Option<String>,

    /// Only include dependencies required by these features
    /// (can be specified multiple times or space-separated)
    #[arg(short, long, num_args = 1.., action = ArgAction::Append)]
    pub features: Vec<String>,

    // General options
    /// Dry run mode - print the manifest instead of writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verify the output file is up to date without writing it
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output the report in JSON format
    #[arg(long, conflicts_with = "diff")]
    pub json: bool,

    /// Show changes to the output file in diff format
    #[arg(long)]
    pub diff: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Resolve the target environment: the flag wins over the configuration
    /// default; an empty value disables environment filtering.
    pub fn target_environment(&self, config_default: Option<&str>) -> String {
        self.environment
            .as_deref()
            .or(config_default)
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["reqgen"]);
        assert_eq!(args.config, PathBuf::from("dependencies-config.yml"));
        assert_eq!(args.output, PathBuf::from("requirements.txt"));
        assert!(args.environment.is_none());
        assert!(args.features.is_empty());
        assert!(!args.dry_run);
        assert!(!args.check);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(!args.diff);
        assert!(!args.no_color);
    }

    #[test]
    fn test_paths() {
        let args = CliArgs::parse_from([
            "reqgen",
            "--config",
            "deps.toml",
            "-o",
            "build/requirements.txt",
        ]);
        assert_eq!(args.config, PathBuf::from("deps.toml"));
        assert_eq!(args.output, PathBuf::from("build/requirements.txt"));
    }

    #[test]
    fn test_environment_flag() {
        let args = CliArgs::parse_from(["reqgen", "--env", "prod"]);
        assert_eq!(args.environment.as_deref(), Some("prod"));

        let args = CliArgs::parse_from(["reqgen", "-e", "staging"]);
        assert_eq!(args.environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_features_space_separated() {
        let args = CliArgs::parse_from(["reqgen", "--features", "api", "postgresql"]);
        assert_eq!(args.features, vec!["api", "postgresql"]);
    }

    #[test]
    fn test_features_repeated() {
        let args = CliArgs::parse_from(["reqgen", "-f", "api", "-f", "postgresql"]);
        assert_eq!(args.features, vec!["api", "postgresql"]);
    }

    #[test]
    fn test_dry_run_flags() {
        assert!(CliArgs::parse_from(["reqgen", "-n"]).dry_run);
        assert!(CliArgs::parse_from(["reqgen", "--dry-run"]).dry_run);
    }

    #[test]
    fn test_check_conflicts_with_dry_run() {
        assert!(CliArgs::try_parse_from(["reqgen", "--check", "--dry-run"]).is_err());
        assert!(CliArgs::parse_from(["reqgen", "--check"]).check);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["reqgen", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn test_json_conflicts_with_diff() {
        assert!(CliArgs::try_parse_from(["reqgen", "--json", "--diff"]).is_err());
    }

    #[test]
    fn test_no_color_flag() {
        assert!(CliArgs::parse_from(["reqgen", "--no-color"]).no_color);
    }

    #[test]
    fn test_target_environment_resolution() {
        let args = CliArgs::parse_from(["reqgen"]);
        assert_eq!(args.target_environment(None), "");
        assert_eq!(args.target_environment(Some("prod")), "prod");

        let args = CliArgs::parse_from(["reqgen", "--env", "staging"]);
        assert_eq!(args.target_environment(Some("prod")), "staging");

        // Explicit empty flag disables the configured default
        let args = CliArgs::parse_from(["reqgen", "--env", ""]);
        assert_eq!(args.target_environment(Some("prod")), "");
    }
}
