//! Configuration Layer Management
//!
//! Merges defaults, a configuration file and CLI overrides, in that order
//! of increasing priority.

use std::path::{Path, PathBuf};

use crate::cli::args::AnalyzeArgs;
use lifeboat::core::config::{LifeboatConfig, MissingAgePolicy};

/// Implicit configuration files looked up in the working directory
pub const IMPLICIT_CONFIG_FILES: [&str; 2] = [".lifeboat.yml", ".lifeboat.yaml"];

/// Apply CLI arguments on top of a configuration
pub trait ApplyCliOverrides {
    /// Overwrite every setting the arguments specify
    fn apply_cli_overrides(&mut self, args: &AnalyzeArgs);
}

impl ApplyCliOverrides for LifeboatConfig {
    fn apply_cli_overrides(&mut self, args: &AnalyzeArgs) {
        if let Some(dataset) = &args.dataset {
            self.data.path = Some(dataset.clone());
        }
        if args.impute_age {
            self.data.missing_age = MissingAgePolicy::Median;
        }
        if let Some(alpha) = args.alpha {
            self.analysis.alpha = alpha;
        }
        if let Some(suite) = args.suite {
            self.analysis.suite = suite.into();
        }
        if args.student {
            self.analysis.equal_variance = true;
        }
        if args.no_yates {
            self.analysis.yates_correction = false;
        }
        if args.no_plots {
            self.plots.enabled = false;
        }
        if let Some(bins) = args.bins {
            self.plots.histogram_bins = bins;
        }
        if let Some(format) = args.format {
            self.output.format = format.into();
        }
        if let Some(out) = &args.out {
            self.output.out_dir = out.clone();
        }
    }
}

/// First implicit configuration file present under `dir`
pub fn find_implicit_config(dir: &Path) -> Option<PathBuf> {
    IMPLICIT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Layered configuration: defaults, then `--config` or `./.lifeboat.yml`, then flags
pub fn build_layered_config(args: &AnalyzeArgs) -> anyhow::Result<LifeboatConfig> {
    let implicit_config_path = if args.config.is_none() {
        find_implicit_config(Path::new("."))
    } else {
        None
    };

    let mut config = match args.config.as_ref().or(implicit_config_path.as_ref()) {
        Some(config_path) => {
            tracing::debug!("Loading configuration from {}", config_path.display());
            LifeboatConfig::from_yaml_file(config_path).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to load configuration from {}: {}",
                    config_path.display(),
                    e
                )
            })?
        }
        None => LifeboatConfig::default(),
    };

    config.apply_cli_overrides(args);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{OutputFormat, SuiteArg};
    use lifeboat::core::config::{ReportFormat, Suite};
    use tempfile::tempdir;

    fn analyze_args() -> AnalyzeArgs {
        AnalyzeArgs {
            dataset: None,
            config: None,
            alpha: None,
            suite: None,
            student: false,
            no_yates: false,
            impute_age: false,
            no_plots: false,
            bins: None,
            format: None,
            out: None,
            quiet: false,
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut args = analyze_args();
        args.dataset = Some(PathBuf::from("titanic.csv"));
        args.alpha = Some(0.01);
        args.suite = Some(SuiteArg::Core);
        args.student = true;
        args.no_yates = true;
        args.impute_age = true;
        args.format = Some(OutputFormat::Html);

        let mut config = LifeboatConfig::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.data.path, Some(PathBuf::from("titanic.csv")));
        assert_eq!(config.analysis.alpha, 0.01);
        assert_eq!(config.analysis.suite, Suite::Core);
        assert!(config.analysis.equal_variance);
        assert!(!config.analysis.yates_correction);
        assert_eq!(config.data.missing_age, MissingAgePolicy::Median);
        assert_eq!(config.output.format, ReportFormat::Html);
    }

    #[test]
    fn test_unset_flags_keep_file_values() {
        let mut config = LifeboatConfig::default();
        config.analysis.alpha = 0.1;
        config.analysis.equal_variance = true;
        config.apply_cli_overrides(&analyze_args());
        assert_eq!(config.analysis.alpha, 0.1);
        assert!(config.analysis.equal_variance);
    }

    #[test]
    fn test_explicit_config_file_is_layered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yml");
        std::fs::write(&path, "analysis:\n  alpha: 0.1\n  suite: core\n").unwrap();

        let mut args = analyze_args();
        args.config = Some(path);
        args.alpha = Some(0.02);
        let config = build_layered_config(&args).unwrap();
        assert_eq!(config.analysis.alpha, 0.02);
        assert_eq!(config.analysis.suite, Suite::Core);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let mut args = analyze_args();
        args.config = Some(PathBuf::from("/nonexistent/lifeboat.yml"));
        assert!(build_layered_config(&args).is_err());

        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.yml");
        std::fs::write(&path, "").unwrap();
        let mut args = analyze_args();
        args.config = Some(path);
        args.alpha = Some(1.5);
        let err = build_layered_config(&args).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_find_implicit_config_prefers_yml() {
        let dir = tempdir().unwrap();
        assert_eq!(find_implicit_config(dir.path()), None);
        std::fs::write(dir.path().join(".lifeboat.yaml"), "").unwrap();
        std::fs::write(dir.path().join(".lifeboat.yml"), "").unwrap();
        assert_eq!(
            find_implicit_config(dir.path()),
            Some(dir.path().join(".lifeboat.yml"))
        );
    }
}
