//! Main analysis engine implementation.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::analysis::catalog::{self, Hypothesis};
use crate::analysis::evaluator::{EvaluatorSettings, HypothesisEvaluator};
use crate::analysis::report::{AnalysisReport, DatasetSummary};
use crate::core::config::LifeboatConfig;
use crate::core::errors::{LifeboatError, Result};
use crate::data::cleaning::{clean, CleaningReport};
use crate::data::loader::load_csv;
use crate::data::model::Dataset;
use crate::plots;

/// Loads a passenger manifest and evaluates the configured hypothesis suite
#[derive(Debug, Clone)]
pub struct LifeboatEngine {
    config: LifeboatConfig,
}

impl LifeboatEngine {
    /// Create an engine after validating its configuration
    pub fn new(config: LifeboatConfig) -> Result<Self> {
        info!("Initializing Lifeboat analysis engine");
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in effect
    pub fn config(&self) -> &LifeboatConfig {
        &self.config
    }

    /// Hypotheses of the configured suite
    pub fn hypotheses(&self) -> Vec<Hypothesis> {
        catalog::suite(self.config.analysis.suite)
    }

    /// Read, parse and clean a CSV manifest
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(Dataset, CleaningReport)> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LifeboatError::io(
                format!("Dataset does not exist: {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "Path not found"),
            ));
        }

        let table = load_csv(path)?;
        let rows = table.parse()?;
        let (dataset, report) = clean(&rows, self.config.data.missing_age);

        info!(
            "Loaded {} passengers from {} ({} dropped)",
            dataset.len(),
            path.display(),
            report.rows_dropped
        );
        Ok((dataset, report))
    }

    /// Load a CSV manifest and evaluate every hypothesis of the suite
    pub fn analyze_csv<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisReport> {
        let path = path.as_ref();
        info!("Starting hypothesis analysis: {}", path.display());
        let (dataset, cleaning) = self.load(path)?;
        Ok(self.analyze_dataset(
            &dataset,
            Some(cleaning),
            Some(path.display().to_string()),
        ))
    }

    /// Evaluate the suite on an already cleaned dataset
    pub fn analyze_dataset(
        &self,
        dataset: &Dataset,
        cleaning: Option<CleaningReport>,
        source: Option<String>,
    ) -> AnalysisReport {
        if dataset.is_empty() {
            warn!("Dataset has no passengers; every test will be undefined");
        }

        let analysis = &self.config.analysis;
        let evaluator = HypothesisEvaluator::new(dataset, EvaluatorSettings::from(analysis));
        let results = evaluator.evaluate_all(&self.hypotheses(), analysis.alpha);
        let plots = self
            .config
            .plots
            .enabled
            .then(|| plots::build(dataset, &self.config.plots));

        let report = AnalysisReport {
            generated_at: Utc::now(),
            version: crate::VERSION.to_string(),
            source,
            alpha: analysis.alpha,
            suite: analysis.suite,
            dataset: DatasetSummary::from_dataset(dataset),
            cleaning,
            results,
            plots,
        };

        let counts = report.counts();
        info!(
            "Analysis completed: {} hypotheses, {} significant, {} undetermined",
            counts.total, counts.significant, counts.undetermined
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Suite;
    use crate::data::model::{Passenger, PassengerClass, Sex};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = "survived,pclass,sex,age,sibsp,parch,fare,embarked
0,3,male,22,1,0,7.25,S
1,1,female,38,1,0,71.2833,C
1,3,female,26,0,0,7.925,S
1,1,female,35,1,0,53.1,S
0,3,male,35,0,0,8.05,S
0,3,male,,0,0,8.4583,Q
0,1,male,54,0,0,51.8625,S
0,3,male,2,3,1,21.075,S
1,3,female,27,0,2,11.1333,S
1,2,female,14,1,0,30.0708,C
";

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = LifeboatConfig::default();
        config.analysis.alpha = 2.0;
        assert!(LifeboatEngine::new(config).is_err());
    }

    #[test]
    fn test_analyze_csv_runs_suite() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let engine = LifeboatEngine::new(LifeboatConfig::default()).unwrap();
        let report = engine.analyze_csv(file.path()).unwrap();
        assert_eq!(report.results.len(), 11);
        assert_eq!(report.dataset.passengers, 10);
        assert_eq!(report.cleaning.as_ref().unwrap().rows_read, 10);
        assert!(report.plots.is_some());
        assert!(report.result("sex_vs_survival").is_some());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let engine = LifeboatEngine::new(LifeboatConfig::default()).unwrap();
        let err = engine.analyze_csv("/nonexistent/titanic.csv").unwrap_err();
        assert!(matches!(err, LifeboatError::Io { .. }));
    }

    #[test]
    fn test_core_suite_without_plots() {
        let mut config = LifeboatConfig::default();
        config.analysis.suite = Suite::Core;
        config.plots.enabled = false;
        let engine = LifeboatEngine::new(config).unwrap();
        let dataset = Dataset::new(vec![Passenger::new(
            true,
            Sex::Female,
            PassengerClass::First,
            Some(30.0),
            80.0,
        )]);
        let report = engine.analyze_dataset(&dataset, None, None);
        assert_eq!(report.results.len(), 4);
        assert!(report.plots.is_none());
        assert_eq!(report.counts().undetermined, 4);
    }
}
