//! Report generation with template engine support.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::analysis::catalog::TestKind;
use crate::analysis::interpretation::Significance;
use crate::analysis::report::{
    AnalysisReport, DatasetSummary, Evidence, GroupSummary, HypothesisResult, ResultCounts,
};
use crate::core::config::{ReportFormat, Suite};
use crate::data::cleaning::CleaningReport;
use crate::stats::outcome::TestOutcome;

use super::error::ReportError;
use super::helpers::register_helpers;
use super::templates::{register_builtin_templates, HTML_TEMPLATE_NAME, MARKDOWN_TEMPLATE_NAME};

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;

/// Base name of report files
pub const REPORT_FILE_STEM: &str = "lifeboat-report";

/// Renders an [`AnalysisReport`] as JSON, YAML, Markdown or HTML
#[derive(Debug)]
pub struct ReportGenerator {
    handlebars: Handlebars<'static>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        register_helpers(&mut handlebars);
        register_builtin_templates(&mut handlebars);
        Self { handlebars }
    }
}

#[derive(Debug, Serialize)]
struct ContingencyRowView {
    label: String,
    counts: Vec<u64>,
}

#[derive(Debug, Serialize)]
struct ContingencyView {
    corner: String,
    columns: Vec<String>,
    rows: Vec<ContingencyRowView>,
}

#[derive(Debug, Serialize)]
struct ResultView<'a> {
    id: &'a str,
    title: &'a str,
    null: &'a str,
    alternative: &'a str,
    test_name: &'a str,
    computed: bool,
    statistic: Option<f64>,
    p_value: Option<f64>,
    df: Option<String>,
    effect: Option<String>,
    significance: Significance,
    significance_label: &'static str,
    decision: &'static str,
    reason: Option<&'a str>,
    table: Option<ContingencyView>,
    groups: Option<&'a [GroupSummary]>,
    pairs: Option<usize>,
}

impl<'a> ResultView<'a> {
    fn from_result(result: &'a HypothesisResult) -> Self {
        let computed = result.outcome.result();
        let reason = match &result.outcome {
            TestOutcome::Undefined { reason } => Some(reason.as_str()),
            TestOutcome::Computed(_) => None,
        };
        let (table, groups, pairs) = match &result.evidence {
            Evidence::Contingency { table } => {
                let corner = match result.hypothesis.kind {
                    TestKind::Association { factor } => factor.label().to_string(),
                    _ => String::new(),
                };
                let view = ContingencyView {
                    corner,
                    columns: table.column_labels.clone(),
                    rows: table
                        .row_labels
                        .iter()
                        .zip(&table.counts)
                        .map(|(label, counts)| ContingencyRowView {
                            label: label.clone(),
                            counts: counts.clone(),
                        })
                        .collect(),
                };
                (Some(view), None, None)
            }
            Evidence::Groups { groups } => (None, Some(groups.as_slice()), None),
            Evidence::Pairs { pairs } => (None, None, Some(*pairs)),
        };

        Self {
            id: &result.hypothesis.id,
            title: &result.hypothesis.title,
            null: &result.hypothesis.null,
            alternative: &result.hypothesis.alternative,
            test_name: &result.test_name,
            computed: computed.is_some(),
            statistic: computed.map(|r| r.statistic),
            p_value: computed.map(|r| r.p_value),
            df: computed.and_then(|r| r.degrees_of_freedom).map(|df| df.to_string()),
            effect: computed
                .and_then(|r| r.effect_size)
                .map(|e| format!("{} = {:.4}", e.kind.label(), e.value)),
            significance: result.significance,
            significance_label: result.significance.label(),
            decision: result.significance.decision(),
            reason,
            table,
            groups,
            pairs,
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    title: &'static str,
    generated_at: String,
    version: &'a str,
    source: Option<&'a str>,
    alpha: f64,
    suite: Suite,
    dataset: &'a DatasetSummary,
    counts: ResultCounts,
    cleaning: Option<&'a CleaningReport>,
    results: Vec<ResultView<'a>>,
}

impl<'a> ReportView<'a> {
    fn from_report(report: &'a AnalysisReport) -> Self {
        Self {
            title: "Titanic hypothesis report",
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            version: &report.version,
            source: report.source.as_deref(),
            alpha: report.alpha,
            suite: report.suite,
            dataset: &report.dataset,
            counts: report.counts(),
            cleaning: report.cleaning.as_ref(),
            results: report.results.iter().map(ResultView::from_result).collect(),
        }
    }
}

impl ReportGenerator {
    /// Generator with the built-in templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a report to text in a file format
    pub fn render(&self, report: &AnalysisReport, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
            ReportFormat::Markdown => self.render_template(MARKDOWN_TEMPLATE_NAME, report),
            ReportFormat::Html => self.render_template(HTML_TEMPLATE_NAME, report),
            ReportFormat::Terminal => Err(ReportError::UnsupportedFormat("terminal".to_string())),
        }
    }

    /// Render and write a report to `output_path`
    pub fn generate_report<P: AsRef<Path>>(
        &self,
        report: &AnalysisReport,
        output_path: P,
        format: ReportFormat,
    ) -> Result<(), ReportError> {
        let output_path = output_path.as_ref();
        let content = self.render(report, format)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, content)?;
        debug!("Wrote {:?} report to {}", format, output_path.display());
        Ok(())
    }

    fn render_template(&self, template_name: &str, report: &AnalysisReport) -> Result<String, ReportError> {
        let view = ReportView::from_report(report);
        Ok(self.handlebars.render(template_name, &view)?)
    }
}

/// `<out_dir>/lifeboat-report.<ext>`, or `None` for terminal output
pub fn report_path(out_dir: &Path, format: ReportFormat) -> Option<PathBuf> {
    format
        .extension()
        .map(|ext| out_dir.join(format!("{REPORT_FILE_STEM}.{ext}")))
}
