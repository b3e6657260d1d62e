//! Terminal display functions for analysis results.

use console::Term;
use owo_colors::OwoColorize;
use tabled::{builder::Builder, settings::Style as TableStyle, Table, Tabled};

use lifeboat::analysis::interpretation::{format_p_value, summarize, Significance};
use lifeboat::analysis::report::{AnalysisReport, Evidence, HypothesisResult};
use lifeboat::data::cleaning::CleaningReport;
use lifeboat::data::loader::RawTable;
use lifeboat::stats::contingency::ContingencyTable;
use lifeboat::TestOutcome;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print lifeboat header with version info
pub fn print_header() {
    if Term::stdout().size().1 >= 80 {
        let rule = "─".repeat(58);
        println!("{}", format!("┌{rule}┐").cyan().bold());
        println!(
            "{} {} {}",
            "│".cyan().bold(),
            header_title().bright_cyan().bold(),
            "│".cyan().bold()
        );
        println!("{}", format!("└{rule}┘").cyan().bold());
    } else {
        println!("{} {}", "🛟".bright_cyan(), format!("Lifeboat v{VERSION}").bright_cyan().bold());
    }
    println!();
}

/// Banner text padded to the box width before any colouring
fn header_title() -> String {
    format!("{:<56}", format!("🛟 Lifeboat v{VERSION} - survival hypothesis tests"))
}

fn colored_decision(significance: Significance) -> String {
    match significance {
        Significance::Significant => significance.label().bright_green().bold().to_string(),
        Significance::NotSignificant => significance.label().white().to_string(),
        Significance::Undetermined => significance.label().yellow().to_string(),
    }
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Hypothesis")]
    hypothesis: String,
    #[tabled(rename = "Test")]
    test: String,
    #[tabled(rename = "Statistic")]
    statistic: String,
    #[tabled(rename = "df")]
    df: String,
    #[tabled(rename = "p-value")]
    p_value: String,
    #[tabled(rename = "Effect size")]
    effect: String,
    #[tabled(rename = "Decision")]
    decision: String,
}

impl ResultRow {
    fn from_result(result: &HypothesisResult) -> Self {
        let computed = result.outcome.result();
        Self {
            hypothesis: result.hypothesis.title.clone(),
            test: result.test_name.clone(),
            statistic: computed.map_or("n/a".to_string(), |r| format!("{:.4}", r.statistic)),
            df: computed
                .and_then(|r| r.degrees_of_freedom)
                .map_or("n/a".to_string(), |df| df.to_string()),
            p_value: computed.map_or("n/a".to_string(), |r| format_p_value(r.p_value)),
            effect: computed
                .and_then(|r| r.effect_size)
                .map_or(String::new(), |e| format!("{} {:.3}", e.kind.label(), e.value)),
            decision: colored_decision(result.significance),
        }
    }
}

/// Headline dataset numbers
pub fn display_dataset_summary(report: &AnalysisReport) {
    let summary = &report.dataset;
    println!("{}", "🚢 Dataset".bright_blue().bold());
    if let Some(source) = &report.source {
        println!("   Source:      {}", source.cyan());
    }
    println!("   Passengers:  {}", summary.passengers.to_string().bold());
    match summary.survival_rate {
        Some(rate) => println!(
            "   Survivors:   {} ({:.1}%)",
            summary.survivors.to_string().bold(),
            rate * 100.0
        ),
        None => println!("   Survivors:   0"),
    }
    println!("   Known ages:  {}", summary.ages_known);
    println!();
}

/// Rows dropped and values imputed during cleaning
pub fn display_cleaning(cleaning: &CleaningReport) {
    println!("{}", "🧹 Cleaning".bright_blue().bold());
    println!(
        "   Rows read: {}, kept: {}, dropped: {}",
        cleaning.rows_read,
        cleaning.rows_kept(),
        cleaning.rows_dropped
    );
    for imputation in &cleaning.imputations {
        println!(
            "   {} Filled {} missing {} value(s) with {}",
            "•".dimmed(),
            imputation.count,
            imputation.column.cyan(),
            imputation.value
        );
    }
    println!();
}

/// Missing values per column before and after cleaning
pub fn display_missing_values(cleaning: &CleaningReport) {
    let mut builder = Builder::default();
    builder.push_record(["Column", "Missing before", "Missing after"]);
    for (column, before) in &cleaning.missing_before {
        let after = cleaning.missing_after.get(column).copied().unwrap_or_default();
        builder.push_record([column.clone(), before.to_string(), after.to_string()]);
    }
    let mut table = builder.build();
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!();
}

/// One row per hypothesis
pub fn display_results_table(report: &AnalysisReport) {
    let counts = report.counts();
    println!(
        "{} {}",
        "📊 Hypothesis tests".bright_blue().bold(),
        format!("(α = {})", report.alpha).dimmed()
    );
    let rows: Vec<ResultRow> = report.results.iter().map(ResultRow::from_result).collect();
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!(
        "   {} significant, {} not significant, {} undetermined",
        counts.significant.to_string().bright_green().bold(),
        counts.not_significant,
        counts.undetermined.to_string().yellow()
    );
    println!();
}

fn contingency_table(table: &ContingencyTable, corner: &str) -> Table {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(corner.to_string()).chain(table.column_labels.iter().cloned()),
    );
    for (label, counts) in table.row_labels.iter().zip(&table.counts) {
        builder.push_record(
            std::iter::once(label.clone()).chain(counts.iter().map(|c| c.to_string())),
        );
    }
    let mut table = builder.build();
    table.with(TableStyle::rounded());
    table
}

/// H0/H1, supporting data and decision for one hypothesis
pub fn display_result_details(result: &HypothesisResult, alpha: f64) {
    let hypothesis = &result.hypothesis;
    println!("{}", format!("▶ {}", hypothesis.title).bright_cyan().bold());
    println!("   H0: {}", hypothesis.null);
    println!("   H1: {}", hypothesis.alternative);

    match &result.evidence {
        Evidence::Contingency { table } => {
            println!("{}", contingency_table(table, ""));
        }
        Evidence::Groups { groups } => {
            for group in groups {
                let mean = group.mean.map_or("n/a".to_string(), |m| format!("{m:.2}"));
                println!("   Mean ({}): {} (n = {})", group.label, mean, group.n);
            }
        }
        Evidence::Pairs { pairs } => println!("   Complete pairs: {pairs}"),
    }

    if let TestOutcome::Computed(computed) = &result.outcome {
        print!("   {}: {:.6}", result.test_name, computed.statistic);
        match computed.degrees_of_freedom {
            Some(df) => println!(" (df = {df})"),
            None => println!(),
        }
    }

    let line = summarize(&result.outcome, alpha);
    match result.significance {
        Significance::Significant => println!("   👉 {}", line.bright_green()),
        Significance::NotSignificant => println!("   👉 {}", line),
        Significance::Undetermined => println!("   ⚠️  {}", line.yellow()),
    }
    println!();
}

/// Full terminal rendering of a report
pub fn display_report(report: &AnalysisReport) {
    display_dataset_summary(report);
    if let Some(cleaning) = &report.cleaning {
        display_cleaning(cleaning);
    }
    for result in &report.results {
        display_result_details(result, report.alpha);
    }
    display_results_table(report);
}

/// Shape, columns and the first rows of a raw manifest
pub fn display_raw_preview(table: &RawTable, head: usize) {
    println!(
        "{} {} rows × {} columns",
        "📐 Shape:".bright_blue().bold(),
        table.len(),
        table.columns.len()
    );
    println!("{} {}", "🏷️  Columns:".bright_blue().bold(), table.columns.join(", "));
    println!();

    let mut builder = Builder::default();
    builder.push_record(["survived", "pclass", "sex", "age", "sibsp", "parch", "fare", "embarked"]);
    for row in table.rows.iter().take(head) {
        let cell = |value: &Option<String>| value.clone().unwrap_or_default();
        builder.push_record([
            cell(&row.survived),
            cell(&row.pclass),
            cell(&row.sex),
            cell(&row.age),
            cell(&row.sibsp),
            cell(&row.parch),
            cell(&row.fare),
            cell(&row.embarked),
        ]);
    }
    let mut preview = builder.build();
    preview.with(TableStyle::rounded());
    println!("{}", format!("First {} rows:", head.min(table.len())).bright_blue().bold());
    println!("{}", preview);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_title_fills_box_width() {
        let title = header_title();
        assert_eq!(title.chars().count(), 56);
        assert!(title.starts_with("🛟 Lifeboat v"));
        assert!(!title.contains('\u{1b}'));
    }
}
