//! Command handlers for the lifeboat binary.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use lifeboat::core::config::{LifeboatConfig, ReportFormat};
use lifeboat::data::cleaning::clean;
use lifeboat::data::loader::load_csv;
use lifeboat::io::reports::{report_path, ReportGenerator};
use lifeboat::LifeboatEngine;

use crate::cli::args::{AnalyzeArgs, DescribeArgs, InitConfigArgs, ValidateConfigArgs};
use crate::cli::config_layer::build_layered_config;
use crate::cli::output::{display_missing_values, display_raw_preview, display_report, print_header};

/// Evaluate the configured hypothesis suite and write the report
pub async fn analyze_command(args: Box<AnalyzeArgs>) -> anyhow::Result<()> {
    let config = build_layered_config(&args)?;
    let dataset_path: PathBuf = match &config.data.path {
        Some(path) => path.clone(),
        None => anyhow::bail!(
            "No dataset given. Pass a CSV path or set data.path in the configuration file"
        ),
    };

    let format = config.output.format;
    let out_dir = config.output.out_dir.clone();
    let quiet = args.quiet;

    if !quiet {
        print_header();
    }

    let engine = LifeboatEngine::new(config)?;
    let report = engine.analyze_csv(&dataset_path)?;

    if !quiet {
        display_report(&report);
    }

    let Some(output_path) = report_path(&out_dir, format) else {
        return Ok(());
    };

    ReportGenerator::new().generate_report(&report, &output_path, format)?;

    println!(
        "{} {}",
        "📄 Report saved to:".bright_green().bold(),
        output_path.display().to_string().cyan()
    );

    Ok(())
}

/// Preview a manifest and its missing values
pub async fn describe_command(args: DescribeArgs) -> anyhow::Result<()> {
    let table = load_csv(&args.dataset)?;
    println!(
        "{} {}",
        "🔍 Describing:".bright_blue().bold(),
        args.dataset.display().to_string().cyan()
    );
    println!();
    display_raw_preview(&table, args.head);

    let parsed = table.parse()?;
    let config = LifeboatConfig::default();
    let (_, cleaning) = clean(&parsed, config.data.missing_age);
    println!("{}", "🕳️  Missing values:".bright_blue().bold());
    display_missing_values(&cleaning);

    Ok(())
}

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default lifeboat configuration".dimmed());
    println!("{}", "# Save this to a file and customize as needed".dimmed());
    println!(
        "{}",
        "# Usage: lifeboat analyze --config your-config.yml titanic.csv".dimmed()
    );
    println!();

    let config = LifeboatConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub async fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Configuration file already exists: {}. Use --force to overwrite or choose a different name with --output",
            args.output.display()
        ));
    }

    let config = LifeboatConfig::default();
    let yaml_content = serde_yaml::to_string(&config)?;
    tokio::fs::write(&args.output, yaml_content).await?;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "📝 Next steps:".bright_blue().bold());
    println!("   1. Edit the configuration file to customize the study");
    println!(
        "   2. Run analysis with: {}",
        format!("lifeboat analyze --config {} titanic.csv", args.output.display()).cyan()
    );

    println!();
    println!("{}", "🔧 Key settings you can customize:".bright_blue().bold());

    #[derive(Tabled)]
    struct CustomizationRow {
        setting: &'static str,
        description: &'static str,
    }

    let customization_rows = vec![
        CustomizationRow {
            setting: "data.missing_age",
            description: "omit (per test) or median imputation (default: omit)",
        },
        CustomizationRow {
            setting: "analysis.alpha",
            description: "Significance threshold (default: 0.05)",
        },
        CustomizationRow {
            setting: "analysis.suite",
            description: "core or extended hypothesis battery (default: extended)",
        },
        CustomizationRow {
            setting: "analysis.equal_variance",
            description: "Student's instead of Welch's t-test (default: false)",
        },
        CustomizationRow {
            setting: "analysis.yates_correction",
            description: "Continuity correction on 2x2 tables (default: true)",
        },
        CustomizationRow {
            setting: "output.format",
            description: "terminal, json, yaml, markdown or html",
        },
    ];

    let mut table = Table::new(customization_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    Ok(())
}

/// Validate a lifeboat configuration file
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let loaded = LifeboatConfig::from_yaml_file(&args.config)
        .and_then(|config| config.validate().map(|()| config));

    let config = match loaded {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • alpha must lie strictly between 0 and 1");
            println!("   • histogram_bins must be between 1 and 200");
            println!();
            println!(
                "{}",
                "💡 Tip: Use 'lifeboat print-default-config' to see valid format".dimmed()
            );
            return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
        }
    };

    #[derive(Tabled)]
    struct DetailRow {
        setting: &'static str,
        value: String,
    }

    let mut rows = vec![
        DetailRow {
            setting: "Alpha",
            value: config.analysis.alpha.to_string(),
        },
        DetailRow {
            setting: "Suite",
            value: format!("{:?}", config.analysis.suite).to_lowercase(),
        },
        DetailRow {
            setting: "Report format",
            value: format!("{:?}", config.output.format).to_lowercase(),
        },
    ];

    if args.detailed {
        rows.extend([
            DetailRow {
                setting: "Dataset",
                value: config
                    .data
                    .path
                    .as_ref()
                    .map_or("(from command line)".to_string(), |p| p.display().to_string()),
            },
            DetailRow {
                setting: "Missing ages",
                value: format!("{:?}", config.data.missing_age).to_lowercase(),
            },
            DetailRow {
                setting: "Equal variance",
                value: config.analysis.equal_variance.to_string(),
            },
            DetailRow {
                setting: "Yates correction",
                value: config.analysis.yates_correction.to_string(),
            },
            DetailRow {
                setting: "Plots",
                value: format!(
                    "{} ({} bins)",
                    config.plots.enabled, config.plots.histogram_bins
                ),
            },
            DetailRow {
                setting: "Output directory",
                value: config.output.out_dir.display().to_string(),
            },
        ]);
    }

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    if config.output.format != ReportFormat::Terminal {
        println!();
        println!(
            "   Reports will be written to {}",
            config.output.out_dir.display().to_string().cyan()
        );
    }

    Ok(())
}
