//! # Planwise CLI Application
//!
//! Command-line front end for `plan_core`: score a layout, check it against
//! building codes, and export it in one or more formats.
//!
//! ```text
//! plan_cli metrics --file layout.json
//! plan_cli check --file layout.json --country US --code IBC --code ADA
//! plan_cli export --file project.json --format svg --format dxf --out exports
//! plan_cli demo
//! ```
//!
//! Set `RUST_LOG=plan_core=debug` to see skipped paths and per-check detail.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plan_core::compliance::{ComplianceIssue, ComplianceReport, NormSettings};
use plan_core::export::{export_batch, ExportContext, ExportFormat};
use plan_core::file_io::{load_layout, load_settings, write_artifact, LayoutSource};
use plan_core::layout::{sample_layout, LayoutData};
use plan_core::metrics::PerformanceMetrics;
use plan_core::project::Project;
use plan_core::settings::PlanSettings;

#[derive(Parser)]
#[command(name = "plan_cli")]
#[command(version)]
#[command(about = "Floor-plan metrics, building-code compliance, and export")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: pretty (default) or json
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    output: OutputFormat,

    /// Settings file (JSON); command-line flags take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute performance metrics
    Metrics {
        /// Layout, project, or export envelope (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Minimum corridor width for the accessibility score (ft)
        #[arg(long)]
        min_corridor_width: Option<f64>,
    },

    /// Check building-code compliance
    Check {
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        norms: NormArgs,
    },

    /// Export to one or more formats
    Export {
        #[arg(short, long)]
        file: PathBuf,

        /// dxf, svg, pdf, json, csv (repeatable; defaults to all)
        #[arg(long = "format")]
        formats: Vec<String>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Project name for filenames and report titles
        #[arg(long)]
        name: Option<String>,

        /// Plan units to SVG units
        #[arg(long)]
        scale: Option<f64>,

        /// Omit room labels
        #[arg(long)]
        no_text: bool,

        #[command(flatten)]
        norms: NormArgs,
    },

    /// Run the whole pipeline on a built-in sample layout
    Demo {
        /// Also write every export format here
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct NormArgs {
    /// Country code, e.g. US or CA
    #[arg(long)]
    country: Option<String>,

    /// Building code id (repeatable), e.g. IBC
    #[arg(long = "code")]
    codes: Vec<String>,

    /// Skip accessibility rules
    #[arg(long)]
    no_accessibility: bool,
}

impl NormArgs {
    fn apply(&self, norms: &mut NormSettings) {
        if let Some(country) = &self.country {
            norms.country = country.clone();
        }
        if !self.codes.is_empty() {
            norms.codes = self.codes.clone();
        }
        if self.no_accessibility {
            norms.accessibility = false;
        }
    }
}

/// A loaded input with settings resolved
struct Input {
    name: String,
    layout: LayoutData,
    settings: PlanSettings,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let output = cli.output;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if output == OutputFormat::Json {
                let body = serde_json::json!({ "error": format!("{:#}", e) });
                println!("{}", body);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => load_settings(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => PlanSettings::default(),
    };

    match cli.command {
        Commands::Metrics {
            file,
            min_corridor_width,
        } => {
            let mut input = load_input(&file, settings)?;
            if let Some(width) = min_corridor_width {
                input.settings.metrics.min_corridor_width_ft = width;
            }
            let metrics = plan_core::calculate_all_metrics(&input.layout, &input.settings.metrics);
            match cli.output {
                OutputFormat::Json => print_json(&metrics),
                OutputFormat::Pretty => {
                    print_metrics(&input.name, &metrics);
                    Ok(())
                }
            }
        }

        Commands::Check { file, norms } => {
            let mut input = load_input(&file, settings)?;
            norms.apply(&mut input.settings.norms);
            let result = plan_core::check_compliance(&input.layout, &input.settings.norms);
            let report = plan_core::generate_compliance_report(&result);
            match cli.output {
                OutputFormat::Json => print_json(&report),
                OutputFormat::Pretty => {
                    print_compliance(&input.settings.norms, &report);
                    Ok(())
                }
            }
        }

        Commands::Export {
            file,
            formats,
            out,
            name,
            scale,
            no_text,
            norms,
        } => {
            let mut input = load_input(&file, settings)?;
            norms.apply(&mut input.settings.norms);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(scale) = scale {
                input.settings.export.scale = scale;
            }
            if no_text {
                input.settings.export.include_text = false;
            }
            let formats = if formats.is_empty() {
                ExportFormat::ALL.iter().map(|f| f.name().to_string()).collect()
            } else {
                formats
            };
            run_export(&input, &formats, &out, cli.output)
        }

        Commands::Demo { out } => run_demo(settings, out.as_deref(), cli.output),
    }
}

fn load_input(path: &Path, mut settings: PlanSettings) -> Result<Input> {
    let source = load_layout(path).with_context(|| format!("loading {}", path.display()))?;
    tracing::info!(path = %path.display(), kind = source.kind(), "loaded input");

    let name = match &source {
        LayoutSource::Project(project) => {
            settings.norms = project.norms.clone();
            project.name.clone()
        }
        _ => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "layout".to_string()),
    };

    let layout = source.into_layout();
    for warning in layout.validate() {
        eprintln!("warning: {}", warning);
    }

    Ok(Input { name, layout, settings })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportLine {
    format: String,
    success: bool,
    path: Option<PathBuf>,
    error: Option<String>,
}

fn run_export(input: &Input, formats: &[String], out: &Path, output: OutputFormat) -> Result<()> {
    let metrics = plan_core::calculate_all_metrics(&input.layout, &input.settings.metrics);
    let report =
        plan_core::generate_compliance_report(&plan_core::check_compliance(&input.layout, &input.settings.norms));

    let ctx = ExportContext::new(input.name.clone())
        .with_options(input.settings.export.clone())
        .with_metrics(&metrics)
        .with_compliance(&report)
        .with_metadata(serde_json::json!({
            "projectName": input.name,
            "roomCount": input.layout.rooms.len(),
            "totalArea": input.layout.total_area(),
        }));

    let mut lines = Vec::new();
    for entry in export_batch(&input.layout, formats, &ctx) {
        let line = match entry.artifact {
            Some(artifact) => match write_artifact(out, &artifact) {
                Ok(path) => ExportLine {
                    format: entry.format,
                    success: true,
                    path: Some(path),
                    error: None,
                },
                Err(e) => ExportLine {
                    format: entry.format,
                    success: false,
                    path: None,
                    error: Some(e.to_string()),
                },
            },
            None => ExportLine {
                format: entry.format,
                success: false,
                path: None,
                error: entry.error,
            },
        };
        lines.push(line);
    }

    match output {
        OutputFormat::Json => print_json(&lines)?,
        OutputFormat::Pretty => {
            for line in &lines {
                match (&line.path, &line.error) {
                    (Some(path), _) => println!("  {} {:<5} {}", status_icon(true), line.format, path.display()),
                    (None, error) => println!(
                        "  {} {:<5} {}",
                        status_icon(false),
                        line.format,
                        error.as_deref().unwrap_or("unknown error")
                    ),
                }
            }
        }
    }

    if !lines.is_empty() && lines.iter().all(|l| !l.success) {
        bail!("no format could be exported");
    }
    Ok(())
}

fn run_demo(settings: PlanSettings, out: Option<&Path>, output: OutputFormat) -> Result<()> {
    let project = Project::new("Demo House", sample_layout()).with_norms(settings.norms.clone());
    let analysis = project.analyze(&settings.metrics);

    match output {
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Pretty => {
            println!("Planwise - Floor Plan Analysis Demo");
            println!("===================================");
            println!();
            println!("Layout: {} rooms, {} paths", project.layout.rooms.len(), project.layout.circulation.len());
            for room in &project.layout.rooms {
                println!("  {:<16} {:>6.0} sq ft  ({} x {} ft)", room.name, room.area, room.width, room.height);
            }
            println!();
            print_metrics(&project.name, &analysis.metrics);
            println!();
            print_compliance(&project.norms, &analysis.report);
        }
    }

    if let Some(dir) = out {
        let input = Input {
            name: project.name.clone(),
            layout: project.layout.clone(),
            settings,
        };
        let formats: Vec<String> = ExportFormat::ALL.iter().map(|f| f.name().to_string()).collect();
        if output == OutputFormat::Pretty {
            println!();
            println!("Exports:");
        }
        run_export(&input, &formats, dir, output)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_metrics(name: &str, metrics: &PerformanceMetrics) {
    println!("═══════════════════════════════════════");
    println!("  PERFORMANCE METRICS - {}", name);
    println!("═══════════════════════════════════════");
    println!("  Circulation efficiency: {:>5} / 100", metrics.circulation_efficiency);
    println!("  Daylight:               {:>5.1} h", metrics.daylight_hours);
    println!("  Energy efficiency:      {:>5} / 100", metrics.energy_efficiency);
    println!("  Space utilization:      {:>5} / 100", metrics.space_utilization);
    println!("  Accessibility:          {:>5} / 100", metrics.accessibility_score);

    if !metrics.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &metrics.recommendations {
            println!("  [{}] {}", rec.priority, rec.title);
            println!("      {}", rec.description);
        }
    }
}

fn print_compliance(norms: &NormSettings, report: &ComplianceReport) {
    let result = &report.result;
    println!("═══════════════════════════════════════");
    println!("  CODE COMPLIANCE - {} {}", norms.country, norms.unique_codes().join(", "));
    println!("═══════════════════════════════════════");
    println!(
        "  {} checks: {} passed, {} failed, {} warnings",
        result.summary.total_checks, result.summary.passed, result.summary.failed, result.summary.warnings
    );

    print_issues("Issues", &result.issues);
    print_issues("Warnings", &result.warnings);

    for rec in &report.recommendations {
        println!();
        println!("{} ({})", rec.title, rec.priority);
        println!("  {}", rec.description);
        for action in &rec.actions {
            println!("  - {}", action);
        }
    }

    println!();
    println!("Next steps:");
    for (i, step) in report.next_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} {} ({}% of checks passed)",
        status_icon(result.is_compliant()),
        report.status(),
        report.compliance_rate
    );
    println!("═══════════════════════════════════════");
}

fn print_issues(heading: &str, issues: &[ComplianceIssue]) {
    if issues.is_empty() {
        return;
    }
    println!();
    println!("{}:", heading);
    for issue in issues {
        let icon = if issue.is_critical() { status_icon(false) } else { "!" };
        println!("  {} {:<22} {}", icon, issue.code, issue.message);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "✓"
    } else {
        "✗"
    }
}
