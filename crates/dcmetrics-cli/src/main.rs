mod progress;
mod registry;
mod settings;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dcmetrics_core::{DenialConstraint, render_for};
use dcmetrics_eval::{
    CoverageSemantics, EvalError, EvaluationEngine, LoadOptions, LoadedConstraints,
    load_constraints_path, load_dataset_path, render_text,
};
use progress::LoggingObserver;
use registry::{init_logging, write_artifacts};
use settings::{EvalSettings, SettingsError, SettingsOverrides, load_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "dcmetrics", version, about = "Denial constraint quality metrics")]
struct Cli {
    /// Append JSON log lines to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute metrics for a batch of discovered constraints.
    Evaluate(EvaluateArgs),
    /// Print the logical form of each constraint.
    Render(RenderArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SemanticsArg {
    PredicatesHold,
    ConstraintHolds,
}

impl From<SemanticsArg> for CoverageSemantics {
    fn from(value: SemanticsArg) -> Self {
        match value {
            SemanticsArg::PredicatesHold => CoverageSemantics::PredicatesHold,
            SemanticsArg::ConstraintHolds => CoverageSemantics::ConstraintHolds,
        }
    }
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Discovered constraints, one JSON object per line.
    #[arg(long, value_name = "JSONL")]
    constraints: PathBuf,
    /// Reference constraints for degree of approximation.
    #[arg(long, value_name = "JSONL")]
    truth: Option<PathBuf>,
    /// CSV dataset for coverage.
    #[arg(long, value_name = "CSV")]
    dataset: Option<PathBuf>,
    /// Run the pairwise coverage scan.
    #[arg(long, default_value_t = false)]
    coverage: bool,
    /// Pair counting rule for coverage.
    #[arg(long, value_enum)]
    semantics: Option<SemanticsArg>,
    /// Abort coverage after this many seconds.
    #[arg(long, value_name = "SECS")]
    coverage_timeout: Option<u64>,
    /// Relation name used in logical forms.
    #[arg(long)]
    relation: Option<String>,
    /// Output directory for runs.
    #[arg(long)]
    out: Option<PathBuf>,
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Keep only the N largest constraints in the report.
    #[arg(long, value_name = "N")]
    max_reports: Option<usize>,
    /// Skip constraints with unsupported operators instead of failing.
    #[arg(long, default_value_t = false)]
    skip_unsupported: bool,
    /// Print metrics.json to stdout instead of the text listing.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Constraints, one JSON object per line.
    #[arg(long, value_name = "JSONL")]
    constraints: PathBuf,
    #[arg(long)]
    relation: Option<String>,
    #[arg(long, default_value_t = false)]
    skip_unsupported: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Evaluate(args) => run_evaluate(args),
        Command::Render(args) => run_render(args),
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), CliError> {
    let EvaluateArgs {
        constraints,
        truth,
        dataset,
        coverage,
        semantics,
        coverage_timeout,
        relation,
        out,
        config,
        max_reports,
        skip_unsupported,
        json,
    } = args;

    let settings = load_settings(config.as_deref())?.apply(SettingsOverrides {
        relation,
        coverage,
        coverage_semantics: semantics.map(CoverageSemantics::from),
        coverage_timeout_secs: coverage_timeout,
        max_reports,
        skip_unsupported,
        out_dir: out,
    });
    let load_options = settings.load_options();

    let batch = load_logged(&constraints, load_options, "constraints")?;
    let truth = truth
        .map(|path| load_logged(&path, load_options, "truth_standard"))
        .transpose()?;

    let dataset = match coverage_dataset(dataset, settings.coverage) {
        Some(path) => {
            let dataset = load_dataset_path(&path)?;
            tracing::info!(
                event = "dataset_loaded",
                path = %path.display(),
                rows = dataset.len(),
                columns = dataset.columns().len()
            );
            Some(dataset)
        }
        None => None,
    };

    let engine = EvaluationEngine::new(settings.evaluate_options());
    let mut observer =
        LoggingObserver::new(settings.coverage_timeout_secs.map(Duration::from_secs));
    let result = engine.run(&batch, truth.as_deref(), dataset.as_ref(), &mut observer)?;

    let paths = write_artifacts(&settings.out_dir(), &result)?;
    tracing::info!(
        event = "artifacts_written",
        metrics = %paths.metrics_path.display(),
        report = %paths.report_path.display()
    );

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &result.metrics)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render_text(&result.metrics.reports))?;
        if let Some(coverage) = &result.metrics.coverage {
            writeln!(stdout, "Coverage: {}", coverage.value)?;
        }
    }
    Ok(())
}

/// Dataset path to scan, or `None` when coverage is off.
fn coverage_dataset(dataset: Option<PathBuf>, coverage: bool) -> Option<PathBuf> {
    match dataset {
        Some(path) if !coverage => {
            tracing::warn!(
                event = "dataset_ignored",
                path = %path.display(),
                reason = "coverage disabled; pass --coverage or set coverage = true"
            );
            None
        }
        other => other,
    }
}

fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let settings = EvalSettings::default().apply(SettingsOverrides {
        relation: args.relation,
        skip_unsupported: args.skip_unsupported,
        ..SettingsOverrides::default()
    });
    let batch = load_logged(&args.constraints, settings.load_options(), "constraints")?;

    let mut stdout = std::io::stdout().lock();
    for dc in &batch {
        writeln!(stdout, "{}", render_for(dc, settings.relation()))?;
    }
    Ok(())
}

fn load_logged(
    path: &std::path::Path,
    options: LoadOptions,
    label: &str,
) -> Result<Vec<DenialConstraint>, CliError> {
    let LoadedConstraints {
        constraints,
        summary,
    } = load_constraints_path(path, options)?;
    tracing::info!(
        event = "constraints_loaded",
        input = label,
        path = %path.display(),
        loaded = summary.loaded,
        malformed = summary.malformed,
        unsupported = summary.unsupported
    );
    Ok(constraints)
}
