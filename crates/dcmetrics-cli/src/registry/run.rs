use std::path::{Path, PathBuf};

use dcmetrics_eval::EvaluationResult;

use super::RegistryResult;

/// Locations of the artifacts written for one evaluation.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub run_dir: PathBuf,
    pub metrics_path: PathBuf,
    pub report_path: PathBuf,
}

/// Write `metrics.json` and `report.md` under `out_dir/<run_id>`.
pub fn write_artifacts(out_dir: &Path, result: &EvaluationResult) -> RegistryResult<RunPaths> {
    let run_dir = out_dir.join(&result.metrics.run_id);
    std::fs::create_dir_all(&run_dir)?;

    let metrics_path = run_dir.join("metrics.json");
    std::fs::write(&metrics_path, serde_json::to_vec_pretty(&result.metrics)?)?;

    let report_path = run_dir.join("report.md");
    std::fs::write(&report_path, result.report.as_bytes())?;

    Ok(RunPaths {
        run_dir,
        metrics_path,
        report_path,
    })
}
