use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    /// Master seed of the sweep, when the artifact came from one.
    pub seed: Option<u64>,
    /// Further files produced by the same run.
    pub outputs: Vec<PathBuf>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            seed: None,
            outputs: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_outputs(mut self, outputs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.outputs.extend(outputs);
        self
    }
}

/// Write `<artifact stem>.provenance.json` with the git commit, callsite, params, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let mut outputs = vec![artifact.to_string_lossy().into_owned()];
    outputs.extend(
        payload
            .outputs
            .iter()
            .map(|p| p.to_string_lossy().into_owned()),
    );
    let doc = json!({
        "code_rev": code_rev(),
        "rodcut_version": rodcut::VERSION,
        "seed": payload.seed,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "outputs": outputs
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

/// `results.txt` -> `results.provenance.json`, in the same directory.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit of the code that produced a result: `GIT_COMMIT` at build or run
/// time, then `git rev-parse HEAD`, else `"unknown"`.
pub fn code_rev() -> String {
    let pinned = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = pinned {
        return rev;
    }
    let head = Command::new("git").args(["rev-parse", "HEAD"]).output();
    match head {
        Ok(out) if out.status.success() => {
            let rev = String::from_utf8_lossy(&out.stdout).trim().to_string();
            if rev.is_empty() {
                "unknown".to_string()
            } else {
                rev
            }
        }
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/data/results.txt");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/data/results.provenance.json"));
    }

    #[test]
    fn write_sidecar_lists_all_outputs() {
        let dir = tempdir().unwrap();
        let table = dir.path().join("results.txt");
        let csv = dir.path().join("results.csv");
        fs::write(&table, "").unwrap();
        let payload = Payload::new(json!({"start": 1000, "end": 3000, "step": 1000}))
            .with_seed(42)
            .with_outputs([csv.clone()]);
        let prov_path = write_sidecar(&table, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], table.to_string_lossy().as_ref());
        assert_eq!(parsed["outputs"][1], csv.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["step"], 1000);
        assert_eq!(parsed["seed"], 42);
    }

    #[test]
    fn seedless_artifacts_record_null_seed() {
        let dir = tempdir().unwrap();
        let figure = dir.path().join("comparison.svg");
        let prov_path = write_sidecar(&figure, Payload::new(json!({}))).unwrap();
        assert_eq!(prov_path, dir.path().join("comparison.provenance.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert!(parsed["seed"].is_null());
        assert!(!parsed["code_rev"].as_str().unwrap().is_empty());
    }
}
