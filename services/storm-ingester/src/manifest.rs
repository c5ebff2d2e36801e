//! Batch manifest: the list of product files to normalize in one run.
//!
//! ```yaml
//! output_dir: out
//! jobs:
//!   - product: storm-surge
//!     path: AL052024_surge.kmz
//!     storm: AL052024
//!   - product: forecast-track
//!     path: aal052024.dat
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storm_common::ProductType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchManifest {
    /// Where outputs are written; relative to the manifest. Defaults to the
    /// manifest's own directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    pub jobs: Vec<ManifestJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestJob {
    pub product: ProductType,
    pub path: PathBuf,
    #[serde(default)]
    pub storm: Option<String>,
}

impl ManifestJob {
    /// Output file name: `<storm or input stem>_<product>.json`.
    pub fn output_name(&self) -> String {
        let stem = self.storm.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string())
        });
        format!("{}_{}.json", stem, self.product)
    }
}

impl BatchManifest {
    /// Load a manifest and resolve its paths against the manifest's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let manifest = Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid manifest {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(manifest.resolve_against(base))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(text)?;
        if manifest.jobs.is_empty() {
            bail!("manifest lists no jobs");
        }
        Ok(manifest)
    }

    fn resolve_against(mut self, base: &Path) -> Self {
        for job in &mut self.jobs {
            if job.path.is_relative() {
                job.path = base.join(&job.path);
            }
        }
        self.output_dir = Some(match self.output_dir.take() {
            Some(dir) if dir.is_relative() => base.join(dir),
            Some(dir) => dir,
            None => base.to_path_buf(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
output_dir: out
jobs:
  - product: storm-surge
    path: AL052024_surge.kmz
    storm: AL052024
  - product: wind-speed-probability-64kt
    path: /data/prob64.kmz
";

    #[test]
    fn test_parse_manifest() {
        let manifest = BatchManifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(manifest.jobs.len(), 2);
        assert_eq!(manifest.jobs[0].product, ProductType::StormSurge);
        assert_eq!(manifest.jobs[1].product, ProductType::WindSpeedProbability64kt);
        assert_eq!(manifest.jobs[1].storm, None);
    }

    #[test]
    fn test_resolve_paths() {
        let manifest = BatchManifest::from_yaml_str(MANIFEST)
            .unwrap()
            .resolve_against(Path::new("/runs/al05"));
        assert_eq!(manifest.output_dir, Some(PathBuf::from("/runs/al05/out")));
        assert_eq!(manifest.jobs[0].path, PathBuf::from("/runs/al05/AL052024_surge.kmz"));
        assert_eq!(manifest.jobs[1].path, PathBuf::from("/data/prob64.kmz"));
    }

    #[test]
    fn test_output_names() {
        let manifest = BatchManifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(manifest.jobs[0].output_name(), "AL052024_storm-surge.json");
        assert_eq!(
            manifest.jobs[1].output_name(),
            "prob64_wind-speed-probability-64kt.json"
        );
    }

    #[test]
    fn test_rejects_unknown_product_and_empty() {
        assert!(BatchManifest::from_yaml_str("jobs:\n  - product: radar\n    path: a.kmz\n").is_err());
        assert!(BatchManifest::from_yaml_str("jobs: []\n").is_err());
    }
}
