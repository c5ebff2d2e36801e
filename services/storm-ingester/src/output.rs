//! JSON output to a file or stdout.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use storm_ingestion::ProductOutput;

pub fn to_json(output: &ProductOutput, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(json)
}

/// Write `output` to `target`, or to stdout when no target is given.
pub async fn write_json(output: &ProductOutput, target: Option<&Path>, pretty: bool) -> Result<()> {
    let json = to_json(output, pretty)?;
    match target {
        Some(path) => tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_common::ModelTrackSet;

    #[test]
    fn test_tracks_serialize_untagged() {
        let output = ProductOutput::Tracks(ModelTrackSet::empty("aal052024.dat"));
        let json: serde_json::Value = serde_json::from_str(&to_json(&output, true).unwrap()).unwrap();
        assert_eq!(json["filename"], "aal052024.dat");
        assert!(json["tracks"].as_array().unwrap().is_empty());
    }
}
