use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing artifact to JSON")
}

/// Write one artifact as pretty-printed JSON. A failure here is fatal for this
/// artifact only; callers keep their in-memory results and any artifacts already
/// written.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating artifact {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("writing artifact {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let value = json!({ "nodes": [], "edges": [] });

        write_json_pretty(&path, &value).unwrap();

        let read_back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back, value);
    }

    #[test]
    fn test_unwritable_path_reports_the_artifact() {
        let err = write_json_pretty(Path::new("/nonexistent-dir/out.json"), &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/out.json"));
    }
}
