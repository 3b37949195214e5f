//! Metadata sidecar written next to the parquet artifacts.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use fogline_core::ReplayMetadata;

use crate::error::SchemaError;

/// Write the `<replay_id>_info.json` sidecar into `dir`.
///
/// Downstream feature scripts key on the replay id and read player
/// names, races, and results from this record.
pub fn write_metadata_sidecar(
    dir: &Path,
    metadata: &ReplayMetadata,
) -> Result<PathBuf, SchemaError> {
    let path = dir.join(format!("{}_info.json", metadata.replay_id));
    let file = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(file, metadata)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fogline_test_utils::ScriptedReplay;

    #[test]
    fn sidecar_round_trips() {
        let dir = std::env::temp_dir().join(format!("fogline-sidecar-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let metadata = ScriptedReplay::placeholder_metadata("4299043");
        let path = write_metadata_sidecar(&dir, &metadata).unwrap();
        assert!(path.ends_with("4299043_info.json"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: ReplayMetadata = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, metadata);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
