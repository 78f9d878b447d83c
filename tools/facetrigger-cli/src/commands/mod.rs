pub mod config;
pub mod info;
pub mod replay;
pub mod synth;
pub mod validate;

use std::path::Path;

/// Read a JSONL frame stream, keeping the underlying I/O failure.
pub fn read_frames_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read frames file {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_keeps_io_cause() {
        let missing = std::env::temp_dir().join(format!(
            "facetrigger-missing-{}.jsonl",
            std::process::id()
        ));
        let msg = read_frames_file(&missing).unwrap_err().to_string();
        assert!(msg.starts_with("Failed to read frames file"));
        assert!(msg.contains(&missing.display().to_string()));
        assert!(msg.contains("os error"));

        // Directories exist, so the cause must not be reported as missing.
        let msg = read_frames_file(&std::env::temp_dir())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("os error"));
        assert!(!msg.contains("not found"));
    }
}
