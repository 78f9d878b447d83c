//! Validate a recorded frame stream.

use std::collections::BTreeSet;
use std::path::PathBuf;

use facetrigger_common::DetectionConfig;
use facetrigger_detector_core::standard_detectors;
use facetrigger_signal_model::{parse_frames, parse_header, ExpressionKey, FrameRecord};

/// Problems that make a stream unreliable for replay.
pub fn find_issues(frames: &[FrameRecord]) -> Vec<String> {
    let mut issues = Vec::new();

    for pair in frames.windows(2) {
        if pair[1].timestamp_ns < pair[0].timestamp_ns {
            issues.push(format!(
                "timestamp goes backwards: {} after {}",
                pair[1].timestamp_ns, pair[0].timestamp_ns
            ));
        }
    }

    for record in frames {
        for (key, value) in record.coefficients.iter() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                issues.push(format!(
                    "t={}: {key} = {value} outside [0.0, 1.0]",
                    record.timestamp_ns
                ));
            }
        }
    }

    issues
}

/// Fraction of frames in which each detector input is present.
pub fn detector_key_coverage(frames: &[FrameRecord]) -> Vec<(ExpressionKey, f64)> {
    let keys: BTreeSet<ExpressionKey> = standard_detectors(&DetectionConfig::default())
        .iter()
        .flat_map(|d| d.keys())
        .collect();

    keys.into_iter()
        .map(|key| {
            let present = frames
                .iter()
                .filter(|f| f.coefficients.contains(key))
                .count();
            let ratio = if frames.is_empty() {
                0.0
            } else {
                present as f64 / frames.len() as f64
            };
            (key, ratio)
        })
        .collect()
}

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating frame stream at: {}", path.display());

    let content = super::read_frames_file(&path)?;

    match parse_header(&content) {
        Ok(Some(header)) => println!(
            "  Header: schema {} from '{}' @ {}Hz",
            header.schema_version, header.source, header.nominal_rate_hz
        ),
        Ok(None) => println!("  Header: none"),
        Err(e) => println!("  Header: unreadable ({e})"),
    }

    let frames =
        parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse frames: {e}"))?;
    println!("  Frames: {}", frames.len());

    println!("  Detector input coverage:");
    for (key, ratio) in detector_key_coverage(&frames) {
        println!("    {:<18} {:>6.1}%", key.as_str(), ratio * 100.0);
    }

    let issues = find_issues(&frames);
    if issues.is_empty() {
        println!("\nFrame stream is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!("\n{} issue(s) found. Replay results may be unreliable.", issues.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetrigger_signal_model::SignalFrame;

    #[test]
    fn test_detects_backwards_time_and_out_of_range_values() {
        let frames = vec![
            FrameRecord::new(100, SignalFrame::new().with(ExpressionKey::JawOpen, 0.5)),
            FrameRecord::new(50, SignalFrame::new().with(ExpressionKey::JawOpen, 1.5)),
        ];
        let issues = find_issues(&frames);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("backwards"));
        assert!(issues[1].contains("jawOpen"));
    }

    #[test]
    fn test_coverage_counts_present_keys() {
        let frames = vec![
            FrameRecord::new(0, SignalFrame::new().with(ExpressionKey::JawOpen, 0.5)),
            FrameRecord::new(1, SignalFrame::new()),
        ];
        let coverage = detector_key_coverage(&frames);
        let jaw = coverage
            .iter()
            .find(|(k, _)| *k == ExpressionKey::JawOpen)
            .unwrap();
        assert!((jaw.1 - 0.5).abs() < 1e-9);
        assert!(coverage.iter().all(|(k, _)| *k != ExpressionKey::TongueOut));
    }
}
