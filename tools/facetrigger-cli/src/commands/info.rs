//! Show frame stream information.

use std::collections::BTreeMap;
use std::path::PathBuf;

use facetrigger_signal_model::{parse_frames, parse_header, ExpressionKey};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let content = super::read_frames_file(&path)?;
    let header =
        parse_header(&content).map_err(|e| anyhow::anyhow!("Failed to read header: {e}"))?;
    let frames =
        parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse frames: {e}"))?;

    println!("Stream: {}", path.display());
    if let Some(h) = &header {
        println!("  Schema: {}", h.schema_version);
        println!("  Source: {}", h.source);
        println!("  Recorded: {}", h.recorded_at.to_rfc3339());
        println!("  Nominal rate: {}Hz", h.nominal_rate_hz);
    } else {
        println!("  (no header)");
    }
    println!();

    println!("Frames:");
    println!("  Count: {}", frames.len());
    if let (Some(first), Some(last)) = (frames.first(), frames.last()) {
        let duration = last.timestamp_secs() - first.timestamp_secs();
        println!("  Duration: {duration:.3}s");
        if frames.len() > 1 && duration > 0.0 {
            println!("  Observed rate: {:.1}Hz", (frames.len() - 1) as f64 / duration);
        }
    }
    let empty = frames.iter().filter(|f| f.coefficients.is_empty()).count();
    println!("  Empty frames: {empty}");
    println!();

    let mut seen: BTreeMap<ExpressionKey, usize> = BTreeMap::new();
    for record in &frames {
        for (key, _) in record.coefficients.iter() {
            *seen.entry(key).or_default() += 1;
        }
    }
    println!("Keys: {} of {} observed", seen.len(), ExpressionKey::COUNT);
    for (key, count) in &seen {
        println!("  {:<20} {count}", key.as_str());
    }

    Ok(())
}
