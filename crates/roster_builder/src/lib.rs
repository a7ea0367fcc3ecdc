//! Roster Builder Library
//!
//! CSV (person records) → MessagePack → LZ4 → SHA256 checksum
//! Placement CSV loading and plain-text grid reports

pub mod placements;
pub mod report;
pub mod roster_cache;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub use placements::{apply_placements, load_placements, ApplyStats, Placement};
pub use report::render_report;
pub use roster_cache::{
    build_roster_cache, load_roster, load_roster_cache, parse_csv_to_index,
    parse_csv_to_records, ParseStats, RosterIndex,
};

/// Cache metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 checksum of the compressed bytes (hex)
    pub checksum: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    /// Serialized size before compression (bytes)
    pub original_size: u64,
    /// Size on disk (bytes)
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
    /// Records stored in the cache
    pub record_count: usize,
}

/// Compress `msgpack_bytes` with LZ4, checksum, and write to `output`.
pub(crate) fn write_compressed(
    msgpack_bytes: &[u8],
    output: &Path,
    schema_version: &str,
    record_count: usize,
) -> Result<CacheMetadata> {
    let original_size = msgpack_bytes.len() as u64;

    let compressed = lz4_flex::compress_prepend_size(msgpack_bytes);
    let compressed_size = compressed.len() as u64;

    let checksum = sha256_hex(&compressed);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    fs::write(output, &compressed)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    let compression_ratio = if original_size == 0 {
        0.0
    } else {
        compressed_size as f64 / original_size as f64
    };

    Ok(CacheMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio,
        record_count,
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Check a cache file against an expected SHA256 checksum.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Human-readable byte size formatting
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}
