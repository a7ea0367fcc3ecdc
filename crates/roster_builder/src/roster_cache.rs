//! Roster Cache Builder - CSV → Binary Cache Pipeline
//!
//! CSV → Vec<PersonRecord> → RosterIndex → MessagePack → LZ4
//!
//! Expected CSV header: `name,team,job_level,gender,ethnicity`
//! (`jobLevel` is accepted for `job_level`). An empty team cell means the
//! person has no team. Rows that fail to parse or validate are skipped and
//! counted.

use anyhow::{Context, Result};
use ninebox_core::{Board, GridConfig, PersonRecord};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::{human_bytes, write_compressed, CacheMetadata};

/// Serialized roster with its schema version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterIndex {
    pub records: Vec<PersonRecord>,
    pub count: u32,
    pub schema_version: String,
}

impl RosterIndex {
    pub fn new(schema_version: String) -> Self {
        Self {
            records: Vec::new(),
            count: 0,
            schema_version,
        }
    }

    pub fn insert(&mut self, record: PersonRecord) {
        self.records.push(record);
        self.count = self.records.len() as u32;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct team values, the "no team" marker included.
    pub fn team_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.team.as_deref())
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Load the roster into a fresh board.
    pub fn into_board(self, config: Arc<GridConfig>) -> ninebox_core::Result<Board> {
        Board::new(self.records, config)
    }
}

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    /// Rows whose name was already seen. They are kept.
    pub duplicate_names: u32,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    #[serde(default)]
    team: Option<String>,
    #[serde(alias = "jobLevel")]
    job_level: i32,
    gender: u8,
    ethnicity: u8,
}

impl From<CsvRow> for PersonRecord {
    fn from(row: CsvRow) -> Self {
        PersonRecord {
            name: row.name,
            team: row.team.filter(|t| !t.is_empty()),
            job_level: row.job_level,
            gender: row.gender,
            ethnicity: row.ethnicity,
        }
    }
}

/// Parse a roster CSV into validated person records.
///
/// # Returns
///
/// * `Ok((records, stats))` - records in file order with parse statistics
/// * `Err(anyhow::Error)` - unreadable file or no valid rows
pub fn parse_csv_to_records(csv_path: &Path) -> Result<(Vec<PersonRecord>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut records = Vec::new();
    let mut stats = ParseStats::default();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    for result in reader.deserialize::<CsvRow>() {
        stats.total_rows += 1;
        let line = stats.total_rows + 1;

        let record: PersonRecord = match result {
            Ok(row) => row.into(),
            Err(e) => {
                stats.failed += 1;
                log::warn!("Line {} - CSV parse error: {}", line, e);
                continue;
            }
        };

        if let Err(e) = record.validate(records.len()) {
            stats.failed += 1;
            log::warn!("Line {} - {}, skipping", line, e);
            continue;
        }

        if !seen.insert(record.name.clone()) {
            stats.duplicate_names += 1;
            log::warn!("Line {} - duplicate name '{}'", line, record.name);
        }

        records.push(record);
        stats.parsed += 1;
    }

    if stats.parsed == 0 {
        anyhow::bail!("No valid persons parsed from {}", csv_path.display());
    }

    Ok((records, stats))
}

/// Parse a roster CSV into a `RosterIndex`.
pub fn parse_csv_to_index(csv_path: &Path, schema_version: &str) -> Result<(RosterIndex, ParseStats)> {
    let (records, stats) = parse_csv_to_records(csv_path)?;
    let mut index = RosterIndex::new(schema_version.to_string());
    for record in records {
        index.insert(record);
    }
    Ok((index, stats))
}

/// Build binary cache from a roster CSV file
///
/// Pipeline: CSV → RosterIndex → MessagePack → LZ4 → Binary file
pub fn build_roster_cache(
    csv_path: &Path,
    output_msgpack_lz4: &Path,
    schema_version: &str,
) -> Result<CacheMetadata> {
    log::info!("Parsing CSV: {}", csv_path.display());
    let (index, stats) = parse_csv_to_index(csv_path, schema_version)?;

    log::info!(
        "Parsed {} persons across {} teams (failed: {}, duplicate names: {}, total rows: {})",
        stats.parsed,
        index.team_count(),
        stats.failed,
        stats.duplicate_names,
        stats.total_rows
    );

    let msgpack_bytes =
        rmp_serde::to_vec(&index).context("Failed to serialize RosterIndex to MessagePack")?;

    let meta = write_compressed(&msgpack_bytes, output_msgpack_lz4, schema_version, index.len())?;

    log::info!(
        "Cache built: {} → {} (ratio: {:.2}%)",
        human_bytes(meta.original_size),
        human_bytes(meta.compressed_size),
        meta.compression_ratio * 100.0
    );

    Ok(meta)
}

/// Load binary cache into RosterIndex
///
/// Pipeline: Binary file → LZ4 decompress → MessagePack deserialize → RosterIndex
pub fn load_roster_cache(cache_file: &Path) -> Result<RosterIndex> {
    let compressed = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;

    let index: RosterIndex = rmp_serde::from_slice(&msgpack_bytes)
        .context("Failed to deserialize RosterIndex from MessagePack")?;

    Ok(index)
}

/// Load person records from a `.csv`, `.json` or `.lz4` cache file.
pub fn load_roster(path: &Path) -> Result<Vec<PersonRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(parse_csv_to_records(path)?.0),
        "lz4" => Ok(load_roster_cache(path)?.records),
        "json" => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse roster JSON: {}", path.display()))
        }
        other => anyhow::bail!("Unsupported roster format '{}': {}", other, path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, Builder};

    fn csv_file(content: &str) -> Result<tempfile::NamedTempFile> {
        let mut file = Builder::new().suffix(".csv").tempfile()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_roster_index_operations() {
        let mut index = RosterIndex::new("v1".to_string());
        assert!(index.is_empty());

        index.insert(PersonRecord::new("Ada", Some("Core"), 3, 0, 1));
        index.insert(PersonRecord::new("Linus", None, 2, 1, 1));
        index.insert(PersonRecord::new("Grace", Some("Core"), 4, 0, 0));

        assert_eq!(index.len(), 3);
        assert_eq!(index.count, 3);
        assert_eq!(index.team_count(), 2);
    }

    #[test]
    fn test_parse_skips_invalid_rows() -> Result<()> {
        let file = csv_file(
            "name,team,jobLevel,gender,ethnicity\n\
             Ada,Core,3,0,1\n\
             Bad Flag,Core,2,2,0\n\
             Linus,,2,1,1\n\
             Not A Number,Core,x,1,1\n\
             ,Core,1,0,0\n\
             Ada,Edge,5,0,0\n",
        )?;

        let (records, stats) = parse_csv_to_records(file.path())?;
        assert_eq!(stats.total_rows, 6);
        assert_eq!(stats.parsed, 3);
        assert_eq!(stats.failed, 3);
        assert_eq!(stats.duplicate_names, 1);

        assert_eq!(records[0].job_level, 3);
        assert_eq!(records[1].team, None);
        assert_eq!(records[2].team.as_deref(), Some("Edge"));
        Ok(())
    }

    #[test]
    fn test_parse_trims_fields() -> Result<()> {
        let file = csv_file("name,team,job_level,gender,ethnicity\n Ada , Core , 3 , 0 , 1 \n")?;
        let (records, _) = parse_csv_to_records(file.path())?;
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].team.as_deref(), Some("Core"));
        Ok(())
    }

    #[test]
    fn test_zero_valid_rows_is_error() -> Result<()> {
        let file = csv_file("name,team,job_level,gender,ethnicity\nBad,Core,1,5,5\n")?;
        assert!(parse_csv_to_records(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_build_verify_load_round_trip() -> Result<()> {
        let file = csv_file(
            "name,team,job_level,gender,ethnicity\n\
             Ada,Core,3,0,1\n\
             Grace,Core,4,0,0\n\
             Linus,,2,1,1\n",
        )?;
        let dir = tempdir()?;
        let out = dir.path().join("roster.v1.msgpack.lz4");

        let meta = build_roster_cache(file.path(), &out, "v1")?;
        assert_eq!(meta.schema_version, "v1");
        assert_eq!(meta.record_count, 3);
        assert!(crate::verify_cache(&out, &meta.checksum)?);

        let index = load_roster_cache(&out)?;
        assert_eq!(index.schema_version, "v1");
        assert_eq!(index.len(), 3);
        assert_eq!(index.records[2].team, None);

        let board = index.into_board(Arc::new(GridConfig::nine_box()))?;
        assert_eq!(board.teams(), vec![Some("Core"), None]);
        Ok(())
    }

    #[test]
    fn test_load_roster_by_extension() -> Result<()> {
        let dir = tempdir()?;
        let json_path = dir.path().join("roster.json");
        fs::write(
            &json_path,
            r#"[{"name":"Ada","team":"Core","job_level":3,"gender":0,"ethnicity":1}]"#,
        )?;
        assert_eq!(load_roster(&json_path)?.len(), 1);

        let txt_path = dir.path().join("roster.txt");
        fs::write(&txt_path, "")?;
        assert!(load_roster(&txt_path).is_err());
        Ok(())
    }
}
