//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the provider and controller: the ward table (`ward name -> bed counts`) and an
//! optional RNG seed. Core operations never read environment variables themselves.

use crate::constants::DEFAULT_WARDS;
use crate::validation::{validate_bed_counts, validate_bed_prefix};
use crate::{BedError, BedResult, NonEmptyText};
use serde::Deserialize;
use std::path::Path;

/// Configured bed counts for one ward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WardConfig {
    name: NonEmptyText,
    prefix: String,
    total_beds: usize,
    occupied_beds: usize,
}

impl WardConfig {
    /// Create a validated ward entry.
    ///
    /// # Errors
    ///
    /// Returns `BedError::InvalidInput` for an empty name or malformed prefix, and
    /// `BedError::InvalidBedCounts` when the counts violate the provider contract.
    pub fn new(
        name: impl AsRef<str>,
        prefix: impl Into<String>,
        total_beds: usize,
        occupied_beds: usize,
    ) -> BedResult<Self> {
        let name = NonEmptyText::new(name)?;
        let prefix = prefix.into().trim().to_string();
        validate_bed_prefix(&prefix)?;
        validate_bed_counts(total_beds, occupied_beds)?;

        Ok(Self {
            name,
            prefix,
            total_beds,
            occupied_beds,
        })
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn total_beds(&self) -> usize {
        self.total_beds
    }

    pub fn occupied_beds(&self) -> usize {
        self.occupied_beds
    }
}

/// On-disk shape of a ward entry, validated into [`WardConfig`].
#[derive(Deserialize)]
struct RawWardConfig {
    name: String,
    prefix: String,
    total_beds: usize,
    occupied_beds: usize,
}

#[derive(Deserialize)]
struct RawWardTable {
    wards: Vec<RawWardConfig>,
}

/// Ordered table of configured wards.
///
/// Order is the display order of the ward select control. Names are unique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WardTable {
    wards: Vec<WardConfig>,
}

impl WardTable {
    /// Build a table from validated entries, rejecting duplicate ward names.
    pub fn new(wards: Vec<WardConfig>) -> BedResult<Self> {
        for (i, ward) in wards.iter().enumerate() {
            if wards[..i].iter().any(|w| w.name == ward.name) {
                return Err(BedError::DuplicateWard(ward.name.to_string()));
            }
        }
        Ok(Self { wards })
    }

    /// The built-in demo table.
    pub fn default_table() -> Self {
        let wards = DEFAULT_WARDS
            .iter()
            .filter_map(|&(name, prefix, total, occupied)| {
                match WardConfig::new(name, prefix, total, occupied) {
                    Ok(ward) => Some(ward),
                    Err(e) => {
                        tracing::warn!(ward = name, error = %e, "skipping invalid built-in ward");
                        None
                    }
                }
            })
            .collect();
        Self { wards }
    }

    /// Parse a YAML ward table of the form `wards: [{name, prefix, total_beds, occupied_beds}]`.
    pub fn from_yaml_str(yaml: &str) -> BedResult<Self> {
        let raw: RawWardTable =
            serde_yaml::from_str(yaml).map_err(BedError::YamlDeserialization)?;
        let wards = raw
            .wards
            .into_iter()
            .map(|w| WardConfig::new(w.name, w.prefix, w.total_beds, w.occupied_beds))
            .collect::<BedResult<Vec<_>>>()?;
        Self::new(wards)
    }

    /// Look up a ward by the name supplied by the ward select control.
    ///
    /// # Errors
    ///
    /// Returns `BedError::WardNotConfigured` if the name is not in the table.
    pub fn get(&self, ward_name: &str) -> BedResult<&WardConfig> {
        let key = ward_name.trim();
        self.wards
            .iter()
            .find(|w| w.name.as_str() == key)
            .ok_or_else(|| BedError::WardNotConfigured(ward_name.to_string()))
    }

    pub fn contains(&self, ward_name: &str) -> bool {
        self.get(ward_name).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WardConfig> {
        self.wards.iter()
    }

    pub fn len(&self) -> usize {
        self.wards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wards.is_empty()
    }
}

impl Default for WardTable {
    fn default() -> Self {
        Self::default_table()
    }
}

/// Load a YAML ward table from disk.
pub fn load_ward_table(path: &Path) -> BedResult<WardTable> {
    let contents = std::fs::read_to_string(path).map_err(BedError::FileRead)?;
    WardTable::from_yaml_str(&contents)
}

/// Parse an RNG seed from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `None` (occupancy is drawn from entropy).
pub fn seed_from_env_value(value: Option<String>) -> BedResult<Option<u64>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    value
        .map(|v| {
            v.parse::<u64>()
                .map_err(|_| BedError::InvalidInput(format!("seed must be an unsigned integer: {v}")))
        })
        .transpose()
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    ward_table: WardTable,
    seed: Option<u64>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(ward_table: WardTable, seed: Option<u64>) -> BedResult<Self> {
        if ward_table.is_empty() {
            return Err(BedError::InvalidInput(
                "ward table must contain at least one ward".into(),
            ));
        }
        Ok(Self { ward_table, seed })
    }

    pub fn ward_table(&self) -> &WardTable {
        &self.ward_table
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_YAML: &str = r#"
wards:
  - name: Intensive Care
    prefix: ICU
    total_beds: 8
    occupied_beds: 7
  - name: Coronary Care
    prefix: CCU
    total_beds: 6
    occupied_beds: 6
"#;

    #[test]
    fn test_default_table_matches_demo_wards() {
        let table = WardTable::default_table();
        assert_eq!(table.len(), DEFAULT_WARDS.len());

        let gm = table.get("General Medicine").expect("GM configured");
        assert_eq!(gm.prefix(), "GM");
        assert_eq!(gm.total_beds(), 20);
        assert_eq!(gm.occupied_beds(), 16);
        assert_eq!(table.iter().last().unwrap().name().as_str(), "Rehabilitation");
    }

    #[test]
    fn test_from_yaml_str_preserves_order() {
        let table = WardTable::from_yaml_str(SAMPLE_YAML).expect("valid yaml");
        let names: Vec<&str> = table.iter().map(|w| w.name().as_str()).collect();
        assert_eq!(names, vec!["Intensive Care", "Coronary Care"]);
        assert_eq!(table.get("Coronary Care").unwrap().occupied_beds(), 6);
    }

    #[test]
    fn test_get_unknown_ward_is_configuration_error() {
        let table = WardTable::from_yaml_str(SAMPLE_YAML).expect("valid yaml");
        let err = table.get("Maternity").expect_err("not configured");
        assert!(matches!(err, BedError::WardNotConfigured(name) if name == "Maternity"));
    }

    #[test]
    fn test_from_yaml_str_rejects_bad_counts() {
        let yaml = r#"
wards:
  - name: Surgery
    prefix: SURG
    total_beds: 4
    occupied_beds: 9
"#;
        let err = WardTable::from_yaml_str(yaml).expect_err("occupied > total");
        assert!(matches!(
            err,
            BedError::InvalidBedCounts {
                total_beds: 4,
                occupied_count: 9
            }
        ));
    }

    #[test]
    fn test_from_yaml_str_rejects_duplicate_ward() {
        let yaml = r#"
wards:
  - { name: Surgery, prefix: SURG, total_beds: 4, occupied_beds: 1 }
  - { name: Surgery, prefix: SX, total_beds: 2, occupied_beds: 1 }
"#;
        let err = WardTable::from_yaml_str(yaml).expect_err("duplicate");
        assert!(matches!(err, BedError::DuplicateWard(name) if name == "Surgery"));
    }

    #[test]
    fn test_from_yaml_str_rejects_malformed_yaml() {
        let err = WardTable::from_yaml_str("wards: [").expect_err("malformed");
        assert!(matches!(err, BedError::YamlDeserialization(_)));
    }

    #[test]
    fn test_load_ward_table_reads_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE_YAML.as_bytes()).expect("write yaml");

        let table = load_ward_table(file.path()).expect("load should succeed");
        assert!(table.contains("Intensive Care"));
        assert!(!table.contains("General Medicine"));
    }

    #[test]
    fn test_load_ward_table_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_ward_table(&dir.path().join("missing.yaml")).expect_err("missing file");
        assert!(matches!(err, BedError::FileRead(_)));
    }

    #[test]
    fn test_seed_from_env_value() {
        assert_eq!(seed_from_env_value(None).unwrap(), None);
        assert_eq!(seed_from_env_value(Some("  ".into())).unwrap(), None);
        assert_eq!(seed_from_env_value(Some(" 42 ".into())).unwrap(), Some(42));
        assert!(seed_from_env_value(Some("abc".into())).is_err());
    }

    #[test]
    fn test_core_config_rejects_empty_table() {
        let table = WardTable::new(vec![]).expect("empty table is constructible");
        let err = CoreConfig::new(table, None).expect_err("empty table rejected");
        assert!(matches!(err, BedError::InvalidInput(_)));
    }
}
