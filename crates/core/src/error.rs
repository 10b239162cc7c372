#[allow(clippy::single_component_path_imports)]
use serde_yaml;

#[derive(Debug, thiserror::Error)]
pub enum BedError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(
        "invalid bed counts: total_beds={total_beds}, occupied_count={occupied_count} (need total_beds >= 1 and occupied_count <= total_beds)"
    )]
    InvalidBedCounts {
        total_beds: usize,
        occupied_count: usize,
    },
    #[error("ward not configured: {0}")]
    WardNotConfigured(String),
    #[error("ward configured more than once: {0}")]
    DuplicateWard(String),
    #[error("duplicate bed identifier in snapshot: {0}")]
    DuplicateBedId(String),
    #[error("occupied bed is not part of the ward: {0}")]
    UnknownOccupiedBed(String),

    #[error("failed to read ward table file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),

    #[error("invalid text: {0}")]
    Text(#[from] wardbed_types::TextError),
}

pub type BedResult<T> = std::result::Result<T, BedError>;
