use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Number of characters kept in a container's short identifier.
pub const SHORT_ID_LEN: usize = 10;

/// Lifecycle state reported by the engine for a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    /// Anything the engine reports outside the known vocabulary, kept verbatim.
    Other(String),
}

impl ContainerState {
    pub fn parse(s: &str) -> Self {
        match s {
            "created" => ContainerState::Created,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            "removing" => ContainerState::Removing,
            "exited" => ContainerState::Exited,
            "dead" => ContainerState::Dead,
            other => ContainerState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Removing => "removing",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
            ContainerState::Other(s) => s,
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContainerState> for String {
    fn from(state: ContainerState) -> Self {
        state.as_str().to_string()
    }
}

/// Upstream data that cannot be turned into a record.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("container id {id:?} is shorter than {} characters", SHORT_ID_LEN)]
    ShortId { id: String },
    #[error("image {id} reports a negative size ({size})")]
    NegativeSize { id: String, size: i64 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    pub id: String,
    pub short_id: String,
    pub names: Vec<String>,
    pub status: String,
    pub state: ContainerState,
}

impl ContainerRecord {
    /// Builds a record, deriving the short id from the first
    /// [`SHORT_ID_LEN`] characters of `id`.
    pub fn new(
        id: impl Into<String>,
        names: Vec<String>,
        status: impl Into<String>,
        state: &str,
    ) -> Result<Self, RecordError> {
        let id = id.into();
        let short_id = short_id(&id).ok_or_else(|| RecordError::ShortId { id: id.clone() })?;

        Ok(Self {
            short_id: short_id.to_string(),
            id,
            names,
            status: status.into(),
            state: ContainerState::parse(state),
        })
    }

    /// First name as reported by the engine (still carrying its leading `/`).
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(|s| s.as_str())
    }
}

/// Returns the first [`SHORT_ID_LEN`] characters of `id`, or `None` if it is
/// too short.
pub fn short_id(id: &str) -> Option<&str> {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => Some(&id[..end]),
        None if id.chars().count() == SHORT_ID_LEN => Some(id),
        None => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub id: String,
    pub repo_tags: Vec<String>,
    pub size: u64,
}

impl ImageRecord {
    pub fn new(id: impl Into<String>, repo_tags: Vec<String>, size: i64) -> Result<Self, RecordError> {
        let id = id.into();
        let size = u64::try_from(size).map_err(|_| RecordError::NegativeSize {
            id: id.clone(),
            size,
        })?;

        Ok(Self {
            id,
            repo_tags,
            size,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VolumeRecord {
    pub driver: String,
    pub name: String,
}

impl VolumeRecord {
    pub fn new(driver: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            name: name.into(),
        }
    }
}
