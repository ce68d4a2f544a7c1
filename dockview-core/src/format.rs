//! One-line renderings of records for the detail pane and `dockview ls`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ContainerRecord, ImageRecord, VolumeRecord};

/// Volume names longer than this are cut.
pub const VOLUME_NAME_WIDTH: usize = 32;

/// Shown for images that carry no repo tag.
pub const UNTAGGED: &str = "<none>:<none>";

const BYTES_PER_MB: u64 = 1_000_000;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("container {id} has no name")]
    MissingName { id: String },
}

/// How image sizes are converted to megabytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    /// Whole megabytes (integer division), so the decimal is always `.0`.
    #[default]
    Truncated,
    /// Exact megabytes, rounded to one decimal when printed.
    Fractional,
}

impl SizeMode {
    pub fn megabytes(self, bytes: u64) -> f64 {
        match self {
            SizeMode::Truncated => (bytes / BYTES_PER_MB) as f64,
            SizeMode::Fractional => bytes as f64 / BYTES_PER_MB as f64,
        }
    }
}

/// ` <state> name` for the container's first name, minus its leading `/`.
pub fn container_line(container: &ContainerRecord) -> Result<String, FormatError> {
    let name = container
        .primary_name()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FormatError::MissingName {
            id: container.short_id.clone(),
        })?;

    let mut chars = name.chars();
    chars.next();

    Ok(format!(" <{}> {}\n", container.state, chars.as_str()))
}

pub fn image_line(image: &ImageRecord, mode: SizeMode) -> String {
    let tag = image
        .repo_tags
        .first()
        .map(|s| s.as_str())
        .unwrap_or(UNTAGGED);

    format!(" {} {:.1}MB\n", tag, mode.megabytes(image.size))
}

pub fn volume_line(volume: &VolumeRecord) -> String {
    let name: String = volume.name.chars().take(VOLUME_NAME_WIDTH).collect();
    format!(" <{}> {}\n", volume.driver, name)
}
