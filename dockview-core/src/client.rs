//! Resource client trait for container-engine backends
//!
//! A client is constructed once at startup and handed to the menu
//! controller. Every operation is a read-only snapshot of engine state;
//! nothing is cached between calls.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ContainerRecord, ImageRecord, RecordError, VolumeRecord};

/// Errors that can occur while listing engine resources
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The engine could not be reached
    #[error("container engine unavailable: {0}")]
    Unavailable(String),
    /// The engine answered with an error
    #[error("{operation} failed: {message}")]
    Engine {
        operation: &'static str,
        message: String,
    },
    /// The engine returned data we refuse to display
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] RecordError),
}

/// Read-only access to the three resource listings.
///
/// Dropping a returned future cancels the request.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Human-readable name of this client
    fn name(&self) -> &'static str;

    /// All containers, including stopped ones
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, ClientError>;

    /// All images
    async fn list_images(&self) -> Result<Vec<ImageRecord>, ClientError>;

    /// All volumes, unfiltered
    async fn list_volumes(&self) -> Result<Vec<VolumeRecord>, ClientError>;

    /// Release the connection. Called once at shutdown.
    fn close(&self) {}
}

/// In-memory client serving fixed listings.
///
/// Backs `--demo` mode and the controller tests.
#[derive(Clone, Debug, Default)]
pub struct StaticClient {
    containers: Vec<ContainerRecord>,
    images: Vec<ImageRecord>,
    volumes: Vec<VolumeRecord>,
    failure: Option<ClientError>,
}

impl StaticClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(mut self, containers: Vec<ContainerRecord>) -> Self {
        self.containers = containers;
        self
    }

    pub fn with_images(mut self, images: Vec<ImageRecord>) -> Self {
        self.images = images;
        self
    }

    pub fn with_volumes(mut self, volumes: Vec<VolumeRecord>) -> Self {
        self.volumes = volumes;
        self
    }

    /// Every call fails with `error`.
    pub fn failing(error: ClientError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// A small, plausible engine snapshot.
    pub fn demo() -> Result<Self, RecordError> {
        Ok(Self::new()
            .with_containers(vec![
                ContainerRecord::new(
                    "4f2a9c1e7b3d5a6f8e0c2b4d6f8a0c1e3b5d7f9a1c3e5b7d9f1a3c5e7b9d1f3a",
                    vec!["/web".into()],
                    "Up 2 hours",
                    "running",
                )?,
                ContainerRecord::new(
                    "9b8c7d6e5f4a3b2c1d0e9f8a7b6c5d4e3f2a1b0c9d8e7f6a5b4c3d2e1f0a9b8c",
                    vec!["/postgres".into()],
                    "Up 2 hours (healthy)",
                    "running",
                )?,
                ContainerRecord::new(
                    "1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b",
                    vec!["/migrate".into()],
                    "Exited (0) 2 hours ago",
                    "exited",
                )?,
            ])
            .with_images(vec![
                ImageRecord::new("sha256:7d3c1e", vec!["nginx:1.27".into()], 192_456_110)?,
                ImageRecord::new("sha256:2b9f04", vec!["postgres:16".into()], 431_902_337)?,
                ImageRecord::new("sha256:c0ffee", vec![], 7_340_032)?,
            ])
            .with_volumes(vec![
                VolumeRecord::new("local", "pgdata"),
                VolumeRecord::new(
                    "local",
                    "3f1e9a7c5b3d1f9e7c5a3b1d9f7e5c3a1b9d7f5e3c1a9b7d5f3e1c9a7b5d3f1e",
                ),
            ]))
    }

    fn check(&self) -> Result<(), ClientError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceClient for StaticClient {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, ClientError> {
        self.check()?;
        Ok(self.containers.clone())
    }

    async fn list_images(&self) -> Result<Vec<ImageRecord>, ClientError> {
        self.check()?;
        Ok(self.images.clone())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeRecord>, ClientError> {
        self.check()?;
        Ok(self.volumes.clone())
    }
}
