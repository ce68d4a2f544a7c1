use std::time::Duration;

use async_trait::async_trait;
use bollard::container::ListContainersOptions;
use bollard::image::ListImagesOptions;
use bollard::models::{ContainerSummary, ImageSummary, Volume};
use bollard::volume::ListVolumesOptions;
use bollard::{API_DEFAULT_VERSION, Docker};

use dockview_core::client::{ClientError, ResourceClient};
use dockview_core::config::DockerSettings;
use dockview_core::model::{ContainerRecord, ImageRecord, VolumeRecord};

pub struct DockerClient {
    client: Docker,
}

impl DockerClient {
    /// Connects to the engine named in `settings` (or the ambient
    /// `DOCKER_HOST`/local socket) and verifies it answers a ping.
    pub async fn connect(settings: &DockerSettings) -> Result<Self, ClientError> {
        let client = match settings.host.as_deref() {
            Some(host) => connect_to(host, settings.timeout_secs),
            None => Docker::connect_with_defaults()
                .map(|d| d.with_timeout(Duration::from_secs(settings.timeout_secs))),
        }
        .map_err(|e| ClientError::Unavailable(format!("failed to connect to Docker: {}", e)))?;

        // Verify connection
        client
            .ping()
            .await
            .map_err(|e| ClientError::Unavailable(format!("Docker ping failed: {}", e)))?;

        tracing::info!(host = settings.host.as_deref().unwrap_or("default"), "connected to Docker");
        Ok(Self { client })
    }
}

fn connect_to(host: &str, timeout_secs: u64) -> Result<Docker, bollard::errors::Error> {
    if host.starts_with("unix://") || host.starts_with("npipe://") {
        return Docker::connect_with_socket(host, timeout_secs, API_DEFAULT_VERSION);
    }

    let addr = match host.strip_prefix("tcp://") {
        Some(rest) => format!("http://{}", rest),
        None => host.to_string(),
    };
    Docker::connect_with_http(&addr, timeout_secs, API_DEFAULT_VERSION)
}

fn engine_error(operation: &'static str, e: bollard::errors::Error) -> ClientError {
    ClientError::Engine {
        operation,
        message: e.to_string(),
    }
}

pub fn container_record(summary: ContainerSummary) -> Result<ContainerRecord, ClientError> {
    let record = ContainerRecord::new(
        summary.id.unwrap_or_default(),
        summary.names.unwrap_or_default(),
        summary.status.unwrap_or_default(),
        summary.state.as_deref().unwrap_or_default(),
    )?;
    Ok(record)
}

pub fn image_record(summary: ImageSummary) -> Result<ImageRecord, ClientError> {
    Ok(ImageRecord::new(summary.id, summary.repo_tags, summary.size)?)
}

pub fn volume_record(volume: Volume) -> VolumeRecord {
    VolumeRecord::new(volume.driver, volume.name)
}

#[async_trait]
impl ResourceClient for DockerClient {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, ClientError> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(options))
            .await
            .map_err(|e| engine_error("list containers", e))?;

        containers.into_iter().map(container_record).collect()
    }

    async fn list_images(&self) -> Result<Vec<ImageRecord>, ClientError> {
        let options = ListImagesOptions::<String> {
            all: true,
            ..Default::default()
        };

        let images = self
            .client
            .list_images(Some(options))
            .await
            .map_err(|e| engine_error("list images", e))?;

        images.into_iter().map(image_record).collect()
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeRecord>, ClientError> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions<String>>)
            .await
            .map_err(|e| engine_error("list volumes", e))?;

        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(volume_record)
            .collect())
    }

    fn close(&self) {
        tracing::debug!("closing Docker client");
    }
}
