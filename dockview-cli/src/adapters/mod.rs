//! Resource client implementations for real engines

mod docker;

pub use docker::DockerClient;
