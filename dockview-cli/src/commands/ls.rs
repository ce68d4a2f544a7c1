use std::io::Write;

use anyhow::Result;

use dockview_core::client::ResourceClient;
use dockview_core::feature::Feature;
use dockview_core::format::{self, SizeMode};

/// Prints one feature's listing, either as the detail-pane lines or as a
/// JSON array of records. Returns the number of records.
pub async fn write_listing<W: Write>(
    out: &mut W,
    client: &dyn ResourceClient,
    feature: Feature,
    size_mode: SizeMode,
    json: bool,
) -> Result<usize> {
    let count = match feature {
        Feature::Containers => {
            let containers = client.list_containers().await?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &containers)?;
                writeln!(out)?;
            } else {
                for container in &containers {
                    out.write_all(format::container_line(container)?.as_bytes())?;
                }
            }
            containers.len()
        }
        Feature::Images => {
            let images = client.list_images().await?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &images)?;
                writeln!(out)?;
            } else {
                for image in &images {
                    out.write_all(format::image_line(image, size_mode).as_bytes())?;
                }
            }
            images.len()
        }
        Feature::Volumes => {
            let volumes = client.list_volumes().await?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &volumes)?;
                writeln!(out)?;
            } else {
                for volume in &volumes {
                    out.write_all(format::volume_line(volume).as_bytes())?;
                }
            }
            volumes.len()
        }
    };

    out.flush()?;
    tracing::debug!(feature = feature.label(), count, "listing printed");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockview_core::client::{ClientError, StaticClient};

    async fn listing(client: &StaticClient, feature: Feature, json: bool) -> (usize, String) {
        let mut out = Vec::new();
        let count = write_listing(&mut out, client, feature, SizeMode::Truncated, json)
            .await
            .unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_lines_match_detail_pane() {
        let client = StaticClient::demo().unwrap();
        let (count, text) = listing(&client, Feature::Containers, false).await;
        assert_eq!(count, 3);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|l| l.starts_with(" <")));
    }

    #[tokio::test]
    async fn test_volumes_json() {
        let client = StaticClient::demo().unwrap();
        let (count, text) = listing(&client, Feature::Volumes, true).await;
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(|a| a.len()), Some(count));
        assert!(value[0].get("driver").is_some());
    }

    #[tokio::test]
    async fn test_empty_listing_prints_nothing() {
        let (count, text) = listing(&StaticClient::new(), Feature::Images, false).await;
        assert_eq!(count, 0);
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_client_error_propagates() {
        let client = StaticClient::failing(ClientError::Unavailable("no socket".into()));
        let mut out = Vec::new();
        let err = write_listing(&mut out, &client, Feature::Volumes, SizeMode::Truncated, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no socket"));
    }
}
