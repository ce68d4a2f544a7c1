//! Menu controller: owns the panes, tracks focus, and turns a selected menu
//! label into a listing in the detail pane.

use thiserror::Error;

use crate::client::{ClientError, ResourceClient};
use crate::feature::Feature;
use crate::format::{self, FormatError, SizeMode};
use crate::region::{Region, RegionId, RegionRegistry};

/// Lines kept in the info pane.
pub const INFO_CAP: usize = 500;

pub const MENU_TITLE: &str = " Docker Menu ";
pub const INFO_TITLE: &str = " Info ";
pub const DETAIL_TITLE: &str = " Details ";

/// Why a dispatch produced no (or only partial) output.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for input.
    Idle,
    /// A menu entry was activated; the label is fetched on the next
    /// [`MenuController::run_pending`].
    Dispatching { label: String },
    Terminated,
}

pub struct MenuController {
    client: Box<dyn ResourceClient>,
    regions: RegionRegistry,
    active: usize,
    phase: Phase,
    size_mode: SizeMode,
    last_feature: Option<Feature>,
}

impl MenuController {
    pub fn new(client: Box<dyn ResourceClient>, size_mode: SizeMode) -> Self {
        let mut menu = Region::new(MENU_TITLE);
        for feature in Feature::ALL {
            menu.write(&feature.menu_line());
        }

        let regions = RegionRegistry::new(
            menu,
            Region::new(INFO_TITLE).with_autoscroll().with_cap(INFO_CAP),
            Region::new(DETAIL_TITLE),
        );

        Self {
            client,
            regions,
            active: 0,
            phase: Phase::Idle,
            size_mode,
            last_feature: None,
        }
    }

    pub fn regions(&self) -> &RegionRegistry {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> &Region {
        self.regions.get(id)
    }

    pub fn region_mut(&mut self, id: RegionId) -> &mut Region {
        self.regions.get_mut(id)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Terminated
    }

    pub fn client_name(&self) -> &'static str {
        self.client.name()
    }

    pub fn last_feature(&self) -> Option<Feature> {
        self.last_feature
    }

    // ========== Focus ==========

    pub fn active_region(&self) -> RegionId {
        RegionId::CYCLE[self.active]
    }

    pub fn cycle_focus(&mut self) {
        self.active = (self.active + 1) % RegionId::CYCLE.len();
    }

    pub fn cycle_focus_back(&mut self) {
        let len = RegionId::CYCLE.len();
        self.active = (self.active + len - 1) % len;
    }

    pub fn focus(&mut self, id: RegionId) {
        if let Some(index) = RegionId::CYCLE.iter().position(|r| *r == id) {
            self.active = index;
        }
    }

    // ========== Navigation ==========

    /// Moves the cursor of the focused pane.
    pub fn move_cursor(&mut self, delta: isize) {
        let id = self.active_region();
        self.regions.get_mut(id).move_cursor(delta);
    }

    pub fn cursor_to_start(&mut self) {
        let id = self.active_region();
        self.regions.get_mut(id).set_cursor(0);
    }

    pub fn cursor_to_end(&mut self) {
        let id = self.active_region();
        self.regions.get_mut(id).set_cursor(usize::MAX);
    }

    /// Highlights a menu row without activating it.
    pub fn select_menu_row(&mut self, row: usize) {
        self.regions.get_mut(RegionId::Menu).set_cursor(row);
    }

    // ========== Dispatch ==========

    /// Queues the highlighted menu line for dispatch.
    pub fn activate(&mut self) {
        if self.phase == Phase::Terminated {
            return;
        }
        let label = self
            .regions
            .get(RegionId::Menu)
            .current_line()
            .unwrap_or_default()
            .to_string();
        self.phase = Phase::Dispatching { label };
    }

    /// Re-queues the last feature that dispatched successfully.
    pub fn refresh(&mut self) {
        if self.phase == Phase::Terminated {
            return;
        }
        if let Some(feature) = self.last_feature {
            self.phase = Phase::Dispatching {
                label: feature.label().to_string(),
            };
        }
    }

    /// Runs a queued dispatch, reporting its outcome into the panes.
    /// Returns `false` when nothing was queued.
    pub async fn run_pending(&mut self) -> bool {
        let Phase::Dispatching { label } = &self.phase else {
            return false;
        };
        let label = label.clone();

        let result = self.dispatch(&label).await;
        self.report(&label, &result);

        if self.phase != Phase::Terminated {
            self.phase = Phase::Idle;
        }
        true
    }

    /// Maps `label` to a feature, lists its records and appends one
    /// formatted line per record to the detail pane.
    ///
    /// An unknown label leaves the detail pane untouched. A client or
    /// formatting error stops the listing; lines already written stay.
    pub async fn dispatch(&mut self, label: &str) -> Result<usize, DispatchError> {
        let label = label.trim();
        let feature = Feature::from_label(label)
            .ok_or_else(|| DispatchError::UnsupportedFeature(label.to_string()))?;

        let detail = self.regions.get_mut(RegionId::Detail);
        detail.clear();
        detail.reset_position();
        detail.set_title(feature.title());
        self.last_feature = Some(feature);

        tracing::debug!(feature = feature.label(), client = self.client.name(), "dispatching");

        let mut written = 0;
        match feature {
            Feature::Containers => {
                let containers = self.client.list_containers().await?;
                for container in &containers {
                    let line = format::container_line(container)?;
                    self.regions.get_mut(RegionId::Detail).write(&line);
                    written += 1;
                }
            }
            Feature::Images => {
                let images = self.client.list_images().await?;
                for image in &images {
                    let line = format::image_line(image, self.size_mode);
                    self.regions.get_mut(RegionId::Detail).write(&line);
                    written += 1;
                }
            }
            Feature::Volumes => {
                let volumes = self.client.list_volumes().await?;
                for volume in &volumes {
                    self.regions
                        .get_mut(RegionId::Detail)
                        .write(&format::volume_line(volume));
                    written += 1;
                }
            }
        }

        Ok(written)
    }

    fn report(&mut self, label: &str, result: &Result<usize, DispatchError>) {
        match result {
            Ok(count) => {
                let noun = Feature::from_label(label)
                    .map(|f| f.noun(*count))
                    .unwrap_or("entries");
                tracing::info!(count, label, "listing loaded");
                self.log(&format!("Loaded {} {}", count, noun));
            }
            Err(e) => {
                tracing::warn!(label, error = %e, "dispatch failed");
                self.regions
                    .get_mut(RegionId::Detail)
                    .write(&format!(" error: {}\n", e));
                self.log(&format!("error: {}", e));
            }
        }
    }

    /// Appends a status line to the info pane.
    pub fn log(&mut self, message: &str) {
        self.regions
            .get_mut(RegionId::Info)
            .write(&format!(" {}\n", message));
    }

    pub fn quit(&mut self) {
        self.phase = Phase::Terminated;
    }

    /// Hands the client back for shutdown.
    pub fn into_client(self) -> Box<dyn ResourceClient> {
        self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StaticClient;
    use crate::model::{ContainerRecord, ImageRecord, VolumeRecord};

    fn controller(client: StaticClient) -> MenuController {
        MenuController::new(Box::new(client), SizeMode::Truncated)
    }

    fn detail_lines(c: &MenuController) -> Vec<String> {
        c.region(RegionId::Detail).lines().map(String::from).collect()
    }

    fn web() -> ContainerRecord {
        ContainerRecord::new("abcdef0123456789", vec!["/web".into()], "Up 2 hours", "running")
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let c = controller(StaticClient::new());
        assert_eq!(c.phase(), &Phase::Idle);
        assert_eq!(c.active_region(), RegionId::Menu);
        assert_eq!(c.region(RegionId::Menu).current_line(), Some(" Containers "));
        assert_eq!(c.region(RegionId::Menu).line_count(), 3);
        assert!(c.region(RegionId::Detail).is_empty());
    }

    #[test]
    fn test_focus_cycles_through_regions() {
        let mut c = controller(StaticClient::new());
        c.cycle_focus();
        assert_eq!(c.active_region(), RegionId::Info);
        c.cycle_focus();
        assert_eq!(c.active_region(), RegionId::Detail);
        c.cycle_focus();
        assert_eq!(c.active_region(), RegionId::Menu);
        c.cycle_focus_back();
        assert_eq!(c.active_region(), RegionId::Detail);
        c.focus(RegionId::Info);
        assert_eq!(c.active_region(), RegionId::Info);
    }

    #[tokio::test]
    async fn test_dispatch_containers() {
        let mut c = controller(StaticClient::new().with_containers(vec![web()]));
        let count = c.dispatch(" Containers ").await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(detail_lines(&c), vec![" <running> web"]);
        assert_eq!(c.region(RegionId::Detail).title(), " Containers ");
        assert_eq!(c.last_feature(), Some(Feature::Containers));
    }

    #[tokio::test]
    async fn test_dispatch_images_uses_size_mode() {
        let images = vec![ImageRecord::new("sha256:1", vec!["redis:7".into()], 45_600_000).unwrap()];

        let mut c = controller(StaticClient::new().with_images(images.clone()));
        c.dispatch("Images").await.unwrap();
        assert_eq!(detail_lines(&c), vec![" redis:7 45.0MB"]);

        let mut c = MenuController::new(
            Box::new(StaticClient::new().with_images(images)),
            SizeMode::Fractional,
        );
        c.dispatch("Images").await.unwrap();
        assert_eq!(detail_lines(&c), vec![" redis:7 45.6MB"]);
    }

    #[tokio::test]
    async fn test_dispatch_empty_volumes() {
        let mut c = controller(StaticClient::new());
        assert_eq!(c.dispatch("Volumes").await, Ok(0));
        assert!(c.region(RegionId::Detail).is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_replaces_previous_listing() {
        let mut c = controller(
            StaticClient::new()
                .with_containers(vec![web()])
                .with_volumes(vec![VolumeRecord::new("local", "data")]),
        );
        c.dispatch("Containers").await.unwrap();
        c.dispatch("Volumes").await.unwrap();
        assert_eq!(detail_lines(&c), vec![" <local> data"]);
        assert_eq!(c.region(RegionId::Detail).title(), " Volumes ");
    }

    #[tokio::test]
    async fn test_unsupported_label_keeps_detail() {
        let mut c = controller(StaticClient::new().with_containers(vec![web()]));
        c.dispatch("Containers").await.unwrap();

        let err = c.dispatch("Networks").await.unwrap_err();
        assert_eq!(err, DispatchError::UnsupportedFeature("Networks".into()));
        assert_eq!(err.to_string(), "unsupported feature: Networks");
        assert_eq!(detail_lines(&c), vec![" <running> web"]);
        assert_eq!(c.region(RegionId::Detail).title(), " Containers ");
    }

    #[tokio::test]
    async fn test_unsupported_label_reports_into_detail() {
        let mut c = controller(StaticClient::new().with_containers(vec![web()]));
        c.dispatch("Containers").await.unwrap();

        c.region_mut(RegionId::Menu).write(" Networks \n");
        c.select_menu_row(3);
        c.activate();
        assert!(c.run_pending().await);

        assert_eq!(
            detail_lines(&c),
            vec![" <running> web", " error: unsupported feature: Networks"]
        );
        assert_eq!(c.phase(), &Phase::Idle);
    }

    #[tokio::test]
    async fn test_client_error_is_reported_and_loop_continues() {
        let mut c = controller(StaticClient::failing(ClientError::Engine {
            operation: "list containers",
            message: "connection refused".into(),
        }));
        c.activate();
        assert!(c.run_pending().await);

        assert_eq!(
            detail_lines(&c),
            vec![" error: list containers failed: connection refused"]
        );
        let info: Vec<_> = c.region(RegionId::Info).lines().collect();
        assert_eq!(info, vec![" error: list containers failed: connection refused"]);
        assert!(c.is_running());
        assert_eq!(c.phase(), &Phase::Idle);
    }

    #[tokio::test]
    async fn test_format_error_keeps_lines_already_written() {
        let nameless =
            ContainerRecord::new("0123456789abcdef", vec![], "Created", "created").unwrap();
        let mut c = controller(StaticClient::new().with_containers(vec![web(), nameless, web()]));

        let err = c.dispatch("Containers").await.unwrap_err();
        assert!(matches!(err, DispatchError::Format(FormatError::MissingName { .. })));
        assert_eq!(detail_lines(&c), vec![" <running> web"]);
    }

    #[tokio::test]
    async fn test_activate_uses_highlighted_entry() {
        let mut c = controller(
            StaticClient::new().with_volumes(vec![VolumeRecord::new("local", "cache")]),
        );
        c.move_cursor(2);
        c.activate();
        assert_eq!(c.phase(), &Phase::Dispatching { label: " Volumes ".into() });

        c.run_pending().await;
        assert_eq!(detail_lines(&c), vec![" <local> cache"]);
        let info: Vec<_> = c.region(RegionId::Info).lines().collect();
        assert_eq!(info, vec![" Loaded 1 volume"]);
    }

    #[tokio::test]
    async fn test_refresh_repeats_last_feature() {
        let mut c = controller(StaticClient::new().with_containers(vec![web(), web()]));
        c.refresh();
        assert!(!c.run_pending().await);

        c.dispatch("Containers").await.unwrap();
        c.refresh();
        assert!(c.run_pending().await);
        assert_eq!(detail_lines(&c).len(), 2);
    }

    #[tokio::test]
    async fn test_quit_terminates() {
        let mut c = controller(StaticClient::new());
        c.quit();
        assert!(!c.is_running());
        c.activate();
        assert!(!c.run_pending().await);
    }
}
