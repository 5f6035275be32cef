//! The owning map view.
//!
//! A [`MapSession`] holds the report collection, the category selection and
//! the [`MapCanvas`]. UI events go through a FIFO queue and each one runs a
//! full clear-then-draw before the next is taken. Fetches are ticketed so a
//! result that arrives after a newer fetch started, or after teardown, is
//! dropped instead of applied.

use std::collections::VecDeque;
use std::future::Future;

use chrono::{DateTime, Utc};
use incident_map_analytics::{filter, stats};
use incident_map_analytics_models::{SelectedCategories, StatsSummary};
use incident_map_map_models::{MapSettings, ViewMode};
use incident_map_source::{ReportError, ReportSource};
use incident_map_source_models::IncidentReport;

use crate::canvas::MapCanvas;
use crate::{MapBackend, MapError};

/// A UI event that triggers a redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Switch between markers and heatmap.
    SetMode(ViewMode),
    /// Add or remove a category from the selection.
    ToggleCategory(String),
    /// Replace the whole report collection.
    ReplaceReports(Vec<IncidentReport>),
}

/// Handle for one outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    /// Generation this ticket was issued for.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced with this many reports.
    Applied(usize),
    /// A newer fetch was started; the result was dropped.
    Stale,
    /// The session was torn down; the result was dropped.
    Discarded,
    /// The fetch failed; the previous collection was kept.
    Failed,
}

/// Report collection, selection and map canvas, driven by queued events.
pub struct MapSession<B: MapBackend> {
    canvas: MapCanvas<B>,
    reports: Vec<IncidentReport>,
    selected: SelectedCategories,
    pending: VecDeque<MapEvent>,
    fetch_generation: u64,
    torn_down: bool,
}

impl<B: MapBackend> MapSession<B> {
    /// Creates a session with no reports, an empty selection and an
    /// uninitialized canvas.
    #[must_use]
    pub fn new(settings: MapSettings) -> Self {
        Self {
            canvas: MapCanvas::new(settings),
            reports: vec![],
            selected: SelectedCategories::new(),
            pending: VecDeque::new(),
            fetch_generation: 0,
            torn_down: false,
        }
    }

    /// Waits for the view surface and draws whatever is already loaded.
    pub async fn initialize<F>(&mut self, ready: F)
    where
        F: Future<Output = Result<B, MapError>>,
    {
        self.canvas.initialize(ready).await;
        self.redraw();
    }

    /// Queues an event without processing it.
    pub fn enqueue(&mut self, event: MapEvent) {
        if self.torn_down {
            log::debug!("Session torn down, dropping {event:?}");
            return;
        }
        self.pending.push_back(event);
    }

    /// Processes queued events in order until the queue is empty.
    ///
    /// Returns the number of events handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.pending.pop_front() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Queues `event` and drains the queue.
    pub fn dispatch(&mut self, event: MapEvent) {
        self.enqueue(event);
        self.process_pending();
    }

    /// Switches view mode.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.dispatch(MapEvent::SetMode(mode));
    }

    /// Toggles `category` in the selection.
    pub fn toggle_category(&mut self, category: impl Into<String>) {
        self.dispatch(MapEvent::ToggleCategory(category.into()));
    }

    /// Replaces the report collection.
    pub fn replace_reports(&mut self, reports: Vec<IncidentReport>) {
        self.dispatch(MapEvent::ReplaceReports(reports));
    }

    fn handle(&mut self, event: MapEvent) {
        match event {
            MapEvent::SetMode(mode) => {
                self.canvas.set_mode(mode, &self.reports, &self.selected);
            }
            MapEvent::ToggleCategory(category) => {
                self.selected = filter::toggle(&self.selected, &category);
                self.redraw();
            }
            MapEvent::ReplaceReports(reports) => {
                log::info!(
                    "Replacing {} reports with {}",
                    self.reports.len(),
                    reports.len()
                );
                self.reports = reports;
                self.redraw();
            }
        }
    }

    fn redraw(&mut self) {
        let mode = self.canvas.mode();
        self.canvas.render(&self.reports, &self.selected, mode);
    }

    /// Starts a fetch. Any ticket issued earlier becomes stale.
    pub const fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        FetchTicket {
            generation: self.fetch_generation,
        }
    }

    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// A successful result replaces the collection and redraws. Results for
    /// stale tickets or a torn-down session are dropped untouched.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<IncidentReport>, ReportError>,
    ) -> FetchOutcome {
        if self.torn_down {
            log::debug!("Discarding fetch {} after teardown", ticket.generation);
            return FetchOutcome::Discarded;
        }
        if ticket.generation != self.fetch_generation {
            log::debug!(
                "Discarding stale fetch {} (current {})",
                ticket.generation,
                self.fetch_generation
            );
            return FetchOutcome::Stale;
        }
        match result {
            Ok(reports) => {
                let count = reports.len();
                self.replace_reports(reports);
                FetchOutcome::Applied(count)
            }
            Err(e) => {
                log::error!("Error fetching reports: {e}");
                FetchOutcome::Failed
            }
        }
    }

    /// Fetches the full collection from `source` and applies it.
    pub async fn refresh(&mut self, source: &dyn ReportSource) -> FetchOutcome {
        let ticket = self.begin_fetch();
        log::debug!("Fetching reports from '{}'", source.id());
        let result = source.fetch_reports().await;
        self.complete_fetch(ticket, result)
    }

    /// Summary statistics over the current collection and selection.
    #[must_use]
    pub fn summary(&self, recent_days: u32, top_n: usize, now: DateTime<Utc>) -> StatsSummary {
        stats::summarize(&self.reports, &self.selected, recent_days, top_n, now)
    }

    /// The current report collection.
    #[must_use]
    pub fn reports(&self) -> &[IncidentReport] {
        &self.reports
    }

    /// The current category selection.
    #[must_use]
    pub const fn selected(&self) -> &SelectedCategories {
        &self.selected
    }

    /// The map canvas.
    #[must_use]
    pub const fn canvas(&self) -> &MapCanvas<B> {
        &self.canvas
    }

    /// Number of events waiting to be processed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` once [`Self::teardown`] has run.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Drops queued events, invalidates outstanding fetches and releases the
    /// map.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.pending.clear();
        self.fetch_generation += 1;
        self.canvas.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_map;
    use crate::memory::InMemoryMap;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use incident_map_source::sample::sample_reports;
    use incident_map_source::SampleReportSource;

    async fn ready_session() -> MapSession<InMemoryMap> {
        let mut session = MapSession::new(default_map());
        session.initialize(async { Ok(InMemoryMap::new()) }).await;
        session
    }

    fn map(session: &MapSession<InMemoryMap>) -> &InMemoryMap {
        session.canvas().map().unwrap()
    }

    #[tokio::test]
    async fn refresh_from_sample_source_draws_all_markers() {
        let mut session = ready_session().await;
        let outcome = session.refresh(&SampleReportSource).await;
        assert_eq!(outcome, FetchOutcome::Applied(6));
        assert_eq!(map(&session).marker_count(), 6);
    }

    #[tokio::test]
    async fn queued_events_run_in_order() {
        let mut session = ready_session().await;
        session.enqueue(MapEvent::ReplaceReports(sample_reports()));
        session.enqueue(MapEvent::ToggleCategory("theft".to_string()));
        session.enqueue(MapEvent::SetMode(ViewMode::Heatmap));
        assert_eq!(session.pending(), 3);
        assert_eq!(map(&session).marker_count(), 0);

        assert_eq!(session.process_pending(), 3);
        assert_eq!(session.pending(), 0);
        assert_eq!(map(&session).marker_count(), 0);
        assert_eq!(map(&session).heat_layer_count(), 1);
        assert_eq!(map(&session).heat_points(), 3);
    }

    #[tokio::test]
    async fn toggling_twice_restores_everything() {
        let mut session = ready_session().await;
        session.replace_reports(sample_reports());
        session.toggle_category("theft");
        assert_eq!(map(&session).marker_count(), 3);
        session.toggle_category("theft");
        assert!(session.selected().is_empty());
        assert_eq!(map(&session).marker_count(), 6);
    }

    #[tokio::test]
    async fn stale_fetch_is_discarded() {
        let mut session = ready_session().await;
        let first = session.begin_fetch();
        let second = session.begin_fetch();

        let mut old = sample_reports();
        old.truncate(2);
        assert_eq!(session.complete_fetch(first, Ok(old)), FetchOutcome::Stale);
        assert!(session.reports().is_empty());

        assert_eq!(
            session.complete_fetch(second, Ok(sample_reports())),
            FetchOutcome::Applied(6)
        );
        assert_eq!(session.reports().len(), 6);
    }

    #[tokio::test]
    async fn fetch_after_teardown_is_discarded() {
        let mut session = ready_session().await;
        let ticket = session.begin_fetch();
        session.teardown();

        let outcome = session.complete_fetch(ticket, Ok(sample_reports()));
        assert_eq!(outcome, FetchOutcome::Discarded);
        assert!(session.reports().is_empty());
        assert_eq!(map(&session).remove_calls(), 1);
        assert_eq!(map(&session).marker_count(), 0);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_collection() {
        let mut session = ready_session().await;
        session.replace_reports(sample_reports());

        let ticket = session.begin_fetch();
        let outcome = session.complete_fetch(ticket, Err(ReportError::Status { status: 500 }));

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(session.reports().len(), 6);
        assert_eq!(map(&session).marker_count(), 6);
    }

    struct Broken;

    #[async_trait]
    impl ReportSource for Broken {
        fn id(&self) -> &str {
            "broken"
        }

        async fn fetch_reports(&self) -> Result<Vec<IncidentReport>, ReportError> {
            Err(ReportError::Status { status: 503 })
        }
    }

    #[tokio::test]
    async fn refresh_from_failing_source_reports_failure() {
        let mut session = ready_session().await;
        assert_eq!(session.refresh(&Broken).await, FetchOutcome::Failed);
        assert!(session.reports().is_empty());
    }

    #[tokio::test]
    async fn rendering_is_a_no_op_when_initialization_failed() {
        let mut session: MapSession<InMemoryMap> = MapSession::new(default_map());
        session
            .initialize(async { Err(MapError::SurfaceDropped) })
            .await;

        session.replace_reports(sample_reports());
        session.set_mode(ViewMode::Heatmap);

        assert_eq!(session.reports().len(), 6);
        assert_eq!(session.canvas().mode(), ViewMode::Heatmap);
        assert!(session.canvas().map().is_none());
        assert!(session.canvas().layers().is_empty());
    }

    #[tokio::test]
    async fn mode_set_before_ready_is_used_by_first_render() {
        let mut session: MapSession<InMemoryMap> = MapSession::new(default_map());
        session.replace_reports(sample_reports());
        session.set_mode(ViewMode::Heatmap);
        session.initialize(async { Ok(InMemoryMap::new()) }).await;

        assert_eq!(session.canvas().mode(), ViewMode::Heatmap);
        assert_eq!(map(&session).marker_count(), 0);
        assert_eq!(map(&session).heat_layer_count(), 1);
        assert_eq!(map(&session).heat_points(), 6);
    }

    #[tokio::test]
    async fn events_queued_before_ready_shape_first_render() {
        let mut session: MapSession<InMemoryMap> = MapSession::new(default_map());
        session.enqueue(MapEvent::ReplaceReports(sample_reports()));
        session.enqueue(MapEvent::ToggleCategory("theft".to_string()));
        session.enqueue(MapEvent::ToggleCategory("drug".to_string()));
        session.enqueue(MapEvent::SetMode(ViewMode::Heatmap));
        session.enqueue(MapEvent::SetMode(ViewMode::Markers));
        assert_eq!(session.process_pending(), 5);
        assert!(session.canvas().map().is_none());

        session.initialize(async { Ok(InMemoryMap::new()) }).await;

        assert_eq!(session.canvas().mode(), ViewMode::Markers);
        assert_eq!(session.selected().len(), 2);
        let ids: Vec<String> = map(&session)
            .markers()
            .map(|m| m.report_id.to_string())
            .collect();
        assert_eq!(ids, ["1", "3", "5", "6"]);
        assert_eq!(map(&session).heat_layer_count(), 0);
    }

    #[tokio::test]
    async fn filter_toggled_before_ready_applies_to_heatmap() {
        let mut session: MapSession<InMemoryMap> = MapSession::new(default_map());
        session.replace_reports(sample_reports());
        session.toggle_category("theft");
        session.set_mode(ViewMode::Heatmap);
        session.initialize(async { Ok(InMemoryMap::new()) }).await;

        assert_eq!(map(&session).heat_layer_count(), 1);
        assert_eq!(map(&session).heat_points(), 3);
    }

    #[tokio::test]
    async fn reports_loaded_before_ready_are_drawn_on_initialize() {
        let mut session: MapSession<InMemoryMap> = MapSession::new(default_map());
        session.replace_reports(sample_reports());
        session.initialize(async { Ok(InMemoryMap::new()) }).await;
        assert_eq!(map(&session).marker_count(), 6);
    }

    #[tokio::test]
    async fn events_after_teardown_are_dropped() {
        let mut session = ready_session().await;
        session.teardown();
        session.toggle_category("theft");
        session.teardown();
        assert!(session.selected().is_empty());
        assert_eq!(map(&session).remove_calls(), 1);
    }

    #[tokio::test]
    async fn summary_reflects_collection_and_selection() {
        let mut session = ready_session().await;
        session.replace_reports(sample_reports());
        session.toggle_category("theft");

        let now = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let summary = session.summary(7, 5, now);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.filtered, 3);
        assert_eq!(summary.top_categories[0].key, "theft");
        assert_eq!(summary.top_categories[0].count, 3);
        assert_eq!(summary.clusters, 0);
    }
}
