//! Base map lifecycle.
//!
//! A [`MapCanvas`] starts uninitialized. [`MapCanvas::initialize`] waits for
//! the view surface to signal readiness (a future resolving to the mapping
//! backend), then sets the initial view and attaches tiles and the scale
//! indicator. If anything fails the canvas stays uninitialized and every
//! render is a logged no-op. [`MapCanvas::teardown`] releases the backend
//! exactly once; dropping the canvas tears it down if nobody did.

use std::future::Future;

use incident_map_analytics_models::SelectedCategories;
use incident_map_map_models::{MapSettings, ViewMode};
use incident_map_source_models::{IncidentReport, LatLng};
use tokio::sync::oneshot;

use crate::layers::{LayerManager, LayerSet};
use crate::{MapBackend, MapError};

/// Lifecycle state of a [`MapCanvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasState {
    /// No backend bound yet, or initialization failed.
    Uninitialized,
    /// Backend bound, tiles attached.
    Ready,
    /// Backend released.
    TornDown,
}

/// Sending half of a readiness signal, held by the view surface.
#[derive(Debug)]
pub struct SurfaceNotifier<B> {
    tx: oneshot::Sender<B>,
}

impl<B> SurfaceNotifier<B> {
    /// Signals that the surface is laid out and hands over its backend.
    ///
    /// If the canvas stopped waiting the backend is handed back.
    ///
    /// # Errors
    ///
    /// Returns the backend if nobody is waiting for it anymore.
    pub fn ready(self, backend: B) -> Result<(), B> {
        self.tx.send(backend)
    }
}

/// Creates a readiness signal: the notifier goes to the view surface, the
/// future goes to [`MapCanvas::initialize`]. Dropping the notifier without
/// calling [`SurfaceNotifier::ready`] resolves the future to
/// [`MapError::SurfaceDropped`].
pub fn readiness<B>() -> (SurfaceNotifier<B>, impl Future<Output = Result<B, MapError>>) {
    let (tx, rx) = oneshot::channel();
    let ready = async move { rx.await.map_err(|_| MapError::SurfaceDropped) };
    (SurfaceNotifier { tx }, ready)
}

/// Owns the mapping backend and the [`LayerManager`] drawing on it.
pub struct MapCanvas<B: MapBackend> {
    settings: MapSettings,
    map: Option<B>,
    state: CanvasState,
    layers: LayerManager,
}

impl<B: MapBackend> MapCanvas<B> {
    /// Creates an uninitialized canvas for the given map settings.
    #[must_use]
    pub fn new(settings: MapSettings) -> Self {
        Self {
            settings,
            map: None,
            state: CanvasState::Uninitialized,
            layers: LayerManager::new(),
        }
    }

    /// Waits for `ready`, then binds the backend at the configured center
    /// and zoom.
    pub async fn initialize<F>(&mut self, ready: F)
    where
        F: Future<Output = Result<B, MapError>>,
    {
        let center = self.settings.center;
        let zoom = self.settings.zoom;
        self.initialize_at(ready, center, zoom).await;
    }

    /// Waits for `ready`, then binds the backend at `center` and `zoom`.
    ///
    /// Does nothing if the canvas is already ready or torn down. On failure
    /// the error is logged and the canvas stays
    /// [`CanvasState::Uninitialized`].
    pub async fn initialize_at<F>(&mut self, ready: F, center: LatLng, zoom: u8)
    where
        F: Future<Output = Result<B, MapError>>,
    {
        if self.state != CanvasState::Uninitialized {
            log::warn!("Ignoring map initialization in state {:?}", self.state);
            return;
        }

        let mut map = match ready.await {
            Ok(map) => map,
            Err(e) => {
                log::error!("Error initializing map: {e}");
                return;
            }
        };

        if let Err(e) = self.bind(&mut map, center, zoom) {
            log::error!("Error initializing map: {e}");
            map.remove();
            return;
        }

        log::info!(
            "Map '{}' ready at ({}, {}) zoom {zoom}",
            self.settings.id,
            center.lat,
            center.lng
        );
        self.map = Some(map);
        self.state = CanvasState::Ready;
    }

    fn bind(&self, map: &mut B, center: LatLng, zoom: u8) -> Result<(), MapError> {
        map.set_view(center, zoom)?;
        map.add_tile_layer(&self.settings.tiles)?;
        map.add_scale_control(self.settings.scale)?;
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CanvasState {
        self.state
    }

    /// Returns `true` once the backend is bound and not yet released.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == CanvasState::Ready
    }

    /// Settings this canvas was created with.
    #[must_use]
    pub const fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// The bound backend, if any.
    #[must_use]
    pub const fn map(&self) -> Option<&B> {
        self.map.as_ref()
    }

    /// Active view mode.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.layers.mode()
    }

    /// Layers drawn by the last render.
    #[must_use]
    pub const fn layers(&self) -> &LayerSet {
        self.layers.layers()
    }

    /// Redraws `reports` under `selected` in `mode`.
    ///
    /// Returns `false` (and draws nothing) if the canvas is not ready. The
    /// mode is recorded either way and used by the first render once ready.
    pub fn render(
        &mut self,
        reports: &[IncidentReport],
        selected: &SelectedCategories,
        mode: ViewMode,
    ) -> bool {
        let Some(map) = ready_map(self.state, &mut self.map) else {
            self.layers.record_mode(mode);
            return false;
        };
        self.layers.rebuild(map, reports, selected, mode);
        true
    }

    /// Switches view mode and redraws.
    ///
    /// Returns `false` if not ready; the mode is still recorded.
    pub fn set_mode(
        &mut self,
        mode: ViewMode,
        reports: &[IncidentReport],
        selected: &SelectedCategories,
    ) -> bool {
        let Some(map) = ready_map(self.state, &mut self.map) else {
            self.layers.record_mode(mode);
            return false;
        };
        self.layers.set_mode(map, mode, reports, selected);
        true
    }

    /// Removes all drawn layers. No-op if not ready.
    pub fn clear_layers(&mut self) {
        if let Some(map) = ready_map(self.state, &mut self.map) {
            self.layers.clear_layers(map);
        }
    }

    /// Releases the backend. Only the first call has any effect.
    pub fn teardown(&mut self) {
        if self.state == CanvasState::TornDown {
            return;
        }
        if let Some(map) = self.map.as_mut() {
            map.remove();
            log::debug!("Map '{}' released", self.settings.id);
        }
        self.layers.forget_layers();
        self.state = CanvasState::TornDown;
    }
}

fn ready_map<B>(state: CanvasState, map: &mut Option<B>) -> Option<&mut B> {
    if state != CanvasState::Ready {
        log::debug!("Map not ready ({state:?}), skipping render");
        return None;
    }
    map.as_mut()
}

impl<B: MapBackend> Drop for MapCanvas<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
