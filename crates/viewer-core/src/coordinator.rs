//! The recomputation graph over the view state.
//!
//! `ViewCoordinator` runs as a single event-loop task owning all mutable
//! view state, so no two recomputations ever run concurrently against it.
//! Input events arrive debounced through a [`ViewerHandle`]; raster loads
//! run as separate tasks and re-enter the loop tagged with a generation,
//! so a load superseded by a newer selection never publishes its result.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use binning::{colorize, windowed_histogram, BinEdges, ColorRamp, RegionHistogram};
use raster_common::{Extent, GridIndex, RasterField, ViewResult};

use crate::dispatch::{Channel, DebouncedDispatcher};
use crate::loader::{RasterLoader, RawField, TimeSelection};
use crate::presenter::{HistogramView, MarkerView, Presenter, Readout};
use crate::store::RasterStore;

/// Debounce windows for the three input channels.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Window for time-selection events.
    pub data_debounce: Duration,
    /// Window for pan/zoom events, which fire rapidly.
    pub viewport_debounce: Duration,
    /// Window absorbing rapid re-clicks.
    pub click_debounce: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_debounce: Duration::from_millis(100),
            viewport_debounce: Duration::from_millis(100),
            click_debounce: Duration::from_millis(50),
        }
    }
}

/// The three input event kinds driving the pipeline.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// A new time was selected; the only event that may change which
    /// raster is active.
    DataSelect(TimeSelection),
    /// The map viewport moved.
    ViewportChange(Extent),
    /// The map was clicked at a coordinate pair.
    Click { x: f64, y: f64 },
}

/// Completed load, tagged with the generation that started it.
struct LoadOutcome {
    generation: u64,
    result: ViewResult<RawField>,
}

/// Grid indices of the current selection. Survives a raster replacement
/// clamped to the new axis bounds, never displayed against new data
/// unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectionIndex {
    x_index: usize,
    y_index: usize,
}

impl SelectionIndex {
    fn clamped_to(self, field: &RasterField) -> Self {
        Self {
            x_index: self.x_index.min(field.x_axis.len() - 1),
            y_index: self.y_index.min(field.y_axis.len() - 1),
        }
    }
}

/// Mutable snapshot of the derived view state.
///
/// Owned exclusively by the coordinator; every other component receives
/// values by argument or reads immutable snapshots.
#[derive(Default)]
struct ViewState {
    extent: Option<Extent>,
    selection: Option<SelectionIndex>,
    histogram: Option<RegionHistogram>,
}

/// Input-side handle: debounces events into the coordinator queue.
///
/// Dropping the handle (and any clones of the event sender) stops the
/// coordinator loop once the queue drains.
pub struct ViewerHandle {
    dispatcher: DebouncedDispatcher<ViewEvent>,
    config: ViewerConfig,
}

impl ViewerHandle {
    /// Select the raster for a time (data channel, trailing edge).
    pub fn select_time(&mut self, selection: TimeSelection) {
        self.dispatcher.schedule(
            Channel::Data,
            self.config.data_debounce,
            ViewEvent::DataSelect(selection),
        );
    }

    /// Update the viewport (viewport channel, trailing edge).
    pub fn set_viewport(&mut self, extent: Extent) {
        self.dispatcher.schedule(
            Channel::Viewport,
            self.config.viewport_debounce,
            ViewEvent::ViewportChange(extent),
        );
    }

    /// Register a click (click channel, trailing edge). The marker is
    /// resolved against whatever raster is active when the debounce
    /// fires, not when the click happens.
    pub fn click(&mut self, x: f64, y: f64) {
        self.dispatcher.schedule(
            Channel::Click,
            self.config.click_debounce,
            ViewEvent::Click { x, y },
        );
    }
}

/// Spawn the coordinator loop.
///
/// Returns the input handle and the loop's join handle. The loop exits
/// when the handle is dropped; in-flight loads finishing afterwards are
/// dropped best-effort.
pub fn spawn_viewer(
    loader: Arc<dyn RasterLoader>,
    presenter: Box<dyn Presenter>,
    edges: BinEdges,
    ramp: ColorRamp,
    config: ViewerConfig,
) -> (ViewerHandle, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (loads_tx, loads_rx) = mpsc::unbounded_channel();

    let coordinator = ViewCoordinator {
        store: RasterStore::new(),
        edges,
        ramp,
        loader,
        presenter,
        state: ViewState::default(),
        events: events_rx,
        loads_tx,
        loads_rx,
        load_generation: 0,
    };
    let join = tokio::spawn(coordinator.run());

    let handle = ViewerHandle {
        dispatcher: DebouncedDispatcher::new(events_tx),
        config,
    };
    (handle, join)
}

struct ViewCoordinator {
    store: RasterStore,
    edges: BinEdges,
    ramp: ColorRamp,
    loader: Arc<dyn RasterLoader>,
    presenter: Box<dyn Presenter>,
    state: ViewState,
    events: UnboundedReceiver<ViewEvent>,
    loads_tx: UnboundedSender<LoadOutcome>,
    loads_rx: UnboundedReceiver<LoadOutcome>,
    load_generation: u64,
}

impl ViewCoordinator {
    async fn run(mut self) {
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.on_event(event),
                    // All input handles are gone; nothing left to publish for.
                    None => break,
                },
                Some(outcome) = self.loads_rx.recv() => {
                    self.finish_load(outcome.generation, outcome.result);
                }
            }
        }
        debug!("view coordinator stopped");
    }

    fn on_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::DataSelect(selection) => self.start_load(selection),
            ViewEvent::ViewportChange(extent) => self.on_viewport(extent),
            ViewEvent::Click { x, y } => self.on_click(x, y),
        }
    }

    /// Kick off a load without blocking the loop. The previous raster and
    /// extent stay visibly active until the result arrives; only the data
    /// channel's pipeline waits on a stalled load.
    fn start_load(&mut self, selection: TimeSelection) {
        self.load_generation += 1;
        let generation = self.load_generation;
        info!(%selection, generation, "loading raster");

        let loader = self.loader.clone();
        let loads_tx = self.loads_tx.clone();
        tokio::spawn(async move {
            let result = loader.load(selection).await;
            let _ = loads_tx.send(LoadOutcome { generation, result });
        });
    }

    fn finish_load(&mut self, generation: u64, result: ViewResult<RawField>) {
        if generation != self.load_generation {
            // A newer selection superseded this load; drop it unpublished.
            debug!(
                generation,
                latest = self.load_generation,
                "discarding superseded load"
            );
            return;
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "raster load failed; keeping previous view");
                self.presenter.show_error(&error);
                return;
            }
        };

        let field = match self
            .store
            .replace(raw.raster, raw.x_axis, raw.y_axis, raw.valid_time)
        {
            Ok(field) => field,
            Err(error) => {
                warn!(%error, "rejecting raster with mismatched shape");
                self.presenter.show_error(&error);
                return;
            }
        };
        info!(
            valid_time = %field.valid_time,
            width = field.raster.width(),
            height = field.raster.height(),
            "raster replaced"
        );

        // Fixed pipeline order, all steps observing this one snapshot:
        // overlay, then histogram, then marker.
        debug!("updating overlay");
        let overlay = colorize(&field, &self.edges, &self.ramp);
        self.presenter.show_overlay(&overlay);

        let extent = *self
            .state
            .extent
            .get_or_insert_with(|| Extent::spanning(&field.x_axis, &field.y_axis));
        debug!("updating histogram");
        let histogram = windowed_histogram(&field, &extent, &self.edges);

        let marker = match self.state.selection {
            Some(selection) => {
                let selection = selection.clamped_to(&field);
                self.state.selection = Some(selection);
                Some(marker_at(&field, selection))
            }
            None => None,
        };

        self.publish(histogram, marker);
    }

    fn on_viewport(&mut self, extent: Extent) {
        self.state.extent = Some(extent);
        let Some(field) = self.store.current() else {
            return;
        };
        debug!("updating histogram");
        let histogram = windowed_histogram(&field, &extent, &self.edges);
        let marker = self
            .state
            .selection
            .map(|selection| marker_at(&field, selection));
        self.publish(histogram, marker);
    }

    fn on_click(&mut self, x: f64, y: f64) {
        // Resolve against whatever raster is active *now*; if a reload
        // completed since the click was scheduled, the new data wins.
        let Some(field) = self.store.current() else {
            return;
        };
        let (x_index, y_index) = GridIndex::for_field(&field).nearest_cell(x, y);
        let selection = SelectionIndex { x_index, y_index };
        self.state.selection = Some(selection);
        let marker = marker_at(&field, selection);
        debug!(
            x,
            y,
            x_index,
            y_index,
            value = marker.value as f64,
            "selection moved"
        );

        let histogram = self
            .state
            .histogram
            .take()
            .unwrap_or_else(|| RegionHistogram::empty(&self.edges));
        self.publish(histogram, Some(marker));
    }

    /// Publish the histogram view (counts + indicator), marker, and
    /// readout, then retain the histogram as current state.
    fn publish(&mut self, histogram: RegionHistogram, marker: Option<MarkerView>) {
        let indicator = marker.map(|m| self.indicator_value(m.value));
        let view = HistogramView::from_histogram(&histogram, indicator);
        self.presenter.show_histogram(&view);

        if let Some(marker) = &marker {
            self.presenter.show_marker(marker);
        }

        let readout = Readout {
            selected: marker.map(|m| m.value as f64).unwrap_or(0.0),
            mean: histogram.mean,
        };
        self.presenter.show_readout(&readout);

        self.state.histogram = Some(histogram);
    }

    /// Position of the selected value on the histogram axis, clamped into
    /// the displayable range so the indicator line stays on scale.
    fn indicator_value(&self, value: f32) -> f64 {
        let value = value as f64;
        let min = self.edges.min();
        let max = self.edges.max();
        if !value.is_finite() || value <= min {
            min
        } else if value > max {
            max * 0.99
        } else {
            value
        }
    }
}

fn marker_at(field: &RasterField, selection: SelectionIndex) -> MarkerView {
    let value = field
        .raster
        .get(selection.x_index, selection.y_index)
        .unwrap_or(f32::NAN);
    MarkerView {
        x: field.x_axis.coord(selection.x_index),
        y: field.y_axis.coord(selection.y_index),
        x_index: selection.x_index,
        y_index: selection.y_index,
        value,
    }
}
