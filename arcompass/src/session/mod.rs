//! Single-writer overlay session.
//!
//! The session owns the strip and its marker builder. Every mutation arrives
//! as a [`SessionEvent`] on one unbounded channel and is applied by the task
//! that owns the session, so layout, tiling and scrolling never run from two
//! contexts at once. Readers observe the result through [`StripSnapshot`]s
//! published on a watch channel. Segment lifecycle events (created, evicted,
//! rebuilt) are drained after every event and fanned out on a broadcast
//! channel, so a host can mirror them while the task runs.
//!
//! ```text
//!  sensor thread ──┐                                                ┌─watch─────► snapshots
//!  host UI ────────┼──► SessionHandle ──mpsc──► OverlaySession task ┤
//!  config loader ──┘                          (InfiniteStrip + builder) └─broadcast─► segment events
//! ```
//!
//! # Example
//!
//! ```ignore
//! use arcompass::session::{self, OverlaySession};
//!
//! let session = OverlaySession::from_config(&config)?;
//! let mut snapshots = session.subscribe();
//! let (handle, rx) = session::channel();
//! let task = session.start(rx);
//!
//! handle.send_position(here)?;
//! handle.send_heading(HeadingSample::new(42.0, 2.0))?;
//! snapshots.changed().await?;
//! ```

mod snapshot;

pub use snapshot::{MarkerSnapshot, SegmentSnapshot, StripSnapshot};

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, OverlayConfig};
use crate::geo::GeoPoint;
use crate::heading::{HeadingDeltaPolicy, HeadingSample};
use crate::layout::MarkerLayoutBuilder;
use crate::strip::{InfiniteStrip, SegmentEvent, StripGeometry, MAX_PENDING_EVENTS};

/// Inbound session events.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Register a point of interest and refresh visible segments.
    AddPoint { location: GeoPoint, label: String },
    /// New magnetic heading sample.
    Heading(HeadingSample),
    /// New device position; visible segments are refreshed.
    Position(GeoPoint),
    /// The host laid out its view; re-tile against the current viewport.
    ViewportLayout,
    /// The viewport changed size.
    ViewportResized { width: f64, height: f64 },
}

/// Errors talking to a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session task has stopped and no longer accepts events.
    #[error("Overlay session has stopped")]
    Closed,
}

/// Sending side of a session's event queue.
///
/// Cheap to clone and safe to use from any thread.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub fn send(&self, event: SessionEvent) -> Result<(), SessionError> {
        self.tx.send(event).map_err(|_| SessionError::Closed)
    }

    pub fn add_point(
        &self,
        location: GeoPoint,
        label: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.send(SessionEvent::AddPoint {
            location,
            label: label.into(),
        })
    }

    pub fn send_heading(&self, sample: HeadingSample) -> Result<(), SessionError> {
        self.send(SessionEvent::Heading(sample))
    }

    pub fn send_position(&self, position: GeoPoint) -> Result<(), SessionError> {
        self.send(SessionEvent::Position(position))
    }

    pub fn request_layout(&self) -> Result<(), SessionError> {
        self.send(SessionEvent::ViewportLayout)
    }

    pub fn resize_viewport(&self, width: f64, height: f64) -> Result<(), SessionError> {
        self.send(SessionEvent::ViewportResized { width, height })
    }

    /// Whether the session has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Create a session event queue.
pub fn channel() -> (SessionHandle, mpsc::UnboundedReceiver<SessionEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SessionHandle { tx }, rx)
}

/// The overlay's single writer: strip, builder and published snapshots.
#[derive(Debug)]
pub struct OverlaySession {
    strip: InfiniteStrip<MarkerLayoutBuilder>,
    snapshot_tx: watch::Sender<StripSnapshot>,
    segment_tx: broadcast::Sender<SegmentEvent>,
    events_processed: u64,
    /// Strip backlog drops already reported.
    dropped_events: u64,
}

impl OverlaySession {
    /// Create a session and lay out the strip for the first time.
    ///
    /// The first layout happens before any heading sample, so azimuth 0°
    /// starts at the viewport centre. Segments created by it are listed in
    /// the initial snapshot.
    pub fn new(
        geometry: StripGeometry,
        builder: MarkerLayoutBuilder,
        delta_policy: HeadingDeltaPolicy,
    ) -> Self {
        let mut strip = InfiniteStrip::new(builder, geometry).with_delta_policy(delta_policy);
        strip.on_viewport_layout();

        let created = strip.drain_events();
        let snapshot = StripSnapshot::capture(&strip, 0, created);
        let (snapshot_tx, _) = watch::channel(snapshot);
        let (segment_tx, _) = broadcast::channel(MAX_PENDING_EVENTS);

        Self {
            strip,
            snapshot_tx,
            segment_tx,
            events_processed: 0,
            dropped_events: 0,
        }
    }

    /// Build a session from configuration, registering its landmarks
    /// (or the demo set when none are configured).
    pub fn from_config(config: &OverlayConfig) -> Result<Self, ConfigError> {
        let geometry = config.strip_geometry()?;

        let mut builder = MarkerLayoutBuilder::new(config.overlay.display_compass_scale);
        for (name, location) in config.landmarks_or_demo() {
            builder.add_point(location, name);
        }

        debug!(
            landmarks = builder.registry().len(),
            points_per_degree = geometry.points_per_degree(),
            policy = %config.heading.delta_policy,
            "Overlay session configured"
        );

        Ok(Self::new(geometry, builder, config.heading.delta_policy))
    }

    pub fn strip(&self) -> &InfiniteStrip<MarkerLayoutBuilder> {
        &self.strip
    }

    /// Number of events applied so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> StripSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshots published after each event.
    pub fn subscribe(&self) -> watch::Receiver<StripSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to segment lifecycle events, in the order they happen.
    ///
    /// Only events recorded after subscribing are received. A receiver that
    /// falls more than [`MAX_PENDING_EVENTS`] behind sees
    /// [`broadcast::error::RecvError::Lagged`].
    pub fn subscribe_segment_events(&self) -> broadcast::Receiver<SegmentEvent> {
        self.segment_tx.subscribe()
    }

    /// Drain the strip's lifecycle events and fan them out to subscribers.
    fn forward_segment_events(&mut self) -> Vec<SegmentEvent> {
        let dropped = self.strip.dropped_events();
        if dropped > self.dropped_events {
            warn!(
                dropped = dropped - self.dropped_events,
                total = dropped,
                "Segment events dropped before delivery"
            );
            self.dropped_events = dropped;
        }

        let events = self.strip.drain_events();
        for event in &events {
            // Err only means nobody is subscribed
            let _ = self.segment_tx.send(*event);
        }
        events
    }

    /// Apply one event and publish the resulting snapshot.
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::AddPoint { location, label } => {
                let id = self.strip.provider_mut().add_point(location, label);
                debug!(%id, %location, "Point of interest added");
                self.strip.refresh_all_visible_segments();
            }
            SessionEvent::Heading(sample) => {
                self.strip
                    .set_scroll_offset_for_heading(sample.magnetic_heading);
            }
            SessionEvent::Position(position) => {
                self.strip.provider_mut().set_device_position(position);
                self.strip.refresh_all_visible_segments();
            }
            SessionEvent::ViewportLayout => {
                self.strip.on_viewport_layout();
            }
            SessionEvent::ViewportResized { width, height } => {
                if let Err(e) = self.strip.resize_viewport(width, height) {
                    warn!(width, height, error = %e, "Ignoring viewport resize");
                }
            }
        }

        self.events_processed += 1;
        let segment_events = self.forward_segment_events();
        self.snapshot_tx.send_replace(StripSnapshot::capture(
            &self.strip,
            self.events_processed,
            segment_events,
        ));
    }

    /// Start the session's event loop.
    ///
    /// Spawns a task that applies events until every [`SessionHandle`] is
    /// dropped, then hands the session back.
    pub fn start(
        mut self,
        mut rx: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> tokio::task::JoinHandle<Self> {
        tokio::spawn(async move {
            info!("Overlay session started");

            while let Some(event) = rx.recv().await {
                self.handle_event(event);
            }

            info!(
                events = self.events_processed,
                "Overlay session stopped (channel closed)"
            );
            self
        })
    }
}
