//! Headless simulator.
//!
//! Drives a [`Carousel`] with a [`SimHost`] and a [`ManualClock`] through a
//! [`Script`], reporting the state after each step. Backs the `carousel-sim`
//! binary.

pub mod host;
pub mod script;

pub use host::{SimHost, SlotId};
pub use script::{Script, Step};

use crate::config::{ConfigError, ResolvedConfig};
use crate::engine::{Carousel, FrameScheduler, ManualClock, Phase};
use crate::logging::LoggingError;
use crate::model::{CarouselError, CarouselEvent, GestureInput, ItemTransform};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Upper bound on ticks spent settling after one step.
pub const MAX_SETTLE_FRAMES: usize = 100_000;

/// Errors surfaced by the simulator binary.
#[derive(Debug, Error)]
pub enum SimError {
    /// The script file could not be read.
    #[error("Failed to read script {path}: {reason}")]
    ScriptRead {
        /// Script path.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },

    /// The script is not valid TOML or has unknown fields.
    #[error("Invalid script {path}: {reason}")]
    ScriptParse {
        /// Script path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// The engine rejected a scripted call.
    #[error(transparent)]
    Carousel(#[from] CarouselError),

    /// A report could not be serialized.
    #[error("Failed to encode report: {0}")]
    Encode(String),
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per step.
    Json,
}

/// State after one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Step number; 0 is the initial load.
    pub step: usize,
    /// Action tag.
    pub action: &'static str,
    /// Ticks delivered during the step.
    pub frames: usize,
    /// Clock time after the step.
    pub time: f64,
    /// Item count.
    pub item_count: usize,
    /// Current item.
    pub current: Option<usize>,
    /// Scroll offset.
    pub offset: f64,
    /// Motion phase.
    pub phase: Phase,
    /// Notifications emitted during the step.
    pub events: Vec<CarouselEvent>,
    /// Render parameters for every visible item.
    pub items: Vec<ItemTransform>,
}

impl StepReport {
    /// Render in the requested format.
    ///
    /// # Errors
    ///
    /// [`SimError::Encode`] if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String, SimError> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string(self).map_err(|e| SimError::Encode(e.to_string()))
            }
            OutputFormat::Text => Ok(self.to_text()),
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        let current = self
            .current
            .map_or_else(|| "-".to_string(), |index| index.to_string());
        let _ = writeln!(
            out,
            "[{}] {:<10} t={:.3}s frames={} items={} current={} offset={:.3} phase={:?}",
            self.step,
            self.action,
            self.time,
            self.frames,
            self.item_count,
            current,
            self.offset,
            self.phase,
        );
        if !self.events.is_empty() {
            let names: Vec<&str> = self.events.iter().map(CarouselEvent::name).collect();
            let _ = writeln!(out, "    events: {}", names.join(", "));
        }
        for item in &self.items {
            let _ = writeln!(
                out,
                "    {} #{:<3} offset={:+.3} x={:+.1} alpha={:.2} scale={:.2}",
                if item.is_current { '*' } else { ' ' },
                item.index,
                item.offset,
                item.translation,
                item.alpha,
                item.scale,
            );
        }
        out
    }
}

/// A carousel under simulation.
pub struct Simulation {
    carousel: Carousel<SimHost, ManualClock>,
    clock: ManualClock,
    frame_interval: f64,
}

impl Simulation {
    /// Load the script's items under the resolved config.
    pub fn new(script: &Script, config: &ResolvedConfig) -> Self {
        let clock = ManualClock::new();
        let host = SimHost::new(script.items)
            .with_starting_index(script.starting_index)
            .with_unselectable(script.unselectable.iter().copied());
        let carousel = Carousel::new(host, clock.clone(), config.carousel.clone());
        info!(
            items = script.items,
            frame_rate = config.frame_rate,
            "Simulation started"
        );
        Self {
            carousel,
            clock,
            frame_interval: 1.0 / config.frame_rate,
        }
    }

    /// The simulated carousel.
    pub fn carousel(&self) -> &Carousel<SimHost, ManualClock> {
        &self.carousel
    }

    /// Report on the current state, draining recorded events.
    pub fn report(&mut self, step: usize, action: &'static str, frames: usize) -> StepReport {
        StepReport {
            step,
            action,
            frames,
            time: self.clock.now(),
            item_count: self.carousel.item_count(),
            current: self.carousel.current_item_index(),
            offset: self.carousel.scroll_offset(),
            phase: self.carousel.phase(),
            events: self.carousel.host_mut().take_events(),
            items: self.carousel.transforms(),
        }
    }

    /// Perform one step and settle. Returns the ticks delivered.
    ///
    /// # Errors
    ///
    /// [`SimError::Carousel`] when the engine rejects the step.
    pub fn apply(&mut self, step: &Step) -> Result<usize, SimError> {
        debug!(action = step.name(), "Applying step");
        let mut frames = 0;
        match step {
            Step::Swipe { direction } => {
                self.carousel.handle_gesture(GestureInput::Swipe(*direction))?;
            }
            Step::Tap { index } => {
                self.carousel.handle_gesture(GestureInput::Tap(*index))?;
            }
            Step::Drag { deltas, velocity } => {
                self.carousel.handle_gesture(GestureInput::DragBegan)?;
                for delta in deltas {
                    self.clock.advance(self.frame_interval);
                    self.carousel.handle_gesture(GestureInput::DragChanged {
                        translation_delta: *delta,
                        velocity: *velocity,
                    })?;
                    self.carousel.tick();
                    frames += 1;
                }
                self.carousel.handle_gesture(GestureInput::DragEnded)?;
            }
            Step::ScrollTo { index, animated } => {
                self.carousel.scroll_to_item(*index, *animated)?;
            }
            Step::ScrollBy { offset, duration } => {
                self.carousel.scroll_by_offset(*offset, *duration);
            }
            Step::Insert { index, animated } => {
                self.carousel.insert_item(*index, *animated)?;
                self.carousel.host_mut().note_inserted();
            }
            Step::Remove { index, animated } => {
                let before = self.carousel.item_count();
                self.carousel.remove_item(*index, *animated)?;
                if self.carousel.item_count() < before {
                    self.carousel.host_mut().note_removed();
                }
            }
            Step::Reload { items } => {
                if let Some(items) = items {
                    self.carousel.host_mut().set_item_count(*items);
                }
                self.carousel.reload();
            }
            Step::Viewport { width } => {
                self.carousel.set_viewport_width(*width);
            }
            Step::Wait { seconds } => {
                frames += self.carousel.advance_for(*seconds, self.frame_interval);
            }
        }

        let settled = self
            .carousel
            .run_until_idle(self.frame_interval, MAX_SETTLE_FRAMES);
        if self.clock.is_running() {
            warn!(action = step.name(), "Carousel still animating after frame limit");
        }
        Ok(frames + settled)
    }

    /// Run every step of `script`, collecting a report per step.
    ///
    /// # Errors
    ///
    /// Stops at the first step the engine rejects.
    pub fn run(&mut self, script: &Script) -> Result<Vec<StepReport>, SimError> {
        let mut reports = vec![self.report(0, "load", 0)];
        for (number, step) in script.steps.iter().enumerate() {
            let frames = self.apply(step)?;
            reports.push(self.report(number + 1, step.name(), frames));
        }
        Ok(reports)
    }
}
