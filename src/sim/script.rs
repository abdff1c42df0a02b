//! Simulation scripts.
//!
//! A script is a TOML file with a few top-level settings and an ordered list
//! of `[[step]]` tables, each tagged by `action`:
//!
//! ```toml
//! items = 5
//! starting_index = 0
//!
//! [[step]]
//! action = "swipe"
//! direction = "left"
//!
//! [[step]]
//! action = "drag"
//! deltas = [-20.0, -20.0, -20.0]
//! velocity = -400.0
//! ```

use super::SimError;
use crate::model::SwipeDirection;
use serde::Deserialize;
use std::path::Path;

fn default_items() -> usize {
    5
}

fn default_true() -> bool {
    true
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Items loaded before the first step.
    #[serde(default = "default_items")]
    pub items: usize,
    /// Item that is current after loading.
    #[serde(default)]
    pub starting_index: usize,
    /// Items whose selection the host vetoes.
    #[serde(default)]
    pub unselectable: Vec<usize>,
    /// Steps, in order.
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One scripted action.
///
/// After every step the simulator ticks until the engine stops requesting
/// frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// A recognized swipe.
    Swipe {
        /// Swipe direction.
        direction: SwipeDirection,
    },
    /// A tap on an item, or on empty space when `index` is absent.
    Tap {
        /// Tapped item.
        #[serde(default)]
        index: Option<usize>,
    },
    /// A pan: one `DragChanged` per delta, one frame apart, then release.
    Drag {
        /// Translation deltas in points.
        deltas: Vec<f64>,
        /// Velocity reported with every delta, in points per second.
        #[serde(default)]
        velocity: f64,
    },
    /// `scroll_to_item`.
    ScrollTo {
        /// Target item.
        index: usize,
        /// Animate instead of jumping.
        #[serde(default = "default_true")]
        animated: bool,
    },
    /// `scroll_by_offset`.
    ScrollBy {
        /// Distance in items.
        offset: f64,
        /// Animation length; 0 jumps.
        #[serde(default)]
        duration: f64,
    },
    /// `insert_item`.
    Insert {
        /// Insertion point.
        index: usize,
        /// Forwarded to the host.
        #[serde(default)]
        animated: bool,
    },
    /// `remove_item`.
    Remove {
        /// Removed item.
        index: usize,
        /// Forwarded to the host.
        #[serde(default)]
        animated: bool,
    },
    /// Reload, optionally with a new item count.
    Reload {
        /// New item count.
        #[serde(default)]
        items: Option<usize>,
    },
    /// Resize the viewport.
    Viewport {
        /// New width in points.
        width: f64,
    },
    /// Let the clock run.
    Wait {
        /// Seconds to advance.
        seconds: f64,
    },
}

impl Step {
    /// The step's `action` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Swipe { .. } => "swipe",
            Step::Tap { .. } => "tap",
            Step::Drag { .. } => "drag",
            Step::ScrollTo { .. } => "scroll_to",
            Step::ScrollBy { .. } => "scroll_by",
            Step::Insert { .. } => "insert",
            Step::Remove { .. } => "remove",
            Step::Reload { .. } => "reload",
            Step::Viewport { .. } => "viewport",
            Step::Wait { .. } => "wait",
        }
    }
}

impl Script {
    /// Parse script text. `origin` only labels errors.
    ///
    /// # Errors
    ///
    /// [`SimError::ScriptParse`] on invalid TOML or unknown fields.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, SimError> {
        toml::from_str(contents).map_err(|e| SimError::ScriptParse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// [`SimError::ScriptRead`] if the file cannot be read, otherwise as
    /// [`parse`](Self::parse).
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SimError::ScriptRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&contents, path)
    }

    /// Built-in tour used when no script is given.
    pub fn demo() -> Self {
        Self {
            items: 5,
            starting_index: 0,
            unselectable: Vec::new(),
            steps: vec![
                Step::Swipe {
                    direction: SwipeDirection::Left,
                },
                Step::Swipe {
                    direction: SwipeDirection::Left,
                },
                Step::Tap { index: Some(4) },
                Step::Drag {
                    deltas: vec![-25.0, -25.0, -25.0],
                    velocity: -1200.0,
                },
                Step::Insert {
                    index: 0,
                    animated: true,
                },
                Step::Swipe {
                    direction: SwipeDirection::Right,
                },
            ],
        }
    }
}
