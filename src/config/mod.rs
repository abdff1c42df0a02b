//! Configuration module.
//!
//! [`CarouselConfig`] is the base option set. Hosts refine it per layout pass
//! through [`Delegate::option_value`](crate::engine::host::Delegate::option_value),
//! which is asked once per [`OptionKey`] with the base value as the default.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, config_path_candidate, default_config_path,
    default_log_path, load_config_file, load_config_with_precedence, merge_config, parse_config,
    ConfigError, ConfigFile, ConfigSource, ResolvedConfig,
};

use crate::engine::constants::MAX_VISIBLE_ITEMS;
use serde::Deserialize;

/// Base carousel options.
///
/// Every field has a default, so a partial TOML table is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Treat the item sequence as circular.
    pub wrap: bool,
    /// Allow rubber-band overshoot at the ends of a non-wrapping carousel.
    pub bounce: bool,
    /// Restrict a released drag to at most a one-item move.
    pub paging: bool,
    /// Master switch for user-driven scrolling (drag and swipe).
    pub scroll_enabled: bool,
    /// Accept drag gestures.
    pub pan_enabled: bool,
    /// Accept tap gestures.
    pub tap_enabled: bool,
    /// Accept swipe gestures.
    pub swipe_enabled: bool,
    /// Passed through to the host; the engine does no backface culling itself.
    pub show_backfaces: bool,
    /// Width of one item along the scroll axis, in points.
    pub item_width: f64,
    /// Width of the host viewport, in points.
    pub viewport_width: f64,
    /// Spacing multiplier used when sizing the visible window.
    pub spacing: f64,
    /// Fixed visible-item count; computed from the viewport when `None`.
    pub visible_items: Option<u32>,
    /// Upper bound for the computed visible-item count.
    pub max_visible_items: u32,
    /// Drag translation multiplier.
    pub offset_multiplier: f64,
    /// Fraction of velocity retained per unit time, in `[0, 1)`.
    pub deceleration_rate: f64,
    /// Offsets below this start fading.
    pub fade_min: f64,
    /// Offsets above this start fading.
    pub fade_max: f64,
    /// Distance over which alpha falls to `fade_min_alpha`.
    pub fade_range: f64,
    /// Alpha floor for fully faded items.
    pub fade_min_alpha: f64,
    /// How quickly scale falls off with offset.
    pub scale_multiplier: f64,
    /// Scale floor.
    pub min_scale: f64,
    /// Scale of the current item.
    pub max_scale: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            wrap: true,
            bounce: true,
            paging: false,
            scroll_enabled: true,
            pan_enabled: true,
            tap_enabled: true,
            swipe_enabled: true,
            show_backfaces: true,
            item_width: 100.0,
            viewport_width: 320.0,
            spacing: 1.0,
            visible_items: None,
            max_visible_items: MAX_VISIBLE_ITEMS,
            offset_multiplier: 1.0,
            deceleration_rate: 0.95,
            fade_min: f64::NEG_INFINITY,
            fade_max: f64::INFINITY,
            fade_range: 1.0,
            fade_min_alpha: 0.0,
            scale_multiplier: 1.0,
            min_scale: 1.0,
            max_scale: 1.0,
        }
    }
}

impl CarouselConfig {
    /// Check values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.item_width > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "item_width".to_string(),
                reason: format!("must be positive, got {}", self.item_width),
            });
        }
        if !(self.fade_range > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "fade_range".to_string(),
                reason: format!("must be positive, got {}", self.fade_range),
            });
        }
        if !(0.0..1.0).contains(&self.deceleration_rate) {
            return Err(ConfigError::InvalidValue {
                key: "deceleration_rate".to_string(),
                reason: format!("must be in [0, 1), got {}", self.deceleration_rate),
            });
        }
        if self.viewport_width < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "viewport_width".to_string(),
                reason: format!("must not be negative, got {}", self.viewport_width),
            });
        }
        Ok(())
    }

    /// Current value for a delegate-overridable option.
    ///
    /// `VisibleItems` reports the fixed count, or 0 when the count is computed.
    pub fn get(&self, key: OptionKey) -> OptionValue {
        match key {
            OptionKey::Wrap => OptionValue::Bool(self.wrap),
            OptionKey::ShowBackfaces => OptionValue::Bool(self.show_backfaces),
            OptionKey::VisibleItems => OptionValue::Int(self.visible_items.unwrap_or(0)),
            OptionKey::Spacing => OptionValue::Float(self.spacing),
            OptionKey::FadeMin => OptionValue::Float(self.fade_min),
            OptionKey::FadeMax => OptionValue::Float(self.fade_max),
            OptionKey::FadeRange => OptionValue::Float(self.fade_range),
            OptionKey::FadeMinAlpha => OptionValue::Float(self.fade_min_alpha),
            OptionKey::OffsetMultiplier => OptionValue::Float(self.offset_multiplier),
            OptionKey::ItemWidth => OptionValue::Float(self.item_width),
            OptionKey::ScaleMultiplier => OptionValue::Float(self.scale_multiplier),
            OptionKey::MinScale => OptionValue::Float(self.min_scale),
            OptionKey::MaxScale => OptionValue::Float(self.max_scale),
        }
    }

    /// Store a delegate-supplied value.
    ///
    /// Returns `false` (leaving the config untouched) when the value's type does
    /// not match the key.
    pub fn set(&mut self, key: OptionKey, value: OptionValue) -> bool {
        match (key, value) {
            (OptionKey::Wrap, OptionValue::Bool(v)) => self.wrap = v,
            (OptionKey::ShowBackfaces, OptionValue::Bool(v)) => self.show_backfaces = v,
            (OptionKey::VisibleItems, OptionValue::Int(v)) => self.visible_items = Some(v),
            (OptionKey::Spacing, OptionValue::Float(v)) => self.spacing = v,
            (OptionKey::FadeMin, OptionValue::Float(v)) => self.fade_min = v,
            (OptionKey::FadeMax, OptionValue::Float(v)) => self.fade_max = v,
            (OptionKey::FadeRange, OptionValue::Float(v)) => self.fade_range = v,
            (OptionKey::FadeMinAlpha, OptionValue::Float(v)) => self.fade_min_alpha = v,
            (OptionKey::OffsetMultiplier, OptionValue::Float(v)) => self.offset_multiplier = v,
            (OptionKey::ItemWidth, OptionValue::Float(v)) => self.item_width = v,
            (OptionKey::ScaleMultiplier, OptionValue::Float(v)) => self.scale_multiplier = v,
            (OptionKey::MinScale, OptionValue::Float(v)) => self.min_scale = v,
            (OptionKey::MaxScale, OptionValue::Float(v)) => self.max_scale = v,
            _ => return false,
        }
        true
    }
}

/// Options a delegate may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// `bool`: circular arithmetic.
    Wrap,
    /// `bool`: forwarded to the host.
    ShowBackfaces,
    /// `int`: number of materialized items.
    VisibleItems,
    /// `float`: window sizing multiplier.
    Spacing,
    /// `float`: lower fade threshold.
    FadeMin,
    /// `float`: upper fade threshold.
    FadeMax,
    /// `float`: fade distance.
    FadeRange,
    /// `float`: minimum alpha.
    FadeMinAlpha,
    /// `float`: drag multiplier.
    OffsetMultiplier,
    /// `float`: item width in points.
    ItemWidth,
    /// `float`: scale falloff.
    ScaleMultiplier,
    /// `float`: scale floor.
    MinScale,
    /// `float`: scale ceiling.
    MaxScale,
}

impl OptionKey {
    /// Keys resolved in a layout pass, in resolution order.
    ///
    /// `VisibleItems` is absent: its default depends on the resolved width and
    /// spacing, so it is resolved separately afterwards.
    pub const LAYOUT_KEYS: [OptionKey; 12] = [
        OptionKey::Wrap,
        OptionKey::ShowBackfaces,
        OptionKey::ItemWidth,
        OptionKey::Spacing,
        OptionKey::OffsetMultiplier,
        OptionKey::FadeMin,
        OptionKey::FadeMax,
        OptionKey::FadeRange,
        OptionKey::FadeMinAlpha,
        OptionKey::ScaleMultiplier,
        OptionKey::MinScale,
        OptionKey::MaxScale,
    ];
}

/// A typed option value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionValue {
    /// Boolean option.
    Bool(bool),
    /// Integer option.
    Int(u32),
    /// Floating-point option.
    Float(f64),
}
