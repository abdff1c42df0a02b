//! Layout-pass helpers: option resolution, window sizing and per-item
//! visual parameters.
//!
//! All functions are pure over their inputs; the [`Carousel`](super::Carousel)
//! feeds them the resolved config and current scroll state.

use super::host::Delegate;
use crate::config::{CarouselConfig, OptionKey, OptionValue};
use std::collections::BTreeSet;
use tracing::warn;

/// Resolve every layout option through the delegate.
///
/// Each key is asked once with the base value as the default. A value of the
/// wrong type is logged and ignored.
pub fn resolve_config<D: Delegate + ?Sized>(base: &CarouselConfig, delegate: &D) -> CarouselConfig {
    let mut resolved = base.clone();
    for key in OptionKey::LAYOUT_KEYS {
        let value = delegate.option_value(key, base.get(key));
        if !resolved.set(key, value) {
            warn!(?key, ?value, "Delegate returned mismatched option type, keeping default");
        }
    }
    resolved
}

/// Visible-item count implied by the viewport.
///
/// `ceil(viewport / (item_width * spacing)) + 2`, capped at
/// `max_visible_items`.
pub fn computed_visible_count(config: &CarouselConfig) -> usize {
    let cap = config.max_visible_items as usize;
    let per_item = config.item_width * config.spacing;
    if !(per_item > 0.0) || !config.viewport_width.is_finite() {
        return cap;
    }
    let fitted = (config.viewport_width.max(0.0) / per_item).ceil() as usize + 2;
    fitted.min(cap)
}

/// Final visible-item count for this layout pass.
///
/// A fixed `visible_items` in the config replaces the computed default; the
/// delegate gets the last word.
pub fn resolve_visible_count<D: Delegate + ?Sized>(config: &CarouselConfig, delegate: &D) -> usize {
    let computed = computed_visible_count(config);
    let default = config
        .visible_items
        .map_or(computed, |fixed| fixed as usize)
        .min(u32::MAX as usize) as u32;

    match delegate.option_value(OptionKey::VisibleItems, OptionValue::Int(default)) {
        OptionValue::Int(count) => count as usize,
        other => {
            warn!(value = ?other, "Delegate returned non-integer visible item count, keeping default");
            default as usize
        }
    }
}

/// Indices that should be materialized around `current`.
///
/// The window is `visible` indices wide, roughly centred on `current`. When not
/// wrapping it is shifted to stay inside `[0, count)`. Indices rejected by
/// `keep` (fully transparent items) are left out.
pub fn visible_indices<F>(
    current: usize,
    count: usize,
    visible: usize,
    wrap: bool,
    mut keep: F,
) -> BTreeSet<usize>
where
    F: FnMut(usize) -> bool,
{
    let mut indices = BTreeSet::new();
    if count == 0 || visible == 0 {
        return indices;
    }

    let count_i = count as i64;
    let visible_i = visible as i64;
    let mut start = current as i64 - visible_i / 2;
    if !wrap {
        start = start.min(count_i - visible_i).max(0);
    }

    for raw in start..start + visible_i {
        let index = if wrap { raw.rem_euclid(count_i) } else { raw };
        if !(0..count_i).contains(&index) {
            continue;
        }
        let index = index as usize;
        if keep(index) {
            indices.insert(index);
        }
    }
    indices
}

/// Opacity for an item at `offset` from the scroll position.
///
/// 1 inside `[fade_min, fade_max]`, falling linearly to `fade_min_alpha` over
/// `fade_range` beyond either edge.
pub fn alpha_for_offset(offset: f64, config: &CarouselConfig) -> f64 {
    let factor = if offset > config.fade_max {
        offset - config.fade_max
    } else if offset < config.fade_min {
        config.fade_min - offset
    } else {
        0.0
    };
    1.0 - factor.min(config.fade_range) / config.fade_range * (1.0 - config.fade_min_alpha)
}

/// Scale for an item at `offset` from the scroll position.
pub fn scale_for_offset(offset: f64, config: &CarouselConfig) -> f64 {
    config
        .min_scale
        .max(config.max_scale - (offset * config.scale_multiplier).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Overrides;
    impl Delegate for Overrides {
        fn option_value(&self, key: OptionKey, default: OptionValue) -> OptionValue {
            match key {
                OptionKey::Wrap => OptionValue::Bool(false),
                OptionKey::Spacing => OptionValue::Float(1.5),
                // Wrong type, must be ignored
                OptionKey::ItemWidth => OptionValue::Bool(true),
                OptionKey::VisibleItems => OptionValue::Int(9),
                _ => default,
            }
        }
    }

    struct Defaults;
    impl Delegate for Defaults {}

    #[test]
    fn resolve_config_applies_typed_overrides_only() {
        let base = CarouselConfig::default();
        let resolved = resolve_config(&base, &Overrides);
        assert!(!resolved.wrap);
        assert_eq!(resolved.spacing, 1.5);
        assert_eq!(resolved.item_width, base.item_width);
    }

    #[test]
    fn computed_visible_count_fits_viewport_plus_two() {
        let config = CarouselConfig {
            viewport_width: 320.0,
            item_width: 100.0,
            ..CarouselConfig::default()
        };
        // ceil(3.2) + 2
        assert_eq!(computed_visible_count(&config), 6);
    }

    #[test]
    fn computed_visible_count_is_capped() {
        let config = CarouselConfig {
            viewport_width: 100_000.0,
            item_width: 10.0,
            ..CarouselConfig::default()
        };
        assert_eq!(computed_visible_count(&config), 50);
    }

    #[test]
    fn fixed_visible_items_replace_computed_default() {
        let config = CarouselConfig {
            visible_items: Some(3),
            ..CarouselConfig::default()
        };
        assert_eq!(resolve_visible_count(&config, &Defaults), 3);
        assert_eq!(resolve_visible_count(&config, &Overrides), 9);
    }

    #[test]
    fn window_wraps_around_the_ends() {
        let indices = visible_indices(0, 10, 5, true, |_| true);
        assert_eq!(indices.into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 8, 9]);
    }

    #[test]
    fn window_is_shifted_inside_bounds_without_wrap() {
        let at_start = visible_indices(0, 10, 5, false, |_| true);
        assert_eq!(at_start.into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);

        let at_end = visible_indices(9, 10, 5, false, |_| true);
        assert_eq!(at_end.into_iter().collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn window_never_exceeds_item_count() {
        let indices = visible_indices(1, 3, 8, false, |_| true);
        assert_eq!(indices.len(), 3);
        let wrapped = visible_indices(1, 3, 8, true, |_| true);
        assert_eq!(wrapped.len(), 3);
    }

    #[test]
    fn window_skips_rejected_indices() {
        let indices = visible_indices(2, 10, 5, false, |i| i != 3);
        assert!(!indices.contains(&3));
        assert_eq!(indices.len(), 4);
    }

    #[test]
    fn alpha_fades_linearly_outside_range() {
        let config = CarouselConfig {
            fade_min: -1.0,
            fade_max: 1.0,
            fade_range: 2.0,
            fade_min_alpha: 0.2,
            ..CarouselConfig::default()
        };
        assert_eq!(alpha_for_offset(0.5, &config), 1.0);
        assert!((alpha_for_offset(2.0, &config) - 0.6).abs() < 1e-12);
        assert!((alpha_for_offset(-10.0, &config) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn default_config_never_fades() {
        let config = CarouselConfig::default();
        assert_eq!(alpha_for_offset(1e9, &config), 1.0);
        assert_eq!(alpha_for_offset(-1e9, &config), 1.0);
    }

    #[test]
    fn scale_falls_off_to_floor() {
        let config = CarouselConfig {
            min_scale: 0.5,
            max_scale: 1.0,
            scale_multiplier: 0.25,
            ..CarouselConfig::default()
        };
        assert_eq!(scale_for_offset(0.0, &config), 1.0);
        assert!((scale_for_offset(-1.0, &config) - 0.75).abs() < 1e-12);
        assert_eq!(scale_for_offset(10.0, &config), 0.5);
    }
}
