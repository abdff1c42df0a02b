//! Per-item render parameters handed to the host.

use serde::Serialize;

/// How the host should place one visible item.
///
/// The engine never touches rendered slots; after each update it exposes one of
/// these per visible index and leaves positioning, opacity and depth ordering to
/// the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemTransform {
    /// Item index.
    pub index: usize,
    /// Signed distance from the scroll position, in item widths.
    ///
    /// Folded into `[-count/2, count/2]` when wrapping.
    pub offset: f64,
    /// Horizontal translation in points (`offset * item_width * spacing`).
    pub translation: f64,
    /// Opacity in `[fade_min_alpha, 1]`.
    pub alpha: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Whether this is the current item (the only one that accepts interaction).
    pub is_current: bool,
}
