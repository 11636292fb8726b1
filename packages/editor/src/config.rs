//! Editor tuning knobs. Defaults match the shipped menu designer.

use menukit_dom::OutlineConfig;

#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Distance from a viewport edge at which sort-mode drags autoscroll.
    pub autoscroll_margin: f64,
    /// Scroll increment applied per pointer-move inside the margin.
    pub autoscroll_step: f64,

    /// Image resize ratios and lower width bound.
    pub grow_factor: f64,
    pub shrink_factor: f64,
    pub min_image_width: f64,

    /// Vertical gap between a toolbar and its anchor.
    pub toolbar_offset: f64,
    /// Minimum distance toolbars keep from the viewport edges.
    pub toolbar_clamp_margin: f64,
    /// Half-width used to center the image toolbar on its anchor.
    pub image_toolbar_half_width: f64,

    /// Pointer-to-ghost offset in sort mode.
    pub ghost_offset: f64,

    /// Placement of a freshly inserted image (left edge, offset below the
    /// current scroll position).
    pub insert_image_left: f64,
    pub insert_image_top_offset: f64,

    /// Transient highlight duration after select/insert.
    pub highlight_ms: u64,
    /// Debounce before reporting content height after a mutation.
    pub height_debounce_ms: u64,

    pub outline: OutlineConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autoscroll_margin: 60.0,
            autoscroll_step: 10.0,
            grow_factor: 1.2,
            shrink_factor: 0.8,
            min_image_width: 30.0,
            toolbar_offset: 40.0,
            toolbar_clamp_margin: 5.0,
            image_toolbar_half_width: 130.0,
            ghost_offset: 5.0,
            insert_image_left: 50.0,
            insert_image_top_offset: 100.0,
            highlight_ms: 2000,
            height_debounce_ms: 50,
            outline: OutlineConfig::default(),
        }
    }
}
