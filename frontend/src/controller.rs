//! Scroll-reactive UI controller.
//!
//! Every tick turns one [`ScrollSnapshot`] plus the current [`Layout`] into a
//! fresh [`UiState`]. Nothing is carried over between ticks; the display
//! layer is responsible for diffing against what it already applied.

use std::cell::Cell;

use crate::config::Thresholds;
use crate::error::UiError;

/// Smallest scrollable range used as a divisor for the progress bar.
const MIN_SCROLL_RANGE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top_offset: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top_offset: f64, height: f64) -> Self {
        Self { id: id.into(), top_offset, height }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top_offset && position < self.top_offset + self.height
    }
}

/// Page geometry read in one pass, replaced wholesale on resize.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub sections: Vec<Section>,
    pub header_height: f64,
    /// Number of decorative shapes driven by the parallax layer.
    pub shape_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTransform {
    pub translate_y: f64,
    pub rotate_deg: f64,
}

impl ShapeTransform {
    pub fn css(&self) -> String {
        format!("translate3d(0, {}px, 0) rotate({}deg)", self.translate_y, self.rotate_deg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub progress_percent: f64,
    pub header_scrolled: bool,
    pub fab_visible: bool,
    pub active_section_id: Option<String>,
    pub shapes: Vec<ShapeTransform>,
}

pub fn progress_percent(snapshot: &ScrollSnapshot) -> f64 {
    let range = (snapshot.document_height - snapshot.viewport_height).max(MIN_SCROLL_RANGE);
    let percent = snapshot.scroll_y / range * 100.0;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Picks the section for an effective scroll position.
///
/// The first section in document order whose interval contains `position`
/// wins. When none contains it, the last section that starts at or above
/// `position` is kept, so scrolling past the end or into a gap leaves the
/// previous link lit. Above the first section nothing is active.
pub fn active_section(sections: &[Section], position: f64) -> Option<&Section> {
    if let Some(hit) = sections.iter().find(|s| s.contains(position)) {
        return Some(hit);
    }
    sections.iter().filter(|s| s.top_offset <= position).last()
}

/// Ids of sections that can never be active: an earlier section's interval
/// covers them completely, and the scan stops at the earlier one.
pub fn shadowed_sections(sections: &[Section]) -> Vec<&str> {
    sections
        .iter()
        .enumerate()
        .filter(|(j, later)| {
            sections[..*j].iter().any(|earlier| {
                earlier.top_offset <= later.top_offset
                    && later.top_offset + later.height <= earlier.top_offset + earlier.height
            })
        })
        .map(|(_, s)| s.id.as_str())
        .collect()
}

fn warn_shadowed(layout: &Layout) {
    let shadowed = shadowed_sections(&layout.sections);
    if !shadowed.is_empty() {
        log::warn!("sections {:?} sit inside earlier sections and will never be active", shadowed);
    }
}

pub fn parallax(scroll_y: f64, count: usize, thresholds: &Thresholds) -> Vec<ShapeTransform> {
    (0..count)
        .map(|i| {
            let speed = thresholds.parallax_base_speed + i as f64 * thresholds.parallax_speed_step;
            ShapeTransform {
                translate_y: -(scroll_y * speed),
                rotate_deg: scroll_y * thresholds.parallax_rotation_rate,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ScrollController {
    layout: Layout,
    thresholds: Thresholds,
}

impl ScrollController {
    pub fn initialize(layout: Layout, thresholds: Thresholds) -> Result<Self, UiError> {
        if thresholds.track_active_section && layout.sections.is_empty() {
            return Err(UiError::NoSections);
        }
        if layout.sections.is_empty() {
            log::debug!("no sections on this page, active link tracking stays off");
        }
        warn_shadowed(&layout);
        Ok(Self { layout, thresholds })
    }

    pub fn relayout(&mut self, layout: Layout) {
        log::debug!("relayout: {} sections, header {}px", layout.sections.len(), layout.header_height);
        warn_shadowed(&layout);
        self.layout = layout;
    }

    /// All fields come from the same snapshot.
    pub fn on_scroll(&self, snapshot: &ScrollSnapshot) -> UiState {
        let scroll_y = snapshot.scroll_y;
        let position = scroll_y + self.layout.header_height + self.thresholds.activation_margin;
        UiState {
            progress_percent: progress_percent(snapshot),
            header_scrolled: scroll_y > self.thresholds.header_threshold,
            fab_visible: scroll_y > snapshot.viewport_height,
            active_section_id: active_section(&self.layout.sections, position).map(|s| s.id.clone()),
            shapes: parallax(scroll_y, self.layout.shape_count, &self.thresholds),
        }
    }
}

/// Pending flag plus latest-snapshot slot. However many snapshots are offered
/// before the frame runs, the frame sees exactly one: the last.
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    pending: Cell<bool>,
    latest: Cell<Option<ScrollSnapshot>>,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot`. Returns true when the caller must request a frame.
    pub fn offer(&self, snapshot: ScrollSnapshot) -> bool {
        self.latest.set(Some(snapshot));
        !self.pending.replace(true)
    }

    /// Called from the frame callback; clears the pending flag.
    pub fn take(&self) -> Option<ScrollSnapshot> {
        self.pending.set(false);
        self.latest.take()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
