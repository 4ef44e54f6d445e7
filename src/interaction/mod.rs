use serde::{Deserialize, Serialize};

/// Tooltip displacement from its anchor, `(top, left)` in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipOffset {
    pub top: f64,
    pub left: f64,
}

impl TooltipOffset {
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Headless tooltip subsystem: what a host overlay should currently show.
///
/// The widget supplies the HTML; the host positions it at
/// `anchor + offset`, above the anchor point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    visible: bool,
    html: String,
    anchor: (f64, f64),
    offset: TooltipOffset,
}

impl TooltipState {
    pub fn show(&mut self, html: impl Into<String>, anchor: (f64, f64), offset: TooltipOffset) {
        self.visible = true;
        self.html = html.into();
        self.anchor = anchor;
        self.offset = offset;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.html.clear();
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn anchor(&self) -> (f64, f64) {
        self.anchor
    }

    #[must_use]
    pub fn offset(&self) -> TooltipOffset {
        self.offset
    }

    /// Final position: anchor shifted by the offset.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (
            self.anchor.0 + self.offset.left,
            self.anchor.1 + self.offset.top,
        )
    }
}

/// Pointer position and the element currently under it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState<K> {
    cursor: Option<(f64, f64)>,
    hovered: Option<K>,
}

impl<K> Default for PointerState<K> {
    fn default() -> Self {
        Self {
            cursor: None,
            hovered: None,
        }
    }
}

impl<K: Clone + PartialEq> PointerState<K> {
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&K> {
        self.hovered.as_ref()
    }

    /// Records a move; returns `true` when the hovered element changed.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, hit: Option<K>) -> bool {
        self.cursor = Some((x, y));
        let changed = self.hovered != hit;
        self.hovered = hit;
        changed
    }

    /// Clears the cursor; returns `true` when something was hovered.
    pub fn on_pointer_leave(&mut self) -> bool {
        self.cursor = None;
        self.hovered.take().is_some()
    }
}

/// Wraps tooltip text in the arrow/content markup hosts style against.
#[must_use]
pub fn tooltip_markup(label: &str) -> String {
    format!(
        r#"<div class="arrow"></div><div class="content">{}</div>"#,
        crate::render::escape_xml(label)
    )
}
