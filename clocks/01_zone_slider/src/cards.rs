//! Card module - stacked card geometry and drag hit testing
//!
//! Cards are laid out top to bottom in display order. A drag is resolved to
//! a destination slot, which is the position the card occupies once dropped.

use nannou::prelude::*;

/// Card dimensions
pub const CARD_HEIGHT: f32 = 96.0;
pub const CARD_GAP: f32 = 14.0;
const MAX_CARD_WIDTH: f32 = 620.0;

/// Distance between the centers of neighbouring cards
const CARD_PITCH: f32 = CARD_HEIGHT + CARD_GAP;

/// An in-progress card drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Index of the dragged card before the drag began
    pub from: usize,
    /// Vertical distance from the card center to the grab point
    pub grab_dy: f32,
    /// Latest pointer position
    pub pointer: Point2,
}

impl DragState {
    /// Center of the floating card under the pointer
    pub fn card_center_y(&self) -> f32 {
        self.pointer.y - self.grab_dy
    }
}

/// Canvas area to the right of the zone panel and below the header
#[derive(Debug, Clone)]
pub struct CardLayout {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub center_x: f32,
    pub card_width: f32,
}

impl CardLayout {
    /// Calculate layout from window dimensions
    pub fn calculate(window_rect: Rect, left_panel_width: f32, header_height: f32) -> Self {
        let margin = 20.0;
        let left = window_rect.left() + left_panel_width + margin;
        let right = window_rect.right() - margin;
        let top = window_rect.top() - header_height - margin;
        let bottom = window_rect.bottom() + margin;
        let card_width = (right - left).clamp(0.0, MAX_CARD_WIDTH);

        Self {
            left,
            right,
            top,
            bottom,
            center_x: (left + right) / 2.0,
            card_width,
        }
    }

    pub fn contains(&self, pos: Point2) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.bottom && pos.y <= self.top
    }

    /// Y coordinate of the card center at a display slot
    pub fn slot_center_y(&self, slot: usize) -> f32 {
        self.top - CARD_HEIGHT / 2.0 - slot as f32 * CARD_PITCH
    }

    pub fn card_rect(&self, slot: usize) -> Rect {
        Rect::from_x_y_w_h(
            self.center_x,
            self.slot_center_y(slot),
            self.card_width,
            CARD_HEIGHT,
        )
    }

    /// Index of the card under the pointer, if any
    pub fn card_at(&self, pos: Point2, count: usize) -> Option<usize> {
        (0..count).find(|&i| self.card_rect(i).contains(pos))
    }

    /// Destination slot for a drop at `pos`
    ///
    /// Drops outside the canvas cancel the drag. Drops inside are clamped to
    /// the first or last slot.
    pub fn drop_index(&self, pos: Point2, count: usize) -> Option<usize> {
        if count == 0 || !self.contains(pos) {
            return None;
        }
        let slot = ((self.top + CARD_GAP / 2.0 - pos.y) / CARD_PITCH).floor();
        Some((slot.max(0.0) as usize).min(count - 1))
    }
}
