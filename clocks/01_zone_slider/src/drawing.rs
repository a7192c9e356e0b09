//! Drawing module - zone cards, drag feedback and theme palettes
//!
//! Renders the card stack on the nannou canvas. Each card carries a gradient
//! picked by its display slot, a caption with the zone's time, and a 24-tick
//! hour bar.

use nannou::prelude::*;
use shared::{DisplayedTime, TimeModel, TimeZoneEntry, ZoneList};

use crate::cards::{CardLayout, DragState, CARD_HEIGHT};

const GRADIENT_STRIPES: usize = 32;

const fn rgb(red: u8, green: u8, blue: u8) -> Srgb<u8> {
    Srgb {
        red,
        green,
        blue,
        standard: std::marker::PhantomData,
    }
}

/// Card gradients, cycled by display slot
pub const GRADIENTS: [(Srgb<u8>, Srgb<u8>); 4] = [
    (rgb(127, 255, 212), rgb(250, 235, 215)),
    (rgb(100, 149, 237), rgb(248, 248, 255)),
    (rgb(255, 182, 193), rgb(144, 238, 144)),
    (rgb(255, 99, 71), rgb(255, 228, 225)),
];

/// Colors that change with the light/dark theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Srgb<u8>,
    pub title: Srgb<u8>,
    pub placeholder: Srgb<u8>,
    pub shadow_alpha: u8,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: rgb(244, 245, 248),
        title: rgb(40, 44, 52),
        placeholder: rgb(150, 156, 168),
        shadow_alpha: 40,
    };

    pub const DARK: Palette = Palette {
        background: rgb(18, 22, 28),
        title: rgb(220, 225, 235),
        placeholder: rgb(90, 98, 115),
        shadow_alpha: 110,
    };

    pub fn for_theme(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

/// Card text sits on a light gradient in both themes
const CARD_TEXT: Srgb<u8> = rgb(30, 34, 42);
const CARD_TEXT_MUTED: Srgb<u8> = rgb(70, 76, 90);
const HOUR_TICK: Srgb<u8> = rgb(60, 66, 80);
const HOUR_TICK_ACTIVE: Srgb<u8> = rgb(20, 24, 32);

fn lerp_color(from: Srgb<u8>, to: Srgb<u8>, t: f32) -> Srgb<u8> {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    rgb(
        mix(from.red, to.red),
        mix(from.green, to.green),
        mix(from.blue, to.blue),
    )
}

/// Gradient endpoints for a display slot
pub fn gradient_for_slot(slot: usize) -> (Srgb<u8>, Srgb<u8>) {
    GRADIENTS[slot % GRADIENTS.len()]
}

/// Draw every zone card, with drag feedback if a drag is in progress
pub fn draw_zone_cards(
    draw: &Draw,
    layout: &CardLayout,
    zones: &ZoneList,
    time_model: &TimeModel,
    drag: Option<&DragState>,
    hovered: Option<usize>,
    palette: &Palette,
) {
    let Some(drag) = drag else {
        for (slot, entry) in zones.iter().enumerate() {
            let center_y = layout.slot_center_y(slot);
            draw_zone_card(
                draw,
                layout,
                center_y,
                slot,
                entry,
                time_model,
                hovered == Some(slot),
                palette,
            );
        }
        return;
    };

    // Lay the other cards out as they would be after the drop
    let target = layout.drop_index(drag.pointer, zones.len());
    let preview = zones.reorder(drag.from, target);
    let dragged_slot = target.unwrap_or(drag.from);

    for (slot, entry) in preview.iter().enumerate() {
        if slot == dragged_slot {
            draw_outline(draw, layout.card_rect(slot), palette.placeholder, 1.5);
            continue;
        }
        draw_zone_card(
            draw,
            layout,
            layout.slot_center_y(slot),
            slot,
            entry,
            time_model,
            false,
            palette,
        );
    }

    if let Some(entry) = preview.get(dragged_slot) {
        draw_zone_card(
            draw,
            layout,
            drag.card_center_y(),
            dragged_slot,
            entry,
            time_model,
            true,
            palette,
        );
    }
}

/// Draw a single zone card centered at `center_y`
fn draw_zone_card(
    draw: &Draw,
    layout: &CardLayout,
    center_y: f32,
    slot: usize,
    entry: &TimeZoneEntry,
    time_model: &TimeModel,
    lifted: bool,
    palette: &Palette,
) {
    let card_w = layout.card_width;
    let card_h = CARD_HEIGHT;
    let center_x = layout.center_x;
    let left = center_x - card_w / 2.0;

    // Shadow
    let shadow_offset = if lifted { 8.0 } else { 3.0 };
    draw.rect()
        .x_y(center_x + shadow_offset, center_y - shadow_offset)
        .w_h(card_w, card_h)
        .color(srgba(0, 0, 0, palette.shadow_alpha));

    // Gradient background as vertical stripes
    let (from, to) = gradient_for_slot(slot);
    let stripe_w = card_w / GRADIENT_STRIPES as f32;
    for i in 0..GRADIENT_STRIPES {
        let t = i as f32 / (GRADIENT_STRIPES - 1) as f32;
        draw.rect()
            .x_y(left + stripe_w * (i as f32 + 0.5), center_y)
            .w_h(stripe_w + 0.5, card_h)
            .color(lerp_color(from, to, t));
    }

    if lifted {
        draw_outline(
            draw,
            Rect::from_x_y_w_h(center_x, center_y, card_w, card_h),
            HOUR_TICK_ACTIVE,
            2.0,
        );
    }

    let displayed = time_model.displayed_time(entry.offset_hours);

    // Caption: "IST - 05:30 PM on 01/01/2024"
    let caption = format!(
        "{} - {} on {}",
        entry.name,
        displayed.format_time(),
        DisplayedTime::format_date(time_model.selected_date())
    );
    draw.text(&caption)
        .x_y(center_x, center_y + card_h * 0.22)
        .w(card_w - 32.0)
        .color(CARD_TEXT)
        .font_size(18)
        .left_justify();

    draw.text(&entry.format_utc_offset())
        .x_y(center_x, center_y + card_h * 0.22)
        .w(card_w - 32.0)
        .color(CARD_TEXT_MUTED)
        .font_size(12)
        .right_justify();

    draw_hour_bar(draw, left + 16.0, card_w - 32.0, center_y - card_h * 0.22, &displayed);
}

/// Draw 24 hour ticks with the current hour emphasized
fn draw_hour_bar(draw: &Draw, left: f32, width: f32, y: f32, displayed: &DisplayedTime) {
    let step = width / 23.0;

    draw.line()
        .start(pt2(left, y))
        .end(pt2(left + width, y))
        .color(HOUR_TICK)
        .stroke_weight(1.0);

    for hour in 0..24u32 {
        let x = left + hour as f32 * step;
        let is_current = hour == displayed.hour24;
        let tick_h = if hour % 6 == 0 { 10.0 } else { 6.0 };

        draw.line()
            .start(pt2(x, y - tick_h / 2.0))
            .end(pt2(x, y + tick_h / 2.0))
            .color(HOUR_TICK)
            .stroke_weight(1.0);

        if is_current {
            draw.ellipse()
                .x_y(x, y)
                .radius(5.0)
                .color(HOUR_TICK_ACTIVE);
        }

        if hour % 6 == 0 {
            draw.text(&hour.to_string())
                .x_y(x, y - 14.0)
                .color(CARD_TEXT_MUTED)
                .font_size(10);
        }
    }
}

/// Draw a rectangle outline as four lines
fn draw_outline(draw: &Draw, rect: Rect, color: Srgb<u8>, weight: f32) {
    let corners = [
        pt2(rect.left(), rect.bottom()),
        pt2(rect.right(), rect.bottom()),
        pt2(rect.right(), rect.top()),
        pt2(rect.left(), rect.top()),
    ];

    for i in 0..4 {
        let next = (i + 1) % 4;
        draw.line()
            .start(corners[i])
            .end(corners[next])
            .color(color)
            .stroke_weight(weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_cycles() {
        assert_eq!(gradient_for_slot(0), gradient_for_slot(4));
        assert_eq!(gradient_for_slot(1), GRADIENTS[1]);
    }

    #[test]
    fn test_lerp_color_endpoints() {
        let (from, to) = GRADIENTS[0];
        assert_eq!(lerp_color(from, to, 0.0), from);
        assert_eq!(lerp_color(from, to, 1.0), to);
    }
}
