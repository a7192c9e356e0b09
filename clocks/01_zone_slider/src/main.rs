//! Zone Slider Clock
//!
//! A stack of fixed-offset time zone cards driven by one reference instant.
//! Dragging any zone's hour slider moves every zone; cards can be dragged
//! into a new order, removed, or swapped end for end.

mod cards;
mod drawing;
mod ui;

use log::{info, warn};
use nannou::prelude::*;
use nannou_egui::{self, egui, Egui};
use serde::{Deserialize, Serialize};
use shared::{default_zones, TimeModel, TimeZoneEntry, ZoneList};

use crate::cards::{CardLayout, DragState};
use crate::drawing::{draw_zone_cards, Palette};
use crate::ui::{draw_header, draw_zone_panel, HeaderResult, ZonePanelResult};

const CLOCK_NAME: &str = "zone_slider";
const LEFT_PANEL_WIDTH: f32 = 300.0;
const HEADER_HEIGHT: f32 = 90.0;

fn main() {
    env_logger::init();
    nannou::app(model).update(update).run();
}

/// Configuration file contents
///
/// The zone table is read at startup only; the session's order is never
/// written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    dark_mode: bool,
    zones: Vec<TimeZoneEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark_mode: false,
            zones: default_zones(),
        }
    }
}

impl Config {
    /// Starting zone list, falling back to the defaults if the table is invalid
    fn zone_list(&self) -> ZoneList {
        ZoneList::new(self.zones.clone()).unwrap_or_else(|e| {
            warn!("Invalid zone table in config ({}), using defaults", e);
            ZoneList::default()
        })
    }
}

/// Application state
pub struct Model {
    /// Reference instant and selected date
    pub time_model: TimeModel,
    /// Zones in display order
    pub zones: ZoneList,
    /// Dark theme active
    pub dark_mode: bool,
    /// Card drag in progress
    pub drag: Option<DragState>,
    /// Card under the pointer
    pub hovered_card: Option<usize>,
    /// Config as loaded, used when saving the theme preference
    config: Config,
    /// egui integration
    egui: Egui,
}

impl Model {
    /// Move the reference so the zone at `offset_hours` shows `hour`
    pub fn set_hour_for_zone(&mut self, offset_hours: f64, hour: u32) {
        self.time_model = self.time_model.set_hour_for_zone(offset_hours, hour);
    }

    pub fn set_selected_date(&mut self, date: chrono::NaiveDate) {
        self.time_model = self.time_model.set_selected_date(date);
    }

    pub fn reorder(&mut self, from: usize, to: Option<usize>) {
        let zones = self.zones.reorder(from, to);
        if zones != self.zones {
            info!("Moved zone {} -> {:?}", from, to);
            self.zones = zones;
        }
    }

    pub fn remove_zone(&mut self, index: usize) {
        self.zones = self.zones.remove(index);
        self.hovered_card = None;
    }

    pub fn swap_zones(&mut self) {
        self.zones = self.zones.reverse();
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.config.dark_mode = self.dark_mode;
        save_config(&self.config);
    }
}

fn save_config(config: &Config) {
    if let Err(e) = shared::save_config(CLOCK_NAME, config) {
        warn!("Failed to save config: {}", e);
    }
}

fn load_config() -> Config {
    match shared::load_config(CLOCK_NAME) {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            warn!("Failed to load config ({}), using defaults", e);
            Config::default()
        }
    }
}

fn card_layout(app: &App) -> CardLayout {
    CardLayout::calculate(app.window_rect(), LEFT_PANEL_WIDTH, HEADER_HEIGHT)
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Zone Slider")
        .size(1100, 720)
        .min_size(900, 560)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config = load_config();
    let zones = config.zone_list();
    let time_model = TimeModel::now();
    info!(
        "Starting with {} zones at {}",
        zones.len(),
        time_model.reference_instant()
    );

    Model {
        time_model,
        zones,
        dark_mode: config.dark_mode,
        drag: None,
        hovered_card: None,
        config,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let zones = model.zones.clone();
    let time_model = model.time_model;
    let dark_mode = model.dark_mode;

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    let header_result: HeaderResult = draw_header(&ctx, dark_mode, time_model.selected_date());
    let panel_result: ZonePanelResult =
        draw_zone_panel(&ctx, &zones, &time_model, LEFT_PANEL_WIDTH);

    drop(ctx);

    // Apply header results
    if header_result.toggle_theme {
        model.toggle_theme();
    }
    if header_result.swap {
        model.swap_zones();
    }
    if let Some(date) = header_result.new_date {
        model.set_selected_date(date);
    }

    // Apply zone panel results
    if let Some((offset_hours, hour)) = panel_result.set_hour {
        model.set_hour_for_zone(offset_hours, hour);
    }
    if let Some(index) = panel_result.remove {
        model.remove_zone(index);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let palette = Palette::for_theme(model.dark_mode);
    let layout = card_layout(app);

    draw.background().color(palette.background);

    draw_zone_cards(
        &draw,
        &layout,
        &model.zones,
        &model.time_model,
        model.drag.as_ref(),
        model.hovered_card,
        &palette,
    );

    if model.zones.is_empty() {
        draw.text("No zones left")
            .x_y(layout.center_x, layout.slot_center_y(0))
            .color(palette.title)
            .font_size(16);
    }

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // Escape - drop cancelled
        Key::Escape => {
            if let Some(drag) = model.drag.take() {
                model.reorder(drag.from, None);
            }
        }
        Key::S => model.swap_zones(),
        Key::D => model.toggle_theme(),
        Key::T => {
            model.set_selected_date(ui::local_today());
        }
        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }

    let pos = app.mouse.position();
    let layout = card_layout(app);
    if let Some(from) = layout.card_at(pos, model.zones.len()) {
        model.drag = Some(DragState {
            from,
            grab_dy: pos.y - layout.slot_center_y(from),
            pointer: pos,
        });
    }
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }

    if let Some(drag) = model.drag.take() {
        let layout = card_layout(app);
        let to = layout.drop_index(app.mouse.position(), model.zones.len());
        model.reorder(drag.from, to);
    }
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    if let Some(drag) = model.drag.as_mut() {
        drag.pointer = pos;
        model.hovered_card = None;
        return;
    }

    let layout = card_layout(app);
    model.hovered_card = layout.card_at(pos, model.zones.len());
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_when_fields_missing() {
        let config: Config = toml::from_str("dark_mode = true").unwrap();
        assert!(config.dark_mode);
        assert_eq!(config.zone_list(), ZoneList::default());
    }

    #[test]
    fn test_config_zone_table() {
        let text = r#"
            [[zones]]
            name = "JST"
            offset_hours = 9.0

            [[zones]]
            name = "NPT"
            offset_hours = 5.75
        "#;
        let config: Config = toml::from_str(text).unwrap();
        let zones = config.zone_list();
        assert!(!config.dark_mode);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones.get(1).map(|z| z.offset_hours), Some(5.75));
    }

    #[test]
    fn test_config_far_offset_falls_back() {
        let text = r#"
            [[zones]]
            name = "FAR"
            offset_hours = 1e13
        "#;
        let config: Config = toml::from_str(text).unwrap();
        let zones = config.zone_list();
        assert_eq!(zones, ZoneList::default());

        // every default zone can be displayed and edited
        let time_model = TimeModel::now();
        for entry in &zones {
            let updated = time_model.set_hour_for_zone(entry.offset_hours, 3);
            assert_eq!(updated.displayed_time(entry.offset_hours).hour24, 3);
        }
    }

    #[test]
    fn test_config_duplicate_zones_fall_back() {
        let config = Config {
            dark_mode: false,
            zones: vec![
                TimeZoneEntry::new("UTC", 0.0),
                TimeZoneEntry::new("UTC", 0.0),
            ],
        };
        assert_eq!(config.zone_list(), ZoneList::default());
    }
}
