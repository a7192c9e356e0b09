//! UI module - egui header and zone panel
//!
//! Provides:
//! - Header (top panel): theme toggle, swap button, Schedule Event link, date controls
//! - Zone panel (left panel): per-zone hour slider and remove button

use chrono::{Datelike, Local, NaiveDate};
use nannou_egui::egui;
use shared::{TimeModel, ZoneList};

/// Blank event in Google Calendar, opened by the header link
pub const SCHEDULE_EVENT_URL: &str = "https://calendar.google.com/calendar/u/0/r/eventedit?";

/// The user's local calendar date
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Result of header interactions
#[derive(Default)]
pub struct HeaderResult {
    /// Theme toggle clicked
    pub toggle_theme: bool,
    /// Swap Timezones clicked
    pub swap: bool,
    /// A new date was picked
    pub new_date: Option<NaiveDate>,
}

/// Result of zone panel interactions
#[derive(Default)]
pub struct ZonePanelResult {
    /// Slider moved: (zone offset, new displayed hour)
    pub set_hour: Option<(f64, u32)>,
    /// Remove clicked for this index
    pub remove: Option<usize>,
}

/// Build a date from parts, clamping the day to the month's length
pub fn date_from_parts(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let month = month.clamp(1, 12);
    (1..=day.clamp(1, 31))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

fn hint(text: &str) -> egui::RichText {
    egui::RichText::new(text)
        .size(10.0)
        .color(egui::Color32::from_rgb(120, 125, 135))
}

/// Draw the header panel
pub fn draw_header(ctx: &egui::Context, dark_mode: bool, selected_date: NaiveDate) -> HeaderResult {
    let mut result = HeaderResult::default();

    egui::TopBottomPanel::top("header_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("ZONE SLIDER");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.hyperlink_to("Schedule Event", SCHEDULE_EVENT_URL);

                    if ui.button("Swap Timezones").on_hover_text("Keyboard: S").clicked() {
                        result.swap = true;
                    }

                    let theme_label = if dark_mode { "☀ Light" } else { "☾ Dark" };
                    if ui.button(theme_label).on_hover_text("Keyboard: D").clicked() {
                        result.toggle_theme = true;
                    }
                });
            });

            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Date");

                if ui.small_button("◀").on_hover_text("Previous day").clicked() {
                    result.new_date = selected_date.pred_opt();
                }

                let mut year = selected_date.year();
                let mut month = selected_date.month();
                let mut day = selected_date.day();

                let mut changed = false;
                changed |= ui
                    .add(egui::DragValue::new(&mut month).clamp_range(1..=12).prefix("M "))
                    .changed();
                changed |= ui
                    .add(egui::DragValue::new(&mut day).clamp_range(1..=31).prefix("D "))
                    .changed();
                changed |= ui
                    .add(egui::DragValue::new(&mut year).clamp_range(1900..=2100).prefix("Y "))
                    .changed();

                if changed {
                    result.new_date = date_from_parts(year, month, day);
                }

                if ui.small_button("▶").on_hover_text("Next day").clicked() {
                    result.new_date = selected_date.succ_opt();
                }

                if ui.button("Today").on_hover_text("Keyboard: T").clicked() {
                    result.new_date = Some(local_today());
                }

                ui.label(selected_date.format("%B %-d, %Y").to_string());
            });
            ui.add_space(6.0);
        });

    result
}

/// Draw the zone panel (left side)
pub fn draw_zone_panel(
    ctx: &egui::Context,
    zones: &ZoneList,
    time_model: &TimeModel,
    panel_width: f32,
) -> ZonePanelResult {
    let mut result = ZonePanelResult::default();

    egui::SidePanel::left("zone_panel")
        .resizable(false)
        .exact_width(panel_width)
        .show(ctx, |ui| {
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new(format!("Zones ({})", zones.len()))
                    .size(12.0)
                    .color(egui::Color32::from_rgb(160, 165, 175)),
            );
            ui.add_space(5.0);

            if zones.is_empty() {
                ui.label(hint("All zones removed"));
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (index, entry) in zones.iter().enumerate() {
                    let displayed = time_model.displayed_time(entry.offset_hours);

                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&entry.name).strong());
                        ui.label(hint(&entry.format_utc_offset()));

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("×").on_hover_text("Remove zone").clicked() {
                                result.remove = Some(index);
                            }
                            ui.label(displayed.format_time());
                        });
                    });

                    let mut hour = displayed.hour24;
                    let slider = ui.add(
                        egui::Slider::new(&mut hour, 0..=23)
                            .step_by(1.0)
                            .text("hour"),
                    );
                    if slider.changed() {
                        result.set_hour = Some((entry.offset_hours, hour));
                    }

                    ui.add_space(8.0);
                    ui.separator();
                }
            });

            ui.add_space(10.0);
            ui.label(hint("Drag cards to reorder"));
            ui.label(hint("S  Swap   D  Theme   T  Today"));
        });

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_parts_clamps_day() {
        assert_eq!(
            date_from_parts(2023, 2, 31),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(
            date_from_parts(2024, 2, 30),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_local_today_matches_local_clock() {
        let before = Local::now().date_naive();
        let today = local_today();
        let after = Local::now().date_naive();
        assert!(today == before || today == after);
    }

    #[test]
    fn test_schedule_event_url() {
        assert!(SCHEDULE_EVENT_URL.starts_with("https://calendar.google.com/"));
        assert!(SCHEDULE_EVENT_URL.contains("eventedit"));
    }

    #[test]
    fn test_date_from_parts_valid() {
        assert_eq!(
            date_from_parts(2024, 7, 4),
            NaiveDate::from_ymd_opt(2024, 7, 4)
        );
        assert_eq!(
            date_from_parts(2024, 13, 0),
            NaiveDate::from_ymd_opt(2024, 12, 1)
        );
    }
}
