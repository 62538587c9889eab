use egui_plot::{Corner, Legend, Line, Plot};

use crate::data::datetime;
use crate::plot::transform::{unit_label, UnitSystem};
use crate::state::session::{LoadState, SiteSession};
use crate::state::theme::series_color;

/// Actions the site panel can request from the app.
pub enum SiteAction {
    None,
    OpenModels,
    ClearPlot,
    ToggleDifference,
    ToggleUnits,
    ToggleLogScale,
    OpenInfo,
    OpenSiteMap,
    Download,
}

/// Helper to create a toolbar button with consistent min size.
fn toolbar_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
}

/// Helper to create a selected/toggled toolbar button.
fn toolbar_toggle_btn(ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
    let btn = if active {
        egui::Button::new(egui::RichText::new(label).strong())
            .fill(ui.visuals().selection.bg_fill)
            .min_size(egui::vec2(0.0, 26.0))
    } else {
        egui::Button::new(label).min_size(egui::vec2(0.0, 26.0))
    };
    ui.add(btn)
}

/// Full-window terminal error display: nothing else is left interactable.
fn show_takeover(ui: &mut egui::Ui, title: &str, message: &str) {
    let available = ui.available_height();
    ui.add_space((available / 2.0 - 40.0).max(0.0));
    ui.vertical_centered(|ui| {
        ui.heading(title);
        if !message.is_empty() {
            ui.add_space(8.0);
            ui.label(message);
        }
    });
}

/// Render one site window's content. Returns an action when the user clicked
/// a toolbar button.
pub fn show_site_panel(session: &SiteSession, ui: &mut egui::Ui) -> SiteAction {
    let mut action = SiteAction::None;

    match &session.load {
        LoadState::Failed { title, message } => {
            show_takeover(ui, title, message);
            return action;
        }
        LoadState::Loading => {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.spinner();
                ui.add_space(8.0);
                ui.label("Loading data...");
            });
            ui.ctx().request_repaint();
            return action;
        }
        LoadState::Ready(_) => {}
    }

    let Some(site) = &session.site else {
        show_takeover(ui, "Site Unavailable", "");
        return action;
    };
    let LoadState::Ready(plot) = &session.load else {
        return action;
    };

    // --- Header ---
    ui.horizontal(|ui| {
        ui.heading(site.display_name());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut banner = format!(
                "{} \u{2013} {}",
                site.kind.measurement_label(),
                unit_label(site.kind, plot.transform.units())
            );
            if plot.transform.is_difference() {
                banner.push_str(" \u{2013} BASELINE DIFFERENCES");
            }
            ui.label(egui::RichText::new(banner).strong());
        });
    });

    ui.add_space(2.0);

    // --- Toolbar ---
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        if toolbar_btn(ui, "Alternatives")
            .on_hover_text("Select model alternatives to show or hide")
            .clicked()
        {
            action = SiteAction::OpenModels;
        }
        if toolbar_btn(ui, "Clear").on_hover_text("Hide all series").clicked() {
            action = SiteAction::ClearPlot;
        }

        ui.separator();

        if toolbar_toggle_btn(ui, "Differences", plot.transform.is_difference())
            .on_hover_text("Show differences from the baseline alternative")
            .clicked()
        {
            action = SiteAction::ToggleDifference;
        }
        if toolbar_toggle_btn(
            ui,
            "Metric Units",
            plot.transform.units() == UnitSystem::Metric,
        )
        .on_hover_text("Switch between imperial and metric units")
        .clicked()
        {
            action = SiteAction::ToggleUnits;
        }
        if toolbar_toggle_btn(ui, "Log Scale", plot.log_scale)
            .on_hover_text("Logarithmic Y axis")
            .clicked()
        {
            action = SiteAction::ToggleLogScale;
        }

        ui.separator();

        let info_btn = ui.add_enabled(
            !plot.transform.is_difference(),
            egui::Button::new("Info").min_size(egui::vec2(0.0, 26.0)),
        );
        if info_btn
            .on_hover_text("Summary statistics for the shown alternatives")
            .clicked()
        {
            action = SiteAction::OpenInfo;
        }
        if toolbar_btn(ui, "Site Map").on_hover_text("Show this site on a map").clicked() {
            action = SiteAction::OpenSiteMap;
        }
        if toolbar_btn(ui, "Download")
            .on_hover_text("Save the zipped data file for this site")
            .clicked()
        {
            action = SiteAction::Download;
        }
    });

    ui.add_space(4.0);

    // --- Chart ---
    let any_visible = plot.visibility.iter().any(|&v| v);
    if !any_visible {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("No alternatives shown").strong().size(16.0));
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("Click \"Alternatives\" above to select model runs to plot.")
                    .weak(),
            );
        });
        return action;
    }

    let log_scale = plot.log_scale;
    let units = unit_label(site.kind, plot.transform.units());

    let mut chart = Plot::new(("site_plot", session.id.as_str()))
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_formatter(|mark, _range| datetime::format_date(mark.value))
        .label_formatter(move |name, point| {
            let value = if log_scale {
                10f64.powf(point.y)
            } else {
                point.y
            };
            if name.is_empty() {
                datetime::format_date_long(point.x)
            } else {
                format!(
                    "{name}: {value:.2} {units}\n{}",
                    datetime::format_date_long(point.x)
                )
            }
        });
    if log_scale {
        chart = chart.y_axis_formatter(|mark, _range| log_tick(10f64.powf(mark.value)));
    }

    chart.show(ui, |plot_ui| {
        for (id, info) in session.models.iter() {
            if !info.visible {
                continue;
            }
            let Some(col) = plot.table.column_index(id) else {
                continue;
            };
            if !plot.visibility.get(col).copied().unwrap_or(false) {
                continue;
            }

            let points: Vec<[f64; 2]> = plot
                .table
                .rows
                .iter()
                .filter_map(|row| {
                    let v = row.values.get(col).copied().flatten()?;
                    if log_scale {
                        if v > 0.0 {
                            Some([row.timestamp, v.log10()])
                        } else {
                            None
                        }
                    } else {
                        Some([row.timestamp, v])
                    }
                })
                .collect();
            if points.is_empty() {
                continue;
            }

            plot_ui.line(
                Line::new(points)
                    .name(session.models.display_name(id))
                    .color(series_color(col))
                    .width(2.0),
            );
        }
    });

    action
}

/// Format a Y tick for log mode: the tick mark lives in log10 space but the
/// label shows the linear magnitude.
fn log_tick(value: f64) -> String {
    if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_ticks_scale_precision_with_magnitude() {
        assert_eq!(log_tick(1000.0), "1000");
        assert_eq!(log_tick(12.34), "12.3");
        assert_eq!(log_tick(0.5), "0.500");
    }
}
