use egui_extras::{Column, TableBuilder};

use crate::data::datetime;
use crate::plot::stats::ScenarioStats;
use crate::plot::transform::unit_label;
use crate::state::session::{LoadState, SiteSession};

/// Show the summary Info dialog: per visible scenario, the sample count and
/// min/max/mean of the currently plotted values. Returns `false` when the
/// user closes the dialog.
pub fn show_info_dialog(ctx: &egui::Context, session: &SiteSession) -> bool {
    let mut open = true;

    egui::Window::new("Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(520.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let (Some(site), LoadState::Ready(plot)) = (&session.site, &session.load) else {
                ui.label(egui::RichText::new("No data loaded.").weak());
                return;
            };

            if let Some((first, last)) = plot.table.time_range() {
                ui.label(format!(
                    "{} \u{2013} {}",
                    datetime::format_date(first),
                    datetime::format_date(last)
                ));
                ui.add_space(6.0);
            }

            let units = unit_label(site.kind, plot.transform.units());
            let visible: Vec<(&str, usize)> = session
                .models
                .iter()
                .filter(|(_, info)| info.visible)
                .filter_map(|(id, _)| plot.table.column_index(id).map(|col| (id, col)))
                .collect();

            if visible.is_empty() {
                ui.label(egui::RichText::new("No alternatives are shown.").weak());
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::remainder())
                .column(Column::auto().at_least(70.0))
                .column(Column::auto().at_least(90.0))
                .column(Column::auto().at_least(90.0))
                .column(Column::auto().at_least(90.0))
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("ALTERNATIVE");
                    });
                    header.col(|ui| {
                        ui.strong("COUNT");
                    });
                    header.col(|ui| {
                        ui.strong(format!("MIN ({units})"));
                    });
                    header.col(|ui| {
                        ui.strong(format!("MAX ({units})"));
                    });
                    header.col(|ui| {
                        ui.strong(format!("MEAN ({units})"));
                    });
                })
                .body(|mut body| {
                    for (id, col) in visible {
                        let name = session.models.display_name(id);
                        let stats = ScenarioStats::compute(&plot.table, col);
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.label(name.clone());
                            });
                            match &stats {
                                Some(s) => {
                                    row.col(|ui| {
                                        ui.label(format!("{}", s.count));
                                    });
                                    row.col(|ui| {
                                        ui.label(format!("{:.2}", s.min));
                                    });
                                    row.col(|ui| {
                                        ui.label(format!("{:.2}", s.max));
                                    });
                                    row.col(|ui| {
                                        ui.label(format!("{:.2}", s.mean));
                                    });
                                }
                                None => {
                                    for _ in 0..4 {
                                        row.col(|ui| {
                                            ui.label("--");
                                        });
                                    }
                                }
                            }
                        });
                    }
                });
        });

    open
}
