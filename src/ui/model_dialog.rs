use egui_extras::{Column, TableBuilder};

use crate::state::session::SiteSession;

/// Show the Select Alternatives dialog: one row per model scenario, clicking
/// a row toggles that series on or off in the chart. Returns `false` when
/// the user closes the dialog.
pub fn show_model_dialog(ctx: &egui::Context, session: &mut SiteSession) -> bool {
    let mut open = true;
    let mut toggles: Vec<(String, bool)> = Vec::new();

    egui::Window::new("Select Alternatives")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(600.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .sense(egui::Sense::click())
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::exact(30.0))
                    .column(Column::auto().at_least(40.0))
                    .column(Column::remainder())
                    .column(Column::auto().at_least(110.0))
                    .column(Column::auto().at_least(60.0))
                    .header(20.0, |mut header| {
                        header.col(|_ui| {});
                        header.col(|ui| {
                            ui.strong("ID");
                        });
                        header.col(|ui| {
                            ui.strong("NAME");
                        });
                        header.col(|ui| {
                            ui.strong("DATE RANGE");
                        });
                        header.col(|ui| {
                            ui.strong("PHASE");
                        });
                    })
                    .body(|mut body| {
                        for (id, info) in session.models.iter() {
                            body.row(20.0, |mut row| {
                                row.col(|ui| {
                                    if info.visible {
                                        ui.label(egui::RichText::new("\u{2713}").strong());
                                    }
                                });
                                row.col(|ui| {
                                    ui.label(id);
                                });
                                row.col(|ui| {
                                    ui.label(&info.name);
                                });
                                row.col(|ui| {
                                    ui.label(format!(
                                        "{} \u{2013} {}",
                                        info.year_start, info.year_end
                                    ));
                                });
                                row.col(|ui| {
                                    ui.label(&info.phase);
                                });
                                if row.response().clicked() {
                                    toggles.push((id.to_string(), !info.visible));
                                }
                            });
                        }
                    });
            });

            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("Click an alternative to toggle on or off")
                    .weak()
                    .small(),
            );
        });

    for (id, visible) in toggles {
        session.set_model_visible(&id, visible);
    }

    open
}
