use egui_extras::{Column, TableBuilder};

use crate::state::sites::SiteCatalog;

/// Result of the List View dialog interaction each frame.
pub enum ListResult {
    /// Dialog stays open.
    Open,
    Closed,
    Selected(String),
}

/// Show the site list dialog: the tabular fallback for picking a site
/// without the map. Clicking a row selects that site.
pub fn show_site_list_dialog(ctx: &egui::Context, catalog: &SiteCatalog) -> ListResult {
    let mut result = ListResult::Open;
    let mut open = true;

    egui::Window::new("Select Site")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(600.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("Click a table row to view data for a site").weak());
            ui.add_space(6.0);

            egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .sense(egui::Sense::click())
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(90.0))
                    .column(Column::remainder())
                    .column(Column::auto().at_least(60.0))
                    .header(20.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("ID");
                        });
                        header.col(|ui| {
                            ui.strong("NAME");
                        });
                        header.col(|ui| {
                            ui.strong("TYPE");
                        });
                    })
                    .body(|mut body| {
                        for site in &catalog.sites {
                            body.row(20.0, |mut row| {
                                row.col(|ui| {
                                    ui.label(site.number.as_deref().unwrap_or("--"));
                                });
                                row.col(|ui| {
                                    ui.label(&site.name);
                                });
                                row.col(|ui| {
                                    ui.label(site.kind.label());
                                });
                                if row.response().clicked() {
                                    result = ListResult::Selected(site.id.clone());
                                }
                            });
                        }
                    });
            });
        });

    if !open {
        return ListResult::Closed;
    }
    result
}
