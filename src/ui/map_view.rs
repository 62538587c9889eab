use egui_plot::{MarkerShape, Plot, PlotPoint, Points};

use crate::state::sites::{Site, SiteCatalog, SiteKind};
use crate::state::theme::Theme;

/// What the overview map asks of the app.
pub enum MapAction {
    None,
    OpenSite(String),
}

/// Render the overview marker map: one point per site, streams red, lakes
/// blue. Clicking near a marker opens that site's window.
pub fn show_map_view(ui: &mut egui::Ui, catalog: &SiteCatalog, theme: &Theme) -> MapAction {
    let mut action = MapAction::None;

    if catalog.is_empty() {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("No sites in the catalog").strong().size(16.0));
        });
        return action;
    }

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("\u{25CF}")
                .color(theme.marker_color(SiteKind::Stream))
                .size(16.0),
        );
        ui.label("STREAM");
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("\u{25CF}")
                .color(theme.marker_color(SiteKind::Lake))
                .size(16.0),
        );
        ui.label("LAKE");
        ui.add_space(16.0);
        ui.label(egui::RichText::new("Click a marker to view data").weak());
    });
    ui.add_space(4.0);

    let mut clicked: Option<(PlotPoint, f64)> = None;

    let mut plot = Plot::new("site_map")
        .data_aspect(1.0)
        .show_grid(false)
        .show_axes([false, false])
        .label_formatter(|name, _value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\nClick to view data")
            }
        });

    // Frame the full catalog extent with a little padding on first show.
    if let Some(((lon_min, lat_min), (lon_max, lat_max))) = catalog.bounds() {
        let pad_x = ((lon_max - lon_min) * 0.05).max(0.05);
        let pad_y = ((lat_max - lat_min) * 0.05).max(0.05);
        plot = plot
            .include_x(lon_min - pad_x)
            .include_x(lon_max + pad_x)
            .include_y(lat_min - pad_y)
            .include_y(lat_max + pad_y);
    }

    plot.show(ui, |plot_ui| {
        for site in &catalog.sites {
            plot_ui.points(
                Points::new(vec![[site.lon, site.lat]])
                    .name(site.display_name())
                    .color(theme.marker_color(site.kind))
                    .shape(match site.kind {
                        SiteKind::Stream => MarkerShape::Circle,
                        SiteKind::Lake => MarkerShape::Diamond,
                    })
                    .filled(true)
                    .radius(6.0),
            );
        }

        if plot_ui.response().clicked() {
            if let Some(pointer) = plot_ui.pointer_coordinate() {
                // Tolerance scales with the visible extent so clicks stay
                // forgiving at any zoom level.
                let tolerance = plot_ui.plot_bounds().width() * 0.02;
                clicked = Some((pointer, tolerance));
            }
        }
    });

    if let Some((pointer, tolerance)) = clicked {
        if let Some(site) = nearest_site(catalog, pointer.x, pointer.y, tolerance) {
            action = MapAction::OpenSite(site.id.clone());
        }
    }

    action
}

/// Closest site to a map coordinate, if any lies within `tolerance` degrees.
fn nearest_site(catalog: &SiteCatalog, lon: f64, lat: f64, tolerance: f64) -> Option<&Site> {
    let mut best: Option<(&Site, f64)> = None;
    for site in &catalog.sites {
        let d = ((site.lon - lon).powi(2) + (site.lat - lat).powi(2)).sqrt();
        if d <= tolerance && best.map(|(_, bd)| d < bd).unwrap_or(true) {
            best = Some((site, d));
        }
    }
    best.map(|(site, _)| site)
}

/// Small single-site map used by the Site Map dialog on the detail window.
pub fn show_single_site_map(ui: &mut egui::Ui, site: &Site, theme: &Theme) {
    Plot::new(("single_site_map", site.id.as_str()))
        .data_aspect(1.0)
        .show_grid(false)
        .height(300.0)
        .include_x(site.lon - 0.5)
        .include_x(site.lon + 0.5)
        .include_y(site.lat - 0.5)
        .include_y(site.lat + 0.5)
        .label_formatter(|name, _value| name.to_string())
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(vec![[site.lon, site.lat]])
                    .name(site.display_name())
                    .color(theme.marker_color(site.kind))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(8.0),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::sites::SiteCatalog;

    fn catalog() -> SiteCatalog {
        SiteCatalog {
            sites: vec![
                Site {
                    id: "S1".to_string(),
                    name: "North Fork".to_string(),
                    number: None,
                    kind: SiteKind::Stream,
                    lon: -114.0,
                    lat: 49.0,
                },
                Site {
                    id: "L1".to_string(),
                    name: "Upper Lake".to_string(),
                    number: None,
                    kind: SiteKind::Lake,
                    lon: -113.0,
                    lat: 48.0,
                },
            ],
        }
    }

    #[test]
    fn click_near_a_marker_finds_it() {
        let c = catalog();
        let hit = nearest_site(&c, -114.01, 49.005, 0.05).unwrap();
        assert_eq!(hit.id, "S1");
    }

    #[test]
    fn click_in_open_water_finds_nothing() {
        let c = catalog();
        assert!(nearest_site(&c, -110.0, 45.0, 0.05).is_none());
    }

    #[test]
    fn nearest_wins_when_markers_are_close() {
        let c = catalog();
        // Halfway-ish point, slightly closer to the lake.
        let hit = nearest_site(&c, -113.4, 48.4, 2.0).unwrap();
        assert_eq!(hit.id, "L1");
    }
}
