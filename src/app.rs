use std::path::{Path, PathBuf};

use eframe::egui;

use crate::data::fetch;
use crate::state::models::ModelRegistry;
use crate::state::session::SiteSession;
use crate::state::sites::SiteCatalog;
use crate::state::theme::Theme;
use crate::ui::info_dialog;
use crate::ui::map_view::{self, MapAction};
use crate::ui::model_dialog;
use crate::ui::site_list_dialog::{self, ListResult};
use crate::ui::site_panel::{self, SiteAction};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main HydroView application: the overview map plus any number of open
/// site windows, each backed by its own independent session.
pub struct HydroViewApp {
    data_dir: PathBuf,
    catalog: SiteCatalog,
    models: ModelRegistry,
    theme: Theme,
    sessions: Vec<SiteSession>,
    show_site_list: bool,
    /// Terminal startup failure (catalog or registry unreadable): the main
    /// window shows only this.
    startup_error: Option<(String, String)>,
}

impl HydroViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, data_dir: PathBuf) -> Self {
        let theme = Theme::default();

        // --- Global UI style ---
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::proportional(14.5),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(20.0),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.window_margin = egui::Margin::same(12);
        ctx.set_style(style);
        ctx.set_visuals(theme.visuals());

        let mut startup_error = None;
        let catalog = match SiteCatalog::load(&data_dir.join("sites.json")) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "failed to load site catalog");
                startup_error = Some(("Data Unavailable".to_string(), e));
                SiteCatalog { sites: Vec::new() }
            }
        };
        let models = match ModelRegistry::load(&data_dir.join("models.json")) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(error = %e, "failed to load model registry");
                if startup_error.is_none() {
                    startup_error = Some(("Data Unavailable".to_string(), e));
                }
                ModelRegistry::empty()
            }
        };

        tracing::info!(
            sites = catalog.len(),
            models = models.len(),
            data_dir = %data_dir.display(),
            "catalog loaded"
        );

        Self {
            data_dir,
            catalog,
            models,
            theme,
            sessions: Vec::new(),
            show_site_list: false,
            startup_error,
        }
    }

    /// Open a site window for the given id, or focus the one already open.
    /// An id missing from the catalog opens a terminal error window.
    fn open_site(&mut self, id: &str) {
        if self.sessions.iter().any(|s| s.id == id) {
            return;
        }
        let session = match self.catalog.site_by_id(id) {
            Some(site) => {
                tracing::info!(site = %id, "opening site window");
                SiteSession::open(site.clone(), self.models.clone(), &self.data_dir)
            }
            None => {
                tracing::warn!(site = %id, "site id not in catalog");
                SiteSession::unavailable(id, self.models.clone())
            }
        };
        self.sessions.push(session);
    }
}

/// Apply one toolbar action to a site session.
fn handle_site_action(session: &mut SiteSession, action: SiteAction, data_dir: &Path) {
    match action {
        SiteAction::None => {}
        SiteAction::OpenModels => session.show_models_dialog = true,
        SiteAction::ClearPlot => session.clear_plot(),
        SiteAction::ToggleDifference => session.toggle_difference(),
        SiteAction::ToggleUnits => session.toggle_units(),
        SiteAction::ToggleLogScale => session.toggle_log_scale(),
        SiteAction::OpenInfo => session.show_info_dialog = true,
        SiteAction::OpenSiteMap => session.show_site_map = true,
        SiteAction::Download => download_site_archive(session, data_dir),
    }
}

/// Offer a save dialog for the site's pre-built zip archive.
fn download_site_archive(session: &SiteSession, data_dir: &Path) {
    let filename = match &session.site {
        Some(site) => format!("{}.csv.zip", site.name.replace(' ', "_")),
        None => format!("{}.csv.zip", session.id),
    };
    if let Some(dest) = rfd::FileDialog::new()
        .set_file_name(&filename)
        .add_filter("Zip Archives", &["zip"])
        .save_file()
    {
        match fetch::copy_download_archive(data_dir, &session.id, &dest) {
            Ok(bytes) => {
                tracing::info!(site = %session.id, %bytes, dest = %dest.display(), "archive saved")
            }
            Err(e) => tracing::error!(site = %session.id, error = %e, "archive save failed"),
        }
    }
}

impl eframe::App for HydroViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals());

        // Terminal startup failure: full takeover, nothing else.
        if let Some((title, message)) = &self.startup_error {
            let title = title.clone();
            let message = message.clone();
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.add_space((ui.available_height() / 2.0 - 40.0).max(0.0));
                ui.vertical_centered(|ui| {
                    ui.heading(title);
                    ui.add_space(8.0);
                    ui.label(message);
                });
            });
            return;
        }

        // --- Header panel ---
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("HydroView");
                    ui.separator();
                    let count = self.catalog.len();
                    let label = if count == 1 {
                        "1 site".to_string()
                    } else {
                        format!("{count} sites")
                    };
                    ui.label(egui::RichText::new(label).weak());

                    if ui.button("List View").clicked() {
                        self.show_site_list = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = match self.theme {
                            Theme::Dark => "Light Mode",
                            Theme::Light => "Dark Mode",
                        };
                        if ui.button(theme_label).clicked() {
                            self.theme = self.theme.toggle();
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        // --- Overview map ---
        let mut site_to_open: Option<String> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            match map_view::show_map_view(ui, &self.catalog, &self.theme) {
                MapAction::None => {}
                MapAction::OpenSite(id) => site_to_open = Some(id),
            }
        });

        // --- Site list dialog ---
        if self.show_site_list {
            match site_list_dialog::show_site_list_dialog(ctx, &self.catalog) {
                ListResult::Open => {}
                ListResult::Closed => self.show_site_list = false,
                ListResult::Selected(id) => {
                    site_to_open = Some(id);
                    self.show_site_list = false;
                }
            }
        }

        if let Some(id) = site_to_open {
            self.open_site(&id);
        }

        // --- Site windows, one native viewport per open session ---
        let theme = self.theme;
        let data_dir = self.data_dir.clone();
        for session in &mut self.sessions {
            session.poll();

            let viewport_id = egui::ViewportId::from_hash_of(("site", session.id.as_str()));
            let builder = egui::ViewportBuilder::default()
                .with_title(session.title())
                .with_inner_size([1100.0, 500.0]);

            ctx.show_viewport_immediate(viewport_id, builder, |ctx, _class| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let action = site_panel::show_site_panel(session, ui);
                    handle_site_action(session, action, &data_dir);
                });

                if session.show_models_dialog
                    && !model_dialog::show_model_dialog(ctx, session)
                {
                    session.show_models_dialog = false;
                }
                if session.show_info_dialog && !info_dialog::show_info_dialog(ctx, session) {
                    session.show_info_dialog = false;
                }
                if session.show_site_map {
                    let mut open = true;
                    if let Some(site) = session.site.clone() {
                        egui::Window::new("Site Map")
                            .open(&mut open)
                            .collapsible(false)
                            .resizable(true)
                            .default_width(500.0)
                            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                            .show(ctx, |ui| {
                                map_view::show_single_site_map(ui, &site, &theme);
                            });
                    }
                    session.show_site_map = open && session.site.is_some();
                }

                if ctx.input(|i| i.viewport().close_requested()) {
                    session.open = false;
                }
            });
        }
        self.sessions.retain(|s| s.open);
    }
}
