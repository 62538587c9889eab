use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::data::fetch;
use crate::data::table::SeriesTable;
use crate::plot::transform::PlotTransform;
use crate::state::models::{ModelRegistry, BASELINE_ID};
use crate::state::sites::Site;

/// Everything the chart needs once a site's data has arrived.
#[derive(Debug)]
pub struct PlotData {
    pub table: SeriesTable,
    pub transform: PlotTransform,
    /// Per-column render visibility, indexed like the table's value columns.
    /// Mirrors the registry's `visible` flags.
    pub visibility: Vec<bool>,
    pub log_scale: bool,
}

/// Load state machine for a site window. Failure is terminal: the window
/// shows a full takeover message and nothing else.
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(PlotData),
    Failed { title: String, message: String },
}

type PendingResult = Arc<Mutex<Option<Result<SeriesTable, String>>>>;

/// One open site window: the page-session object owning the site, its model
/// registry copy, and the live plot. Site windows share nothing mutable.
pub struct SiteSession {
    pub id: String,
    pub site: Option<Site>,
    pub models: ModelRegistry,
    pub load: LoadState,
    pending: Option<PendingResult>,
    /// False once the user closes the window; the app drops the session.
    pub open: bool,
    pub show_models_dialog: bool,
    pub show_info_dialog: bool,
    pub show_site_map: bool,
}

impl SiteSession {
    /// Open a session for a known site, spawning the background data load.
    pub fn open(site: Site, mut models: ModelRegistry, data_dir: &Path) -> Self {
        models.reset_startup_visibility();

        let result: PendingResult = Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);
        let dir = data_dir.to_path_buf();
        let site_id = site.id.clone();
        std::thread::spawn(move || {
            let loaded = fetch::load_series_table(&dir, &site_id);
            *result_clone.lock().unwrap() = Some(loaded);
        });

        Self {
            id: site.id.clone(),
            site: Some(site),
            models,
            load: LoadState::Loading,
            pending: Some(result),
            open: true,
            show_models_dialog: false,
            show_info_dialog: false,
            show_site_map: false,
        }
    }

    /// Terminal session for an id that is not in the catalog.
    pub fn unavailable(id: &str, models: ModelRegistry) -> Self {
        Self {
            id: id.to_string(),
            site: None,
            models,
            load: LoadState::Failed {
                title: "Site Unavailable".to_string(),
                message: format!("A site with id {id:?} does not exist."),
            },
            pending: None,
            open: true,
            show_models_dialog: false,
            show_info_dialog: false,
            show_site_map: false,
        }
    }

    pub fn title(&self) -> String {
        match &self.site {
            Some(site) => site.display_name(),
            None => format!("Site {}", self.id),
        }
    }

    /// Poll the background load and, on completion, move to Ready or to the
    /// terminal error state.
    pub fn poll(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let taken = pending.lock().unwrap().take();
        let Some(result) = taken else {
            return;
        };
        self.pending = None;

        match result {
            Ok(table) => {
                let visibility = self
                    .models
                    .iter()
                    .filter_map(|(id, info)| table.column_index(id).map(|col| (col, info.visible)))
                    .fold(vec![false; table.labels.len()], |mut vis, (col, v)| {
                        vis[col] = v;
                        vis
                    });
                self.load = LoadState::Ready(PlotData {
                    table,
                    transform: PlotTransform::default(),
                    visibility,
                    log_scale: false,
                });
                tracing::info!(site = %self.id, "plot data loaded");
            }
            Err(e) => {
                tracing::warn!(site = %self.id, error = %e, "error retrieving plot data");
                self.load = LoadState::Failed {
                    title: "Data Unavailable".to_string(),
                    message: String::new(),
                };
            }
        }
    }

    /// Show or hide one scenario: mirrors the registry flag into the chart's
    /// per-column visibility. Data is untouched; unknown ids are a no-op.
    pub fn set_model_visible(&mut self, id: &str, visible: bool) {
        if !self.models.set_visible(id, visible) {
            return;
        }
        if let LoadState::Ready(plot) = &mut self.load {
            if let Some(col) = plot.table.column_index(id) {
                plot.visibility[col] = visible;
            }
        }
    }

    /// Hide every scenario series.
    pub fn clear_plot(&mut self) {
        self.models.hide_all();
        if let LoadState::Ready(plot) = &mut self.load {
            for v in plot.visibility.iter_mut() {
                *v = false;
            }
        }
    }

    /// Flip between absolute values and baseline differences.
    pub fn toggle_difference(&mut self) {
        let LoadState::Ready(plot) = &mut self.load else {
            return;
        };
        let Some(baseline_col) = plot.table.column_index(BASELINE_ID) else {
            return;
        };
        let target = !plot.transform.is_difference();
        plot.transform
            .toggle_difference(&mut plot.table, baseline_col, target);
    }

    /// Flip between imperial and metric display units.
    pub fn toggle_units(&mut self) {
        let Some(site) = &self.site else { return };
        let LoadState::Ready(plot) = &mut self.load else {
            return;
        };
        let target = plot.transform.units().toggle();
        plot.transform.set_units(&mut plot.table, site.kind, target);
    }

    pub fn toggle_log_scale(&mut self) {
        if let LoadState::Ready(plot) = &mut self.load {
            plot.log_scale = !plot.log_scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{SeriesRow, SeriesTable};
    use crate::plot::transform::UnitSystem;
    use crate::state::models::ModelRegistry;
    use crate::state::sites::SiteKind;

    const REGISTRY: &str = r#"{
        "0": { "Name": "Baseline", "YearStart": 1950, "YearEnd": 2010, "Phase": "1" },
        "1": { "Name": "Alt One", "YearStart": 1950, "YearEnd": 2010, "Phase": "1" },
        "3": { "Name": "Alt Three", "YearStart": 1970, "YearEnd": 2010, "Phase": "2" }
    }"#;

    fn ready_session() -> SiteSession {
        let mut models = ModelRegistry::from_json(REGISTRY).unwrap();
        models.reset_startup_visibility();
        let table = SeriesTable {
            labels: vec!["0".to_string(), "1".to_string(), "3".to_string()],
            rows: vec![
                SeriesRow { timestamp: 0.0, values: vec![Some(10.0), Some(20.0), Some(30.0)] },
                SeriesRow { timestamp: 1.0, values: vec![None, Some(5.0), Some(6.0)] },
            ],
        };
        let visibility = vec![true, false, false];
        SiteSession {
            id: "S1".to_string(),
            site: Some(Site {
                id: "S1".to_string(),
                name: "North Fork".to_string(),
                number: None,
                kind: SiteKind::Stream,
                lon: -114.0,
                lat: 49.0,
            }),
            models,
            load: LoadState::Ready(PlotData {
                table,
                transform: PlotTransform::default(),
                visibility,
                log_scale: false,
            }),
            pending: None,
            open: true,
            show_models_dialog: false,
            show_info_dialog: false,
            show_site_map: false,
        }
    }

    #[test]
    fn visibility_toggle_targets_the_mapped_column() {
        let mut session = ready_session();
        session.set_model_visible("3", true);

        let LoadState::Ready(plot) = &session.load else {
            panic!("not ready")
        };
        // Columns are ["0", "1", "3"]; id "3" is data column 2.
        assert_eq!(plot.visibility, vec![true, false, true]);
        assert!(session.models.is_visible("3"));
    }

    #[test]
    fn unknown_model_id_changes_nothing() {
        let mut session = ready_session();
        session.set_model_visible("99", true);
        let LoadState::Ready(plot) = &session.load else {
            panic!("not ready")
        };
        assert_eq!(plot.visibility, vec![true, false, false]);
    }

    #[test]
    fn clear_plot_hides_everything() {
        let mut session = ready_session();
        session.set_model_visible("1", true);
        session.clear_plot();

        let LoadState::Ready(plot) = &session.load else {
            panic!("not ready")
        };
        assert_eq!(plot.visibility, vec![false, false, false]);
        assert!(!session.models.is_visible("0"));
    }

    #[test]
    fn difference_and_units_flow_through_the_engine() {
        let mut session = ready_session();

        session.toggle_difference();
        let LoadState::Ready(plot) = &session.load else {
            panic!("not ready")
        };
        assert!(plot.transform.is_difference());
        assert_eq!(plot.table.rows[0].values[1], Some(10.0));

        session.toggle_units();
        let LoadState::Ready(plot) = &session.load else {
            panic!("not ready")
        };
        assert_eq!(plot.transform.units(), UnitSystem::Metric);
    }

    #[test]
    fn unavailable_session_is_terminal() {
        let models = ModelRegistry::from_json(REGISTRY).unwrap();
        let mut session = SiteSession::unavailable("bogus", models);
        assert!(matches!(session.load, LoadState::Failed { .. }));

        // None of the operations can resurrect it.
        session.toggle_difference();
        session.toggle_units();
        session.set_model_visible("0", true);
        assert!(matches!(session.load, LoadState::Failed { .. }));
    }

    #[test]
    fn poll_moves_a_finished_load_to_ready() {
        let table = SeriesTable::from_csv("Date,0,1,3\n1999-06-01,1,2,3\n").unwrap();

        let mut session = ready_session();
        session.load = LoadState::Loading;
        session.pending = Some(Arc::new(Mutex::new(Some(Ok(table)))));

        session.poll();
        let LoadState::Ready(plot) = &session.load else {
            panic!("not ready")
        };
        // Startup visibility: baseline only.
        assert_eq!(plot.visibility, vec![true, false, false]);
    }

    #[test]
    fn poll_failure_takes_the_terminal_path() {
        let mut session = ready_session();
        session.load = LoadState::Loading;
        session.pending = Some(Arc::new(Mutex::new(Some(Err("404".to_string())))));

        session.poll();
        assert!(matches!(
            session.load,
            LoadState::Failed { ref title, .. } if title == "Data Unavailable"
        ));
    }
}
