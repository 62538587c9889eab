use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Scenario id of the baseline model run, the reference for difference mode.
pub const BASELINE_ID: &str = "0";

/// Metadata for one model scenario, as shipped in `models.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "YearStart")]
    pub year_start: i32,
    #[serde(rename = "YearEnd")]
    pub year_end: i32,
    #[serde(rename = "Phase")]
    pub phase: String,
    /// Whether this scenario is currently drawn. Runtime-only.
    #[serde(skip)]
    pub visible: bool,
}

/// Ordered mapping from scenario id to metadata plus visibility flag.
///
/// Ids are kept in numeric order where possible so the registry lists the
/// baseline ("0") first, matching the column order of the plot data.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: Vec<(String, ModelInfo)>,
}

impl ModelRegistry {
    /// A registry with no scenarios, used as the placeholder after a failed
    /// startup load.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read model registry {}: {e}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let map: HashMap<String, ModelInfo> =
            serde_json::from_str(text).map_err(|e| format!("Invalid model registry: {e}"))?;

        let mut entries: Vec<(String, ModelInfo)> = map.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| {
            match (a.parse::<u64>(), b.parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => a.cmp(b),
            }
        });

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelInfo)> {
        self.entries.iter().map(|(id, info)| (id.as_str(), info))
    }

    pub fn get(&self, id: &str) -> Option<&ModelInfo> {
        self.entries
            .iter()
            .find(|(eid, _)| eid == id)
            .map(|(_, info)| info)
    }

    /// Display name for a scenario id, falling back to the id itself.
    pub fn display_name(&self, id: &str) -> String {
        self.get(id)
            .map(|info| info.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Set the visibility flag for a scenario. Returns false for unknown ids.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.entries.iter_mut().find(|(eid, _)| eid == id) {
            Some((_, info)) => {
                info.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).map(|info| info.visible).unwrap_or(false)
    }

    pub fn hide_all(&mut self) {
        for (_, info) in &mut self.entries {
            info.visible = false;
        }
    }

    /// Startup state for a site window: everything hidden, baseline shown.
    pub fn reset_startup_visibility(&mut self) {
        self.hide_all();
        self.set_visible(BASELINE_ID, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"{
        "10": { "Name": "Alt Ten", "YearStart": 1990, "YearEnd": 2010, "Phase": "2" },
        "0":  { "Name": "Baseline", "YearStart": 1950, "YearEnd": 2010, "Phase": "1" },
        "3":  { "Name": "Alt Three", "YearStart": 1970, "YearEnd": 2010, "Phase": "1" }
    }"#;

    #[test]
    fn orders_ids_numerically() {
        let reg = ModelRegistry::from_json(REGISTRY).unwrap();
        let ids: Vec<&str> = reg.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["0", "3", "10"]);
    }

    #[test]
    fn startup_shows_only_baseline() {
        let mut reg = ModelRegistry::from_json(REGISTRY).unwrap();
        reg.set_visible("3", true);
        reg.reset_startup_visibility();
        assert!(reg.is_visible(BASELINE_ID));
        assert!(!reg.is_visible("3"));
        assert!(!reg.is_visible("10"));
    }

    #[test]
    fn toggling_unknown_id_is_a_noop() {
        let mut reg = ModelRegistry::from_json(REGISTRY).unwrap();
        assert!(!reg.set_visible("99", true));
        assert!(!reg.is_visible("99"));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let reg = ModelRegistry::from_json(REGISTRY).unwrap();
        assert_eq!(reg.display_name("0"), "Baseline");
        assert_eq!(reg.display_name("99"), "99");
    }
}
