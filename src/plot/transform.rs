use crate::data::table::SeriesTable;
use crate::state::sites::SiteKind;

/// 1 cubic foot per second in cubic meters per second.
pub const FLOW_CFS_TO_CMS: f64 = 0.028317;
/// 1 foot in meters.
pub const LENGTH_FT_TO_M: f64 = 0.3048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    pub fn toggle(&self) -> Self {
        match self {
            UnitSystem::Imperial => UnitSystem::Metric,
            UnitSystem::Metric => UnitSystem::Imperial,
        }
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::Imperial
    }
}

/// Displayed unit label for a site's measurement in the given unit system.
pub fn unit_label(kind: SiteKind, units: UnitSystem) -> &'static str {
    match (kind, units) {
        (SiteKind::Stream, UnitSystem::Imperial) => "feet\u{00B3}/second",
        (SiteKind::Stream, UnitSystem::Metric) => "meters\u{00B3}/second",
        (SiteKind::Lake, UnitSystem::Imperial) => "feet",
        (SiteKind::Lake, UnitSystem::Metric) => "meters",
    }
}

/// Scalar applied to every value when converting between unit systems.
fn conversion_factor(kind: SiteKind, from: UnitSystem, to: UnitSystem) -> f64 {
    let to_metric = match kind {
        SiteKind::Stream => FLOW_CFS_TO_CMS,
        SiteKind::Lake => LENGTH_FT_TO_M,
    };
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => to_metric,
        (UnitSystem::Metric, UnitSystem::Imperial) => 1.0 / to_metric,
        _ => 1.0,
    }
}

/// Keeps a live series table consistent under the two composable display
/// transforms: unit system and baseline-relative differencing.
///
/// Both operations mutate the table in place and run to completion within
/// the UI event that triggered them, so the chart never sees a partial sweep.
#[derive(Debug, Clone, Default)]
pub struct PlotTransform {
    is_difference: bool,
    units: UnitSystem,
    /// Baseline column values captured the first time difference mode is
    /// engaged, aligned by row index with the table and converted alongside
    /// it on every unit change. Never recaptured within a session.
    baseline: Option<Vec<Option<f64>>>,
}

impl PlotTransform {
    pub fn is_difference(&self) -> bool {
        self.is_difference
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Switch between absolute values and baseline-relative differences.
    ///
    /// `baseline_column` is the index of the baseline scenario's column among
    /// the value columns. The signed baseline adjustment is applied uniformly
    /// to every value column, the baseline's own included, so the baseline
    /// series plots as zero while differenced.
    pub fn toggle_difference(
        &mut self,
        table: &mut SeriesTable,
        baseline_column: usize,
        target: bool,
    ) {
        if self.is_difference == target {
            return;
        }

        if self.baseline.is_none() {
            self.baseline = Some(table.column_values(baseline_column));
        }
        let Some(baseline) = self.baseline.as_ref() else {
            return;
        };

        // Leaving difference mode re-derives absolute values: sign +1.
        let sign = if self.is_difference { 1.0 } else { -1.0 };
        for (row, base) in table.rows.iter_mut().zip(baseline.iter()) {
            let Some(b) = *base else { continue };
            for slot in row.values.iter_mut() {
                if let Some(v) = slot.as_mut() {
                    *v += sign * b;
                }
            }
        }

        self.is_difference = target;
    }

    /// Convert every non-null value in the table -- and the baseline
    /// snapshot, when one exists -- to the target unit system.
    pub fn set_units(&mut self, table: &mut SeriesTable, kind: SiteKind, target: UnitSystem) {
        if self.units == target {
            return;
        }
        let factor = conversion_factor(kind, self.units, target);

        for row in table.rows.iter_mut() {
            for slot in row.values.iter_mut() {
                if let Some(v) = slot.as_mut() {
                    *v *= factor;
                }
            }
        }
        if let Some(baseline) = self.baseline.as_mut() {
            for slot in baseline.iter_mut() {
                if let Some(v) = slot.as_mut() {
                    *v *= factor;
                }
            }
        }

        self.units = target;
    }
}
