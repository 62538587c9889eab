use crate::data::table::SeriesTable;

/// Summary statistics for one scenario column, skipping missing samples.
#[derive(Debug, Clone)]
pub struct ScenarioStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ScenarioStats {
    /// Compute over one value column of the table. Returns `None` when the
    /// column has no samples at all.
    pub fn compute(table: &SeriesTable, column: usize) -> Option<Self> {
        let mut count = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;

        for row in &table.rows {
            let Some(v) = row.values.get(column).copied().flatten() else {
                continue;
            };
            count += 1;
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }

        if count == 0 {
            return None;
        }
        Some(Self {
            count,
            min,
            max,
            mean: sum / count as f64,
        })
    }
}
