use crate::data::datetime;

/// One plotted row: a timestamp plus one value slot per model scenario.
/// `None` is a missing sample and survives every transform untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub timestamp: f64,
    pub values: Vec<Option<f64>>,
}

/// The live backing store for a site's scenario chart.
///
/// Rows are timestamp-ascending, mutated in place by the transform engine;
/// the chart rebuilds its plot points from this table every frame, so a
/// completed sweep is the only state a redraw can observe.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    /// Model scenario ids, one per value column. The timestamp column of the
    /// source CSV is not part of this list.
    pub labels: Vec<String>,
    pub rows: Vec<SeriesRow>,
}

impl SeriesTable {
    /// Parse the per-site plot CSV: header `Date,<id>,<id>,...`, then one row
    /// per day with empty cells for missing samples.
    pub fn from_csv(text: &str) -> Result<Self, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let header = match records.next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => return Err(format!("Invalid plot data header: {e}")),
            None => return Err("Plot data is empty".to_string()),
        };
        if header.len() < 2 {
            return Err("Plot data has no value columns".to_string());
        }
        let labels: Vec<String> = header
            .iter()
            .skip(1)
            .map(|s| s.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in records {
            let record = match result {
                Ok(r) => r,
                Err(_) => continue,
            };
            let Some(date_cell) = record.get(0) else {
                continue;
            };
            let Some(timestamp) = datetime::parse_date(date_cell) else {
                continue;
            };

            let mut values = Vec::with_capacity(labels.len());
            for i in 0..labels.len() {
                let cell = record.get(i + 1).unwrap_or("").trim();
                if cell.is_empty() {
                    values.push(None);
                } else {
                    match cell.parse::<f64>() {
                        Ok(v) if v.is_finite() => values.push(Some(v)),
                        _ => values.push(None),
                    }
                }
            }
            rows.push(SeriesRow { timestamp, values });
        }

        if rows.is_empty() {
            return Err("Plot data has no rows".to_string());
        }

        Ok(Self { labels, rows })
    }

    /// Column index of a scenario id among the value columns (the timestamp
    /// column is excluded from this numbering).
    pub fn column_index(&self, model_id: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == model_id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of one column, aligned by row index.
    pub fn column_values(&self, column: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| r.values.get(column).copied().flatten())
            .collect()
    }

    /// Timestamp range of the table: (first, last).
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let first = self.rows.first()?.timestamp;
        let last = self.rows.last()?.timestamp;
        Some((first, last))
    }
}
