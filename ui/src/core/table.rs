//! Observation table behind the parallel-coordinates predictor chart.

use serde::Serialize;

/// Column holding the grade bucket of each observation.
pub const CATEGORY_COLUMN: &str = "Label Category";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub category: String,
    /// One value per dimension; unparsable cells are NaN.
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObservationTable {
    pub dimensions: Vec<String>,
    pub rows: Vec<Observation>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("observation table is empty")]
    MissingHeader,
    #[error("observation table has no numeric columns")]
    NoDimensions,
}

impl ObservationTable {
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut lines = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());

        let header = lines.next().ok_or(TableError::MissingHeader)?;
        let columns = split_record(header);
        let category_index = columns.iter().position(|name| name == CATEGORY_COLUMN);

        let dimension_indices: Vec<usize> = (0..columns.len())
            .filter(|index| Some(*index) != category_index)
            .collect();
        if dimension_indices.is_empty() {
            return Err(TableError::NoDimensions);
        }
        let dimensions = dimension_indices
            .iter()
            .map(|index| columns[*index].clone())
            .collect();

        let rows = lines
            .map(|line| {
                let fields = split_record(line);
                let category = category_index
                    .and_then(|index| fields.get(index))
                    .cloned()
                    .unwrap_or_default();
                let values = dimension_indices
                    .iter()
                    .map(|index| {
                        fields
                            .get(*index)
                            .and_then(|cell| cell.trim().parse::<f64>().ok())
                            .unwrap_or(f64::NAN)
                    })
                    .collect();
                Observation { category, values }
            })
            .collect();

        Ok(Self { dimensions, rows })
    }

    /// Smallest and largest finite value across every dimension.
    pub fn global_extent(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .flat_map(|row| row.values.iter().copied())
            .filter(|value| value.is_finite())
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }
}

/// Split one CSV record, honouring double-quoted fields and `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\"ACC(g)\",\"EDA(μS)\",HR(bpm),TEMP(°C),Predicted Grade(%),Label Category\n\
0.5,-1.2,0.3,1.1,0.8,High\n\
-0.4,0.2,n/a,0.0,-1.5,Very Low\n";

    #[test]
    fn category_column_is_not_a_dimension() {
        let table = ObservationTable::parse(SAMPLE).unwrap();
        assert_eq!(
            table.dimensions,
            vec!["ACC(g)", "EDA(μS)", "HR(bpm)", "TEMP(°C)", "Predicted Grade(%)"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].category, "High");
        assert_eq!(table.rows[1].category, "Very Low");
    }

    #[test]
    fn bad_cells_become_nan_and_are_ignored_by_extent() {
        let table = ObservationTable::parse(SAMPLE).unwrap();
        assert!(table.rows[1].values[2].is_nan());
        assert_eq!(table.global_extent(), Some((-1.5, 1.1)));
    }

    #[test]
    fn quoted_fields_keep_commas_and_quotes() {
        assert_eq!(
            split_record("\"a,b\",\"say \"\"hi\"\"\",3"),
            vec!["a,b", "say \"hi\"", "3"]
        );
    }

    #[test]
    fn degenerate_tables_are_rejected() {
        assert_eq!(ObservationTable::parse(""), Err(TableError::MissingHeader));
        assert_eq!(
            ObservationTable::parse("Label Category\nHigh\n"),
            Err(TableError::NoDimensions)
        );
    }

    #[test]
    fn short_rows_pad_with_nan() {
        let table = ObservationTable::parse("a,b,Label Category\n1\n").unwrap();
        assert_eq!(table.rows[0].values[0], 1.0);
        assert!(table.rows[0].values[1].is_nan());
        assert_eq!(table.rows[0].category, "");
    }
}
