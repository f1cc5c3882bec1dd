//! Per-subject time series parsed from `minute,value[,grade]` CSV exports.
//!
//! Every series has exactly [`SLOT_COUNT`] slots, one per minute of the exam
//! window. Rows that cannot be placed into a slot are dropped rather than
//! reported; a missing slot is a gap, not an error.

use serde::Serialize;

/// Last minute of the recording window (inclusive).
pub const LAST_MINUTE: usize = 180;

/// Number of slots in every series (minutes 0..=180).
pub const SLOT_COUNT: usize = LAST_MINUTE + 1;

/// Fixed-length sequence of optional samples indexed by minute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    slots: Vec<Option<f64>>,
}

impl Default for Series {
    fn default() -> Self {
        Self::empty()
    }
}

impl Series {
    pub fn empty() -> Self {
        Self {
            slots: vec![None; SLOT_COUNT],
        }
    }

    /// Sample at `minute`, or `None` for a gap or an out-of-range minute.
    pub fn get(&self, minute: usize) -> Option<f64> {
        self.slots.get(minute).copied().flatten()
    }

    /// Writes a sample. Minutes past [`LAST_MINUTE`] are ignored.
    pub fn set(&mut self, minute: usize, value: f64) {
        if let Some(slot) = self.slots.get_mut(minute) {
            *slot = Some(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// `(minute, sample)` pairs for every slot, gaps included.
    pub fn points(&self) -> impl Iterator<Item = (usize, Option<f64>)> + '_ {
        self.slots.iter().copied().enumerate()
    }

    /// Present samples only, in minute order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }
}

/// Mean / min / max over the present samples of a [`Series`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesSummary {
    /// An empty series summarizes to all zeros.
    pub fn from_series(series: &Series) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in series.values() {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            count,
            mean: sum / count as f64,
            min,
            max,
        }
    }
}

/// Exam grade attached to the first data row of a subject file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Grade {
    Score(f64),
    #[default]
    Unknown,
}

impl Grade {
    pub fn score(&self) -> Option<f64> {
        match self {
            Grade::Score(value) => Some(*value),
            Grade::Unknown => None,
        }
    }
}

/// A parsed subject file: series, statistics, grade and display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSeries {
    pub label: String,
    pub series: Series,
    pub summary: SeriesSummary,
    pub grade: Grade,
    /// Data rows that could not be placed into a slot.
    pub skipped_rows: usize,
}

/// Parse a `minute,value[,grade]` CSV document.
///
/// The first line is always treated as the header. Rows without two finite
/// numeric columns, with a fractional minute, or with a minute outside
/// `0..=180` are skipped. A repeated minute keeps the last value seen.
pub fn parse_series(text: &str) -> ParsedSeries {
    let mut series = Series::empty();
    let mut skipped_rows = 0usize;
    let mut grade = Grade::Unknown;

    for (line_index, raw_line) in text.split('\n').enumerate() {
        if line_index == 0 {
            continue;
        }
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let minute = fields.next().and_then(parse_minute);
        let value = fields.next().and_then(parse_finite);

        if line_index == 1 {
            grade = fields
                .next()
                .and_then(parse_finite)
                .map(Grade::Score)
                .unwrap_or(Grade::Unknown);
        }

        match (minute, value) {
            (Some(minute), Some(value)) => series.set(minute, value),
            _ => skipped_rows += 1,
        }
    }

    let summary = SeriesSummary::from_series(&series);
    ParsedSeries {
        label: String::new(),
        series,
        summary,
        grade,
        skipped_rows,
    }
}

impl ParsedSeries {
    /// Attach a display label derived from the source file name.
    pub fn with_source(mut self, file_name: &str) -> Self {
        self.label = display_label(file_name);
        self
    }
}

/// `hr/hr_S5_Midterm2.csv` → `hr S5 Midterm2`.
pub fn display_label(file_name: &str) -> String {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    base.replace(".csv", "").replace('_', " ")
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_minute(field: &str) -> Option<usize> {
    let minute = parse_finite(field)?;
    if minute.fract() != 0.0 || minute < 0.0 || minute > LAST_MINUTE as f64 {
        return None;
    }
    Some(minute as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_example() {
        let parsed = parse_series("minute,value\n0,70\n1,72\n2,NaN\n200,80");

        assert_eq!(parsed.series.len(), SLOT_COUNT);
        assert_eq!(parsed.series.get(0), Some(70.0));
        assert_eq!(parsed.series.get(1), Some(72.0));
        assert_eq!(parsed.series.get(2), None);
        assert_eq!(parsed.series.present_count(), 2);
        assert_eq!(parsed.skipped_rows, 2);
        assert_eq!(format!("{:.2}", parsed.summary.mean), "71.00");
        assert_eq!(parsed.summary.min, 70.0);
        assert_eq!(parsed.summary.max, 72.0);
    }

    #[test]
    fn invalid_rows_never_reach_statistics() {
        let text = "minute,value\n-1,500\n181,500\nabc,500\n3,\n4,x\n5.5,500\n6,inf\n10,20";
        let parsed = parse_series(text);

        assert_eq!(parsed.series.present_count(), 1);
        assert_eq!(parsed.series.get(10), Some(20.0));
        assert_eq!(parsed.summary.mean, 20.0);
        assert_eq!(parsed.summary.max, 20.0);
        assert_eq!(parsed.skipped_rows, 7);
    }

    #[test]
    fn empty_input_has_zero_mean() {
        let parsed = parse_series("minute,value\n");
        assert!(parsed.series.is_empty());
        assert_eq!(parsed.summary, SeriesSummary::default());
        assert_eq!(parsed.summary.mean, 0.0);
    }

    #[test]
    fn mean_is_sum_over_count() {
        let parsed = parse_series("minute,value\n0,1\n1,2\n2,3\n180,10\n");
        assert_eq!(parsed.summary.count, 4);
        assert!((parsed.summary.mean - 4.0).abs() < 1e-12);
        assert_eq!(parsed.series.get(LAST_MINUTE), Some(10.0));
    }

    #[test]
    fn grade_comes_from_first_data_row_only() {
        let parsed = parse_series("minute,value,grade\n0,60,82\n1,61,55\n");
        assert_eq!(parsed.grade, Grade::Score(82.0));
        assert_eq!(parsed.series.get(1), Some(61.0));

        let missing = parse_series("minute,value\n0,60\n1,61,55\n");
        assert_eq!(missing.grade, Grade::Unknown);

        let malformed = parse_series("minute,value,grade\n0,60,A+\n");
        assert_eq!(malformed.grade, Grade::Unknown);
        assert_eq!(malformed.series.get(0), Some(60.0));
    }

    #[test]
    fn later_duplicate_minute_wins() {
        let parsed = parse_series("minute,value\n5,1\n5,9\n");
        assert_eq!(parsed.series.get(5), Some(9.0));
        assert_eq!(parsed.summary.mean, 9.0);
        assert_eq!(parsed.summary.count, 1);
    }

    #[test]
    fn crlf_input_parses() {
        let parsed = parse_series("minute,value\r\n0,1.5\r\n1,2.5\r\n");
        assert_eq!(parsed.series.get(0), Some(1.5));
        assert_eq!(parsed.series.get(1), Some(2.5));
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "minute,value,grade\n0,70,90\n1,72\n2,NaN\n200,80\n";
        assert_eq!(parse_series(text), parse_series(text));
    }

    #[test]
    fn label_strips_directory_and_extension() {
        assert_eq!(display_label("hr/hr_S5_Midterm2.csv"), "hr S5 Midterm2");
        assert_eq!(display_label("temp_S8_Final.csv"), "temp S8 Final");
    }
}
