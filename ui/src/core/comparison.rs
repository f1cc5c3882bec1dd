//! A loaded feature pair, ready to chart, and the request bookkeeping that
//! keeps slow loads from overwriting newer selections.

use serde::Serialize;

use super::align::{align_pairs, YRange};
use super::features::Feature;
use super::series::ParsedSeries;

/// One subject in a comparison together with its shared axis range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub subject: ParsedSeries,
    pub range: YRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub feature: Feature,
    pub panels: Vec<ChartPanel>,
}

impl Comparison {
    pub fn new(feature: Feature, subjects: Vec<ParsedSeries>) -> Self {
        let summaries: Vec<_> = subjects.iter().map(|subject| subject.summary).collect();
        let ranges = align_pairs(&summaries);
        let panels = subjects
            .into_iter()
            .zip(ranges)
            .map(|(subject, range)| ChartPanel { subject, range })
            .collect();
        Self { feature, panels }
    }
}

/// Hands out increasing request ids; only the latest one may land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    /// Start a new request, superseding every earlier one.
    pub fn begin(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    pub fn is_current(&self, request_id: u64) -> bool {
        request_id == self.latest
    }
}
