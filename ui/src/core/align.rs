//! Shared Y-axis ranges for paired subjects.

use serde::Serialize;

use super::series::SeriesSummary;

/// Inclusive integer-rounded value range shared by a chart pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
}

impl YRange {
    /// Range of a single summary, rounded outward.
    pub fn of(summary: &SeriesSummary) -> Self {
        Self {
            min: summary.min.floor(),
            max: summary.max.ceil(),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &YRange) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// One range per summary, in input order.
///
/// Items are paired by position: (0, 1), (2, 3), … and both members of a pair
/// receive the union of their extrema. A member without samples does not
/// widen its partner's range. A trailing unpaired item keeps its own range.
pub fn align_pairs(summaries: &[SeriesSummary]) -> Vec<YRange> {
    let mut ranges = Vec::with_capacity(summaries.len());
    for chunk in summaries.chunks(2) {
        match chunk {
            [first, second] => {
                let shared = match (first.count, second.count) {
                    (_, 0) => YRange::of(first),
                    (0, _) => YRange::of(second),
                    _ => YRange::of(first).union(&YRange::of(second)),
                };
                ranges.push(shared);
                ranges.push(shared);
            }
            [single] => ranges.push(YRange::of(single)),
            _ => {}
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(min: f64, max: f64) -> SeriesSummary {
        SeriesSummary {
            count: 2,
            mean: (min + max) / 2.0,
            min,
            max,
        }
    }

    #[test]
    fn pair_shares_outward_rounded_range() {
        let a = summary(61.4, 88.2);
        let b = summary(58.9, 79.0);
        let ranges = align_pairs(&[a, b]);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0], ranges[1]);
        assert_eq!(ranges[0], YRange { min: 58.0, max: 89.0 });
        for s in [a, b] {
            assert!(ranges[0].min <= s.min);
            assert!(ranges[0].max >= s.max);
        }
    }

    #[test]
    fn odd_trailing_item_is_self_aligned() {
        let ranges = align_pairs(&[summary(0.2, 0.8), summary(1.5, 2.5), summary(-3.5, 4.1)]);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], YRange { min: 0.0, max: 3.0 });
        assert_eq!(ranges[2], YRange { min: -4.0, max: 5.0 });
    }

    #[test]
    fn pairs_do_not_leak_into_each_other() {
        let ranges = align_pairs(&[
            summary(10.0, 11.0),
            summary(12.0, 13.0),
            summary(100.0, 200.0),
            summary(150.0, 250.0),
        ]);
        assert_eq!(ranges[1], YRange { min: 10.0, max: 13.0 });
        assert_eq!(ranges[2], YRange { min: 100.0, max: 250.0 });
    }

    #[test]
    fn empty_partner_keeps_the_other_range() {
        let empty = SeriesSummary::default();
        let temp = summary(36.2, 36.9);

        let ranges = align_pairs(&[temp, empty]);
        assert_eq!(ranges, vec![YRange { min: 36.0, max: 37.0 }; 2]);
        let ranges = align_pairs(&[empty, temp]);
        assert_eq!(ranges, vec![YRange { min: 36.0, max: 37.0 }; 2]);
        let ranges = align_pairs(&[empty, empty]);
        assert_eq!(ranges, vec![YRange { min: 0.0, max: 0.0 }; 2]);
    }

    #[test]
    fn integral_extrema_stay_put() {
        let range = YRange::of(&summary(32.0, 34.0));
        assert_eq!(range.span(), 2.0);
        assert!(range.contains(32.0) && range.contains(34.0));
        assert!(align_pairs(&[]).is_empty());
    }
}
