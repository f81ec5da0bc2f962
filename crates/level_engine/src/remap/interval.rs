use std::ops::{Range, RangeInclusive};

/// Sorted, merged set of half-open `u32` spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    spans: Vec<Range<u32>>,
}

impl IntervalSet {
    /// Sorts by start and folds overlapping or touching spans together. Empty
    /// spans are dropped.
    pub fn normalize(ranges: impl IntoIterator<Item = Range<u32>>) -> Self {
        let mut sorted = ranges
            .into_iter()
            .filter(|range| range.start < range.end)
            .collect::<Vec<_>>();
        sorted.sort_by_key(|range| range.start);

        let mut spans = Vec::<Range<u32>>::with_capacity(sorted.len());
        for range in sorted {
            match spans.last_mut() {
                Some(last) if range.start <= last.end => {
                    last.end = last.end.max(range.end);
                }
                _ => spans.push(range),
            }
        }
        Self { spans }
    }

    /// Inclusive spans are converted to half-open ones; an end of `u32::MAX`
    /// saturates, so that single value cannot be covered.
    pub fn from_inclusive(ranges: impl IntoIterator<Item = RangeInclusive<u32>>) -> Self {
        Self::normalize(
            ranges
                .into_iter()
                .map(|range| *range.start()..range.end().saturating_add(1)),
        )
    }

    pub fn spans(&self) -> &[Range<u32>] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn contains(&self, value: u32) -> bool {
        let index = self.spans.partition_point(|span| span.end <= value);
        self.spans
            .get(index)
            .is_some_and(|span| span.start <= value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_overlapping_and_adjacent_spans() {
        let set = IntervalSet::normalize([10..20, 1..3, 3..5, 15..25, 40..41, 7..7]);
        assert_eq!(set.spans(), &[1..5, 10..25, 40..41]);
    }

    #[test]
    fn contained_spans_do_not_shrink_the_enclosing_one() {
        let set = IntervalSet::normalize([1..100, 5..10, 50..60]);
        assert_eq!(set.spans(), &[1..100]);
    }

    #[test]
    fn contains_uses_half_open_bounds() {
        let set = IntervalSet::normalize([30..41, 901..903]);
        for value in [30, 35, 40, 901, 902] {
            assert!(set.contains(value), "value={value}");
        }
        for value in [0, 29, 41, 900, 903, u32::MAX] {
            assert!(!set.contains(value), "value={value}");
        }
    }

    #[test]
    fn inclusive_constructor_covers_the_end_value() {
        let set = IntervalSet::from_inclusive([30..=30, 40..=40, 901..=902]);
        assert_eq!(set.spans(), &[30..31, 40..41, 901..903]);
        assert!(set.contains(902));
    }

    #[test]
    fn empty_set_contains_nothing() {
        let set = IntervalSet::normalize(std::iter::empty());
        assert!(set.is_empty());
        assert!(!set.contains(1));
    }

    #[test]
    fn binary_search_agrees_with_linear_scan() {
        let ranges = (0..200u32)
            .map(|i| (i * 37 % 500)..(i * 37 % 500 + i % 7))
            .collect::<Vec<_>>();
        let set = IntervalSet::normalize(ranges.clone());
        for value in 0..520 {
            let expected = ranges.iter().any(|range| range.contains(&value));
            assert_eq!(set.contains(value), expected, "value={value}");
        }
    }
}
