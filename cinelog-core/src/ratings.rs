//! Read-time rating aggregation.
//!
//! Aggregate ratings are never stored; every view derives them from the
//! review rows it fetched. One shared reduction serves the movie and TV
//! views alike so the two can never disagree on the arithmetic.

use std::collections::HashMap;

use cinelog_model::TitleId;

/// One review's contribution to a title's aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingEntry {
    pub title_id: TitleId,
    pub rating: i16,
}

/// Derived aggregate for a single title.
///
/// `average` carries full precision; rounding to whole stars is a
/// rendering concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub review_count: u64,
}

/// Reduce an unordered review collection into per-title aggregates.
///
/// Titles with no reviews have no entry in the result; callers present
/// those as "no rating" rather than zero. O(n) over the input.
pub fn summarize_ratings<I>(entries: I) -> HashMap<TitleId, RatingSummary>
where
    I: IntoIterator<Item = RatingEntry>,
{
    let mut totals: HashMap<TitleId, (i64, u64)> = HashMap::new();
    for entry in entries {
        let slot = totals.entry(entry.title_id).or_insert((0, 0));
        slot.0 += i64::from(entry.rating);
        slot.1 += 1;
    }

    totals
        .into_iter()
        .map(|(title_id, (sum, count))| {
            (
                title_id,
                RatingSummary {
                    average: sum as f64 / count as f64,
                    review_count: count,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title_id: TitleId, rating: i16) -> RatingEntry {
        RatingEntry { title_id, rating }
    }

    #[test]
    fn average_is_arithmetic_mean_per_title() {
        let a = TitleId::new();
        let b = TitleId::new();
        let summaries = summarize_ratings(vec![
            entry(a, 5),
            entry(a, 4),
            entry(b, 1),
            entry(a, 3),
        ]);

        let a_summary = summaries[&a];
        assert_eq!(a_summary.review_count, 3);
        assert!((a_summary.average - 4.0).abs() < f64::EPSILON);

        let b_summary = summaries[&b];
        assert_eq!(b_summary.review_count, 1);
        assert!((b_summary.average - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_keeps_fractional_precision() {
        let a = TitleId::new();
        let summaries = summarize_ratings(vec![entry(a, 5), entry(a, 4)]);
        assert!((summaries[&a].average - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unreviewed_titles_have_no_entry() {
        let reviewed = TitleId::new();
        let unreviewed = TitleId::new();
        let summaries = summarize_ratings(vec![entry(reviewed, 2)]);

        assert!(summaries.contains_key(&reviewed));
        assert!(!summaries.contains_key(&unreviewed));
    }

    #[test]
    fn empty_input_produces_empty_map() {
        let summaries = summarize_ratings(Vec::new());
        assert!(summaries.is_empty());
    }
}
