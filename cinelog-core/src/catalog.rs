//! Client-facing catalog pipeline: search, kind filter, and sort.
//!
//! The pipeline is pure: it takes the already-joined set of titles and
//! rating summaries and returns the filtered, ordered view. Titles that
//! lack the active sort key (no release year, or no reviews for the
//! rating sorts) order after every title that has it, in both sort
//! directions; ties break by descending popularity so output stays
//! stable across re-fetches.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use cinelog_model::{Title, TitleKind};

use crate::ratings::RatingSummary;

/// Kind restriction applied to the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Movie,
    Tv,
}

impl KindFilter {
    pub fn matches(&self, kind: TitleKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Movie => kind == TitleKind::Movie,
            KindFilter::Tv => kind == TitleKind::Tv,
        }
    }
}

/// User-selectable sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Release year, newest first (default).
    #[default]
    Newest,
    /// Release year, oldest first.
    Oldest,
    /// Average rating, best first.
    BestRated,
    /// Average rating, worst first.
    WorstRated,
}

/// A title joined with its derived rating, as rendered by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub title: Title,
    pub rating: Option<RatingSummary>,
}

impl CatalogEntry {
    fn year_key(&self) -> Option<i32> {
        self.title.release_year
    }

    fn rating_key(&self) -> Option<f64> {
        self.rating.map(|summary| summary.average)
    }
}

/// The catalog view selection: free-text search, kind filter, sort key.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogQuery<'a> {
    pub search: Option<&'a str>,
    pub kind: KindFilter,
    pub sort: SortKey,
}

/// Apply search, kind filter, and sort, in that order.
pub fn filter_and_sort(
    entries: Vec<CatalogEntry>,
    query: &CatalogQuery<'_>,
) -> Vec<CatalogEntry> {
    let needle = query
        .search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut selected: Vec<CatalogEntry> = entries
        .into_iter()
        .filter(|entry| query.kind.matches(entry.title.kind))
        .filter(|entry| match &needle {
            Some(needle) => entry.title.name.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    selected.sort_by(|a, b| {
        let ord = match query.sort {
            SortKey::Newest => compare_keys(a.year_key(), b.year_key(), true),
            SortKey::Oldest => compare_keys(a.year_key(), b.year_key(), false),
            SortKey::BestRated => compare_keys(a.rating_key(), b.rating_key(), true),
            SortKey::WorstRated => compare_keys(a.rating_key(), b.rating_key(), false),
        };
        ord.then_with(|| {
            b.title
                .popularity
                .partial_cmp(&a.title.popularity)
                .unwrap_or(Ordering::Equal)
        })
    });

    selected
}

/// Compare optional sort keys. Absent keys collate after present ones
/// regardless of direction.
fn compare_keys<K: PartialOrd>(a: Option<K>, b: Option<K>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if descending { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelog_model::TitleId;
    use chrono::Utc;

    fn title(name: &str, kind: TitleKind, year: Option<i32>, popularity: f64) -> Title {
        Title {
            id: TitleId::new(),
            kind,
            name: name.to_string(),
            overview: None,
            release_year: year,
            poster_url: None,
            backdrop_url: None,
            tmdb_id: 1,
            popularity,
            vote_count: 1000,
            vote_average: 7.0,
            created_at: Utc::now(),
        }
    }

    fn entry(name: &str, kind: TitleKind, year: Option<i32>, average: Option<f64>) -> CatalogEntry {
        CatalogEntry {
            title: title(name, kind, year, 1.0),
            rating: average.map(|average| RatingSummary {
                average,
                review_count: 1,
            }),
        }
    }

    fn names(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.name.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let entries = vec![
            entry("The Matrix", TitleKind::Movie, Some(1999), None),
            entry("Matlock", TitleKind::Tv, Some(1986), None),
            entry("Inception", TitleKind::Movie, Some(2010), None),
        ];

        let query = CatalogQuery {
            search: Some("mat"),
            ..Default::default()
        };
        let result = filter_and_sort(entries, &query);
        assert_eq!(names(&result), vec!["The Matrix", "Matlock"]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let entries = vec![
            entry("A", TitleKind::Movie, Some(2001), None),
            entry("B", TitleKind::Tv, Some(2002), None),
        ];

        let query = CatalogQuery {
            search: Some("   "),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(entries, &query).len(), 2);
    }

    #[test]
    fn kind_filter_selects_one_category() {
        let entries = vec![
            entry("Movie", TitleKind::Movie, Some(2001), None),
            entry("Show", TitleKind::Tv, Some(2002), None),
        ];

        let query = CatalogQuery {
            kind: KindFilter::Tv,
            ..Default::default()
        };
        assert_eq!(names(&filter_and_sort(entries, &query)), vec!["Show"]);
    }

    #[test]
    fn year_sorts_reverse_each_other_for_dated_titles() {
        let entries = vec![
            entry("Mid", TitleKind::Movie, Some(2005), None),
            entry("New", TitleKind::Movie, Some(2020), None),
            entry("Old", TitleKind::Movie, Some(1990), None),
        ];

        let newest = filter_and_sort(
            entries.clone(),
            &CatalogQuery {
                sort: SortKey::Newest,
                ..Default::default()
            },
        );
        assert_eq!(names(&newest), vec!["New", "Mid", "Old"]);

        let oldest = filter_and_sort(
            entries,
            &CatalogQuery {
                sort: SortKey::Oldest,
                ..Default::default()
            },
        );
        assert_eq!(names(&oldest), vec!["Old", "Mid", "New"]);
    }

    #[test]
    fn undated_titles_sort_last_in_both_directions() {
        let entries = vec![
            entry("Undated", TitleKind::Movie, None, None),
            entry("Dated", TitleKind::Movie, Some(2000), None),
        ];

        for sort in [SortKey::Newest, SortKey::Oldest] {
            let result = filter_and_sort(
                entries.clone(),
                &CatalogQuery {
                    sort,
                    ..Default::default()
                },
            );
            assert_eq!(names(&result), vec!["Dated", "Undated"], "sort {sort:?}");
        }
    }

    #[test]
    fn rating_sorts_place_unrated_last() {
        let entries = vec![
            entry("Unrated", TitleKind::Movie, Some(2001), None),
            entry("Low", TitleKind::Movie, Some(2002), Some(1.5)),
            entry("High", TitleKind::Movie, Some(2003), Some(4.5)),
        ];

        let best = filter_and_sort(
            entries.clone(),
            &CatalogQuery {
                sort: SortKey::BestRated,
                ..Default::default()
            },
        );
        assert_eq!(names(&best), vec!["High", "Low", "Unrated"]);

        let worst = filter_and_sort(
            entries,
            &CatalogQuery {
                sort: SortKey::WorstRated,
                ..Default::default()
            },
        );
        assert_eq!(names(&worst), vec!["Low", "High", "Unrated"]);
    }

    #[test]
    fn ties_break_by_popularity_descending() {
        let mut a = entry("Less popular", TitleKind::Movie, Some(2000), None);
        a.title.popularity = 10.0;
        let mut b = entry("More popular", TitleKind::Movie, Some(2000), None);
        b.title.popularity = 90.0;

        let result = filter_and_sort(vec![a, b], &CatalogQuery::default());
        assert_eq!(names(&result), vec!["More popular", "Less popular"]);
    }
}
