//! Transform TMDB discover results into catalog insert rows.
//!
//! Items without a usable display name are dropped; everything else
//! maps field-for-field. Release year comes from the (already parsed)
//! date, image URLs from the fixed CDN prefixes; both become NULL when
//! the source value is absent.

use chrono::Datelike;

use cinelog_model::{NewTitle, TitleKind};

use crate::providers::tmdb::{DiscoverMovieItem, DiscoverTvItem, backdrop_url, poster_url};

/// How many rows each catalog insert carries.
pub const INSERT_BATCH_SIZE: usize = 50;

/// Map one discover movie item; `None` when the name is blank.
pub fn title_from_movie(item: DiscoverMovieItem) -> Option<NewTitle> {
    if item.title.trim().is_empty() {
        return None;
    }

    Some(NewTitle {
        kind: TitleKind::Movie,
        name: item.title,
        overview: item.overview.filter(|o| !o.is_empty()),
        release_year: item.release_date.map(|date| date.year()),
        poster_url: item.poster_path.as_deref().map(poster_url),
        backdrop_url: item.backdrop_path.as_deref().map(backdrop_url),
        tmdb_id: item.id as i64,
        popularity: item.popularity,
        vote_count: item.vote_count,
        vote_average: item.vote_average,
    })
}

/// Map one discover TV item; `None` when the name is blank.
pub fn title_from_tv(item: DiscoverTvItem) -> Option<NewTitle> {
    if item.name.trim().is_empty() {
        return None;
    }

    Some(NewTitle {
        kind: TitleKind::Tv,
        name: item.name,
        overview: item.overview.filter(|o| !o.is_empty()),
        release_year: item.first_air_date.map(|date| date.year()),
        poster_url: item.poster_path.as_deref().map(poster_url),
        backdrop_url: item.backdrop_path.as_deref().map(backdrop_url),
        tmdb_id: item.id as i64,
        popularity: item.popularity,
        vote_count: item.vote_count,
        vote_average: item.vote_average,
    })
}

/// Map a fetched movie page, dropping blank-named items.
pub fn titles_from_movies(items: Vec<DiscoverMovieItem>) -> Vec<NewTitle> {
    items.into_iter().filter_map(title_from_movie).collect()
}

/// Map a fetched TV page, dropping blank-named items.
pub fn titles_from_tv(items: Vec<DiscoverTvItem>) -> Vec<NewTitle> {
    items.into_iter().filter_map(title_from_tv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn movie(title: &str) -> DiscoverMovieItem {
        DiscoverMovieItem {
            id: 603,
            title: title.to_string(),
            overview: Some("A hacker learns the truth.".to_string()),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31),
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: Some("/b.jpg".to_string()),
            popularity: 91.5,
            vote_count: 26000,
            vote_average: 8.2,
        }
    }

    #[test]
    fn maps_every_field() {
        let row = title_from_movie(movie("The Matrix")).unwrap();
        assert_eq!(row.kind, TitleKind::Movie);
        assert_eq!(row.name, "The Matrix");
        assert_eq!(row.release_year, Some(1999));
        assert_eq!(
            row.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );
        assert_eq!(
            row.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/b.jpg")
        );
        assert_eq!(row.tmdb_id, 603);
        assert_eq!(row.vote_count, 26000);
    }

    #[test]
    fn blank_names_are_dropped() {
        assert!(title_from_movie(movie("")).is_none());
        assert!(title_from_movie(movie("   ")).is_none());

        let kept = titles_from_movies(vec![movie(""), movie("Kept"), movie("  ")]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Kept");
    }

    #[test]
    fn missing_date_and_images_become_null() {
        let mut item = movie("Sparse");
        item.release_date = None;
        item.poster_path = None;
        item.backdrop_path = None;

        let row = title_from_movie(item).unwrap();
        assert_eq!(row.release_year, None);
        assert_eq!(row.poster_url, None);
        assert_eq!(row.backdrop_url, None);
    }

    #[test]
    fn tv_items_map_to_the_tv_kind() {
        let item = DiscoverTvItem {
            id: 1396,
            name: "Breaking Bad".to_string(),
            overview: None,
            first_air_date: NaiveDate::from_ymd_opt(2008, 1, 20),
            poster_path: None,
            backdrop_path: None,
            popularity: 80.0,
            vote_count: 12000,
            vote_average: 8.9,
        };

        let row = title_from_tv(item).unwrap();
        assert_eq!(row.kind, TitleKind::Tv);
        assert_eq!(row.release_year, Some(2008));
    }

    #[test]
    fn batch_arithmetic_matches_the_insert_loop() {
        // N valid rows turn into ceil(N / 50) insert calls.
        for (total, batches) in [(0usize, 0usize), (1, 1), (50, 1), (51, 2), (237, 5)] {
            assert_eq!(total.div_ceil(INSERT_BATCH_SIZE), batches, "total {total}");
        }
    }
}
