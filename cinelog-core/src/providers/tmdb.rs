use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const TMDB_V3_BASE: &str = "https://api.themoviedb.org/3";

/// Poster rendition served to clients.
const POSTER_SIZE: &str = "w500";
/// Backdrop rendition served to clients.
const BACKDROP_SIZE: &str = "w1280";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// One page of a discover response.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverPage<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverMovieItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_count: i32,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverTvItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub first_air_date: Option<NaiveDate>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_count: i32,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, Serialize)]
struct DiscoverMovieQuery<'a> {
    api_key: &'a str,
    sort_by: &'a str,
    include_adult: bool,
    page: u32,
    #[serde(rename = "vote_count.gte")]
    vote_count_gte: u32,
}

#[derive(Debug, Clone, Serialize)]
struct DiscoverTvQuery<'a> {
    api_key: &'a str,
    sort_by: &'a str,
    include_adult: bool,
    page: u32,
    #[serde(rename = "vote_count.gte")]
    vote_count_gte: u32,
}

/// Thin TMDB v3 client covering the discover endpoints the seeder uses.
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    async fn get_tmdb_json<Q, T>(&self, url: &str, query: &Q) -> Result<T, ProviderError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(ProviderError::from);
        }

        #[derive(Debug, Deserialize)]
        struct TmdbErrorBody {
            #[serde(default)]
            status_message: Option<String>,
        }

        let message = response
            .json::<TmdbErrorBody>()
            .await
            .ok()
            .and_then(|body| body.status_message)
            .unwrap_or_else(|| format!("TMDB request failed with status {}", status));

        match status.as_u16() {
            401 => Err(ProviderError::InvalidApiKey),
            404 => Err(ProviderError::NotFound),
            429 => Err(ProviderError::RateLimited),
            _ => Err(ProviderError::ApiError(message)),
        }
    }

    /// Fetch one page of popular movies with at least `min_vote_count` votes.
    pub async fn discover_popular_movies(
        &self,
        page: u32,
        min_vote_count: u32,
    ) -> Result<DiscoverPage<DiscoverMovieItem>, ProviderError> {
        let query = DiscoverMovieQuery {
            api_key: &self.api_key,
            sort_by: "popularity.desc",
            include_adult: false,
            page: page.max(1),
            vote_count_gte: min_vote_count,
        };

        self.get_tmdb_json(&format!("{TMDB_V3_BASE}/discover/movie"), &query)
            .await
    }

    /// Fetch one page of popular TV series with at least `min_vote_count` votes.
    pub async fn discover_popular_tv(
        &self,
        page: u32,
        min_vote_count: u32,
    ) -> Result<DiscoverPage<DiscoverTvItem>, ProviderError> {
        let query = DiscoverTvQuery {
            api_key: &self.api_key,
            sort_by: "popularity.desc",
            include_adult: false,
            page: page.max(1),
            vote_count_gte: min_vote_count,
        };

        self.get_tmdb_json(&format!("{TMDB_V3_BASE}/discover/tv"), &query)
            .await
    }
}

/// Build a poster URL from a TMDB path fragment
pub fn poster_url(path: &str) -> String {
    format!("{TMDB_IMAGE_BASE}/{POSTER_SIZE}{path}")
}

/// Build a backdrop URL from a TMDB path fragment
pub fn backdrop_url(path: &str) -> String {
    format!("{TMDB_IMAGE_BASE}/{BACKDROP_SIZE}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_or_fall_back_to_none() {
        assert_eq!(
            parse_date("1999-03-31"),
            NaiveDate::from_ymd_opt(1999, 3, 31)
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("  "), None);
        assert_eq!(parse_date("next tuesday"), None);
    }

    #[test]
    fn image_urls_concatenate_the_cdn_prefix() {
        assert_eq!(
            poster_url("/abc123.jpg"),
            "https://image.tmdb.org/t/p/w500/abc123.jpg"
        );
        assert_eq!(
            backdrop_url("/abc123.jpg"),
            "https://image.tmdb.org/t/p/w1280/abc123.jpg"
        );
    }

    #[test]
    fn discover_page_deserializes_sparse_items() {
        let json = r#"{
            "page": 1,
            "total_pages": 50,
            "total_results": 1000,
            "results": [
                {
                    "id": 603,
                    "title": "The Matrix",
                    "overview": "A hacker learns the truth.",
                    "release_date": "1999-03-31",
                    "poster_path": "/p.jpg",
                    "backdrop_path": null,
                    "popularity": 91.5,
                    "vote_count": 26000,
                    "vote_average": 8.2
                },
                {
                    "id": 999,
                    "title": "Unreleased",
                    "release_date": ""
                }
            ]
        }"#;

        let page: DiscoverPage<DiscoverMovieItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 2);

        let matrix = &page.results[0];
        assert_eq!(matrix.release_date, NaiveDate::from_ymd_opt(1999, 3, 31));
        assert_eq!(matrix.backdrop_path, None);

        let sparse = &page.results[1];
        assert_eq!(sparse.release_date, None);
        assert_eq!(sparse.poster_path, None);
        assert_eq!(sparse.vote_count, 0);
    }

    #[test]
    fn tv_items_use_first_air_date_and_name() {
        let json = r#"{
            "page": 2,
            "total_pages": 50,
            "total_results": 1000,
            "results": [
                { "id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20" }
            ]
        }"#;

        let page: DiscoverPage<DiscoverTvItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results[0].name, "Breaking Bad");
        assert_eq!(
            page.results[0].first_air_date,
            NaiveDate::from_ymd_opt(2008, 1, 20)
        );
    }
}
