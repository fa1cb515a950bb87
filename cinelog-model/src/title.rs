use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::TitleId;

/// Simple enum for catalog entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    /// Feature film
    Movie,
    /// Television series
    Tv,
}

impl TitleKind {
    /// Stable text form used for storage and query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Tv => "tv",
        }
    }
}

impl Display for TitleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored kind value is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown title kind: {0}")]
pub struct TitleKindParseError(pub String);

impl FromStr for TitleKind {
    type Err = TitleKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(TitleKind::Movie),
            "tv" => Ok(TitleKind::Tv),
            other => Err(TitleKindParseError(other.to_string())),
        }
    }
}

/// A catalog entry: one movie or one TV series.
///
/// Rows are written only by the seeding process and treated as immutable
/// by the application; a re-seed replaces the whole catalog. The
/// aggregate rating is intentionally absent: it is recomputed from
/// reviews at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub kind: TitleKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    pub tmdb_id: i64,
    pub popularity: f64,
    pub vote_count: i32,
    pub vote_average: f64,
    pub created_at: DateTime<Utc>,
}

/// Insert shape produced by the seeding transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTitle {
    pub kind: TitleKind,
    pub name: String,
    pub overview: Option<String>,
    pub release_year: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub tmdb_id: i64,
    pub popularity: f64,
    pub vote_count: i32,
    pub vote_average: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_text() {
        for kind in [TitleKind::Movie, TitleKind::Tv] {
            assert_eq!(kind.as_str().parse::<TitleKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("season".parse::<TitleKind>().is_err());
        assert!("".parse::<TitleKind>().is_err());
    }
}
