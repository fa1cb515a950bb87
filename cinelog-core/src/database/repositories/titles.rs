use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use cinelog_model::{NewTitle, Title, TitleId, TitleKind};

use crate::database::ports::titles::TitlesRepository;
use crate::error::{CoreError, Result};

/// PostgreSQL-backed implementation of the `TitlesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresTitlesRepository {
    pool: PgPool,
}

impl PostgresTitlesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TitleRow {
    id: Uuid,
    kind: String,
    name: String,
    overview: Option<String>,
    release_year: Option<i32>,
    poster_url: Option<String>,
    backdrop_url: Option<String>,
    tmdb_id: i64,
    popularity: f64,
    vote_count: i32,
    vote_average: f64,
    created_at: DateTime<Utc>,
}

impl TitleRow {
    fn into_title(self) -> Result<Title> {
        let kind = self
            .kind
            .parse::<TitleKind>()
            .map_err(|e| CoreError::Internal(format!("Corrupt title row: {}", e)))?;

        Ok(Title {
            id: TitleId(self.id),
            kind,
            name: self.name,
            overview: self.overview,
            release_year: self.release_year,
            poster_url: self.poster_url,
            backdrop_url: self.backdrop_url,
            tmdb_id: self.tmdb_id,
            popularity: self.popularity,
            vote_count: self.vote_count,
            vote_average: self.vote_average,
            created_at: self.created_at,
        })
    }
}

const TITLE_COLUMNS: &str = "id, kind, name, overview, release_year, poster_url, \
     backdrop_url, tmdb_id, popularity, vote_count, vote_average, created_at";

#[async_trait]
impl TitlesRepository for PostgresTitlesRepository {
    async fn list_by_kind(&self, kind: TitleKind, limit: i64) -> Result<Vec<Title>> {
        let rows = sqlx::query_as::<_, TitleRow>(&format!(
            "SELECT {TITLE_COLUMNS} FROM titles WHERE kind = $1 \
             ORDER BY popularity DESC LIMIT $2"
        ))
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to list titles: {}", e)))?;

        rows.into_iter().map(TitleRow::into_title).collect()
    }

    async fn get(&self, id: TitleId) -> Result<Option<Title>> {
        let row = sqlx::query_as::<_, TitleRow>(&format!(
            "SELECT {TITLE_COLUMNS} FROM titles WHERE id = $1"
        ))
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to get title: {}", e)))?;

        row.map(TitleRow::into_title).transpose()
    }

    async fn delete_kinds(&self, kinds: &[TitleKind]) -> Result<u64> {
        let kind_names: Vec<String> =
            kinds.iter().map(|kind| kind.as_str().to_string()).collect();

        let result = sqlx::query("DELETE FROM titles WHERE kind = ANY($1)")
            .bind(&kind_names)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to delete titles: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn insert_batch(&self, titles: &[NewTitle]) -> Result<u64> {
        if titles.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO titles (id, kind, name, overview, release_year, \
             poster_url, backdrop_url, tmdb_id, popularity, vote_count, vote_average) ",
        );
        builder.push_values(titles, |mut row, title| {
            row.push_bind(TitleId::new().to_uuid())
                .push_bind(title.kind.as_str())
                .push_bind(title.name.as_str())
                .push_bind(title.overview.as_deref())
                .push_bind(title.release_year)
                .push_bind(title.poster_url.as_deref())
                .push_bind(title.backdrop_url.as_deref())
                .push_bind(title.tmdb_id)
                .push_bind(title.popularity)
                .push_bind(title.vote_count)
                .push_bind(title.vote_average);
        });

        let result = builder
            .build()
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to insert title batch: {}", e)))?;

        Ok(result.rows_affected())
    }
}
