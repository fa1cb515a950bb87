use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cinelog_core::{
    api_types::ApiResponse,
    catalog::{CatalogEntry, CatalogQuery, KindFilter, SortKey, filter_and_sort},
    database::ports::{ProfilesRepository, ReviewsRepository, TitlesRepository},
    ratings::{RatingEntry, summarize_ratings},
};
use cinelog_model::{Review, ReviewWithAuthor, Title, TitleId, TitleKind, UserId};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Popularity cap per kind when assembling the catalog view.
const PAGE_SIZE: i64 = 1000;

/// Username shown when a reviewer has no profile row.
pub(crate) const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    /// Case-insensitive substring match against the title name.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub kind: KindFilter,
    #[serde(default)]
    pub sort: SortKey,
}

/// One grid cell of the catalog view.
#[derive(Debug, Serialize)]
pub struct CatalogItem {
    pub id: TitleId,
    pub kind: TitleKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    pub review_count: u64,
}

impl From<CatalogEntry> for CatalogItem {
    fn from(entry: CatalogEntry) -> Self {
        CatalogItem {
            id: entry.title.id,
            kind: entry.title.kind,
            name: entry.title.name,
            release_year: entry.title.release_year,
            poster_url: entry.title.poster_url,
            average_rating: entry.rating.map(|r| r.average),
            review_count: entry.rating.map(|r| r.review_count).unwrap_or(0),
        }
    }
}

/// GET /api/v1/titles
///
/// Fetches both kinds plus the full rating projection, joins them, and
/// applies search, kind filter, and sort. The whole filtered set comes
/// back; the catalog is small enough that pagination would only
/// complicate clients.
pub async fn list_titles(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<ApiResponse<Vec<CatalogItem>>>> {
    let movies = state
        .db
        .titles()
        .list_by_kind(TitleKind::Movie, PAGE_SIZE)
        .await?;
    let shows = state
        .db
        .titles()
        .list_by_kind(TitleKind::Tv, PAGE_SIZE)
        .await?;

    let summaries = summarize_ratings(state.db.reviews().rating_entries().await?);

    let entries: Vec<CatalogEntry> = movies
        .into_iter()
        .chain(shows)
        .map(|title| CatalogEntry {
            rating: summaries.get(&title.id).copied(),
            title,
        })
        .collect();

    let query = CatalogQuery {
        search: params.query.as_deref(),
        kind: params.kind,
        sort: params.sort,
    };
    let items = filter_and_sort(entries, &query)
        .into_iter()
        .map(CatalogItem::from)
        .collect();

    Ok(Json(ApiResponse::success(items)))
}

/// Shape of `GET /api/v1/titles/{id}`.
#[derive(Debug, Serialize)]
pub struct TitleDetail {
    #[serde(flatten)]
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    pub review_count: u64,
    pub reviews: Vec<ReviewWithAuthor>,
}

/// GET /api/v1/titles/{id}
///
/// The title row, its reviews newest-first with author names attached,
/// and the aggregate recomputed from those reviews.
pub async fn get_title(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TitleDetail>>> {
    let title_id = TitleId(id);

    let title = state
        .db
        .titles()
        .get(title_id)
        .await?
        .ok_or_else(|| AppError::not_found("Title not found"))?;

    let reviews = state.db.reviews().list_for_title(title_id).await?;

    let summary = summarize_ratings(reviews.iter().map(|review| RatingEntry {
        title_id: review.title_id,
        rating: review.rating,
    }))
    .remove(&title_id);

    let mut reviewer_ids: Vec<UserId> =
        reviews.iter().map(|review| review.user_id).collect();
    reviewer_ids.sort_unstable();
    reviewer_ids.dedup();

    let usernames = state.db.profiles().usernames_for(&reviewer_ids).await?;

    let reviews = reviews
        .into_iter()
        .map(|review| with_author(review, &usernames))
        .collect();

    Ok(Json(ApiResponse::success(TitleDetail {
        title,
        average_rating: summary.map(|s| s.average),
        review_count: summary.map(|s| s.review_count).unwrap_or(0),
        reviews,
    })))
}

fn with_author(review: Review, usernames: &HashMap<UserId, String>) -> ReviewWithAuthor {
    ReviewWithAuthor {
        username: usernames
            .get(&review.user_id)
            .cloned()
            .unwrap_or_else(|| ANONYMOUS.to_string()),
        id: review.id,
        user_id: review.user_id,
        rating: review.rating,
        body: review.body,
        created_at: review.created_at,
        updated_at: review.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn missing_profile_falls_back_to_placeholder() {
        let known = UserId::new();
        let unknown = UserId::new();
        let usernames: HashMap<UserId, String> =
            [(known, "moviefan".to_string())].into_iter().collect();

        let review = |user_id| Review {
            id: cinelog_model::ReviewId::new(),
            user_id,
            title_id: TitleId::new(),
            rating: 4,
            body: "A memorable watch.".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(with_author(review(known), &usernames).username, "moviefan");
        assert_eq!(with_author(review(unknown), &usernames).username, ANONYMOUS);
    }
}
