use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use uuid::Uuid;

use cinelog_core::{
    api_types::ApiResponse, database::ports::ReviewsRepository, reviews::ReviewDraft,
    users::User,
};
use cinelog_model::{NewReview, Review, ReviewId, TitleId};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// POST /api/v1/titles/{id}/reviews
///
/// Validation runs before any storage call; a duplicate (user, title)
/// pair surfaces the specific "already reviewed" notice via the
/// storage error mapping.
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(title_id): Path<Uuid>,
    Json(draft): Json<ReviewDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let valid = draft.validate()?;

    let review = state
        .db
        .reviews()
        .create(&NewReview {
            user_id: user.id,
            title_id: TitleId(title_id),
            rating: valid.rating,
            body: valid.body,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(review))))
}

/// PUT /api/v1/reviews/{id} — owner-only.
pub async fn update_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(review_id): Path<Uuid>,
    Json(draft): Json<ReviewDraft>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let valid = draft.validate()?;
    let review_id = ReviewId(review_id);

    let existing = state
        .db
        .reviews()
        .get(review_id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    if existing.user_id != user.id {
        return Err(AppError::forbidden("You can only edit your own reviews"));
    }

    state
        .db
        .reviews()
        .update(review_id, valid.rating, &valid.body)
        .await?;

    let updated = state
        .db
        .reviews()
        .get(review_id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/reviews/{id} — owner-only.
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let review_id = ReviewId(review_id);

    let existing = state
        .db
        .reviews()
        .get(review_id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    if existing.user_id != user.id {
        return Err(AppError::forbidden("You can only delete your own reviews"));
    }

    state.db.reviews().delete(review_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
