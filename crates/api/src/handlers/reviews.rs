//! Public review submission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::auth::PROVIDER_DISCORD;
use folio_core::error::CoreError;
use folio_core::review::{live_warning, reviewer_name, validate_submission};
use folio_db::models::review::{CreateReview, Review};
use folio_db::ReviewOutcome;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /reviews`. Both fields are checked for presence.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}

/// Request body for `POST /reviews/check`.
#[derive(Debug, Deserialize)]
pub struct CheckTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CheckTextResponse {
    pub warning: Option<&'static str>,
}

/// POST /api/v1/reviews
///
/// One review per account. Submissions are published straight away.
pub async fn submit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SubmitReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    let (rating, review_text) = validate_submission(input.rating, input.review_text.as_deref())?;

    if state.store.has_user_reviewed(auth_user.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already submitted a review".into(),
        )));
    }

    let user = state.identity.find_user(auth_user.user_id).await?;
    let email = user
        .as_ref()
        .and_then(|u| u.email.as_deref())
        .or(auth_user.email.as_deref());
    let name = reviewer_name(user.as_ref().and_then(|u| u.display_name.as_deref()), email);

    let discord = user.as_ref().filter(|u| u.provider == PROVIDER_DISCORD);
    let input = CreateReview {
        user_id: Some(auth_user.user_id),
        name,
        rating,
        review_text,
        discord_username: discord.and_then(|u| u.username.clone()),
        discord_avatar: discord.and_then(|u| u.avatar_url.clone()),
    };

    match state.store.create_review(&input).await? {
        ReviewOutcome::Created(review) => {
            tracing::info!(review_id = review.id, user_id = auth_user.user_id, "Review submitted");
            Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
        }
        ReviewOutcome::Rejected(message) => {
            Err(AppError::Core(CoreError::Validation(message.into())))
        }
        ReviewOutcome::Unavailable(message) => {
            Err(AppError::Core(CoreError::Unavailable(message.into())))
        }
    }
}

/// POST /api/v1/reviews/check
///
/// Inline warning for the review box while the visitor types.
pub async fn check(Json(input): Json<CheckTextRequest>) -> Json<CheckTextResponse> {
    Json(CheckTextResponse {
        warning: live_warning(&input.text),
    })
}
