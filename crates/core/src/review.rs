//! Rules for reviews submitted from the public reviews page.

use crate::error::CoreError;
use crate::profanity::contains_profanity;

/// Minimum review body length, in characters.
pub const MIN_REVIEW_LENGTH: usize = 10;

/// Maximum review body length accepted by the form.
pub const MAX_REVIEW_LENGTH: usize = 500;

/// Valid star ratings.
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Message returned when a name or body fails the profanity filter.
pub const INAPPROPRIATE_CONTENT: &str = "Your review contains inappropriate content.";

/// Name used when the reviewer has neither a display name nor an email.
pub const FALLBACK_REVIEWER_NAME: &str = "User";

/// Check a submission before anything is written.
///
/// Returns the accepted `(rating, text)` pair. Text is kept as typed; only
/// the blank check looks at the trimmed form.
pub fn validate_submission(
    rating: Option<i32>,
    text: Option<&str>,
) -> Result<(i32, String), CoreError> {
    let rating = rating.ok_or_else(|| CoreError::Validation("Rating is required".into()))?;
    if !RATING_RANGE.contains(&rating) {
        return Err(CoreError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }

    let text = text.unwrap_or_default();
    let length = text.chars().count();
    if text.trim().is_empty() || length < MIN_REVIEW_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review must be at least {MIN_REVIEW_LENGTH} characters"
        )));
    }
    if length > MAX_REVIEW_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review must be at most {MAX_REVIEW_LENGTH} characters"
        )));
    }
    if contains_profanity(text) {
        return Err(CoreError::Validation(INAPPROPRIATE_CONTENT.into()));
    }

    Ok((rating, text.to_string()))
}

/// Inline warning shown while the reviewer is still typing.
///
/// Stays quiet for the first three characters so partial words do not flash
/// a warning.
pub fn live_warning(text: &str) -> Option<&'static str> {
    if text.chars().count() > 3 && contains_profanity(text) {
        Some(INAPPROPRIATE_CONTENT)
    } else {
        None
    }
}

/// Public name attached to a review.
///
/// Display name if present, else the local part of the email, else `"User"`.
pub fn reviewer_name(display_name: Option<&str>, email: Option<&str>) -> String {
    display_name
        .filter(|n| !n.is_empty())
        .or_else(|| {
            email
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty())
        })
        .unwrap_or(FALLBACK_REVIEWER_NAME)
        .to_string()
}
