//! JSON body extractor whose rejections are validation errors (422) in the API's error shape.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// Untyped body; handlers validate it against the declared shape.
pub struct JsonBody(pub Value);

/// A body the handler never sees.
pub enum BodyRejection {
    Invalid(AppError),
    /// Over the configured size limit.
    TooLarge,
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            BodyRejection::Invalid(e) => e.into_response(),
            BodyRejection::TooLarge => StatusCode::PAYLOAD_TOO_LARGE.into_response(),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(BodyRejection::TooLarge)
            }
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "rejected body");
                Err(BodyRejection::Invalid(AppError::invalid(
                    &["body"],
                    "json_invalid",
                    rejection_message(&rejection),
                )))
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected request with `Content-Type: application/json`".into(),
        other => other.body_text(),
    }
}
