use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use super::ApiError;

/// `Json` extractor whose rejections use the API error envelope, so a
/// malformed or mistyped body is a 400 like every other validation failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}

pub fn validate_record_id(id: &str) -> Result<&str, ApiError> {
    const MAX_LEN: usize = 64;

    if id.is_empty() {
        return Err(ApiError::validation("ID cannot be empty"));
    }

    if id.len() > MAX_LEN
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::validation(format!("Invalid ID: {id}")));
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("4b0c6f1e-3c1a-4f7e-9d55-2f1f0c9f5a11").is_ok());
        assert!(validate_record_id("room_1").is_ok());
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("../etc").is_err());
        assert!(validate_record_id(&"a".repeat(65)).is_err());
    }
}
