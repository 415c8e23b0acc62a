use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::domain::DomainError;

/// The `:id` segment of a detail route. Anything that is not a valid row id
/// cannot match a row, so it is rejected as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ObjectId
where
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| DomainError::NotFound)?;

        params
            .get("id")
            .and_then(|raw| parse_id(raw))
            .map(ObjectId)
            .ok_or(DomainError::NotFound)
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn only_plain_i32_values_are_ids() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("99999999999"), None);
        assert_eq!(parse_id("4.5"), None);
    }
}
