//! Resource Service - generic create/read/update/delete over any repository
//!
//! Payloads arrive as raw JSON. They are cleaned against the repository's
//! field table, relation ids and unique values are checked against the
//! database, and only then turned into a typed record.

use serde_json::{Map, Value};

use crate::domain::fields::{self, referenced_ids};
use crate::domain::{DomainError, FieldErrors, FieldKind, ReferenceChecker, Repository};

pub async fn list<R: Repository>(repo: &R) -> Result<Vec<R::Record>, DomainError> {
    repo.find_all().await
}

pub async fn retrieve<R: Repository>(repo: &R, id: i32) -> Result<R::Record, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound)
}

pub async fn create<R: Repository>(
    repo: &R,
    checker: &dyn ReferenceChecker,
    body: Value,
) -> Result<R::Record, DomainError> {
    let record = validate::<R>(checker, &body, None).await?;
    let created = repo.create(record).await?;

    tracing::info!(
        model = R::MODEL,
        id = ?R::record_id(&created),
        "record created"
    );
    Ok(created)
}

/// Full (`PUT`) or partial (`PATCH`) update.
///
/// A partial body is laid over the current representation and the result is
/// validated as a whole, so omitted fields keep their stored values.
pub async fn update<R: Repository>(
    repo: &R,
    checker: &dyn ReferenceChecker,
    id: i32,
    body: Value,
    partial: bool,
) -> Result<R::Record, DomainError> {
    let current = repo.find_by_id(id).await?.ok_or(DomainError::NotFound)?;

    let data = if partial {
        let current =
            serde_json::to_value(&current).map_err(|e| DomainError::Internal(e.to_string()))?;
        merge(current, body)
    } else {
        body
    };

    let record = validate::<R>(checker, &data, Some(id)).await?;
    let updated = repo.update(id, record).await?;

    tracing::info!(model = R::MODEL, id, partial, "record updated");
    Ok(updated)
}

pub async fn destroy<R: Repository>(repo: &R, id: i32) -> Result<(), DomainError> {
    repo.delete(id).await?;
    tracing::info!(model = R::MODEL, id, "record deleted");
    Ok(())
}

/// Shallow merge of `patch` over `base`; non-object patches pass through so
/// validation can reject them.
fn merge(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (Value::Object(mut base), Value::Object(patch)) => {
            for (key, value) in patch {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, patch) => patch,
    }
}

async fn validate<R: Repository>(
    checker: &dyn ReferenceChecker,
    data: &Value,
    instance_id: Option<i32>,
) -> Result<R::Record, DomainError> {
    let cleaned = fields::clean(R::FIELDS, data).map_err(DomainError::Validation)?;
    check_database_constraints::<R>(checker, &cleaned, instance_id)
        .await?
        .into_result()?;

    serde_json::from_value(Value::Object(cleaned)).map_err(|e| {
        tracing::error!("Cleaned {} payload did not deserialize: {}", R::MODEL, e);
        DomainError::Internal(e.to_string())
    })
}

async fn check_database_constraints<R: Repository>(
    checker: &dyn ReferenceChecker,
    cleaned: &Map<String, Value>,
    instance_id: Option<i32>,
) -> Result<FieldErrors, DomainError> {
    let mut errors = FieldErrors::new();

    for field in R::FIELDS.iter().filter(|f| !f.read_only) {
        match field.kind {
            FieldKind::ForeignKey { to } | FieldKind::ManyToMany { to } => {
                for id in referenced_ids(field, cleaned) {
                    if !checker.exists(to, id).await? {
                        errors.add(
                            field.name,
                            format!("Invalid pk \"{}\" - object does not exist.", id),
                        );
                    }
                }
            }
            _ if field.unique => {
                if let Some(Value::String(value)) = cleaned.get(field.name)
                    && checker
                        .is_taken(R::TABLE, field.name, value, instance_id)
                        .await?
                {
                    errors.add(
                        field.name,
                        format!(
                            "{} with this {} already exists.",
                            R::MODEL.to_lowercase(),
                            field.name.replace('_', " ")
                        ),
                    );
                }
            }
            _ => {}
        }
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overlays_patch_keys() {
        let merged = merge(
            json!({ "id": 1, "name": "Espresso", "stock": true }),
            json!({ "stock": false }),
        );
        assert_eq!(merged, json!({ "id": 1, "name": "Espresso", "stock": false }));
    }

    #[test]
    fn merge_passes_non_object_patch_through() {
        assert_eq!(merge(json!({ "id": 1 }), json!("oops")), json!("oops"));
    }
}
