//! Declarative field tables
//!
//! Each entity describes its writable surface as a slice of [`FieldSpec`].
//! The same table drives request cleaning, the admin field listing and the
//! relation/uniqueness checks performed by the service layer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::FieldErrors;

/// Upper bound of a positive small integer column
pub const POSITIVE_SMALL_INTEGER_MAX: i64 = 32767;

const EMAIL_MAX_LENGTH: usize = 254;
const IMAGE_MAX_LENGTH: usize = 100;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Char {
        max_length: usize,
    },
    Text {
        max_length: usize,
    },
    Email {
        max_length: usize,
    },
    Choice {
        max_length: usize,
        choices: &'static [&'static str],
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Float,
    Boolean,
    Date,
    Time,
    DateTime,
    Image {
        max_length: usize,
    },
    /// Single related row, referenced by id in table `to`
    ForeignKey {
        to: &'static str,
    },
    /// Set of related rows, referenced by id in table `to`
    ManyToMany {
        to: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub null: bool,
    pub blank: bool,
    pub read_only: bool,
    pub unique: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            null: false,
            blank: false,
            read_only: false,
            unique: false,
        }
    }

    pub const fn char(name: &'static str, max_length: usize) -> Self {
        Self::new(name, FieldKind::Char { max_length })
    }

    pub const fn text(name: &'static str, max_length: usize) -> Self {
        Self::new(name, FieldKind::Text { max_length })
    }

    pub const fn email(name: &'static str) -> Self {
        Self::new(
            name,
            FieldKind::Email {
                max_length: EMAIL_MAX_LENGTH,
            },
        )
    }

    pub const fn choice(
        name: &'static str,
        max_length: usize,
        choices: &'static [&'static str],
    ) -> Self {
        Self::new(
            name,
            FieldKind::Choice {
                max_length,
                choices,
            },
        )
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(
            name,
            FieldKind::Integer {
                min: None,
                max: None,
            },
        )
    }

    pub const fn bounded_integer(name: &'static str, min: i64, max: i64) -> Self {
        Self::new(
            name,
            FieldKind::Integer {
                min: Some(min),
                max: Some(max),
            },
        )
    }

    pub const fn positive_small_integer(name: &'static str) -> Self {
        Self::bounded_integer(name, 0, POSITIVE_SMALL_INTEGER_MAX)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub const fn time(name: &'static str) -> Self {
        Self::new(name, FieldKind::Time)
    }

    pub const fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Image path; always optional
    pub const fn image(name: &'static str) -> Self {
        Self::new(
            name,
            FieldKind::Image {
                max_length: IMAGE_MAX_LENGTH,
            },
        )
        .blank()
        .nullable()
    }

    pub const fn foreign_key(name: &'static str, to: &'static str) -> Self {
        Self::new(name, FieldKind::ForeignKey { to })
    }

    pub const fn many_to_many(name: &'static str, to: &'static str) -> Self {
        Self::new(name, FieldKind::ManyToMany { to }).blank()
    }

    /// Accepts null; may be omitted
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self.required = false;
        self
    }

    /// Accepts the empty string; may be omitted
    pub const fn blank(mut self) -> Self {
        self.blank = true;
        self.required = false;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Present in responses, ignored in requests
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.required = false;
        self
    }

    fn is_textual(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Char { .. }
                | FieldKind::Text { .. }
                | FieldKind::Email { .. }
                | FieldKind::Choice { .. }
                | FieldKind::Image { .. }
        )
    }

    /// Value stored when a non-required field is omitted
    fn default_value(&self) -> Value {
        match self.kind {
            FieldKind::ManyToMany { .. } => Value::Array(Vec::new()),
            _ if self.null => Value::Null,
            FieldKind::Char { .. }
            | FieldKind::Text { .. }
            | FieldKind::Email { .. }
            | FieldKind::Choice { .. } => Value::String(String::new()),
            _ => Value::Null,
        }
    }
}

/// Python-style type name used in relation error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Validate `data` against `fields` and return the normalized payload.
///
/// Read-only and unknown keys are dropped. Omitted optional fields are
/// filled with their default so the result always carries every writable
/// field.
pub fn clean(fields: &[FieldSpec], data: &Value) -> Result<Map<String, Value>, FieldErrors> {
    let Some(input) = data.as_object() else {
        return Err(FieldErrors::single(
            "non_field_errors",
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                type_name(data)
            ),
        ));
    };

    let mut errors = FieldErrors::new();
    let mut cleaned = Map::new();

    for field in fields.iter().filter(|f| !f.read_only) {
        match input.get(field.name) {
            None if field.required => errors.add(field.name, "This field is required."),
            None => {
                cleaned.insert(field.name.to_string(), field.default_value());
            }
            Some(Value::Null) if field.null => {
                cleaned.insert(field.name.to_string(), Value::Null);
            }
            Some(Value::Null) => errors.add(field.name, "This field may not be null."),
            Some(Value::String(s)) if field.null && !field.is_textual() && s.trim().is_empty() => {
                cleaned.insert(field.name.to_string(), Value::Null);
            }
            Some(value) => match clean_value(field, value) {
                Ok(value) => {
                    cleaned.insert(field.name.to_string(), value);
                }
                Err(messages) => {
                    for message in messages {
                        errors.add(field.name, message);
                    }
                }
            },
        }
    }

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(errors)
    }
}

fn clean_value(field: &FieldSpec, value: &Value) -> Result<Value, Vec<String>> {
    match field.kind {
        FieldKind::Char { max_length } | FieldKind::Text { max_length } => {
            clean_string(field, value, max_length).map(Value::String)
        }
        FieldKind::Email { max_length } => {
            let s = clean_string(field, value, max_length)?;
            if !s.is_empty() && !EMAIL_PATTERN.is_match(&s) {
                return Err(vec!["Enter a valid email address.".to_string()]);
            }
            Ok(Value::String(s))
        }
        FieldKind::Choice {
            max_length,
            choices,
        } => {
            let s = clean_string(field, value, max_length)?;
            if !s.is_empty() && !choices.contains(&s.as_str()) {
                return Err(vec![format!("\"{}\" is not a valid choice.", s)]);
            }
            Ok(Value::String(s))
        }
        FieldKind::Image { max_length } => clean_string(field, value, max_length).map(Value::String),
        FieldKind::Integer { min, max } => clean_integer(value, min, max).map(Value::from),
        FieldKind::Float => clean_float(value).map(Value::from),
        FieldKind::Boolean => clean_boolean(value).map(Value::Bool),
        FieldKind::Date => clean_date(value).map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
        FieldKind::Time => {
            clean_time(value).map(|t| Value::String(t.format("%H:%M:%S%.f").to_string()))
        }
        FieldKind::DateTime => clean_datetime(value)
            .map(|dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
        FieldKind::ForeignKey { .. } => clean_pk(value).map(Value::from),
        FieldKind::ManyToMany { .. } => {
            let Value::Array(items) = value else {
                return Err(vec![format!(
                    "Expected a list of items but got type \"{}\".",
                    type_name(value)
                )]);
            };
            let mut ids = Vec::with_capacity(items.len());
            let mut messages = Vec::new();
            for item in items {
                match clean_pk(item) {
                    Ok(id) => ids.push(id),
                    Err(mut m) => messages.append(&mut m),
                }
            }
            if !messages.is_empty() {
                return Err(messages);
            }
            ids.sort_unstable();
            ids.dedup();
            Ok(Value::from(ids))
        }
    }
}

fn clean_string(field: &FieldSpec, value: &Value, max_length: usize) -> Result<String, Vec<String>> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(vec!["Not a valid string.".to_string()]),
    };

    if s.is_empty() && !field.blank {
        return Err(vec!["This field may not be blank.".to_string()]);
    }
    if s.chars().count() > max_length {
        return Err(vec![format!(
            "Ensure this field has no more than {} characters.",
            max_length
        )]);
    }
    Ok(s)
}

fn clean_integer(value: &Value, min: Option<i64>, max: Option<i64>) -> Result<i32, Vec<String>> {
    let invalid = || vec!["A valid integer is required.".to_string()];

    let n = match value {
        Value::Number(n) => match n.as_i64() {
            Some(n) => n,
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => f as i64,
                _ => return Err(invalid()),
            },
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    let min = min.unwrap_or(i64::from(i32::MIN));
    let max = max.unwrap_or(i64::from(i32::MAX));
    if n < min {
        return Err(vec![format!(
            "Ensure this value is greater than or equal to {}.",
            min
        )]);
    }
    if n > max {
        return Err(vec![format!(
            "Ensure this value is less than or equal to {}.",
            max
        )]);
    }
    i32::try_from(n).map_err(|_| invalid())
}

fn clean_float(value: &Value) -> Result<f64, Vec<String>> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match f {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(vec!["A valid number is required.".to_string()]),
    }
}

fn clean_boolean(value: &Value) -> Result<bool, Vec<String>> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_i64() == Some(1) => Ok(true),
        Value::Number(n) if n.as_i64() == Some(0) => Ok(false),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(vec!["Must be a valid boolean.".to_string()]),
        },
        _ => Err(vec!["Must be a valid boolean.".to_string()]),
    }
}

fn clean_date(value: &Value) -> Result<NaiveDate, Vec<String>> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| {
            vec!["Date has wrong format. Use one of these formats instead: YYYY-MM-DD.".to_string()]
        })
}

fn clean_time(value: &Value) -> Result<NaiveTime, Vec<String>> {
    value
        .as_str()
        .map(str::trim)
        .and_then(|s| {
            NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
                .ok()
        })
        .ok_or_else(|| {
            vec![
                "Time has wrong format. Use one of these formats instead: hh:mm[:ss[.uuuuuu]]."
                    .to_string(),
            ]
        })
}

fn clean_datetime(value: &Value) -> Result<DateTime<Utc>, Vec<String>> {
    let parse = |s: &str| -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        // Naive timestamps are taken as UTC
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
    };

    value.as_str().map(str::trim).and_then(parse).ok_or_else(|| {
        vec![
            "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z]."
                .to_string(),
        ]
    })
}

fn clean_pk(value: &Value) -> Result<i32, Vec<String>> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.and_then(|id| i32::try_from(id).ok()).ok_or_else(|| {
        vec![format!(
            "Incorrect type. Expected pk value, received {}.",
            type_name(value)
        )]
    })
}

/// Ids referenced by a cleaned relation field
pub fn referenced_ids(field: &FieldSpec, cleaned: &Map<String, Value>) -> Vec<i32> {
    match cleaned.get(field.name) {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()).into_iter().collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_i64().and_then(|n| i32::try_from(n).ok()))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CUSTOMER: &[FieldSpec] = &[
        FieldSpec::char("username", 70).blank().nullable(),
        FieldSpec::char("name", 100),
        FieldSpec::email("email").unique(),
        FieldSpec::choice("gender", 10, &["male", "female"]),
        FieldSpec::date("date_birth"),
    ];

    const RATINGS: &[FieldSpec] = &[
        FieldSpec::foreign_key("product_id", "products").blank().nullable(),
        FieldSpec::bounded_integer("product_rating", 0, 5).blank().nullable(),
    ];

    #[test]
    fn reports_every_missing_required_field() {
        let errors = clean(CUSTOMER, &json!({})).unwrap_err();
        for field in ["name", "email", "gender", "date_birth"] {
            assert_eq!(
                errors.get(field),
                Some(&["This field is required.".to_string()][..]),
                "{field}"
            );
        }
        assert!(errors.get("username").is_none());
    }

    #[test]
    fn fills_defaults_and_normalizes() {
        let cleaned = clean(
            CUSTOMER,
            &json!({
                "name": "  Ada ",
                "email": "ada@example.com",
                "gender": "female",
                "date_birth": "1990-02-03",
                "unknown": 1
            }),
        )
        .unwrap();

        assert_eq!(cleaned["name"], "Ada");
        assert_eq!(cleaned["username"], Value::Null);
        assert!(!cleaned.contains_key("unknown"));
    }

    #[test]
    fn rejects_bad_email_and_choice() {
        let errors = clean(
            CUSTOMER,
            &json!({
                "name": "Ada",
                "email": "not-an-email",
                "gender": "other",
                "date_birth": "03/02/1990"
            }),
        )
        .unwrap_err();

        assert_eq!(errors.get("email").unwrap()[0], "Enter a valid email address.");
        assert_eq!(errors.get("gender").unwrap()[0], "\"other\" is not a valid choice.");
        assert!(errors.get("date_birth").unwrap()[0].starts_with("Date has wrong format"));
    }

    #[test]
    fn enforces_length_and_blank() {
        let errors = clean(
            CUSTOMER,
            &json!({
                "name": "",
                "username": "x".repeat(71),
                "email": "a@b.io",
                "gender": "male",
                "date_birth": "1990-01-01"
            }),
        )
        .unwrap_err();

        assert_eq!(errors.get("name").unwrap()[0], "This field may not be blank.");
        assert_eq!(
            errors.get("username").unwrap()[0],
            "Ensure this field has no more than 70 characters."
        );
    }

    #[test]
    fn ratings_are_bounded() {
        let errors = clean(RATINGS, &json!({ "product_rating": 6 })).unwrap_err();
        assert_eq!(
            errors.get("product_rating").unwrap()[0],
            "Ensure this value is less than or equal to 5."
        );

        let errors = clean(RATINGS, &json!({ "product_rating": -1 })).unwrap_err();
        assert_eq!(
            errors.get("product_rating").unwrap()[0],
            "Ensure this value is greater than or equal to 0."
        );

        let cleaned = clean(RATINGS, &json!({ "product_rating": "5" })).unwrap();
        assert_eq!(cleaned["product_rating"], 5);
        assert_eq!(cleaned["product_id"], Value::Null);

        let cleaned = clean(RATINGS, &json!({ "product_rating": "", "product_id": "" })).unwrap();
        assert_eq!(cleaned["product_rating"], Value::Null);
        assert_eq!(cleaned["product_id"], Value::Null);
    }

    #[test]
    fn relation_pk_must_be_integer() {
        let errors = clean(RATINGS, &json!({ "product_id": "abc" })).unwrap_err();
        assert_eq!(
            errors.get("product_id").unwrap()[0],
            "Incorrect type. Expected pk value, received str."
        );
    }

    #[test]
    fn many_to_many_is_sorted_and_deduplicated() {
        let fields = [FieldSpec::many_to_many("category", "categories")];

        let cleaned = clean(&fields, &json!({ "category": [3, 1, 3] })).unwrap();
        assert_eq!(cleaned["category"], json!([1, 3]));
        assert_eq!(referenced_ids(&fields[0], &cleaned), vec![1, 3]);

        let cleaned = clean(&fields, &json!({})).unwrap();
        assert_eq!(cleaned["category"], json!([]));

        let errors = clean(&fields, &json!({ "category": 1 })).unwrap_err();
        assert_eq!(
            errors.get("category").unwrap()[0],
            "Expected a list of items but got type \"int\"."
        );
    }

    #[test]
    fn datetimes_are_normalized_to_utc() {
        let fields = [FieldSpec::datetime("during"), FieldSpec::time("open_time").nullable()];

        let cleaned = clean(
            &fields,
            &json!({ "during": "2024-05-01T10:00:00+02:00", "open_time": "08:30" }),
        )
        .unwrap();
        assert_eq!(cleaned["during"], "2024-05-01T08:00:00Z");
        assert_eq!(cleaned["open_time"], "08:30:00");
    }

    #[test]
    fn read_only_fields_are_ignored() {
        let fields = [FieldSpec::datetime("date").read_only(), FieldSpec::float("price")];
        let cleaned = clean(&fields, &json!({ "date": "garbage", "price": "2.5" })).unwrap();
        assert!(!cleaned.contains_key("date"));
        assert_eq!(cleaned["price"], 2.5);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = clean(CUSTOMER, &json!([1, 2])).unwrap_err();
        assert_eq!(
            errors.get("non_field_errors").unwrap()[0],
            "Invalid data. Expected a dictionary, but got list."
        );
    }

    #[test]
    fn null_rejected_for_non_nullable() {
        let errors = clean(&[FieldSpec::boolean("stock")], &json!({ "stock": null })).unwrap_err();
        assert_eq!(errors.get("stock").unwrap()[0], "This field may not be null.");
    }
}
