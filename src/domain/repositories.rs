//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::{DomainError, FieldSpec};

/// Storage for one entity, exchanged through its REST representation.
#[async_trait]
pub trait Repository: Send + Sync + Sized + 'static {
    /// Wire representation of a row
    type Record: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Model name, e.g. `Customer`
    const MODEL: &'static str;
    /// Collection path segment, e.g. `customers`
    const RESOURCE: &'static str;
    /// Backing table
    const TABLE: &'static str;
    /// Writable and read-only fields, in declaration order
    const FIELDS: &'static [FieldSpec];

    /// Human readable label shown in the admin change list. Labels built
    /// from related rows look those rows up.
    async fn label(&self, record: &Self::Record) -> Result<String, DomainError>;

    fn record_id(record: &Self::Record) -> Option<i32>;

    /// Find all rows ordered by id
    async fn find_all(&self) -> Result<Vec<Self::Record>, DomainError>;

    /// Find a row by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Self::Record>, DomainError>;

    /// Insert a new row; the record id is ignored
    async fn create(&self, record: Self::Record) -> Result<Self::Record, DomainError>;

    /// Replace every writable column of an existing row
    async fn update(&self, id: i32, record: Self::Record) -> Result<Self::Record, DomainError>;

    /// Delete a row by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Existence and uniqueness lookups used while validating payloads
#[async_trait]
pub trait ReferenceChecker: Send + Sync {
    /// Whether `table` holds a row with this id
    async fn exists(&self, table: &'static str, id: i32) -> Result<bool, DomainError>;

    /// Whether another row of `table` already stores `value` in `column`
    async fn is_taken(
        &self,
        table: &'static str,
        column: &'static str,
        value: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DomainError>;
}
