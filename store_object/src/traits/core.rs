//! Trait definitions
//!
//! This module defines core traits for database operations.

use crate::query_builder::QueryBuilder;
use crate::StoreError;
use async_trait::async_trait;
use std::fmt::Debug;
use type_mapping::ScalarValue;

/// Trait that defines common database operations for all entities
#[async_trait]
pub trait StoreObject: Send + Sync + Debug {
    /// The model type that this object represents
    type Model: Clone + Send + Sync + Debug;

    /// Create a new instance of this object
    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError>;

    /// Create several objects in one statement
    async fn create_many(&self, data: Vec<Self::Model>) -> Result<u64, StoreError>;

    /// Get an object by its ID
    async fn get_by_id(&self, id: ScalarValue) -> Result<Option<Self::Model>, StoreError>;

    /// List all objects of this type
    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError>;

    /// Update the stored row with the object's key; false when no row matched
    async fn update(&self, data: &Self::Model) -> Result<bool, StoreError>;

    /// Insert or refresh by primary key
    async fn upsert(&self, data: Self::Model) -> Result<Self::Model, StoreError>;

    /// Delete an object by its ID
    async fn delete(&self, id: ScalarValue) -> Result<bool, StoreError>;

    /// Delete multiple objects by their IDs
    async fn delete_many(&self, ids: Vec<ScalarValue>) -> Result<u64, StoreError>;

    /// Find records matching query conditions
    async fn find(&self, query: QueryBuilder) -> Result<Vec<Self::Model>, StoreError>;

    /// Find first record matching query conditions
    async fn find_one(&self, query: QueryBuilder) -> Result<Option<Self::Model>, StoreError>;
}
