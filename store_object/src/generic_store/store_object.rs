//! Generic store implementations
//!
//! This module provides the `StoreObject` operations for any mapped entity.

use super::core::RecordStore;
use crate::errors::StoreError;
use crate::query_builder::{Action, Query, QueryBuilder, QueryFilter};
use crate::traits::{FromRecord, RecordMapping, StoreObject};
use async_trait::async_trait;
use signal_system::ChangeType;
use std::fmt::Debug;
use type_mapping::ScalarValue;

impl<T> RecordStore<T>
where
    T: RecordMapping + FromRecord,
{
    async fn fetch_models(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let rows = self.database.fetch(query).await?;
        rows.iter().map(T::from_record).collect()
    }
}

#[async_trait]
impl<T> StoreObject for RecordStore<T>
where
    T: RecordMapping + FromRecord + Clone + Debug + 'static,
{
    type Model = T;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        self.database.execute(&data.insert_query()).await?;
        self.emit_record_change(ChangeType::Insert, &data);
        Ok(data)
    }

    async fn create_many(&self, data: Vec<Self::Model>) -> Result<u64, StoreError> {
        let rows = data.iter().map(RecordMapping::field_values).collect();
        let affected = self
            .database
            .execute(&Query::new(T::table_name(), Action::insert_many(rows)))
            .await?;

        for record in &data {
            self.emit_record_change(ChangeType::Insert, record);
        }
        Ok(affected)
    }

    async fn get_by_id(&self, id: ScalarValue) -> Result<Option<Self::Model>, StoreError> {
        let mut models = self.fetch_models(&T::select_by_id_query(id)).await?;
        Ok(if models.is_empty() {
            None
        } else {
            Some(models.swap_remove(0))
        })
    }

    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError> {
        self.fetch_models(&QueryBuilder::new().select_from(T::table_name()))
            .await
    }

    async fn update(&self, data: &Self::Model) -> Result<bool, StoreError> {
        let affected = self.database.execute(&data.update_query()).await?;
        if affected > 0 {
            self.emit_record_change(ChangeType::Update, data);
        }
        Ok(affected > 0)
    }

    async fn upsert(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        self.database.execute(&data.upsert_query()).await?;
        self.emit_record_change(ChangeType::Upsert, &data);
        Ok(data)
    }

    async fn delete(&self, id: ScalarValue) -> Result<bool, StoreError> {
        let query = Query::new(
            T::table_name(),
            Action::delete(vec![QueryFilter::eq(T::primary_key_field(), id.clone())]),
        );
        let affected = self.database.execute(&query).await?;
        if affected > 0 {
            self.emit_delete(&id);
        }
        Ok(affected > 0)
    }

    /// Events are emitted for every requested id once anything was deleted
    async fn delete_many(&self, ids: Vec<ScalarValue>) -> Result<u64, StoreError> {
        let query = Query::new(
            T::table_name(),
            Action::delete_many(T::primary_key_field(), ids.iter().cloned()),
        );
        let affected = self.database.execute(&query).await?;
        if affected > 0 {
            for id in &ids {
                self.emit_delete(id);
            }
        }
        Ok(affected)
    }

    async fn find(&self, query: QueryBuilder) -> Result<Vec<Self::Model>, StoreError> {
        self.fetch_models(&query.select_from(T::table_name())).await
    }

    async fn find_one(&self, query: QueryBuilder) -> Result<Option<Self::Model>, StoreError> {
        let mut models = self.find(query.limit(1)).await?;
        Ok(models.pop())
    }
}
