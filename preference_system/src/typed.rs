//! Typed access to a preferences manager
//!
//! Values are written through the tagged value codec, so a slot remembers
//! its kind. Reading with a different type yields `None` instead of an
//! error, the same as an absent key.

use crate::errors::PreferencesError;
use crate::manager::PreferencesManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use type_mapping::{decode_deserializable, encode_serializable, Storable, ValueKind};

#[derive(Debug, Clone)]
pub struct TypedPreferences {
    inner: Arc<dyn PreferencesManager>,
}

impl TypedPreferences {
    pub fn new(inner: Arc<dyn PreferencesManager>) -> Self {
        Self { inner }
    }

    pub fn manager(&self) -> &Arc<dyn PreferencesManager> {
        &self.inner
    }

    pub async fn set<T: Storable>(&self, key: &str, value: &T) -> Result<(), PreferencesError> {
        let bytes = value.encode_value()?;
        self.inner.put(key, &bytes).await
    }

    pub async fn get<T: Storable>(&self, key: &str) -> Result<Option<T>, PreferencesError> {
        let bytes = self.inner.get(key).await?;
        Ok(bytes.and_then(|b| T::decode_value(&b)))
    }

    /// Stores any serde type as a JSON slot
    pub async fn set_json<T>(&self, key: &str, value: &T) -> Result<(), PreferencesError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = encode_serializable(value)?;
        self.inner.put(key, &bytes).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PreferencesError> {
        let bytes = self.inner.get(key).await?;
        Ok(bytes.and_then(|b| decode_deserializable(&b)))
    }

    /// Kind of the stored value, if the slot holds a tagged value
    pub async fn kind_of(&self, key: &str) -> Result<Option<ValueKind>, PreferencesError> {
        let bytes = self.inner.get(key).await?;
        Ok(bytes.and_then(|b| ValueKind::of_encoded(&b)))
    }

    pub async fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        self.inner.remove(key).await
    }

    pub async fn contains(&self, key: &str) -> Result<bool, PreferencesError> {
        self.inner.contains(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPreferences;
    use serde::Deserialize;
    use type_mapping::Json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Window {
        width: u32,
        height: u32,
    }

    fn typed() -> (MemoryPreferences, TypedPreferences) {
        let memory = MemoryPreferences::new();
        let typed = TypedPreferences::new(Arc::new(memory.clone()));
        (memory, typed)
    }

    #[tokio::test]
    async fn test_native_kinds() {
        let (memory, prefs) = typed();

        prefs.set("name", &"ann".to_string()).await.unwrap();
        prefs.set("count", &42i64).await.unwrap();
        prefs.set("dark", &true).await.unwrap();

        assert_eq!(memory.get("name").await.unwrap(), Some(b"STR:ann".to_vec()));
        assert_eq!(prefs.get::<String>("name").await.unwrap(), Some("ann".to_string()));
        assert_eq!(prefs.get::<i64>("count").await.unwrap(), Some(42));
        assert_eq!(prefs.get::<bool>("dark").await.unwrap(), Some(true));
        assert_eq!(prefs.kind_of("count").await.unwrap(), Some(ValueKind::Int));
    }

    #[tokio::test]
    async fn test_type_mismatch_reads_as_absent() {
        let (_, prefs) = typed();
        prefs.set("count", &42i64).await.unwrap();

        assert_eq!(prefs.get::<String>("count").await.unwrap(), None);
        assert_eq!(prefs.get::<i64>("missing").await.unwrap(), None);
        assert!(prefs.contains("count").await.unwrap());
    }

    #[tokio::test]
    async fn test_json_slots() {
        let (_, prefs) = typed();
        let window = Window { width: 800, height: 600 };

        prefs.set_json("window", &window).await.unwrap();
        assert_eq!(prefs.get_json::<Window>("window").await.unwrap(), Some(window.clone()));
        assert_eq!(prefs.kind_of("window").await.unwrap(), Some(ValueKind::Json));

        let wrapped = prefs.get::<Json<Window>>("window").await.unwrap();
        assert_eq!(wrapped, Some(Json(window)));

        prefs.remove("window").await.unwrap();
        assert_eq!(prefs.get_json::<Window>("window").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_raw_json_value() {
        let (_, prefs) = typed();
        let value = serde_json::json!({"recent": ["a", "b"], "count": 2});

        prefs.set("state", &value).await.unwrap();
        assert_eq!(prefs.get::<serde_json::Value>("state").await.unwrap(), Some(value));
    }
}
