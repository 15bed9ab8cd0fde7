//! Resource service contract
//!
//! A generated `<Class>Service` implements [`ResourceService`]; the dispatch
//! layer only ever talks to this trait.

use crate::action::{Filters, Pagination};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

/// CRUD operations behind a unified action endpoint
///
/// Every method opens and owns its own unit of work. Errors are plain
/// [`anyhow::Error`]s; wrap an [`ActionError`](crate::ActionError) in one to
/// report a specific status instead of a generic business error.
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Projection returned by `list` and `get`
    type Item: Serialize + Send;

    /// Payload accepted by `create`
    type Create: DeserializeOwned + Validate + Send;

    /// Payload accepted by `update`
    type Update: DeserializeOwned + Validate + Send;

    /// Parameters accepted by `list`
    type ListParams: DeserializeOwned + Validate + Pagination + Send;

    /// One page of records plus the total count before pagination
    async fn list(
        &self,
        page: u64,
        size: u64,
        filters: Filters,
    ) -> anyhow::Result<(Vec<Self::Item>, u64)>;

    /// Fetch one record, `None` when absent
    async fn get(&self, id: &str) -> anyhow::Result<Option<Self::Item>>;

    /// Insert a record and return its new id
    async fn create(&self, data: Self::Create) -> anyhow::Result<String>;

    /// Apply the supplied fields of `data`; `false` when the record is absent
    async fn update(&self, id: &str, data: Self::Update) -> anyhow::Result<bool>;

    /// Delete one record; `false` when the record is absent
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;
}

/// The fields an update payload actually supplies
///
/// Built by serializing the payload and dropping every `null`, so an
/// `Option` field left as `None` never overwrites stored data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparsePatch(Map<String, Value>);

impl SparsePatch {
    /// Collect the non-null fields of `value`
    ///
    /// Anything that does not serialize to a JSON object yields an empty patch.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let fields = match serde_json::to_value(value)? {
            Value::Object(map) => map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
            _ => Map::new(),
        };
        Ok(Self(fields))
    }

    /// Whether no field was supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of supplied fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `field` was supplied
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Supplied value of `field`
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Supplied field names, in serialization order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume into the underlying map
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
