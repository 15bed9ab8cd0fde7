//! Unified action request
//!
//! A resource endpoint receives `{ "action": "...", "params": { ... } }`.
//! Both keys are optional on the wire: `action` defaults to `""` (which is
//! then rejected as unsupported) and `params` to `{}`.

use crate::error::ActionError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Raw `params` object of a request
pub type Params = Map<String, Value>;

/// Equality filters for `list`, keyed by column name
pub type Filters = Map<String, Value>;

/// Page used when `page` is omitted
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when `size` is omitted
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: u64 = 100;

/// Body of `POST /<resource>/actions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Verb to execute
    #[serde(default)]
    pub action: String,

    /// Verb arguments
    #[serde(default)]
    pub params: Params,
}

impl ActionRequest {
    /// Build a request from an action name and params
    #[must_use]
    pub fn new(action: impl Into<String>, params: Params) -> Self {
        Self {
            action: action.into(),
            params,
        }
    }

    /// Extract the `id` parameter
    ///
    /// Accepts a JSON string or integer. An empty string, `0`, `null` or any
    /// other JSON type counts as missing.
    pub fn id(&self) -> Result<String, ActionError> {
        match self.params.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
            Some(Value::Number(id)) if (id.is_i64() || id.is_u64()) && id.as_u64() != Some(0) => {
                Ok(id.to_string())
            }
            _ => Err(ActionError::MissingParam("id")),
        }
    }

    /// Decode and validate `params` as `T`
    ///
    /// Keys that `T` does not know (such as `id` on an update) are ignored.
    pub fn decode<T>(&self) -> Result<T, ActionError>
    where
        T: DeserializeOwned + Validate,
    {
        let value: T = serde_json::from_value(Value::Object(self.params.clone()))?;
        value.validate()?;
        Ok(value)
    }
}

/// Supported verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Paginated listing
    List,
    /// Fetch one record
    Get,
    /// Insert a record
    Create,
    /// Sparse update of one record
    Update,
    /// Delete one record
    Delete,
}

impl Action {
    /// Wire name of the verb
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "get" => Ok(Self::Get),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(ActionError::UnsupportedAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access to the pagination part of a list request
pub trait Pagination {
    /// 1-based page number
    fn page(&self) -> u64;

    /// Items per page
    fn size(&self) -> u64;

    /// Column equality filters
    fn filters(&self) -> &Filters;
}

const fn default_page() -> u64 {
    DEFAULT_PAGE
}

const fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Generic list parameters
///
/// Generated resources ship their own `<Class>ListParams` with the same
/// bounds; this type serves resources that need nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ListParams {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,

    /// Page size, 1 to 100
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u64,

    /// Column equality filters
    #[serde(default)]
    pub filters: Filters,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            filters: Filters::new(),
        }
    }
}

impl Pagination for ListParams {
    fn page(&self) -> u64 {
        self.page
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn filters(&self) -> &Filters {
        &self.filters
    }
}
