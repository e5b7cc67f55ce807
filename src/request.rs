//! Construction of the `data` payload sent with every Bill.com call.
//!
//! The API takes a form-urlencoded body whose `data` field is itself a JSON
//! document. Create requests wrap the entity fields under an `obj` key;
//! nested line items are embedded bare, each carrying its own `entity` tag.
//! Everything goes through `serde_json`, so quoting and escaping are always
//! valid JSON.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::entities::BillComObject;
use crate::error::Result;

/// The one field Bill.com requires *outside* the `obj` wrapper: bank-account
/// creation sends `agreedWithTOS` as a sibling of `obj`, not a member of it.
const TOS_FIELD: &str = "agreedWithTOS";

/// Serializes a parameter struct into the `data` document for a create or
/// update call.
///
/// The params serialize to a JSON object, get the `entity` discriminator
/// injected, and are wrapped under `obj` unless `nested` is set. An
/// `agreedWithTOS` member is hoisted out beside `obj`.
pub(crate) fn data_object<B: Serialize>(
    entity: &'static str,
    params: &B,
    nested: bool,
) -> Result<Value> {
    let mut obj: Map<String, Value> = serde_json::from_value(serde_json::to_value(params)?)?;
    obj.insert("entity".to_string(), Value::String(entity.to_string()));

    if nested {
        return Ok(Value::Object(obj));
    }

    let tos = obj.remove(TOS_FIELD);
    let mut top = Map::new();
    top.insert("obj".to_string(), Value::Object(obj));
    if let Some(tos) = tos {
        top.insert(TOS_FIELD.to_string(), tos);
    }
    Ok(Value::Object(top))
}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    entity: &'static str,
    #[serde(flatten)]
    inner: &'a T,
}

/// `serialize_with` helper for line-item arrays: each element is emitted with
/// its own `entity` discriminator.
pub(crate) fn tagged_items<S, T>(items: &[T], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: BillComObject + Serialize,
{
    serializer.collect_seq(items.iter().map(|inner| Tagged {
        entity: T::ENTITY,
        inner,
    }))
}

/// One predicate of a `List` call.
#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    pub field: String,
    pub op: String,
    pub value: String,
}

impl Filter {
    #[must_use]
    pub fn new(field: impl Into<String>, op: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: op.into(),
            value: value.into(),
        }
    }
}

/// One sort key of a `List` call. `asc` is the API's string-coded boolean.
#[derive(Debug, Clone, Serialize)]
pub struct Sort {
    pub field: String,
    pub asc: String,
}

impl Sort {
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            asc: "1".to_string(),
        }
    }

    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            asc: "0".to_string(),
        }
    }
}

/// Parameters for `Crud/List` calls.
///
/// The defaults match the documented contract: `{nested: true, start: 0,
/// max: 99, filters: [], sort: []}`.
#[derive(Debug, Clone, Serialize)]
pub struct ListParams {
    pub nested: bool,
    pub start: u32,
    pub max: u32,
    pub filters: Vec<Filter>,
    pub sort: Vec<Sort>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            nested: true,
            start: 0,
            max: 99,
            filters: Vec::new(),
            sort: Vec::new(),
        }
    }
}

impl ListParams {
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }
}
