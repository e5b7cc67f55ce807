use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::client::Client;
use crate::endpoints::{BillComEndpoint, CrudOp};
use crate::entities::metadata::Metadata;
use crate::entities::{BillComObject, CreateParams, from_value};
use crate::error::{Error, Result};
use crate::request::{self, ListParams};

/// Handle for the standard CRUD operations on one Bill.com resource.
///
/// Obtained from the accessor methods on [`Client`], e.g. `client.bills()`.
#[derive(Debug)]
pub struct Resource<'a, T> {
    client: &'a Client,
    _entity: PhantomData<T>,
}

impl<'a, T> Resource<'a, T>
where
    T: BillComObject + DeserializeOwned + Serialize,
{
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// Create a new record.
    ///
    /// Required fields are validated client-side in the documented order
    /// before anything goes on the wire.
    #[instrument(skip(self, params), fields(entity = T::ENTITY))]
    pub async fn create<B>(&self, params: &B) -> Result<T>
    where
        B: CreateParams<Entity = T>,
    {
        params.validate()?;
        let data = request::data_object(T::ENTITY, params, false)?;
        let response = self
            .client
            .post(
                BillComEndpoint::Crud(CrudOp::Create, T::ENTITY),
                Some(data),
            )
            .await?;
        from_value(response)
    }

    /// Fetch a single record by ID.
    #[instrument(skip(self), fields(entity = T::ENTITY))]
    pub async fn read(&self, id: &str) -> Result<T> {
        if id.is_empty() {
            return Err(Error::MissingRequiredField { field: "id" });
        }
        let response = self
            .client
            .post(
                BillComEndpoint::Crud(CrudOp::Read, T::ENTITY),
                Some(json!({ "id": id })),
            )
            .await?;
        from_value(response)
    }

    /// List records with explicit parameters.
    #[instrument(skip(self, params), fields(entity = T::ENTITY))]
    pub async fn list(&self, params: ListParams) -> Result<Vec<T>> {
        let data = serde_json::to_value(&params)?;
        let response = self
            .client
            .post(BillComEndpoint::Crud(CrudOp::List, T::ENTITY), Some(data))
            .await?;
        let items: Vec<Value> = serde_json::from_value(response)?;
        items.into_iter().map(from_value).collect()
    }

    /// List records with the default parameters
    /// (`nested: true, start: 0, max: 99`, no filters or sort).
    #[instrument(skip(self), fields(entity = T::ENTITY))]
    pub async fn list_all(&self) -> Result<Vec<T>> {
        self.list(ListParams::default()).await
    }

    /// Update a record by sending its full current state back.
    ///
    /// The entity's discriminator is checked against this handle's type; a
    /// tampered or foreign record fails before any network call.
    #[instrument(skip(self, entity), fields(entity = T::ENTITY))]
    pub async fn update(&self, entity: &T) -> Result<T> {
        let value = serde_json::to_value(entity)?;
        match value.get("entity").and_then(Value::as_str) {
            Some(tag) if tag == T::ENTITY => {}
            Some(tag) => {
                return Err(Error::IncorrectEntityType {
                    actual: tag.to_string(),
                    expected: T::ENTITY,
                });
            }
            None => {
                return Err(Error::UnknownEntity {
                    name: "(missing discriminator)".to_string(),
                });
            }
        }

        let mut data = Map::new();
        data.insert("obj".to_string(), value);
        let response = self
            .client
            .post(
                BillComEndpoint::Crud(CrudOp::Update, T::ENTITY),
                Some(Value::Object(data)),
            )
            .await?;
        from_value(response)
    }

    /// Field metadata for this resource's entity type.
    ///
    /// Fetched from `GetEntityMetadata.json` on first use and cached on the
    /// client for the life of the session.
    #[instrument(skip(self), fields(entity = T::ENTITY))]
    pub async fn metadata(&self) -> Result<&'a Metadata> {
        let cell = self
            .client
            .metadata_cell(T::ENTITY)
            .ok_or_else(|| Error::UnknownEntity {
                name: T::ENTITY.to_string(),
            })?;

        cell.get_or_try_init(|| async {
            trace!(entity = T::ENTITY, "fetching entity metadata");
            let response = self
                .client
                .post(
                    BillComEndpoint::EntityMetadata,
                    Some(json!({ "entity": [T::ENTITY] })),
                )
                .await?;
            let value = response
                .get(T::ENTITY)
                .cloned()
                .ok_or_else(|| Error::UnknownEntity {
                    name: T::ENTITY.to_string(),
                })?;
            serde_json::from_value::<Metadata>(value).map_err(Error::from)
        })
        .await
    }
}
