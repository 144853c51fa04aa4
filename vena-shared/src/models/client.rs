/// Client model and row transformer
///
/// # Schema
///
/// ```sql
/// CREATE TABLE clients (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     email TEXT NOT NULL,
///     phone TEXT NOT NULL,
///     whatsapp TEXT,
///     instagram TEXT,
///     client_type TEXT NOT NULL DEFAULT 'Langsung',
///     since DATE NOT NULL DEFAULT CURRENT_DATE,
///     status TEXT NOT NULL,
///     last_contact TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     portal_access_id UUID NOT NULL DEFAULT gen_random_uuid(),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use vena_shared::data::DataStore;
/// use vena_shared::models::client::{Client, NewClient};
///
/// # async fn example(data: DataStore) -> Result<(), vena_shared::data::DataError> {
/// let client: Client = data
///     .create::<Client>(NewClient::new("Ana", "ana@x.com", "0811", "active"))
///     .await?;
/// println!("Created client {}", client.id);
/// # Ok(())
/// # }
/// ```

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client row (persistence shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub client_type: String,
    pub since: String,
    pub status: String,
    pub last_contact: String,
    pub portal_access_id: String,
    pub created_at: String,
}

/// Client model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client ID
    pub id: String,

    /// Display name
    pub name: String,

    pub email: String,

    pub phone: String,

    /// WhatsApp number when different from `phone`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,

    /// Instagram handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,

    /// Direct customer or reselling vendor
    pub client_type: String,

    /// Date the relationship started (`YYYY-MM-DD`)
    pub since: String,

    pub status: String,

    pub last_contact: String,

    /// Opaque id used by the client portal route
    pub portal_access_id: String,

    pub created_at: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            whatsapp: row.whatsapp,
            instagram: row.instagram,
            client_type: row.client_type,
            since: row.since,
            status: row.status,
            last_contact: row.last_contact,
            portal_access_id: row.portal_access_id,
            created_at: row.created_at,
        }
    }
}

impl From<Client> for ClientRow {
    fn from(client: Client) -> Self {
        ClientRow {
            id: client.id,
            name: client.name,
            email: client.email,
            phone: client.phone,
            whatsapp: client.whatsapp,
            instagram: client.instagram,
            client_type: client.client_type,
            since: client.since,
            status: client.status,
            last_contact: client.last_contact,
            portal_access_id: client.portal_access_id,
            created_at: client.created_at,
        }
    }
}

/// Input for creating a client
///
/// `client_type`, `since` and `last_contact` fall back to store defaults
/// when not supplied. The portal access id is always assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewClient {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub phone: String,

    pub whatsapp: Option<String>,

    pub instagram: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<String>,
}

impl NewClient {
    /// Creates a client payload with only the required fields
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        NewClient {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            whatsapp: None,
            instagram: None,
            client_type: None,
            since: None,
            status: status.into(),
            last_contact: None,
        }
    }
}

/// Partial update for a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub whatsapp: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub instagram: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<String>,
}

impl Entity for Client {
    type Row = ClientRow;
    type New = NewClient;
    type Patch = ClientPatch;

    const TABLE: Table = Table::Clients;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.clients
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.clients
    }
}
