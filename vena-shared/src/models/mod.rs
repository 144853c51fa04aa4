/// Entity models and their row transformers
///
/// Every persisted entity exists in two shapes:
///
/// - **Row shape** (`XRow`): flat snake_case columns as stored by the row
///   store. Nullable columns are `Option<T>` and serialize as `null`, so the
///   key is always present.
/// - **Model shape** (`X`): camelCase record used by application code.
///   Optional fields are `Option<T>` and are omitted from JSON when absent.
///
/// `impl From<XRow> for X` and `impl From<X> for XRow` are the transformers.
/// They are pure field moves; malformed input fails earlier, when the raw
/// JSON row is decoded into `XRow` (see [`decode_row`]).
///
/// Creation payloads (`NewX`) and partial updates (`XPatch`) are accepted in
/// model shape and serialize straight into row shape. Patch fields for
/// nullable columns are tri-state: missing (unchanged), `null` (cleared) or
/// a value.
///
/// # Example
///
/// ```
/// use vena_shared::models::client::{Client, ClientRow};
///
/// let row: ClientRow = serde_json::from_value(serde_json::json!({
///     "id": "c-1",
///     "name": "Ana",
///     "email": "ana@x.com",
///     "phone": "0811",
///     "whatsapp": null,
///     "instagram": null,
///     "client_type": "Langsung",
///     "since": "2024-01-01",
///     "status": "active",
///     "last_contact": "2024-01-01T00:00:00Z",
///     "portal_access_id": "p-1",
///     "created_at": "2024-01-01T00:00:00Z"
/// }))
/// .unwrap();
///
/// let client = Client::from(row);
/// assert!(client.whatsapp.is_none());
/// ```

pub mod asset;
pub mod client;
pub mod contract;
pub mod feedback;
pub mod finance;
pub mod lead;
pub mod notification;
pub mod package;
pub mod profile;
pub mod project;
pub mod promo_code;
pub mod social;
pub mod sop;
pub mod team;
pub mod user;

use crate::store::{StoreError, StoreResult, Table};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use validator::Validate;

pub use asset::Asset;
pub use client::Client;
pub use contract::Contract;
pub use feedback::ClientFeedback;
pub use finance::{Card, FinancialPocket, Transaction};
pub use lead::Lead;
pub use notification::Notification;
pub use package::{AddOn, Package};
pub use profile::Profile;
pub use project::Project;
pub use promo_code::PromoCode;
pub use social::SocialMediaPost;
pub use sop::Sop;
pub use team::{RewardLedgerEntry, TeamMember, TeamPaymentRecord, TeamProjectPayment};
pub use user::{User, UserRole};

/// A JSON object as exchanged with the row store
pub type RowMap = Map<String, JsonValue>;

/// Contract shared by every collection entity
///
/// Ties the model to its row shape, creation and patch payloads, the table
/// it lives in, and its slot in [`Collections`].
pub trait Entity: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Row shape of this entity
    type Row: Serialize + DeserializeOwned + From<Self> + Into<Self> + Send;

    /// Creation payload (model shape in, row shape out)
    type New: Serialize + DeserializeOwned + Validate + Send + Sync;

    /// Partial update payload (model shape in, row shape out)
    type Patch: Serialize + DeserializeOwned + Send + Sync;

    /// Table this entity is persisted in
    const TABLE: Table;

    /// Opaque identifier
    fn id(&self) -> &str;

    /// This entity's collection inside a set of collections
    fn collection(set: &Collections) -> &Vec<Self>;

    /// Mutable access to this entity's collection
    fn collection_mut(set: &mut Collections) -> &mut Vec<Self>;
}

/// Every entity collection, in model shape
///
/// The profile is a singleton and is held separately by its owners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub team_members: Vec<TeamMember>,
    pub transactions: Vec<Transaction>,
    pub cards: Vec<Card>,
    pub pockets: Vec<FinancialPocket>,
    pub leads: Vec<Lead>,
    pub packages: Vec<Package>,
    pub add_ons: Vec<AddOn>,
    pub assets: Vec<Asset>,
    pub contracts: Vec<Contract>,
    pub client_feedback: Vec<ClientFeedback>,
    pub notifications: Vec<Notification>,
    pub social_media_posts: Vec<SocialMediaPost>,
    pub promo_codes: Vec<PromoCode>,
    pub sops: Vec<Sop>,
    pub team_project_payments: Vec<TeamProjectPayment>,
    pub team_payment_records: Vec<TeamPaymentRecord>,
    pub reward_ledger_entries: Vec<RewardLedgerEntry>,
}

impl Collections {
    /// Number of records held for `table` (0 for the profile table)
    pub fn len_of(&self, table: Table) -> usize {
        match table {
            Table::Profiles => 0,
            Table::Clients => self.clients.len(),
            Table::Projects => self.projects.len(),
            Table::TeamMembers => self.team_members.len(),
            Table::Transactions => self.transactions.len(),
            Table::Cards => self.cards.len(),
            Table::FinancialPockets => self.pockets.len(),
            Table::Leads => self.leads.len(),
            Table::Packages => self.packages.len(),
            Table::AddOns => self.add_ons.len(),
            Table::Assets => self.assets.len(),
            Table::Contracts => self.contracts.len(),
            Table::ClientFeedback => self.client_feedback.len(),
            Table::Notifications => self.notifications.len(),
            Table::SocialMediaPosts => self.social_media_posts.len(),
            Table::PromoCodes => self.promo_codes.len(),
            Table::Sops => self.sops.len(),
            Table::TeamProjectPayments => self.team_project_payments.len(),
            Table::TeamPaymentRecords => self.team_payment_records.len(),
            Table::RewardLedgerEntries => self.reward_ledger_entries.len(),
        }
    }
}

/// Decodes a raw row into a model
///
/// A row that does not match the row schema is an upstream defect and is
/// reported as [`StoreError::Decode`].
pub fn decode_row<E: Entity>(raw: RowMap) -> StoreResult<E> {
    decode_as::<E::Row>(E::TABLE, raw).map(Into::into)
}

/// Decodes a raw row into any row-shaped type
pub fn decode_as<T: DeserializeOwned>(table: Table, raw: RowMap) -> StoreResult<T> {
    serde_json::from_value(JsonValue::Object(raw)).map_err(|source| StoreError::Decode {
        table: table.name(),
        source,
    })
}

/// Serializes a row-shaped value into a JSON object
pub fn encode_row<T: Serialize>(table: Table, value: &T) -> StoreResult<RowMap> {
    match serde_json::to_value(value) {
        Ok(JsonValue::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Encode(format!(
            "{} payload must encode to an object, got {}",
            table.name(),
            other
        ))),
        Err(err) => Err(StoreError::Encode(format!("{}: {}", table.name(), err))),
    }
}

/// Row shape of a model, as a JSON object
pub fn model_to_row<E: Entity>(model: &E) -> StoreResult<RowMap> {
    encode_row(E::TABLE, &E::Row::from(model.clone()))
}

/// Applies a row-shaped patch to a model by merging through the row shape
///
/// Used where no persistence boundary performs the merge (local state).
pub fn merge_patch<E: Entity>(model: &E, patch: &E::Patch) -> StoreResult<E> {
    let mut row = model_to_row(model)?;
    for (column, value) in encode_row(E::TABLE, patch)? {
        row.insert(column, value);
    }
    decode_row(row)
}

/// Deserializes a present field as `Some(value)`, including `null` as `Some(None)`
///
/// Pair with `#[serde(default)]` so a missing field stays `None`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
