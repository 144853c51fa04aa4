/// Data access façade
///
/// [`DataStore`] owns every entity collection in model shape and mediates
/// each create, update and delete against a [`RowStore`]. State only
/// changes after the store confirms a write, and the confirmed row (not the
/// request payload) is what gets applied.
///
/// # Bulk load
///
/// [`DataStore::load_all`] reads the profile and all collections
/// concurrently and waits for every read. If any read or decode fails,
/// nothing is applied and the load state becomes [`LoadState::Failed`].
/// Reads are never retried.
///
/// # Ordering
///
/// Mutations on the same table pass through a per-table gate, so their
/// confirmed results are applied in the order the calls were made.
/// Mutations on different tables run independently.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vena_shared::data::DataStore;
/// use vena_shared::models::client::{Client, NewClient};
/// use vena_shared::store::MemoryRowStore;
///
/// # async fn example() -> Result<(), vena_shared::data::DataError> {
/// let data = DataStore::new(Arc::new(MemoryRowStore::new()));
/// data.load_all().await?;
///
/// let ana = data
///     .create::<Client>(NewClient::new("Ana", "ana@x.com", "0811", "active"))
///     .await?;
/// assert_eq!(data.list::<Client>().await[0].id, ana.id);
/// # Ok(())
/// # }
/// ```

use crate::models::profile::{ProfilePatch, ProfileRow};
use crate::models::{
    decode_as, decode_row, encode_row, AddOn, Asset, Card, Client, ClientFeedback, Collections,
    Contract, Entity, FinancialPocket, Lead, Notification, Package, Profile, Project, PromoCode,
    RewardLedgerEntry, SocialMediaPost, Sop, TeamMember, TeamPaymentRecord, TeamProjectPayment,
    Transaction,
};
use crate::store::{RowStore, StoreError, Table};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Data layer errors
#[derive(Error, Debug)]
pub enum DataError {
    /// The row store rejected or failed the request
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A profile operation ran before any profile was loaded
    #[error("No profile loaded")]
    ProfileMissing,
}

/// Data layer result type alias
pub type DataResult<T> = Result<T, DataError>;

/// Progress of the bulk load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing loaded yet
    Idle,
    /// A bulk load is in flight
    Loading,
    /// The last bulk load succeeded
    Ready,
    /// The last bulk load failed with this message
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// Point-in-time copy of everything the façade holds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub load_state: LoadState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(flatten)]
    pub collections: Collections,
}

#[derive(Debug)]
struct State {
    load_state: LoadState,
    profile: Option<Profile>,
    collections: Collections,
}

struct Inner {
    store: Arc<dyn RowStore>,
    state: RwLock<State>,
    gates: [Mutex<()>; 20],
}

/// Shared handle to the façade; clones see the same state
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("store", &self.inner.store.name())
            .finish()
    }
}

/// Reads and decodes one whole collection
async fn fetch<E: Entity>(store: &dyn RowStore) -> Result<Vec<E>, StoreError> {
    store
        .select_all(E::TABLE, E::TABLE.order())
        .await?
        .into_iter()
        .map(decode_row::<E>)
        .collect()
}

async fn fetch_profile(store: &dyn RowStore) -> Result<Option<Profile>, StoreError> {
    store
        .select_single(Table::Profiles)
        .await?
        .map(|raw| decode_as::<ProfileRow>(Table::Profiles, raw).map(Profile::from))
        .transpose()
}

impl DataStore {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        DataStore {
            inner: Arc::new(Inner {
                store,
                state: RwLock::new(State {
                    load_state: LoadState::Idle,
                    profile: None,
                    collections: Collections::default(),
                }),
                gates: std::array::from_fn(|_| Mutex::new(())),
            }),
        }
    }

    /// Name of the backing row store
    pub fn backend(&self) -> &str {
        self.inner.store.name()
    }

    async fn gate(&self, table: Table) -> MutexGuard<'_, ()> {
        self.inner.gates[table as usize].lock().await
    }

    /// Loads the profile and every collection, replacing all held state
    pub async fn load_all(&self) -> DataResult<()> {
        self.inner.state.write().await.load_state = LoadState::Loading;
        tracing::info!(backend = self.backend(), "Loading all collections");

        match self.fetch_all().await {
            Ok((profile, collections)) => {
                let mut state = self.inner.state.write().await;
                state.profile = profile;
                state.collections = collections;
                state.load_state = LoadState::Ready;

                tracing::info!(
                    clients = state.collections.clients.len(),
                    projects = state.collections.projects.len(),
                    has_profile = state.profile.is_some(),
                    "All collections loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Bulk load failed");
                self.inner.state.write().await.load_state = LoadState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Re-runs the bulk load
    pub async fn refetch(&self) -> DataResult<()> {
        self.load_all().await
    }

    async fn fetch_all(&self) -> Result<(Option<Profile>, Collections), StoreError> {
        let store = self.inner.store.as_ref();

        let (
            profile,
            clients,
            projects,
            team_members,
            transactions,
            cards,
            pockets,
            leads,
            packages,
            add_ons,
            assets,
            contracts,
            client_feedback,
            notifications,
            social_media_posts,
            promo_codes,
            sops,
            team_project_payments,
            team_payment_records,
            reward_ledger_entries,
        ) = tokio::try_join!(
            fetch_profile(store),
            fetch::<Client>(store),
            fetch::<Project>(store),
            fetch::<TeamMember>(store),
            fetch::<Transaction>(store),
            fetch::<Card>(store),
            fetch::<FinancialPocket>(store),
            fetch::<Lead>(store),
            fetch::<Package>(store),
            fetch::<AddOn>(store),
            fetch::<Asset>(store),
            fetch::<Contract>(store),
            fetch::<ClientFeedback>(store),
            fetch::<Notification>(store),
            fetch::<SocialMediaPost>(store),
            fetch::<PromoCode>(store),
            fetch::<Sop>(store),
            fetch::<TeamProjectPayment>(store),
            fetch::<TeamPaymentRecord>(store),
            fetch::<RewardLedgerEntry>(store),
        )?;

        Ok((
            profile,
            Collections {
                clients,
                projects,
                team_members,
                transactions,
                cards,
                pockets,
                leads,
                packages,
                add_ons,
                assets,
                contracts,
                client_feedback,
                notifications,
                social_media_posts,
                promo_codes,
                sops,
                team_project_payments,
                team_payment_records,
                reward_ledger_entries,
            },
        ))
    }

    /// Current load state
    pub async fn load_state(&self) -> LoadState {
        self.inner.state.read().await.load_state.clone()
    }

    /// Copy of the profile and every collection
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.inner.state.read().await;
        Snapshot {
            load_state: state.load_state.clone(),
            profile: state.profile.clone(),
            collections: state.collections.clone(),
        }
    }

    /// Copy of one collection, in held order
    pub async fn list<E: Entity>(&self) -> Vec<E> {
        E::collection(&self.inner.state.read().await.collections).clone()
    }

    /// Copy of the record with `id`
    pub async fn get<E: Entity>(&self, id: &str) -> Option<E> {
        E::collection(&self.inner.state.read().await.collections)
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Number of records held for `table`
    pub async fn count(&self, table: Table) -> usize {
        self.inner.state.read().await.collections.len_of(table)
    }

    /// Inserts a record and prepends the stored version
    pub async fn create<E: Entity>(&self, new: E::New) -> DataResult<E> {
        let _gate = self.gate(E::TABLE).await;

        let values = encode_row(E::TABLE, &new)?;
        let row = self.inner.store.insert(E::TABLE, values).await?;
        let created: E = decode_row(row)?;

        let mut state = self.inner.state.write().await;
        E::collection_mut(&mut state.collections).insert(0, created.clone());

        tracing::debug!(table = %E::TABLE, id = created.id(), "Created record");
        Ok(created)
    }

    /// Updates a record and replaces it in place with the stored version
    pub async fn update<E: Entity>(&self, id: &str, patch: E::Patch) -> DataResult<E> {
        let _gate = self.gate(E::TABLE).await;

        let values = encode_row(E::TABLE, &patch)?;
        let row = self.inner.store.update(E::TABLE, id, values).await?;
        let updated: E = decode_row(row)?;

        let mut state = self.inner.state.write().await;
        if let Some(slot) = E::collection_mut(&mut state.collections)
            .iter_mut()
            .find(|item| item.id() == id)
        {
            *slot = updated.clone();
        }

        tracing::debug!(table = %E::TABLE, id, "Updated record");
        Ok(updated)
    }

    /// Deletes a record and drops it from its collection
    pub async fn delete<E: Entity>(&self, id: &str) -> DataResult<()> {
        let _gate = self.gate(E::TABLE).await;

        self.inner.store.delete(E::TABLE, id).await?;

        let mut state = self.inner.state.write().await;
        E::collection_mut(&mut state.collections).retain(|item| item.id() != id);

        tracing::debug!(table = %E::TABLE, id, "Deleted record");
        Ok(())
    }

    /// Loaded profile, if any
    pub async fn profile(&self) -> Option<Profile> {
        self.inner.state.read().await.profile.clone()
    }

    /// Updates the loaded profile and replaces it with the stored version
    pub async fn update_profile(&self, patch: ProfilePatch) -> DataResult<Profile> {
        let _gate = self.gate(Table::Profiles).await;

        let id = self
            .profile()
            .await
            .map(|profile| profile.id)
            .ok_or(DataError::ProfileMissing)?;

        let values = encode_row(Table::Profiles, &patch)?;
        let row = self.inner.store.update(Table::Profiles, &id, values).await?;
        let profile = Profile::from(decode_as::<ProfileRow>(Table::Profiles, row)?);

        self.inner.state.write().await.profile = Some(profile.clone());
        tracing::debug!(id = %profile.id, "Updated profile");
        Ok(profile)
    }
}
