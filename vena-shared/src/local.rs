/// Local-first workspace
///
/// [`LocalWorkspace`] keeps every collection, the vendor profile and the
/// session in [`PersistentState`] values, one key each:
///
/// - `vena-<collection>` (e.g. `vena-clients`, `vena-teamMembers`)
/// - `vena-profile`
/// - `vena-isAuthenticated`, `vena-currentUser`
///
/// Each value is the JSON of the whole collection and is overwritten
/// wholesale on save. Records created here get a client-side UUID and the
/// same column defaults the row store would assign. Storage failures never
/// surface as errors; they are logged and the in-memory state stays
/// authoritative (see [`crate::persist`]).
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vena_shared::local::LocalWorkspace;
/// use vena_shared::models::client::{Client, NewClient};
/// use vena_shared::persist::FileKeyValueStore;
///
/// # async fn example() -> Result<(), vena_shared::local::LocalError> {
/// let store = Arc::new(FileKeyValueStore::new("./vena-data"));
/// let mut workspace = LocalWorkspace::open(store).await;
///
/// let ana = workspace
///     .insert::<Client>(NewClient::new("Ana", "ana@x.com", "0811", "active"))
///     .await?;
/// assert_eq!(workspace.list::<Client>()[0].id, ana.id);
/// # Ok(())
/// # }
/// ```

use crate::models::profile::{ProfilePatch, ProfileRow};
use crate::models::{
    decode_as, decode_row, encode_row, merge_patch, AddOn, Asset, Card, Client, ClientFeedback,
    Collections, Contract, Entity, FinancialPocket, Lead, Notification, Package, Profile, Project,
    PromoCode, RewardLedgerEntry, SocialMediaPost, Sop, TeamMember, TeamPaymentRecord,
    TeamProjectPayment, Transaction, User,
};
use crate::navigation::{Navigator, RouteOutcome};
use crate::persist::{KeyValueStore, PersistentState, SaveMode, SaveOutcome, SavePolicy};
use crate::store::{StoreError, Table};
use std::sync::Arc;
use thiserror::Error;

/// Prefix of every local storage key
pub const KEY_PREFIX: &str = "vena-";

/// Session flag key
pub const AUTH_KEY: &str = "vena-isAuthenticated";

/// Session user key
pub const CURRENT_USER_KEY: &str = "vena-currentUser";

/// Local storage key of a table
pub fn storage_key(table: Table) -> String {
    format!("{}{}", KEY_PREFIX, table.local_key())
}

/// Local workspace errors
#[derive(Error, Debug)]
pub enum LocalError {
    /// A payload or record could not pass through the row shape
    #[error(transparent)]
    Row(#[from] StoreError),

    /// No record with the given id
    #[error("No record in {table} with id {id}")]
    NotFound {
        /// Table name
        table: &'static str,
        /// Requested id
        id: String,
    },

    /// A profile update ran before any profile was stored
    #[error("No profile stored")]
    ProfileMissing,
}

/// Local workspace result type alias
pub type LocalResult<T> = Result<T, LocalError>;

/// An entity kept in a [`LocalWorkspace`]
pub trait LocalEntity: Entity {
    /// This entity's persisted collection
    fn state(collections: &LocalCollections) -> &PersistentState<Vec<Self>>;

    /// Mutable access to this entity's persisted collection
    fn state_mut(collections: &mut LocalCollections) -> &mut PersistentState<Vec<Self>>;
}

macro_rules! local_collections {
    ($($field:ident: $entity:ty),* $(,)?) => {
        /// One persisted collection per entity
        #[derive(Debug)]
        pub struct LocalCollections {
            $($field: PersistentState<Vec<$entity>>,)*
        }

        impl LocalCollections {
            async fn load(
                store: &Arc<dyn KeyValueStore>,
                mode: SaveMode,
                policy: SavePolicy,
            ) -> Self {
                LocalCollections {
                    $($field: PersistentState::load_with(
                        store.clone(),
                        storage_key(<$entity as Entity>::TABLE),
                        Vec::new(),
                        mode,
                        policy,
                    )
                    .await,)*
                }
            }

            async fn flush_all(&mut self) -> Vec<(String, SaveOutcome)> {
                let mut outcomes = Vec::new();
                $(outcomes.push((self.$field.key().to_string(), self.$field.flush().await));)*
                outcomes
            }

            fn snapshot(&self) -> Collections {
                Collections {
                    $($field: self.$field.get().clone(),)*
                }
            }
        }

        $(
            impl LocalEntity for $entity {
                fn state(collections: &LocalCollections) -> &PersistentState<Vec<Self>> {
                    &collections.$field
                }

                fn state_mut(
                    collections: &mut LocalCollections,
                ) -> &mut PersistentState<Vec<Self>> {
                    &mut collections.$field
                }
            }
        )*
    };
}

local_collections! {
    clients: Client,
    projects: Project,
    team_members: TeamMember,
    transactions: Transaction,
    cards: Card,
    pockets: FinancialPocket,
    leads: Lead,
    packages: Package,
    add_ons: AddOn,
    assets: Asset,
    contracts: Contract,
    client_feedback: ClientFeedback,
    notifications: Notification,
    social_media_posts: SocialMediaPost,
    promo_codes: PromoCode,
    sops: Sop,
    team_project_payments: TeamProjectPayment,
    team_payment_records: TeamPaymentRecord,
    reward_ledger_entries: RewardLedgerEntry,
}

/// Collections, profile and session persisted in a key-value store
#[derive(Debug)]
pub struct LocalWorkspace {
    collections: LocalCollections,
    profile: PersistentState<Option<Profile>>,
    authenticated: PersistentState<bool>,
    current_user: PersistentState<Option<User>>,
}

impl LocalWorkspace {
    /// Opens a workspace with write-through saves
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with(store, SaveMode::default(), SavePolicy::default()).await
    }

    /// Opens a workspace with an explicit save mode and retry policy
    pub async fn open_with(store: Arc<dyn KeyValueStore>, mode: SaveMode, policy: SavePolicy) -> Self {
        let collections = LocalCollections::load(&store, mode, policy).await;
        let profile =
            PersistentState::load_with(store.clone(), storage_key(Table::Profiles), None, mode, policy)
                .await;
        let authenticated =
            PersistentState::load_with(store.clone(), AUTH_KEY, false, mode, policy).await;
        let current_user =
            PersistentState::load_with(store.clone(), CURRENT_USER_KEY, None, mode, policy).await;

        tracing::info!(backend = store.name(), ?mode, "Opened local workspace");

        LocalWorkspace {
            collections,
            profile,
            authenticated,
            current_user,
        }
    }

    /// Records of one collection, in held order
    pub fn list<E: LocalEntity>(&self) -> &[E] {
        E::state(&self.collections).get()
    }

    /// Record with `id`
    pub fn get<E: LocalEntity>(&self, id: &str) -> Option<&E> {
        self.list::<E>().iter().find(|item| item.id() == id)
    }

    /// Copy of every collection
    pub fn snapshot(&self) -> Collections {
        self.collections.snapshot()
    }

    /// Replaces a whole collection
    pub async fn replace<E: LocalEntity>(&mut self, items: Vec<E>) -> SaveOutcome {
        E::state_mut(&mut self.collections).set(items).await
    }

    /// Creates a record with a fresh id and column defaults, then prepends it
    pub async fn insert<E: LocalEntity>(&mut self, new: E::New) -> LocalResult<E> {
        let mut row = encode_row(E::TABLE, &new)?;
        E::TABLE.apply_defaults(&mut row);
        let created: E = decode_row(row)?;

        let record = created.clone();
        E::state_mut(&mut self.collections)
            .update(move |items| items.insert(0, record))
            .await;

        tracing::debug!(table = %E::TABLE, id = created.id(), "Inserted local record");
        Ok(created)
    }

    /// Merges a patch into the record with `id`
    pub async fn update<E: LocalEntity>(&mut self, id: &str, patch: E::Patch) -> LocalResult<E> {
        let state = E::state_mut(&mut self.collections);
        let index = state
            .get()
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| LocalError::NotFound {
                table: E::TABLE.name(),
                id: id.to_string(),
            })?;

        let updated = merge_patch(&state.get()[index], &patch)?;
        let record = updated.clone();
        state.update(move |items| items[index] = record).await;

        Ok(updated)
    }

    /// Removes the record with `id`; `false` when there was none
    pub async fn remove<E: LocalEntity>(&mut self, id: &str) -> bool {
        let state = E::state_mut(&mut self.collections);
        if !state.get().iter().any(|item| item.id() == id) {
            return false;
        }

        state.update(|items| items.retain(|item| item.id() != id)).await;
        true
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.get().as_ref()
    }

    /// Stores a whole profile
    pub async fn set_profile(&mut self, profile: Profile) -> SaveOutcome {
        self.profile.set(Some(profile)).await
    }

    /// Merges a patch into the stored profile
    pub async fn update_profile(&mut self, patch: &ProfilePatch) -> LocalResult<Profile> {
        let current = self.profile.get().clone().ok_or(LocalError::ProfileMissing)?;

        let mut row = encode_row(Table::Profiles, &ProfileRow::from(current))?;
        for (column, value) in encode_row(Table::Profiles, patch)? {
            row.insert(column, value);
        }
        let updated = Profile::from(decode_as::<ProfileRow>(Table::Profiles, row)?);

        self.profile.set(Some(updated.clone())).await;
        Ok(updated)
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.get()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.get().as_ref()
    }

    /// Starts a session for `user`
    pub async fn login(&mut self, user: User) {
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "Logged in");
        self.authenticated.set(true).await;
        self.current_user.set(Some(user)).await;
    }

    /// Ends the session
    pub async fn logout(&mut self) {
        tracing::info!("Logged out");
        self.authenticated.set(false).await;
        self.current_user.set(None).await;
    }

    /// Feeds a hash change through `navigator` with this session's auth state
    pub fn on_route_change(&self, navigator: &mut Navigator, route: &str) -> RouteOutcome {
        navigator.on_route_change(route, self.is_authenticated(), self.current_user())
    }

    /// Saves every pending change and reports each key's outcome
    pub async fn flush_all(&mut self) -> Vec<(String, SaveOutcome)> {
        let mut outcomes = self.collections.flush_all().await;
        outcomes.push((self.profile.key().to_string(), self.profile.flush().await));
        outcomes.push((self.authenticated.key().to_string(), self.authenticated.flush().await));
        outcomes.push((self.current_user.key().to_string(), self.current_user.flush().await));

        let failed = outcomes.iter().filter(|(_, outcome)| outcome.is_failed()).count();
        if failed > 0 {
            tracing::warn!(failed, "Some local state could not be saved");
        }
        outcomes
    }
}
