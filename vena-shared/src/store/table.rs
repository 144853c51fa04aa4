/// Table catalogue
///
/// One table per entity type. Each table knows its read-all ordering, the
/// suffix of its local storage key and the column defaults the persistence
/// boundary applies on insert (mirrors `migrations/`).

use crate::models::RowMap;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::fmt;
use uuid::Uuid;

/// Persisted entity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Profiles,
    Clients,
    Projects,
    TeamMembers,
    Transactions,
    Cards,
    FinancialPockets,
    Leads,
    Packages,
    AddOns,
    Assets,
    Contracts,
    ClientFeedback,
    Notifications,
    SocialMediaPosts,
    PromoCodes,
    Sops,
    TeamProjectPayments,
    TeamPaymentRecords,
    RewardLedgerEntries,
}

/// Read-all ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// Column to order by
    pub column: &'static str,

    /// Ascending when true
    pub ascending: bool,
}

impl Order {
    pub const fn asc(column: &'static str) -> Self {
        Order {
            column,
            ascending: true,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Order {
            column,
            ascending: false,
        }
    }
}

/// Value a column takes when an insert omits it
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    /// Fresh UUID v4 string
    Uuid,
    /// Current instant, RFC 3339
    Now,
    /// Current date, `YYYY-MM-DD`
    Today,
    /// Fixed JSON value
    Value(JsonValue),
}

impl ColumnDefault {
    /// Produces the concrete value for one insert
    pub fn resolve(&self) -> JsonValue {
        match self {
            ColumnDefault::Uuid => JsonValue::String(Uuid::new_v4().to_string()),
            ColumnDefault::Now => JsonValue::String(Utc::now().to_rfc3339()),
            ColumnDefault::Today => {
                JsonValue::String(Utc::now().date_naive().format("%Y-%m-%d").to_string())
            }
            ColumnDefault::Value(value) => value.clone(),
        }
    }
}

impl Table {
    /// Every table holding a collection, in bulk-load order
    pub const COLLECTIONS: [Table; 19] = [
        Table::Clients,
        Table::Projects,
        Table::TeamMembers,
        Table::Transactions,
        Table::Cards,
        Table::FinancialPockets,
        Table::Leads,
        Table::Packages,
        Table::AddOns,
        Table::Assets,
        Table::Contracts,
        Table::ClientFeedback,
        Table::Notifications,
        Table::SocialMediaPosts,
        Table::PromoCodes,
        Table::Sops,
        Table::TeamProjectPayments,
        Table::TeamPaymentRecords,
        Table::RewardLedgerEntries,
    ];

    /// Table name at the persistence boundary
    pub fn name(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::Clients => "clients",
            Table::Projects => "projects",
            Table::TeamMembers => "team_members",
            Table::Transactions => "transactions",
            Table::Cards => "cards",
            Table::FinancialPockets => "financial_pockets",
            Table::Leads => "leads",
            Table::Packages => "packages",
            Table::AddOns => "add_ons",
            Table::Assets => "assets",
            Table::Contracts => "contracts",
            Table::ClientFeedback => "client_feedback",
            Table::Notifications => "notifications",
            Table::SocialMediaPosts => "social_media_posts",
            Table::PromoCodes => "promo_codes",
            Table::Sops => "sops",
            Table::TeamProjectPayments => "team_project_payments",
            Table::TeamPaymentRecords => "team_payment_records",
            Table::RewardLedgerEntries => "reward_ledger_entries",
        }
    }

    /// Parses a table name
    pub fn parse(name: &str) -> Option<Self> {
        std::iter::once(Table::Profiles)
            .chain(Table::COLLECTIONS)
            .find(|table| table.name() == name)
    }

    /// Ordering used by the bulk load (`None` for the single-row profile)
    pub fn order(&self) -> Option<Order> {
        match self {
            Table::Profiles => None,
            Table::Clients
            | Table::Projects
            | Table::Assets
            | Table::Contracts
            | Table::PromoCodes => Some(Order::desc("created_at")),
            Table::Cards | Table::FinancialPockets => Some(Order::asc("created_at")),
            Table::TeamMembers | Table::Packages | Table::AddOns => Some(Order::asc("name")),
            Table::Transactions
            | Table::Leads
            | Table::ClientFeedback
            | Table::TeamProjectPayments
            | Table::TeamPaymentRecords
            | Table::RewardLedgerEntries => Some(Order::desc("date")),
            Table::Notifications => Some(Order::desc("timestamp")),
            Table::SocialMediaPosts => Some(Order::desc("scheduled_date")),
            Table::Sops => Some(Order::asc("title")),
        }
    }

    /// Suffix of the local storage key (`vena-` + suffix)
    pub fn local_key(&self) -> &'static str {
        match self {
            Table::Profiles => "profile",
            Table::Clients => "clients",
            Table::Projects => "projects",
            Table::TeamMembers => "teamMembers",
            Table::Transactions => "transactions",
            Table::Cards => "cards",
            Table::FinancialPockets => "pockets",
            Table::Leads => "leads",
            Table::Packages => "packages",
            Table::AddOns => "addOns",
            Table::Assets => "assets",
            Table::Contracts => "contracts",
            Table::ClientFeedback => "clientFeedback",
            Table::Notifications => "notifications",
            Table::SocialMediaPosts => "socialMediaPosts",
            Table::PromoCodes => "promoCodes",
            Table::Sops => "sops",
            Table::TeamProjectPayments => "teamProjectPayments",
            Table::TeamPaymentRecords => "teamPaymentRecords",
            Table::RewardLedgerEntries => "rewardLedgerEntries",
        }
    }

    /// Column defaults applied on insert, `id` included
    pub fn defaults(&self) -> Vec<(&'static str, ColumnDefault)> {
        let mut defaults = vec![("id", ColumnDefault::Uuid)];
        match self {
            Table::Clients => defaults.extend([
                ("client_type", ColumnDefault::Value(json!("Langsung"))),
                ("since", ColumnDefault::Today),
                ("last_contact", ColumnDefault::Now),
                ("portal_access_id", ColumnDefault::Uuid),
                ("created_at", ColumnDefault::Now),
            ]),
            Table::Projects => defaults.extend([
                ("active_sub_statuses", ColumnDefault::Value(json!([]))),
                ("is_editing_confirmed_by_client", ColumnDefault::Value(json!(false))),
                ("is_printing_confirmed_by_client", ColumnDefault::Value(json!(false))),
                ("is_delivery_confirmed_by_client", ColumnDefault::Value(json!(false))),
                ("created_at", ColumnDefault::Now),
            ]),
            Table::Assets | Table::Contracts => defaults.push(("created_at", ColumnDefault::Now)),
            Table::TeamMembers => defaults.extend([
                ("reward_balance", ColumnDefault::Value(json!(0))),
                ("rating", ColumnDefault::Value(json!(0.0))),
                ("performance_notes", ColumnDefault::Value(json!([]))),
                ("portal_access_id", ColumnDefault::Uuid),
            ]),
            Table::Cards => defaults.extend([
                ("balance", ColumnDefault::Value(json!(0))),
                ("created_at", ColumnDefault::Now),
            ]),
            Table::FinancialPockets => defaults.extend([
                ("amount", ColumnDefault::Value(json!(0))),
                ("created_at", ColumnDefault::Now),
            ]),
            Table::Notifications => defaults.extend([
                ("timestamp", ColumnDefault::Now),
                ("is_read", ColumnDefault::Value(json!(false))),
            ]),
            Table::PromoCodes => defaults.extend([
                ("is_active", ColumnDefault::Value(json!(true))),
                ("usage_count", ColumnDefault::Value(json!(0))),
                ("created_at", ColumnDefault::Now),
            ]),
            Table::Sops => defaults.push(("last_updated", ColumnDefault::Now)),
            _ => {}
        }

        defaults
    }

    /// Fills every column missing from `row` with its default
    pub fn apply_defaults(&self, row: &mut RowMap) {
        for (column, default) in self.defaults() {
            if !row.contains_key(column) {
                row.insert(column.to_string(), default.resolve());
            }
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_table() {
        assert_eq!(Table::parse("profiles"), Some(Table::Profiles));
        for table in Table::COLLECTIONS {
            assert_eq!(Table::parse(table.name()), Some(table));
        }
        assert_eq!(Table::parse("users"), None);
    }

    #[test]
    fn test_orders() {
        assert_eq!(Table::Clients.order(), Some(Order::desc("created_at")));
        assert_eq!(Table::TeamMembers.order(), Some(Order::asc("name")));
        assert_eq!(Table::Notifications.order(), Some(Order::desc("timestamp")));
        assert_eq!(Table::Profiles.order(), None);
    }

    #[test]
    fn test_every_collection_has_an_order() {
        for table in Table::COLLECTIONS {
            assert!(table.order().is_some(), "{} has no order", table);
        }
    }

    #[test]
    fn test_apply_defaults_keeps_supplied_columns() {
        let mut row = RowMap::new();
        row.insert("client_type".to_string(), json!("Vendor"));
        Table::Clients.apply_defaults(&mut row);

        assert_eq!(row["client_type"], json!("Vendor"));
        assert!(row["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(row.contains_key("portal_access_id"));
        assert!(row.contains_key("created_at"));
    }

    #[test]
    fn test_card_and_pocket_money_defaults() {
        let mut card = RowMap::new();
        Table::Cards.apply_defaults(&mut card);
        assert_eq!(card["balance"], json!(0));
        assert!(!card.contains_key("amount"));

        let mut pocket = RowMap::new();
        Table::FinancialPockets.apply_defaults(&mut pocket);
        assert_eq!(pocket["amount"], json!(0));
    }

    #[test]
    fn test_today_default_format() {
        let value = ColumnDefault::Today.resolve();
        let text = value.as_str().unwrap();
        assert_eq!(text.len(), 10);
        assert_eq!(&text[4..5], "-");
    }
}
