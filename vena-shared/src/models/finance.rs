/// Finance models: transactions, cards and financial pockets
///
/// The transaction and pocket `type` columns are exposed as `kind` in Rust
/// and keep the `type` key in both JSON shapes.

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub project_id: Option<String>,
    pub category: String,
    pub method: String,
    pub pocket_id: Option<String>,
    pub card_id: Option<String>,
    pub printing_item_id: Option<String>,
    pub vendor_signature: Option<String>,
}

/// Money in or out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: i64,

    /// `Pemasukan` (income) or `Pengeluaran` (expense)
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    pub category: String,

    /// Payment method (`Transfer Bank`, `Tunai`, ...)
    pub method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pocket_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub printing_item_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_signature: Option<String>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            id: row.id,
            date: row.date,
            description: row.description,
            amount: row.amount,
            kind: row.kind,
            project_id: row.project_id,
            category: row.category,
            method: row.method,
            pocket_id: row.pocket_id,
            card_id: row.card_id,
            printing_item_id: row.printing_item_id,
            vendor_signature: row.vendor_signature,
        }
    }
}

impl From<Transaction> for TransactionRow {
    fn from(tx: Transaction) -> Self {
        TransactionRow {
            id: tx.id,
            date: tx.date,
            description: tx.description,
            amount: tx.amount,
            kind: tx.kind,
            project_id: tx.project_id,
            category: tx.category,
            method: tx.method,
            pocket_id: tx.pocket_id,
            card_id: tx.card_id,
            printing_item_id: tx.printing_item_id,
            vendor_signature: tx.vendor_signature,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewTransaction {
    pub date: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0))]
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub project_id: Option<String>,
    pub category: String,
    pub method: String,
    pub pocket_id: Option<String>,
    pub card_id: Option<String>,
    pub printing_item_id: Option<String>,
    pub vendor_signature: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub pocket_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor_signature: Option<Option<String>>,
}

impl Entity for Transaction {
    type Row = TransactionRow;
    type New = NewTransaction;
    type Patch = TransactionPatch;

    const TABLE: Table = Table::Transactions;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.transactions
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.transactions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRow {
    pub id: String,
    pub card_holder_name: String,
    pub bank_name: String,
    pub card_type: String,
    pub last_four_digits: String,
    pub expiry_date: Option<String>,
    pub balance: i64,
    pub color_gradient: String,
    pub created_at: String,
}

/// Bank account or card holding money
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub card_holder_name: String,
    pub bank_name: String,
    /// `Prabayar`, `Kredit`, `Debit` or `Tunai`
    pub card_type: String,
    pub last_four_digits: String,
    /// `MM/YY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub balance: i64,
    /// CSS gradient used for the card face
    pub color_gradient: String,
    pub created_at: String,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Card {
            id: row.id,
            card_holder_name: row.card_holder_name,
            bank_name: row.bank_name,
            card_type: row.card_type,
            last_four_digits: row.last_four_digits,
            expiry_date: row.expiry_date,
            balance: row.balance,
            color_gradient: row.color_gradient,
            created_at: row.created_at,
        }
    }
}

impl From<Card> for CardRow {
    fn from(card: Card) -> Self {
        CardRow {
            id: card.id,
            card_holder_name: card.card_holder_name,
            bank_name: card.bank_name,
            card_type: card.card_type,
            last_four_digits: card.last_four_digits,
            expiry_date: card.expiry_date,
            balance: card.balance,
            color_gradient: card.color_gradient,
            created_at: card.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewCard {
    pub card_holder_name: String,
    #[validate(length(min = 1))]
    pub bank_name: String,
    pub card_type: String,
    #[validate(length(equal = 4, message = "Expected the last four digits"))]
    pub last_four_digits: String,
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    pub color_gradient: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct CardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_four_digits: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_gradient: Option<String>,
}

impl Entity for Card {
    type Row = CardRow;
    type New = NewCard;
    type Patch = CardPatch;

    const TABLE: Table = Table::Cards;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.cards
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.cards
    }
}

/// Member sharing a pocket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PocketMember {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPocketRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: i64,
    pub goal_amount: Option<i64>,
    pub lock_end_date: Option<String>,
    pub members: Option<Vec<PocketMember>>,
    pub source_card_id: Option<String>,
    pub created_at: String,
}

/// Earmarked money: savings goal, locked deposit, shared budget, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPocket {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<PocketMember>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<String>,
    pub created_at: String,
}

impl From<FinancialPocketRow> for FinancialPocket {
    fn from(row: FinancialPocketRow) -> Self {
        FinancialPocket {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            kind: row.kind,
            amount: row.amount,
            goal_amount: row.goal_amount,
            lock_end_date: row.lock_end_date,
            members: row.members,
            source_card_id: row.source_card_id,
            created_at: row.created_at,
        }
    }
}

impl From<FinancialPocket> for FinancialPocketRow {
    fn from(pocket: FinancialPocket) -> Self {
        FinancialPocketRow {
            id: pocket.id,
            name: pocket.name,
            description: pocket.description,
            icon: pocket.icon,
            kind: pocket.kind,
            amount: pocket.amount,
            goal_amount: pocket.goal_amount,
            lock_end_date: pocket.lock_end_date,
            members: pocket.members,
            source_card_id: pocket.source_card_id,
            created_at: pocket.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewFinancialPocket {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    pub goal_amount: Option<i64>,
    pub lock_end_date: Option<String>,
    pub members: Option<Vec<PocketMember>>,
    pub source_card_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct FinancialPocketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub goal_amount: Option<Option<i64>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub lock_end_date: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub members: Option<Option<Vec<PocketMember>>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_card_id: Option<Option<String>>,
}

impl Entity for FinancialPocket {
    type Row = FinancialPocketRow;
    type New = NewFinancialPocket;
    type Patch = FinancialPocketPatch;

    const TABLE: Table = Table::FinancialPockets;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.pockets
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.pockets
    }
}
