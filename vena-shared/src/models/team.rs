/// Team members (freelancers) and their payments
///
/// - [`TeamMember`]: a freelancer with a standard fee and a reward balance
/// - [`TeamProjectPayment`]: fee owed to one member for one project
/// - [`TeamPaymentRecord`]: payout slip grouping several project payments
/// - [`RewardLedgerEntry`]: movement on a member's reward balance

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Note left on a member's performance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceNote {
    pub id: String,
    pub date: String,
    pub note: String,
    /// `Pujian`, `Perhatian`, ...
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub standard_fee: i64,
    pub no_rek: Option<String>,
    pub reward_balance: i64,
    pub rating: f64,
    pub performance_notes: Vec<PerformanceNote>,
    pub portal_access_id: String,
}

/// Freelancer on the vendor's team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub standard_fee: i64,

    /// Bank account number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_rek: Option<String>,

    pub reward_balance: i64,

    /// Average rating, 0.0..=5.0
    pub rating: f64,

    pub performance_notes: Vec<PerformanceNote>,

    /// Opaque id used by the freelancer portal route
    pub portal_access_id: String,
}

impl From<TeamMemberRow> for TeamMember {
    fn from(row: TeamMemberRow) -> Self {
        TeamMember {
            id: row.id,
            name: row.name,
            role: row.role,
            email: row.email,
            phone: row.phone,
            standard_fee: row.standard_fee,
            no_rek: row.no_rek,
            reward_balance: row.reward_balance,
            rating: row.rating,
            performance_notes: row.performance_notes,
            portal_access_id: row.portal_access_id,
        }
    }
}

impl From<TeamMember> for TeamMemberRow {
    fn from(member: TeamMember) -> Self {
        TeamMemberRow {
            id: member.id,
            name: member.name,
            role: member.role,
            email: member.email,
            phone: member.phone,
            standard_fee: member.standard_fee,
            no_rek: member.no_rek,
            reward_balance: member.reward_balance,
            rating: member.rating,
            performance_notes: member.performance_notes,
            portal_access_id: member.portal_access_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewTeamMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub role: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: String,
    #[validate(range(min = 0))]
    pub standard_fee: i64,
    pub no_rek: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct TeamMemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_fee: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_rek: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_balance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_notes: Option<Vec<PerformanceNote>>,
}

impl Entity for TeamMember {
    type Row = TeamMemberRow;
    type New = NewTeamMember;
    type Patch = TeamMemberPatch;

    const TABLE: Table = Table::TeamMembers;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.team_members
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.team_members
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProjectPaymentRow {
    pub id: String,
    pub project_id: String,
    pub team_member_name: String,
    pub team_member_id: String,
    pub date: String,
    pub status: String,
    pub fee: i64,
    pub reward: i64,
}

/// Fee owed to a team member for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectPayment {
    pub id: String,
    pub project_id: String,
    pub team_member_name: String,
    pub team_member_id: String,
    pub date: String,
    /// `Paid` or `Unpaid`
    pub status: String,
    pub fee: i64,
    pub reward: i64,
}

impl From<TeamProjectPaymentRow> for TeamProjectPayment {
    fn from(row: TeamProjectPaymentRow) -> Self {
        TeamProjectPayment {
            id: row.id,
            project_id: row.project_id,
            team_member_name: row.team_member_name,
            team_member_id: row.team_member_id,
            date: row.date,
            status: row.status,
            fee: row.fee,
            reward: row.reward,
        }
    }
}

impl From<TeamProjectPayment> for TeamProjectPaymentRow {
    fn from(payment: TeamProjectPayment) -> Self {
        TeamProjectPaymentRow {
            id: payment.id,
            project_id: payment.project_id,
            team_member_name: payment.team_member_name,
            team_member_id: payment.team_member_id,
            date: payment.date,
            status: payment.status,
            fee: payment.fee,
            reward: payment.reward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewTeamProjectPayment {
    pub project_id: String,
    pub team_member_name: String,
    pub team_member_id: String,
    pub date: String,
    pub status: String,
    #[validate(range(min = 0))]
    pub fee: i64,
    #[serde(default)]
    pub reward: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct TeamProjectPaymentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<i64>,
}

impl Entity for TeamProjectPayment {
    type Row = TeamProjectPaymentRow;
    type New = NewTeamProjectPayment;
    type Patch = TeamProjectPaymentPatch;

    const TABLE: Table = Table::TeamProjectPayments;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.team_project_payments
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.team_project_payments
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPaymentRecordRow {
    pub id: String,
    pub record_number: String,
    pub team_member_id: String,
    pub date: String,
    pub project_payment_ids: Vec<String>,
    pub total_amount: i64,
    pub vendor_signature: Option<String>,
}

/// Payout slip for a team member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPaymentRecord {
    pub id: String,
    pub record_number: String,
    pub team_member_id: String,
    pub date: String,
    /// Ids of the [`TeamProjectPayment`]s settled by this slip
    pub project_payment_ids: Vec<String>,
    pub total_amount: i64,
    /// Signature image as a data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_signature: Option<String>,
}

impl From<TeamPaymentRecordRow> for TeamPaymentRecord {
    fn from(row: TeamPaymentRecordRow) -> Self {
        TeamPaymentRecord {
            id: row.id,
            record_number: row.record_number,
            team_member_id: row.team_member_id,
            date: row.date,
            project_payment_ids: row.project_payment_ids,
            total_amount: row.total_amount,
            vendor_signature: row.vendor_signature,
        }
    }
}

impl From<TeamPaymentRecord> for TeamPaymentRecordRow {
    fn from(record: TeamPaymentRecord) -> Self {
        TeamPaymentRecordRow {
            id: record.id,
            record_number: record.record_number,
            team_member_id: record.team_member_id,
            date: record.date,
            project_payment_ids: record.project_payment_ids,
            total_amount: record.total_amount,
            vendor_signature: record.vendor_signature,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewTeamPaymentRecord {
    #[validate(length(min = 1))]
    pub record_number: String,
    pub team_member_id: String,
    pub date: String,
    pub project_payment_ids: Vec<String>,
    pub total_amount: i64,
    pub vendor_signature: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct TeamPaymentRecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_payment_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor_signature: Option<Option<String>>,
}

impl Entity for TeamPaymentRecord {
    type Row = TeamPaymentRecordRow;
    type New = NewTeamPaymentRecord;
    type Patch = TeamPaymentRecordPatch;

    const TABLE: Table = Table::TeamPaymentRecords;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.team_payment_records
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.team_payment_records
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardLedgerEntryRow {
    pub id: String,
    pub team_member_id: String,
    pub date: String,
    pub description: String,
    pub amount: i64,
    pub project_id: Option<String>,
}

/// Credit (positive) or withdrawal (negative) on a reward balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardLedgerEntry {
    pub id: String,
    pub team_member_id: String,
    pub date: String,
    pub description: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl From<RewardLedgerEntryRow> for RewardLedgerEntry {
    fn from(row: RewardLedgerEntryRow) -> Self {
        RewardLedgerEntry {
            id: row.id,
            team_member_id: row.team_member_id,
            date: row.date,
            description: row.description,
            amount: row.amount,
            project_id: row.project_id,
        }
    }
}

impl From<RewardLedgerEntry> for RewardLedgerEntryRow {
    fn from(entry: RewardLedgerEntry) -> Self {
        RewardLedgerEntryRow {
            id: entry.id,
            team_member_id: entry.team_member_id,
            date: entry.date,
            description: entry.description,
            amount: entry.amount,
            project_id: entry.project_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewRewardLedgerEntry {
    pub team_member_id: String,
    pub date: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub amount: i64,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct RewardLedgerEntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<Option<String>>,
}

impl Entity for RewardLedgerEntry {
    type Row = RewardLedgerEntryRow;
    type New = NewRewardLedgerEntry;
    type Patch = RewardLedgerEntryPatch;

    const TABLE: Table = Table::RewardLedgerEntries;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.reward_ledger_entries
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.reward_ledger_entries
    }
}
