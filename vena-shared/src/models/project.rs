/// Project model and row transformer
///
/// A project is one booked job for a client. Besides scalar columns it
/// carries several JSONB blobs: chosen add-ons, the assigned team, revision
/// requests, printing items, the client chat and per-sub-status bookkeeping.

use crate::models::profile::SubStatus;
use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Add-on attached to a project at booking time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectAddOn {
    pub id: String,
    pub name: String,
    pub price: i64,
}

/// Team member assigned to a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignedTeamMember {
    pub member_id: String,
    pub name: String,
    pub role: String,
    pub fee: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_job: Option<String>,
}

/// Revision request handed to a freelancer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub date: String,
    pub admin_notes: String,
    pub deadline: String,
    pub freelancer_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freelancer_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}

/// Printed deliverable (album, frame, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintingItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    pub details: String,
    pub cost: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    /// `vendor` or `client`
    pub sender: String,
    pub text: String,
    pub timestamp: String,
}

/// Project row (persistence shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub project_name: String,
    pub client_name: String,
    pub client_id: String,
    pub project_type: String,
    pub package_name: String,
    pub package_id: String,
    pub add_ons: Vec<ProjectAddOn>,
    pub date: String,
    pub deadline_date: Option<String>,
    pub location: String,
    pub progress: i32,
    pub status: String,
    pub active_sub_statuses: Vec<String>,
    pub total_cost: i64,
    pub amount_paid: i64,
    pub payment_status: String,
    pub team: Vec<AssignedTeamMember>,
    pub notes: Option<String>,
    pub accommodation: Option<String>,
    pub drive_link: Option<String>,
    pub client_drive_link: Option<String>,
    pub final_drive_link: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub revisions: Option<Vec<Revision>>,
    pub promo_code_id: Option<String>,
    pub discount_amount: Option<i64>,
    pub shipping_details: Option<String>,
    pub dp_proof_url: Option<String>,
    pub printing_details: Option<Vec<PrintingItem>>,
    pub printing_cost: Option<i64>,
    pub transport_cost: Option<i64>,
    pub booking_status: Option<String>,
    pub rejection_reason: Option<String>,
    pub chat_history: Option<Vec<ChatMessage>>,
    pub confirmed_sub_statuses: Option<Vec<String>>,
    pub client_sub_status_notes: Option<BTreeMap<String, String>>,
    pub completed_digital_items: Option<Vec<String>>,
    pub invoice_signature: Option<String>,
    pub custom_sub_statuses: Option<Vec<SubStatus>>,
    pub is_editing_confirmed_by_client: bool,
    pub is_printing_confirmed_by_client: bool,
    pub is_delivery_confirmed_by_client: bool,
    pub sub_status_confirmation_sent_at: Option<BTreeMap<String, String>>,
    pub created_at: String,
}

/// Project model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_name: String,
    pub client_name: String,
    pub client_id: String,
    pub project_type: String,
    pub package_name: String,
    pub package_id: String,
    pub add_ons: Vec<ProjectAddOn>,

    /// Event date (`YYYY-MM-DD`)
    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<String>,

    pub location: String,

    /// Completion percentage, 0..=100
    pub progress: i32,

    pub status: String,
    pub active_sub_statuses: Vec<String>,
    pub total_cost: i64,
    pub amount_paid: i64,
    pub payment_status: String,
    pub team: Vec<AssignedTeamMember>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_drive_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_drive_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisions: Option<Vec<Revision>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp_proof_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printing_details: Option<Vec<PrintingItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printing_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_cost: Option<i64>,

    /// Public booking state (`Baru`, `Terkonfirmasi`, `Ditolak`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<Vec<ChatMessage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_sub_statuses: Option<Vec<String>>,

    /// Client notes keyed by sub-status name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_sub_status_notes: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_digital_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_sub_statuses: Option<Vec<SubStatus>>,

    pub is_editing_confirmed_by_client: bool,
    pub is_printing_confirmed_by_client: bool,
    pub is_delivery_confirmed_by_client: bool,

    /// Confirmation request timestamps keyed by sub-status name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_status_confirmation_sent_at: Option<BTreeMap<String, String>>,

    pub created_at: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            project_name: row.project_name,
            client_name: row.client_name,
            client_id: row.client_id,
            project_type: row.project_type,
            package_name: row.package_name,
            package_id: row.package_id,
            add_ons: row.add_ons,
            date: row.date,
            deadline_date: row.deadline_date,
            location: row.location,
            progress: row.progress,
            status: row.status,
            active_sub_statuses: row.active_sub_statuses,
            total_cost: row.total_cost,
            amount_paid: row.amount_paid,
            payment_status: row.payment_status,
            team: row.team,
            notes: row.notes,
            accommodation: row.accommodation,
            drive_link: row.drive_link,
            client_drive_link: row.client_drive_link,
            final_drive_link: row.final_drive_link,
            start_time: row.start_time,
            end_time: row.end_time,
            image: row.image,
            revisions: row.revisions,
            promo_code_id: row.promo_code_id,
            discount_amount: row.discount_amount,
            shipping_details: row.shipping_details,
            dp_proof_url: row.dp_proof_url,
            printing_details: row.printing_details,
            printing_cost: row.printing_cost,
            transport_cost: row.transport_cost,
            booking_status: row.booking_status,
            rejection_reason: row.rejection_reason,
            chat_history: row.chat_history,
            confirmed_sub_statuses: row.confirmed_sub_statuses,
            client_sub_status_notes: row.client_sub_status_notes,
            completed_digital_items: row.completed_digital_items,
            invoice_signature: row.invoice_signature,
            custom_sub_statuses: row.custom_sub_statuses,
            is_editing_confirmed_by_client: row.is_editing_confirmed_by_client,
            is_printing_confirmed_by_client: row.is_printing_confirmed_by_client,
            is_delivery_confirmed_by_client: row.is_delivery_confirmed_by_client,
            sub_status_confirmation_sent_at: row.sub_status_confirmation_sent_at,
            created_at: row.created_at,
        }
    }
}

impl From<Project> for ProjectRow {
    fn from(project: Project) -> Self {
        ProjectRow {
            id: project.id,
            project_name: project.project_name,
            client_name: project.client_name,
            client_id: project.client_id,
            project_type: project.project_type,
            package_name: project.package_name,
            package_id: project.package_id,
            add_ons: project.add_ons,
            date: project.date,
            deadline_date: project.deadline_date,
            location: project.location,
            progress: project.progress,
            status: project.status,
            active_sub_statuses: project.active_sub_statuses,
            total_cost: project.total_cost,
            amount_paid: project.amount_paid,
            payment_status: project.payment_status,
            team: project.team,
            notes: project.notes,
            accommodation: project.accommodation,
            drive_link: project.drive_link,
            client_drive_link: project.client_drive_link,
            final_drive_link: project.final_drive_link,
            start_time: project.start_time,
            end_time: project.end_time,
            image: project.image,
            revisions: project.revisions,
            promo_code_id: project.promo_code_id,
            discount_amount: project.discount_amount,
            shipping_details: project.shipping_details,
            dp_proof_url: project.dp_proof_url,
            printing_details: project.printing_details,
            printing_cost: project.printing_cost,
            transport_cost: project.transport_cost,
            booking_status: project.booking_status,
            rejection_reason: project.rejection_reason,
            chat_history: project.chat_history,
            confirmed_sub_statuses: project.confirmed_sub_statuses,
            client_sub_status_notes: project.client_sub_status_notes,
            completed_digital_items: project.completed_digital_items,
            invoice_signature: project.invoice_signature,
            custom_sub_statuses: project.custom_sub_statuses,
            is_editing_confirmed_by_client: project.is_editing_confirmed_by_client,
            is_printing_confirmed_by_client: project.is_printing_confirmed_by_client,
            is_delivery_confirmed_by_client: project.is_delivery_confirmed_by_client,
            sub_status_confirmation_sent_at: project.sub_status_confirmation_sent_at,
            created_at: project.created_at,
        }
    }
}

/// Input for creating a project
///
/// Covers the columns a booking fills in. Portal-side bookkeeping (chat,
/// confirmations, revisions) starts empty and is set through updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewProject {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    pub client_name: String,
    pub client_id: String,
    pub project_type: String,
    pub package_name: String,
    pub package_id: String,
    #[serde(default)]
    pub add_ons: Vec<ProjectAddOn>,
    pub date: String,
    pub deadline_date: Option<String>,
    pub location: String,
    #[validate(range(min = 0, max = 100))]
    pub progress: i32,
    pub status: String,
    pub total_cost: i64,
    pub amount_paid: i64,
    pub payment_status: String,
    #[serde(default)]
    pub team: Vec<AssignedTeamMember>,
    pub notes: Option<String>,
    pub booking_status: Option<String>,
    pub dp_proof_url: Option<String>,
    pub transport_cost: Option<i64>,
    pub promo_code_id: Option<String>,
    pub discount_amount: Option<i64>,
}

/// Partial update for a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_ons: Option<Vec<ProjectAddOn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_sub_statuses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<AssignedTeamMember>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub drive_link: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_drive_link: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_drive_link: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub revisions: Option<Option<Vec<Revision>>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub printing_details: Option<Option<Vec<PrintingItem>>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub printing_cost: Option<Option<i64>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub booking_status: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub rejection_reason: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub chat_history: Option<Option<Vec<ChatMessage>>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirmed_sub_statuses: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_sub_status_notes: Option<Option<BTreeMap<String, String>>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_digital_items: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_signature: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_sub_statuses: Option<Option<Vec<SubStatus>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editing_confirmed_by_client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_printing_confirmed_by_client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_delivery_confirmed_by_client: Option<bool>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_status_confirmation_sent_at: Option<Option<BTreeMap<String, String>>>,
}

impl Entity for Project {
    type Row = ProjectRow;
    type New = NewProject;
    type Patch = ProjectPatch;

    const TABLE: Table = Table::Projects;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.projects
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{decode_row, encode_row, merge_patch, model_to_row};
    use serde_json::json;

    fn minimal_project() -> Project {
        Project {
            id: "p-1".to_string(),
            project_name: "Wedding Ana & Budi".to_string(),
            client_name: "Ana".to_string(),
            client_id: "c-1".to_string(),
            project_type: "Pernikahan".to_string(),
            package_name: "Gold".to_string(),
            package_id: "pkg-1".to_string(),
            add_ons: vec![],
            date: "2024-06-01".to_string(),
            deadline_date: None,
            location: "Bandung".to_string(),
            progress: 0,
            status: "Persiapan".to_string(),
            active_sub_statuses: vec![],
            total_cost: 10_000_000,
            amount_paid: 0,
            payment_status: "Belum Bayar".to_string(),
            team: vec![],
            notes: None,
            accommodation: None,
            drive_link: None,
            client_drive_link: None,
            final_drive_link: None,
            start_time: None,
            end_time: None,
            image: None,
            revisions: None,
            promo_code_id: None,
            discount_amount: None,
            shipping_details: None,
            dp_proof_url: None,
            printing_details: None,
            printing_cost: None,
            transport_cost: None,
            booking_status: None,
            rejection_reason: None,
            chat_history: None,
            confirmed_sub_statuses: None,
            client_sub_status_notes: None,
            completed_digital_items: None,
            invoice_signature: None,
            custom_sub_statuses: None,
            is_editing_confirmed_by_client: false,
            is_printing_confirmed_by_client: false,
            is_delivery_confirmed_by_client: false,
            sub_status_confirmation_sent_at: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn full_project() -> Project {
        let mut notes = BTreeMap::new();
        notes.insert("Briefing".to_string(), "OK".to_string());

        Project {
            add_ons: vec![ProjectAddOn {
                id: "a-1".to_string(),
                name: "Drone".to_string(),
                price: 500_000,
            }],
            deadline_date: Some("2024-07-01".to_string()),
            team: vec![AssignedTeamMember {
                member_id: "t-1".to_string(),
                name: "Budi".to_string(),
                role: "Fotografer".to_string(),
                fee: 1_000_000,
                reward: Some(50_000),
                sub_job: None,
            }],
            notes: Some("Outdoor".to_string()),
            revisions: Some(vec![Revision {
                id: "r-1".to_string(),
                status: "Menunggu".to_string(),
                ..Revision::default()
            }]),
            printing_details: Some(vec![PrintingItem {
                id: "pr-1".to_string(),
                kind: "Album".to_string(),
                custom_name: None,
                details: "20 halaman".to_string(),
                cost: 750_000,
            }]),
            chat_history: Some(vec![ChatMessage {
                id: "m-1".to_string(),
                sender: "client".to_string(),
                text: "Halo".to_string(),
                timestamp: "2024-01-02T00:00:00Z".to_string(),
            }]),
            client_sub_status_notes: Some(notes.clone()),
            sub_status_confirmation_sent_at: Some(notes),
            is_editing_confirmed_by_client: true,
            ..minimal_project()
        }
    }

    #[test]
    fn test_round_trip_all_present() {
        let project = full_project();
        assert_eq!(Project::from(ProjectRow::from(project.clone())), project);
    }

    #[test]
    fn test_round_trip_all_absent() {
        let project = minimal_project();
        assert_eq!(Project::from(ProjectRow::from(project.clone())), project);
    }

    #[test]
    fn test_blob_columns_survive_row_json() {
        let row = model_to_row(&full_project()).unwrap();
        assert_eq!(row["team"][0]["memberId"], json!("t-1"));
        assert_eq!(row["printing_details"][0]["type"], json!("Album"));
        assert_eq!(row["client_sub_status_notes"]["Briefing"], json!("OK"));

        let decoded: Project = decode_row(row).unwrap();
        assert_eq!(decoded, full_project());
    }

    #[test]
    fn test_missing_nullable_columns_decode_as_absent() {
        let mut row = model_to_row(&minimal_project()).unwrap();
        row.remove("revisions");
        row.remove("chat_history");
        let decoded: Project = decode_row(row).unwrap();
        assert!(decoded.revisions.is_none());
        assert!(decoded.chat_history.is_none());
    }

    #[test]
    fn test_new_project_validation() {
        let new: NewProject = serde_json::from_value(json!({
            "projectName": "",
            "clientName": "Ana",
            "clientId": "c-1",
            "projectType": "Pernikahan",
            "packageName": "Gold",
            "packageId": "pkg-1",
            "date": "2024-06-01",
            "location": "Bandung",
            "progress": 120,
            "status": "Persiapan",
            "totalCost": 100,
            "amountPaid": 0,
            "paymentStatus": "Belum Bayar"
        }))
        .unwrap();

        let errors = new.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_patch_sets_confirmation_and_clears_revisions() {
        let patch: ProjectPatch = serde_json::from_value(json!({
            "isPrintingConfirmedByClient": true,
            "revisions": null
        }))
        .unwrap();
        let row = encode_row(Table::Projects, &patch).unwrap();
        assert_eq!(row.len(), 2);

        let merged = merge_patch(&full_project(), &patch).unwrap();
        assert!(merged.is_printing_confirmed_by_client);
        assert!(merged.revisions.is_none());
        assert_eq!(merged.team, full_project().team);
    }
}
