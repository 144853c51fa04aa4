/// Prospect (lead) model and row transformer

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRow {
    pub id: String,
    pub name: String,
    pub contact_channel: String,
    pub location: String,
    pub status: String,
    pub date: String,
    pub notes: Option<String>,
    pub whatsapp: Option<String>,
}

/// Prospective client not yet converted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,

    /// Where the lead came from (`WhatsApp`, `Instagram`, `Website`, ...)
    pub contact_channel: String,

    pub location: String,

    /// `Sedang Diskusi`, `Menunggu Follow Up`, `Dikonversi`, `Ditolak`
    pub status: String,

    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id,
            name: row.name,
            contact_channel: row.contact_channel,
            location: row.location,
            status: row.status,
            date: row.date,
            notes: row.notes,
            whatsapp: row.whatsapp,
        }
    }
}

impl From<Lead> for LeadRow {
    fn from(lead: Lead) -> Self {
        LeadRow {
            id: lead.id,
            name: lead.name,
            contact_channel: lead.contact_channel,
            location: lead.location,
            status: lead.status,
            date: lead.date,
            notes: lead.notes,
            whatsapp: lead.whatsapp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewLead {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub contact_channel: String,
    pub location: String,
    pub status: String,
    pub date: String,
    pub notes: Option<String>,
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct LeadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
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
    pub whatsapp: Option<Option<String>>,
}

impl Entity for Lead {
    type Row = LeadRow;
    type New = NewLead;
    type Patch = LeadPatch;

    const TABLE: Table = Table::Leads;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.leads
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.leads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{encode_row, model_to_row};
    use serde_json::json;

    fn lead() -> Lead {
        Lead {
            id: "l-1".to_string(),
            name: "Dewi".to_string(),
            contact_channel: "Instagram".to_string(),
            location: "Surabaya".to_string(),
            status: "Sedang Diskusi".to_string(),
            date: "2024-04-01".to_string(),
            notes: None,
            whatsapp: Some("0815".to_string()),
        }
    }

    #[test]
    fn test_round_trips() {
        let present = Lead {
            notes: Some("Minta pricelist".to_string()),
            ..lead()
        };
        assert_eq!(Lead::from(LeadRow::from(present.clone())), present);
        assert_eq!(Lead::from(LeadRow::from(lead())), lead());
    }

    #[test]
    fn test_row_uses_snake_case_columns() {
        let row = model_to_row(&lead()).unwrap();
        assert_eq!(row["contact_channel"], json!("Instagram"));
        assert_eq!(row["notes"], json!(null));
        assert_eq!(row.len(), 8);
    }

    #[test]
    fn test_status_patch() {
        let patch = LeadPatch {
            status: Some("Dikonversi".to_string()),
            ..LeadPatch::default()
        };
        let row = encode_row(Table::Leads, &patch).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row["status"], json!("Dikonversi"));
    }
}
