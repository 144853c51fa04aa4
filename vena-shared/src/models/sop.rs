/// Standard operating procedure document

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SopRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sop {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Markdown body
    pub content: String,
    pub last_updated: String,
}

impl From<SopRow> for Sop {
    fn from(row: SopRow) -> Self {
        Sop {
            id: row.id,
            title: row.title,
            category: row.category,
            content: row.content,
            last_updated: row.last_updated,
        }
    }
}

impl From<Sop> for SopRow {
    fn from(sop: Sop) -> Self {
        SopRow {
            id: sop.id,
            title: sop.title,
            category: sop.category,
            content: sop.content,
            last_updated: sop.last_updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewSop {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub category: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct SopPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Entity for Sop {
    type Row = SopRow;
    type New = NewSop;
    type Patch = SopPatch;

    const TABLE: Table = Table::Sops;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.sops
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.sops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{decode_row, encode_row, model_to_row};
    use serde_json::json;

    fn sop() -> Sop {
        Sop {
            id: "sop-1".to_string(),
            title: "Backup File".to_string(),
            category: "Editing".to_string(),
            content: "1. Salin kartu memori\n2. Verifikasi".to_string(),
            last_updated: "2024-03-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let row = model_to_row(&sop()).unwrap();
        assert_eq!(row["last_updated"], json!("2024-03-01T00:00:00Z"));
        let decoded: Sop = decode_row(row).unwrap();
        assert_eq!(decoded, sop());
    }

    #[test]
    fn test_new_sop_requires_title() {
        let new: NewSop = serde_json::from_value(json!({
            "title": "",
            "category": "Editing",
            "content": "-"
        }))
        .unwrap();
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_patch_touches_supplied_columns() {
        let patch: SopPatch =
            serde_json::from_value(json!({ "content": "Baru", "lastUpdated": "2024-04-01" })).unwrap();
        let row = encode_row(Table::Sops, &patch).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row["last_updated"], json!("2024-04-01"));
    }
}
