/// Equipment asset model

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub purchase_date: String,
    pub purchase_price: i64,
    pub serial_number: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: String,
    pub purchase_date: String,
    pub purchase_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// `Tersedia`, `Digunakan` or `Perbaikan`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<AssetRow> for Asset {
    fn from(row: AssetRow) -> Self {
        Asset {
            id: row.id,
            name: row.name,
            category: row.category,
            purchase_date: row.purchase_date,
            purchase_price: row.purchase_price,
            serial_number: row.serial_number,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

impl From<Asset> for AssetRow {
    fn from(asset: Asset) -> Self {
        AssetRow {
            id: asset.id,
            name: asset.name,
            category: asset.category,
            purchase_date: asset.purchase_date,
            purchase_price: asset.purchase_price,
            serial_number: asset.serial_number,
            status: asset.status,
            notes: asset.notes,
            created_at: asset.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewAsset {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category: String,
    pub purchase_date: String,
    #[validate(range(min = 0))]
    pub purchase_price: i64,
    pub serial_number: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

impl Entity for Asset {
    type Row = AssetRow;
    type New = NewAsset;
    type Patch = AssetPatch;

    const TABLE: Table = Table::Assets;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.assets
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::merge_patch;

    fn asset() -> Asset {
        Asset {
            id: "as-1".to_string(),
            name: "Sony A7 IV".to_string(),
            category: "Kamera".to_string(),
            purchase_date: "2023-05-10".to_string(),
            purchase_price: 35_000_000,
            serial_number: Some("SN123".to_string()),
            status: "Tersedia".to_string(),
            notes: None,
            created_at: "2023-05-10T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(Asset::from(AssetRow::from(asset())), asset());
    }

    #[test]
    fn test_patch_moves_to_repair() {
        let patch = AssetPatch {
            status: Some("Perbaikan".to_string()),
            notes: Some(Some("Shutter macet".to_string())),
            ..AssetPatch::default()
        };
        let merged = merge_patch(&asset(), &patch).unwrap();
        assert_eq!(merged.status, "Perbaikan");
        assert_eq!(merged.notes.as_deref(), Some("Shutter macet"));
        assert_eq!(merged.serial_number.as_deref(), Some("SN123"));
    }
}
