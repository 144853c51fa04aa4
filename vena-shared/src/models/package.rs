/// Service packages and add-ons

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Physical deliverable included in a package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicalItem {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRow {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub physical_items: Vec<PhysicalItem>,
    pub digital_items: Vec<String>,
    pub processing_time: String,
    pub photographers: Option<String>,
    pub videographers: Option<String>,
    pub cover_image: Option<String>,
}

/// Sellable service package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub physical_items: Vec<PhysicalItem>,
    pub digital_items: Vec<String>,
    /// Free text, e.g. `30 hari kerja`
    pub processing_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videographers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Package {
            id: row.id,
            name: row.name,
            price: row.price,
            category: row.category,
            physical_items: row.physical_items,
            digital_items: row.digital_items,
            processing_time: row.processing_time,
            photographers: row.photographers,
            videographers: row.videographers,
            cover_image: row.cover_image,
        }
    }
}

impl From<Package> for PackageRow {
    fn from(package: Package) -> Self {
        PackageRow {
            id: package.id,
            name: package.name,
            price: package.price,
            category: package.category,
            physical_items: package.physical_items,
            digital_items: package.digital_items,
            processing_time: package.processing_time,
            photographers: package.photographers,
            videographers: package.videographers,
            cover_image: package.cover_image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewPackage {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub category: String,
    #[serde(default)]
    pub physical_items: Vec<PhysicalItem>,
    #[serde(default)]
    pub digital_items: Vec<String>,
    pub processing_time: String,
    pub photographers: Option<String>,
    pub videographers: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct PackagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_items: Option<Vec<PhysicalItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub photographers: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub videographers: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_image: Option<Option<String>>,
}

impl Entity for Package {
    type Row = PackageRow;
    type New = NewPackage;
    type Patch = PackagePatch;

    const TABLE: Table = Table::Packages;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.packages
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.packages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnRow {
    pub id: String,
    pub name: String,
    pub price: i64,
}

/// Optional extra sold with a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub price: i64,
}

impl From<AddOnRow> for AddOn {
    fn from(row: AddOnRow) -> Self {
        AddOn {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

impl From<AddOn> for AddOnRow {
    fn from(add_on: AddOn) -> Self {
        AddOnRow {
            id: add_on.id,
            name: add_on.name,
            price: add_on.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewAddOn {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct AddOnPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

impl Entity for AddOn {
    type Row = AddOnRow;
    type New = NewAddOn;
    type Patch = AddOnPatch;

    const TABLE: Table = Table::AddOns;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.add_ons
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.add_ons
    }
}
