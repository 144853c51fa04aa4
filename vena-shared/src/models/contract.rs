/// Service contract model
///
/// A contract binds a client to a project. It holds one or two client
/// parties, the agreed deliverables and both signatures.

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRow {
    pub id: String,
    pub contract_number: String,
    pub client_id: String,
    pub project_id: String,
    pub signing_date: String,
    pub signing_location: String,
    pub client_name1: String,
    pub client_address1: String,
    pub client_phone1: String,
    pub client_name2: Option<String>,
    pub client_address2: Option<String>,
    pub client_phone2: Option<String>,
    pub shooting_duration: String,
    pub guaranteed_photos: String,
    pub album_details: String,
    pub digital_files_format: String,
    pub other_items: String,
    pub personnel_count: String,
    pub delivery_timeframe: String,
    pub dp_date: Option<String>,
    pub final_payment_date: Option<String>,
    pub cancellation_policy: String,
    pub jurisdiction: String,
    pub vendor_signature: Option<String>,
    pub client_signature: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub contract_number: String,
    pub client_id: String,
    pub project_id: String,
    pub signing_date: String,
    pub signing_location: String,

    // First party
    pub client_name1: String,
    pub client_address1: String,
    pub client_phone1: String,

    // Optional second party
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_phone2: Option<String>,

    pub shooting_duration: String,
    pub guaranteed_photos: String,
    pub album_details: String,
    pub digital_files_format: String,
    pub other_items: String,
    pub personnel_count: String,
    pub delivery_timeframe: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_payment_date: Option<String>,

    pub cancellation_policy: String,
    pub jurisdiction: String,

    /// Signature images as data URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_signature: Option<String>,

    pub created_at: String,
}

impl Contract {
    /// Both parties have signed
    pub fn is_fully_signed(&self) -> bool {
        self.vendor_signature.is_some() && self.client_signature.is_some()
    }
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Contract {
            id: row.id,
            contract_number: row.contract_number,
            client_id: row.client_id,
            project_id: row.project_id,
            signing_date: row.signing_date,
            signing_location: row.signing_location,
            client_name1: row.client_name1,
            client_address1: row.client_address1,
            client_phone1: row.client_phone1,
            client_name2: row.client_name2,
            client_address2: row.client_address2,
            client_phone2: row.client_phone2,
            shooting_duration: row.shooting_duration,
            guaranteed_photos: row.guaranteed_photos,
            album_details: row.album_details,
            digital_files_format: row.digital_files_format,
            other_items: row.other_items,
            personnel_count: row.personnel_count,
            delivery_timeframe: row.delivery_timeframe,
            dp_date: row.dp_date,
            final_payment_date: row.final_payment_date,
            cancellation_policy: row.cancellation_policy,
            jurisdiction: row.jurisdiction,
            vendor_signature: row.vendor_signature,
            client_signature: row.client_signature,
            created_at: row.created_at,
        }
    }
}

impl From<Contract> for ContractRow {
    fn from(contract: Contract) -> Self {
        ContractRow {
            id: contract.id,
            contract_number: contract.contract_number,
            client_id: contract.client_id,
            project_id: contract.project_id,
            signing_date: contract.signing_date,
            signing_location: contract.signing_location,
            client_name1: contract.client_name1,
            client_address1: contract.client_address1,
            client_phone1: contract.client_phone1,
            client_name2: contract.client_name2,
            client_address2: contract.client_address2,
            client_phone2: contract.client_phone2,
            shooting_duration: contract.shooting_duration,
            guaranteed_photos: contract.guaranteed_photos,
            album_details: contract.album_details,
            digital_files_format: contract.digital_files_format,
            other_items: contract.other_items,
            personnel_count: contract.personnel_count,
            delivery_timeframe: contract.delivery_timeframe,
            dp_date: contract.dp_date,
            final_payment_date: contract.final_payment_date,
            cancellation_policy: contract.cancellation_policy,
            jurisdiction: contract.jurisdiction,
            vendor_signature: contract.vendor_signature,
            client_signature: contract.client_signature,
            created_at: contract.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewContract {
    #[validate(length(min = 1, message = "Contract number is required"))]
    pub contract_number: String,
    pub client_id: String,
    pub project_id: String,
    pub signing_date: String,
    pub signing_location: String,
    pub client_name1: String,
    pub client_address1: String,
    pub client_phone1: String,
    pub client_name2: Option<String>,
    pub client_address2: Option<String>,
    pub client_phone2: Option<String>,
    pub shooting_duration: String,
    pub guaranteed_photos: String,
    pub album_details: String,
    pub digital_files_format: String,
    pub other_items: String,
    pub personnel_count: String,
    pub delivery_timeframe: String,
    pub dp_date: Option<String>,
    pub final_payment_date: Option<String>,
    pub cancellation_policy: String,
    pub jurisdiction: String,
    pub vendor_signature: Option<String>,
    pub client_signature: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct ContractPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shooting_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_photos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_timeframe: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub dp_date: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_payment_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_policy: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor_signature: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_signature: Option<Option<String>>,
}

impl Entity for Contract {
    type Row = ContractRow;
    type New = NewContract;
    type Patch = ContractPatch;

    const TABLE: Table = Table::Contracts;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.contracts
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.contracts
    }
}
