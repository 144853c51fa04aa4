/// Promo code model

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCodeRow {
    pub id: String,
    pub code: String,
    pub discount_type: String,
    pub discount_value: i64,
    pub is_active: bool,
    pub usage_count: i32,
    pub max_usage: Option<i32>,
    pub expiry_date: Option<String>,
    pub created_at: String,
}

/// Discount code redeemable on public booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub id: String,
    pub code: String,
    /// `percentage` or `fixed`
    pub discount_type: String,
    pub discount_value: i64,
    pub is_active: bool,
    pub usage_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_usage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub created_at: String,
}

impl PromoCode {
    /// Active and below its usage cap
    pub fn is_redeemable(&self) -> bool {
        self.is_active && self.max_usage.map_or(true, |max| self.usage_count < max)
    }
}

impl From<PromoCodeRow> for PromoCode {
    fn from(row: PromoCodeRow) -> Self {
        PromoCode {
            id: row.id,
            code: row.code,
            discount_type: row.discount_type,
            discount_value: row.discount_value,
            is_active: row.is_active,
            usage_count: row.usage_count,
            max_usage: row.max_usage,
            expiry_date: row.expiry_date,
            created_at: row.created_at,
        }
    }
}

impl From<PromoCode> for PromoCodeRow {
    fn from(promo: PromoCode) -> Self {
        PromoCodeRow {
            id: promo.id,
            code: promo.code,
            discount_type: promo.discount_type,
            discount_value: promo.discount_value,
            is_active: promo.is_active,
            usage_count: promo.usage_count,
            max_usage: promo.max_usage,
            expiry_date: promo.expiry_date,
            created_at: promo.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewPromoCode {
    #[validate(length(min = 1, max = 32, message = "Code must be 1-32 characters"))]
    pub code: String,
    pub discount_type: String,
    #[validate(range(min = 0))]
    pub discount_value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub max_usage: Option<i32>,
    pub expiry_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct PromoCodePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<i32>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_usage: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<Option<String>>,
}

impl Entity for PromoCode {
    type Row = PromoCodeRow;
    type New = NewPromoCode;
    type Patch = PromoCodePatch;

    const TABLE: Table = Table::PromoCodes;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.promo_codes
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.promo_codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo() -> PromoCode {
        PromoCode {
            id: "pc-1".to_string(),
            code: "NIKAH10".to_string(),
            discount_type: "percentage".to_string(),
            discount_value: 10,
            is_active: true,
            usage_count: 2,
            max_usage: Some(3),
            expiry_date: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(PromoCode::from(PromoCodeRow::from(promo())), promo());
    }

    #[test]
    fn test_redeemable() {
        assert!(promo().is_redeemable());
        assert!(!PromoCode { usage_count: 3, ..promo() }.is_redeemable());
        assert!(!PromoCode { is_active: false, ..promo() }.is_redeemable());
        assert!(PromoCode { max_usage: None, usage_count: 99, ..promo() }.is_redeemable());
    }
}
