/// Vendor profile model and row transformer
///
/// The profile is a singleton: one row per vendor account, read with
/// [`RowStore::select_single`](crate::store::RowStore::select_single) and
/// never created or deleted through the data layer.
///
/// Category lists and configuration blobs are JSONB columns decoded into
/// typed structures here, once, instead of at every use site.

use crate::store::Table;
use serde::{Deserialize, Serialize};

/// One step of the project status pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectStatusConfig {
    pub id: String,
    pub name: String,
    /// Hex color shown for the status
    pub color: String,
    pub sub_statuses: Vec<SubStatus>,
    pub note: String,
}

/// Named sub-step inside a project status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubStatus {
    pub name: String,
    pub note: String,
}

/// Which events produce notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub new_project: bool,
    pub payment_confirmation: bool,
    pub deadline_reminder: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            new_project: true,
            payment_confirmation: true,
            deadline_reminder: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecuritySettings {
    pub two_factor_enabled: bool,
}

/// Public package page appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicPageConfig {
    pub template: String,
    pub title: String,
    pub introduction: String,
    pub gallery_images: Vec<String>,
}

/// Reusable chat message template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatTemplate {
    pub id: String,
    pub title: String,
    pub template: String,
}

/// Profile row (persistence shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    pub admin_user_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub website: String,
    pub address: String,
    pub bank_account: String,
    pub authorized_signer: String,
    pub id_number: Option<String>,
    pub bio: String,
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
    pub project_types: Vec<String>,
    pub event_types: Vec<String>,
    pub asset_categories: Vec<String>,
    pub sop_categories: Vec<String>,
    pub package_categories: Vec<String>,
    pub project_status_config: Vec<ProjectStatusConfig>,
    pub notification_settings: NotificationSettings,
    pub security_settings: SecuritySettings,
    pub briefing_template: String,
    pub terms_and_conditions: Option<String>,
    pub contract_template: Option<String>,
    pub logo_base64: Option<String>,
    pub brand_color: String,
    pub public_page_config: PublicPageConfig,
    pub package_share_template: Option<String>,
    pub booking_form_template: Option<String>,
    pub chat_templates: Option<Vec<ChatTemplate>>,
}

/// Vendor profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,

    /// Auth user owning this profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_user_id: Option<String>,

    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub website: String,
    pub address: String,
    pub bank_account: String,
    pub authorized_signer: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,

    pub bio: String,
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
    pub project_types: Vec<String>,
    pub event_types: Vec<String>,
    pub asset_categories: Vec<String>,
    pub sop_categories: Vec<String>,
    pub package_categories: Vec<String>,
    pub project_status_config: Vec<ProjectStatusConfig>,
    pub notification_settings: NotificationSettings,
    pub security_settings: SecuritySettings,
    pub briefing_template: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_base64: Option<String>,

    /// Accent color for public pages
    pub brand_color: String,

    pub public_page_config: PublicPageConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_share_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_form_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_templates: Option<Vec<ChatTemplate>>,
}

impl Profile {
    pub const TABLE: Table = Table::Profiles;
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            admin_user_id: row.admin_user_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            company_name: row.company_name,
            website: row.website,
            address: row.address,
            bank_account: row.bank_account,
            authorized_signer: row.authorized_signer,
            id_number: row.id_number,
            bio: row.bio,
            income_categories: row.income_categories,
            expense_categories: row.expense_categories,
            project_types: row.project_types,
            event_types: row.event_types,
            asset_categories: row.asset_categories,
            sop_categories: row.sop_categories,
            package_categories: row.package_categories,
            project_status_config: row.project_status_config,
            notification_settings: row.notification_settings,
            security_settings: row.security_settings,
            briefing_template: row.briefing_template,
            terms_and_conditions: row.terms_and_conditions,
            contract_template: row.contract_template,
            logo_base64: row.logo_base64,
            brand_color: row.brand_color,
            public_page_config: row.public_page_config,
            package_share_template: row.package_share_template,
            booking_form_template: row.booking_form_template,
            chat_templates: row.chat_templates,
        }
    }
}

impl From<Profile> for ProfileRow {
    fn from(profile: Profile) -> Self {
        ProfileRow {
            id: profile.id,
            admin_user_id: profile.admin_user_id,
            full_name: profile.full_name,
            email: profile.email,
            phone: profile.phone,
            company_name: profile.company_name,
            website: profile.website,
            address: profile.address,
            bank_account: profile.bank_account,
            authorized_signer: profile.authorized_signer,
            id_number: profile.id_number,
            bio: profile.bio,
            income_categories: profile.income_categories,
            expense_categories: profile.expense_categories,
            project_types: profile.project_types,
            event_types: profile.event_types,
            asset_categories: profile.asset_categories,
            sop_categories: profile.sop_categories,
            package_categories: profile.package_categories,
            project_status_config: profile.project_status_config,
            notification_settings: profile.notification_settings,
            security_settings: profile.security_settings,
            briefing_template: profile.briefing_template,
            terms_and_conditions: profile.terms_and_conditions,
            contract_template: profile.contract_template,
            logo_base64: profile.logo_base64,
            brand_color: profile.brand_color,
            public_page_config: profile.public_page_config,
            package_share_template: profile.package_share_template,
            booking_form_template: profile.booking_form_template,
            chat_templates: profile.chat_templates,
        }
    }
}

/// Partial update for the profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_signer: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_number: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sop_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_status_config: Option<Vec<ProjectStatusConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<NotificationSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_settings: Option<SecuritySettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub briefing_template: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub terms_and_conditions: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub contract_template: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_base64: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_page_config: Option<PublicPageConfig>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub package_share_template: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub booking_form_template: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub chat_templates: Option<Option<Vec<ChatTemplate>>>,
}

#[cfg(test)]
pub(crate) fn sample_profile() -> Profile {
    Profile {
        id: "profile-1".to_string(),
        admin_user_id: Some("admin-1".to_string()),
        full_name: "Vena Admin".to_string(),
        email: "studio@vena.test".to_string(),
        phone: "0800".to_string(),
        company_name: "Vena Pictures".to_string(),
        website: "https://vena.test".to_string(),
        address: "Jakarta".to_string(),
        bank_account: "BCA 123".to_string(),
        authorized_signer: "Vena Admin".to_string(),
        id_number: Some("3171".to_string()),
        bio: "Wedding photography".to_string(),
        income_categories: vec!["DP Proyek".to_string()],
        expense_categories: vec!["Gaji Freelancer".to_string()],
        project_types: vec!["Pernikahan".to_string()],
        event_types: vec!["Meeting Klien".to_string()],
        asset_categories: vec!["Kamera".to_string()],
        sop_categories: vec!["Fotografi".to_string()],
        package_categories: vec!["Pernikahan".to_string()],
        project_status_config: vec![ProjectStatusConfig {
            id: "status-1".to_string(),
            name: "Persiapan".to_string(),
            color: "#3b82f6".to_string(),
            sub_statuses: vec![SubStatus {
                name: "Briefing".to_string(),
                note: String::new(),
            }],
            note: String::new(),
        }],
        notification_settings: NotificationSettings::default(),
        security_settings: SecuritySettings::default(),
        briefing_template: "Halo tim".to_string(),
        terms_and_conditions: Some("Syarat".to_string()),
        contract_template: None,
        logo_base64: None,
        brand_color: "#3b82f6".to_string(),
        public_page_config: PublicPageConfig {
            template: "classic".to_string(),
            title: "Paket".to_string(),
            introduction: "Selamat datang".to_string(),
            gallery_images: vec![],
        },
        package_share_template: None,
        booking_form_template: None,
        chat_templates: Some(vec![ChatTemplate {
            id: "tpl-1".to_string(),
            title: "Salam".to_string(),
            template: "Halo {clientName}".to_string(),
        }]),
    }
}
