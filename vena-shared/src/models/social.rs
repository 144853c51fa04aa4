/// Social media planner post

use crate::models::{Collections, Entity};
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaPostRow {
    pub id: String,
    pub project_id: String,
    pub client_name: String,
    pub post_type: String,
    pub platform: String,
    pub scheduled_date: String,
    pub caption: String,
    pub media_url: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaPost {
    pub id: String,
    pub project_id: String,
    pub client_name: String,
    /// `Instagram Feed`, `Instagram Story`, `Reels`, ...
    pub post_type: String,
    pub platform: String,
    pub scheduled_date: String,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// `Draf`, `Terjadwal`, `Diposting`, `Dibatalkan`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<SocialMediaPostRow> for SocialMediaPost {
    fn from(row: SocialMediaPostRow) -> Self {
        SocialMediaPost {
            id: row.id,
            project_id: row.project_id,
            client_name: row.client_name,
            post_type: row.post_type,
            platform: row.platform,
            scheduled_date: row.scheduled_date,
            caption: row.caption,
            media_url: row.media_url,
            status: row.status,
            notes: row.notes,
        }
    }
}

impl From<SocialMediaPost> for SocialMediaPostRow {
    fn from(post: SocialMediaPost) -> Self {
        SocialMediaPostRow {
            id: post.id,
            project_id: post.project_id,
            client_name: post.client_name,
            post_type: post.post_type,
            platform: post.platform,
            scheduled_date: post.scheduled_date,
            caption: post.caption,
            media_url: post.media_url,
            status: post.status,
            notes: post.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct NewSocialMediaPost {
    pub project_id: String,
    pub client_name: String,
    pub post_type: String,
    pub platform: String,
    #[validate(length(min = 1, message = "Scheduled date is required"))]
    pub scheduled_date: String,
    pub caption: String,
    pub media_url: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "snake_case", deserialize = "camelCase"))]
pub struct SocialMediaPostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

impl Entity for SocialMediaPost {
    type Row = SocialMediaPostRow;
    type New = NewSocialMediaPost;
    type Patch = SocialMediaPostPatch;

    const TABLE: Table = Table::SocialMediaPosts;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.social_media_posts
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.social_media_posts
    }
}
