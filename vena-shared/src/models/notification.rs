/// In-app notification model
///
/// The model's optional `link` is stored flattened into two nullable
/// columns, `link_view` and `link_action`. A row without `link_view` has no
/// link, whatever `link_action` holds.

use crate::models::{Collections, Entity};
use crate::navigation::ViewType;
use crate::store::Table;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Action the target view performs on arrival
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationAction {
    /// e.g. `VIEW_PROJECT_DETAILS`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Where clicking the notification leads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationLink {
    pub view: ViewType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<NavigationAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRow {
    pub id: String,
    pub title: String,
    pub message: String,
    pub timestamp: String,
    pub is_read: bool,
    pub icon: String,
    #[serde(default, deserialize_with = "crate::navigation::lenient_view")]
    pub link_view: Option<ViewType>,
    pub link_action: Option<NavigationAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    /// RFC 3339
    pub timestamp: String,
    pub is_read: bool,
    /// `lead`, `deadline`, `revision`, `feedback`, `payment`, `completed`, `comment`
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<NotificationLink>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        let link = row.link_view.map(|view| NotificationLink {
            view,
            action: row.link_action,
        });

        Notification {
            id: row.id,
            title: row.title,
            message: row.message,
            timestamp: row.timestamp,
            is_read: row.is_read,
            icon: row.icon,
            link,
        }
    }
}

impl From<Notification> for NotificationRow {
    fn from(notification: Notification) -> Self {
        let (link_view, link_action) = match notification.link {
            Some(link) => (Some(link.view), link.action),
            None => (None, None),
        };

        NotificationRow {
            id: notification.id,
            title: notification.title,
            message: notification.message,
            timestamp: notification.timestamp,
            is_read: notification.is_read,
            icon: notification.icon,
            link_view,
            link_action,
        }
    }
}

/// Input for creating a notification
///
/// Accepts the model's nested `link` and writes the flattened columns.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub message: String,
    pub icon: String,
    #[serde(default)]
    pub link: Option<NotificationLink>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

#[derive(Serialize)]
struct NewNotificationRow<'a> {
    title: &'a str,
    message: &'a str,
    icon: &'a str,
    link_view: Option<ViewType>,
    link_action: Option<&'a NavigationAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_read: Option<bool>,
}

impl Serialize for NewNotification {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NewNotificationRow {
            title: &self.title,
            message: &self.message,
            icon: &self.icon,
            link_view: self.link.as_ref().map(|link| link.view),
            link_action: self.link.as_ref().and_then(|link| link.action.as_ref()),
            timestamp: self.timestamp.as_deref(),
            is_read: self.is_read,
        }
        .serialize(serializer)
    }
}

/// Partial update for a notification
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
    /// `null` removes the link
    #[serde(deserialize_with = "crate::models::nullable")]
    pub link: Option<Option<NotificationLink>>,
}

#[derive(Serialize)]
struct NotificationPatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_view: Option<Option<ViewType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_action: Option<Option<&'a NavigationAction>>,
}

impl Serialize for NotificationPatch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let link = self.link.as_ref().map(|link| link.as_ref());
        NotificationPatchRow {
            title: self.title.as_deref(),
            message: self.message.as_deref(),
            is_read: self.is_read,
            link_view: link.map(|link| link.map(|l| l.view)),
            link_action: link.map(|link| link.and_then(|l| l.action.as_ref())),
        }
        .serialize(serializer)
    }
}

impl NotificationPatch {
    /// Patch that only flips the read flag
    pub fn read() -> Self {
        NotificationPatch {
            is_read: Some(true),
            ..NotificationPatch::default()
        }
    }
}

impl Entity for Notification {
    type Row = NotificationRow;
    type New = NewNotification;
    type Patch = NotificationPatch;

    const TABLE: Table = Table::Notifications;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(set: &Collections) -> &Vec<Self> {
        &set.notifications
    }

    fn collection_mut(set: &mut Collections) -> &mut Vec<Self> {
        &mut set.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{decode_row, encode_row, merge_patch, model_to_row};
    use serde_json::json;

    fn notification(link: Option<NotificationLink>) -> Notification {
        Notification {
            id: "n-1".to_string(),
            title: "Prospek Baru".to_string(),
            message: "Dewi mengisi formulir".to_string(),
            timestamp: "2024-04-01T10:00:00Z".to_string(),
            is_read: false,
            icon: "lead".to_string(),
            link,
        }
    }

    fn project_link() -> NotificationLink {
        NotificationLink {
            view: ViewType::Projects,
            action: Some(NavigationAction {
                kind: "VIEW_PROJECT_DETAILS".to_string(),
                id: Some("p-1".to_string()),
            }),
        }
    }

    #[test]
    fn test_link_flattens_into_two_columns() {
        let row = model_to_row(&notification(Some(project_link()))).unwrap();
        assert_eq!(row["link_view"], json!("projects"));
        assert_eq!(row["link_action"]["type"], json!("VIEW_PROJECT_DETAILS"));
        assert!(!row.contains_key("link"));

        let decoded: Notification = decode_row(row).unwrap();
        assert_eq!(decoded, notification(Some(project_link())));
    }

    #[test]
    fn test_null_link_view_yields_no_link() {
        let mut row = model_to_row(&notification(Some(project_link()))).unwrap();
        row.insert("link_view".to_string(), json!(null));

        let decoded: Notification = decode_row(row).unwrap();
        assert!(decoded.link.is_none());
        assert!(serde_json::to_value(&decoded).unwrap().get("link").is_none());
    }

    #[test]
    fn test_display_name_link_view_decodes() {
        let mut row = model_to_row(&notification(Some(project_link()))).unwrap();
        row.insert("link_view".to_string(), json!("Freelancer"));
        let decoded: Notification = decode_row(row).unwrap();
        assert_eq!(decoded.link.unwrap().view, ViewType::Team);

        let mut row = model_to_row(&notification(Some(project_link()))).unwrap();
        row.insert("link_view".to_string(), json!("Gallery"));
        let decoded: Notification = decode_row(row).unwrap();
        assert!(decoded.link.is_none());
    }

    #[test]
    fn test_round_trip_without_link() {
        let n = notification(None);
        let row = NotificationRow::from(n.clone());
        assert!(row.link_view.is_none() && row.link_action.is_none());
        assert_eq!(Notification::from(row), n);
    }

    #[test]
    fn test_new_notification_encodes_flat_columns() {
        let new: NewNotification = serde_json::from_value(json!({
            "title": "Pembayaran",
            "message": "DP diterima",
            "icon": "payment",
            "link": { "view": "finance" }
        }))
        .unwrap();
        let row = encode_row(Table::Notifications, &new).unwrap();

        assert_eq!(row["link_view"], json!("finance"));
        assert_eq!(row["link_action"], json!(null));
        assert!(!row.contains_key("timestamp"));
        assert!(!row.contains_key("is_read"));
    }

    #[test]
    fn test_patch_removes_link_and_marks_read() {
        let patch: NotificationPatch =
            serde_json::from_value(json!({ "isRead": true, "link": null })).unwrap();
        let row = encode_row(Table::Notifications, &patch).unwrap();
        assert_eq!(row["link_view"], json!(null));
        assert_eq!(row["link_action"], json!(null));
        assert_eq!(row["is_read"], json!(true));

        let merged = merge_patch(&notification(Some(project_link())), &patch).unwrap();
        assert!(merged.is_read);
        assert!(merged.link.is_none());
    }

    #[test]
    fn test_read_patch_touches_only_flag() {
        let row = encode_row(Table::Notifications, &NotificationPatch::read()).unwrap();
        assert_eq!(row.len(), 1);
    }
}
