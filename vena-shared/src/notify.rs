/// Notification fan-out
///
/// A [`NotificationDraft`] becomes a stored [`Notification`] with a fresh
/// id, the current timestamp and `isRead = false`, prepended to the
/// notification collection. When the vendor profile carries an email
/// address, an [`EmailNotice`] is handed to the configured [`Mailer`];
/// otherwise a warning is logged. Mail failures are logged and never undo
/// the stored notification.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vena_shared::data::DataStore;
/// use vena_shared::navigation::ViewType;
/// use vena_shared::notify::{LogMailer, NotificationDraft, Notifier};
///
/// # async fn example(data: DataStore) -> Result<(), vena_shared::data::DataError> {
/// let notifier = Notifier::new(Arc::new(LogMailer));
/// let draft = NotificationDraft::new("Prospek Baru", "Ana mengisi formulir", "lead")
///     .linked_to(ViewType::Prospek);
/// notifier.publish(&data, draft).await?;
/// # Ok(())
/// # }
/// ```

use crate::data::{DataResult, DataStore};
use crate::local::{LocalResult, LocalWorkspace};
use crate::models::notification::{NewNotification, NotificationLink, NotificationPatch};
use crate::models::{Notification, Profile};
use crate::navigation::ViewType;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Content of a notification before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub message: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<NotificationLink>,
}

impl NotificationDraft {
    pub fn new(title: impl Into<String>, message: impl Into<String>, icon: impl Into<String>) -> Self {
        NotificationDraft {
            title: title.into(),
            message: message.into(),
            icon: icon.into(),
            link: None,
        }
    }

    /// Points the notification at `view`
    pub fn linked_to(mut self, view: ViewType) -> Self {
        self.link = Some(NotificationLink { view, action: None });
        self
    }

    fn into_new(self) -> NewNotification {
        NewNotification {
            title: self.title,
            message: self.message,
            icon: self.icon,
            link: self.link,
            timestamp: Some(Utc::now().to_rfc3339()),
            is_read: Some(false),
        }
    }
}

/// Email sent to the vendor for a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailNotice {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailNotice {
    pub fn for_notification(to: &str, notification: &Notification) -> Self {
        EmailNotice {
            to: to.to_string(),
            subject: notification.title.clone(),
            body: format!("{}\n\n{}", notification.message, notification.timestamp),
        }
    }
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Outbound email channel
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notice: EmailNotice) -> Result<(), MailError>;
}

/// Mailer that only writes the notice to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, notice: EmailNotice) -> Result<(), MailError> {
        tracing::info!(to = %notice.to, subject = %notice.subject, "Email notification");
        Ok(())
    }
}

/// Stores notifications and mails them to the vendor
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Notifier { mailer }
    }

    /// Stores a notification through the row store
    pub async fn publish(&self, data: &DataStore, draft: NotificationDraft) -> DataResult<Notification> {
        let notification = data.create::<Notification>(draft.into_new()).await?;
        self.mail(data.profile().await.as_ref(), &notification).await;
        Ok(notification)
    }

    /// Stores a notification in a local workspace
    pub async fn publish_local(
        &self,
        workspace: &mut LocalWorkspace,
        draft: NotificationDraft,
    ) -> LocalResult<Notification> {
        let notification = workspace.insert::<Notification>(draft.into_new()).await?;
        self.mail(workspace.profile(), &notification).await;
        Ok(notification)
    }

    /// Marks one notification as read
    pub async fn mark_read(&self, data: &DataStore, id: &str) -> DataResult<Notification> {
        data.update::<Notification>(id, NotificationPatch::read()).await
    }

    /// Marks every unread notification as read; returns how many changed
    ///
    /// Stops at the first failure; notifications marked before it stay read.
    pub async fn mark_all_read(&self, data: &DataStore) -> DataResult<usize> {
        let unread: Vec<String> = data
            .list::<Notification>()
            .await
            .into_iter()
            .filter(|n| !n.is_read)
            .map(|n| n.id)
            .collect();

        for id in &unread {
            data.update::<Notification>(id, NotificationPatch::read()).await?;
        }
        Ok(unread.len())
    }

    /// Marks every unread notification in a local workspace as read
    pub async fn mark_all_read_local(&self, workspace: &mut LocalWorkspace) -> usize {
        let mut notifications = workspace.list::<Notification>().to_vec();
        let mut changed = 0;
        for notification in notifications.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            changed += 1;
        }

        if changed > 0 {
            workspace.replace(notifications).await;
        }
        changed
    }

    async fn mail(&self, profile: Option<&Profile>, notification: &Notification) {
        let email = profile.map(|p| p.email.trim()).filter(|email| !email.is_empty());
        let Some(email) = email else {
            tracing::warn!(id = %notification.id, "Vendor email not set, skipping email notification");
            return;
        };

        let notice = EmailNotice::for_notification(email, notification);
        if let Err(e) = self.mailer.send(notice).await {
            tracing::warn!(id = %notification.id, error = %e, "Failed to send email notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{sample_profile, ProfileRow};
    use crate::models::encode_row;
    use crate::persist::MemoryKeyValueStore;
    use crate::store::{MemoryRowStore, Table};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<EmailNotice>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, notice: EmailNotice) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Delivery("smtp down".to_string()));
            }
            self.sent.lock().await.push(notice);
            Ok(())
        }
    }

    async fn data_with_profile(email: &str) -> DataStore {
        let store = Arc::new(MemoryRowStore::new());
        let profile = Profile {
            email: email.to_string(),
            ..sample_profile()
        };
        store
            .seed(
                Table::Profiles,
                vec![encode_row(Table::Profiles, &ProfileRow::from(profile)).unwrap()],
            )
            .await;
        let data = DataStore::new(store);
        data.load_all().await.unwrap();
        data
    }

    #[tokio::test]
    async fn test_publish_prepends_unread_and_mails() {
        let data = data_with_profile("studio@vena.test").await;
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = Notifier::new(mailer.clone());

        let first = notifier
            .publish(&data, NotificationDraft::new("A", "first", "lead"))
            .await
            .unwrap();
        let second = notifier
            .publish(
                &data,
                NotificationDraft::new("B", "second", "payment").linked_to(ViewType::Finance),
            )
            .await
            .unwrap();

        assert!(!first.is_read);
        assert!(!first.id.is_empty());
        assert_eq!(second.link.as_ref().map(|l| l.view), Some(ViewType::Finance));

        let stored = data.list::<Notification>().await;
        assert_eq!(stored[0].id, second.id);
        assert_eq!(stored[1].id, first.id);

        let sent = mailer.sent.lock().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "studio@vena.test");
        assert_eq!(sent[1].subject, "B");
    }

    #[tokio::test]
    async fn test_no_vendor_email_skips_mail() {
        let data = data_with_profile("  ").await;
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = Notifier::new(mailer.clone());

        notifier
            .publish(&data, NotificationDraft::new("A", "first", "lead"))
            .await
            .unwrap();
        assert!(mailer.sent.lock().await.is_empty());
        assert_eq!(data.list::<Notification>().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mail_failure_keeps_notification() {
        let data = data_with_profile("studio@vena.test").await;
        let notifier = Notifier::new(Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        }));

        notifier
            .publish(&data, NotificationDraft::new("A", "first", "lead"))
            .await
            .unwrap();
        assert_eq!(data.list::<Notification>().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_and_mark_all_read() {
        let data = data_with_profile("studio@vena.test").await;
        let notifier = Notifier::new(Arc::new(LogMailer));

        let a = notifier
            .publish(&data, NotificationDraft::new("A", "a", "lead"))
            .await
            .unwrap();
        notifier
            .publish(&data, NotificationDraft::new("B", "b", "lead"))
            .await
            .unwrap();
        notifier
            .publish(&data, NotificationDraft::new("C", "c", "lead"))
            .await
            .unwrap();

        assert!(notifier.mark_read(&data, &a.id).await.unwrap().is_read);
        assert_eq!(notifier.mark_all_read(&data).await.unwrap(), 2);
        assert!(data.list::<Notification>().await.iter().all(|n| n.is_read));
        assert_eq!(notifier.mark_all_read(&data).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_local_publish_and_mark_all_read() {
        let mut workspace = LocalWorkspace::open(Arc::new(MemoryKeyValueStore::new())).await;
        workspace.set_profile(sample_profile()).await;
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = Notifier::new(mailer.clone());

        let stored = notifier
            .publish_local(&mut workspace, NotificationDraft::new("A", "a", "deadline"))
            .await
            .unwrap();
        assert!(!stored.is_read);
        assert_eq!(workspace.list::<Notification>()[0].id, stored.id);
        assert_eq!(mailer.sent.lock().await.len(), 1);

        assert_eq!(notifier.mark_all_read_local(&mut workspace).await, 1);
        assert!(workspace.list::<Notification>()[0].is_read);
    }

    #[test]
    fn test_draft_validation() {
        assert!(NotificationDraft::new("", "m", "lead").validate().is_err());
        assert!(NotificationDraft::new("t", "m", "lead").validate().is_ok());
    }
}
