//! Notification kinds, message templates, and payload formatting.

use serde::{Deserialize, Serialize};

/// The two notification-worthy edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    UpdatesAvailable,
    UpdatesDownloaded,
}

/// Message template for one notification kind.
///
/// Pure configuration data: title, byline, icon image, and the command the
/// notification UI should suggest when the user clicks through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub title: String,
    pub byline: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub command: String,
}

/// Templates per kind. A kind with no template emits nothing, which is how
/// the legacy profile disables notifications entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates_available: Option<NotificationTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates_downloaded: Option<NotificationTemplate>,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            updates_available: Some(NotificationTemplate {
                title: "New Updates Available".into(),
                byline: "Click here to download them.".into(),
                image: "/usr/share/upwatch/images/notification-updates-available.png".into(),
                command: "updater download".into(),
            }),
            updates_downloaded: Some(NotificationTemplate {
                title: "Download Complete".into(),
                byline: "Time to power up!".into(),
                image: "/usr/share/upwatch/images/notification-updates-downloaded.png".into(),
                command: "updater install".into(),
            }),
        }
    }
}

impl Templates {
    /// No notifications at all.
    pub fn none() -> Self {
        Self {
            updates_available: None,
            updates_downloaded: None,
        }
    }

    /// Resolves a kind to a ready-to-send notification.
    pub fn resolve(&self, kind: NotificationKind) -> Option<Notification> {
        let template = match kind {
            NotificationKind::UpdatesAvailable => self.updates_available.as_ref(),
            NotificationKind::UpdatesDownloaded => self.updates_downloaded.as_ref(),
        }?;
        Some(Notification {
            kind,
            title: template.title.clone(),
            byline: template.byline.clone(),
            image: template.image.clone(),
            command: template.command.clone(),
        })
    }
}

/// A formatted notification, ready for a transport sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub byline: String,
    pub image: String,
    pub command: String,
}
