//! Wire-level frames sent over the notification socket.

use serde::Serialize;

use crate::domain::Notification;

/// Outbound frame wrapping a freshly created notification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFrame<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub notification: &'a Notification,
}

impl<'a> From<&'a Notification> for NotificationFrame<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            kind: "notification",
            notification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NotificationKind, OwnerId};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn frame_wraps_camel_case_notification() {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 4, 7, 30, 0)
            .single()
            .expect("timestamp");
        let notification = Notification {
            id: Uuid::nil(),
            owner: OwnerId::new("alice").expect("owner"),
            habit_id: Uuid::nil(),
            kind: NotificationKind::Reminder,
            title: "Habit reminder".to_owned(),
            message: "Time to complete your habit: Read".to_owned(),
            read: false,
            scheduled_for: at,
            created_at: at,
        };

        let value = serde_json::to_value(NotificationFrame::from(&notification)).expect("json");

        assert_eq!(value["type"], json!("notification"));
        assert_eq!(value["notification"]["type"], json!("reminder"));
        assert_eq!(value["notification"]["ownerId"], json!("alice"));
        assert_eq!(value["notification"]["habitId"], json!(Uuid::nil()));
        assert_eq!(value["notification"]["read"], json!(false));
    }
}
