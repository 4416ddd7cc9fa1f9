pub mod cls_notification;
pub mod cls_notification_state;

pub use cls_notification::{Notification, NotificationBuilder};
pub(crate) use cls_notification_state::{ManagerDefaults, NotificationState};
