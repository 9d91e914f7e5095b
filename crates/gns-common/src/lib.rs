pub mod error;
pub mod notification;

pub use error::{Error, Result};
pub use notification::{Attachment, NotificationResponse, Priority, SendRequest};
