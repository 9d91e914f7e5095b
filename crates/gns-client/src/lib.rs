//! Client for the General Notification System (GNS) API.
//!
//! ```rust,ignore
//! use gns_client::{Client, Priority, SendRequest};
//!
//! let client = Client::new("http://localhost:8080", token)?;
//! let request = SendRequest::new(task_id)
//!     .with_field("name", "Rust Developer")
//!     .with_priority(Priority::High);
//! let response = client.send_notification(&request).await?;
//! ```

pub mod client;
pub mod error;
pub mod request;
mod response;

pub use client::{Client, ClientBuilder, DEFAULT_TIMEOUT};
pub use error::{ApiErrorBody, ClientError};
pub use request::{HEALTH_PATH, NOTIFY_PATH, build_health_request, build_notify_request};

pub use gns_common::{Attachment, NotificationResponse, Priority, SendRequest};
