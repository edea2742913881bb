//! Domain types describing what gets sent and with which template.

pub mod message;
pub mod template;
pub mod usage_type;

pub use message::SendMessageRequest;
pub use template::MessageTemplate;
pub use usage_type::UsageType;
