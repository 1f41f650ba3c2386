pub mod audit_log;
pub mod candidate;
pub mod interview;
pub mod message;
pub mod template;
