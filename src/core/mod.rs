pub mod add;
pub mod config;
pub mod del;
pub mod edit;
pub mod expander;
pub mod list;
pub mod log;
pub mod reminders;
pub mod take;
