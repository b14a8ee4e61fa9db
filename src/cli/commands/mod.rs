pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod frequencies;
pub mod init;
pub mod list;
pub mod log;
pub mod reminders;
pub mod take;
