pub mod logger;
pub mod store;
pub mod uploads;
