pub mod catalog;
pub mod files;
pub mod recent;
pub mod uploads;
