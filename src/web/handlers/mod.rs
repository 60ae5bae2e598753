pub mod download;
pub mod pages;
pub mod system;
pub mod upload;
