pub mod app;
pub mod file_manager;
pub mod fs_utils;
pub mod image_utils;
pub mod logging;
pub mod metadata;
pub mod search;
pub mod ui;
