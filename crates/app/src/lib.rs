pub mod app_loop;
pub mod config;
pub mod seed;
pub mod ui_text;

pub const APP_NAME: &str = "crawler";
