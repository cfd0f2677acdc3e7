pub mod config;
pub mod logging;
pub mod site;
pub mod switcher;
