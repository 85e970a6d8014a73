pub mod banner_panel;
pub mod dashboard;
