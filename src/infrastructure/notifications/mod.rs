pub mod banner;
pub mod composite;
pub mod desktop;
pub mod log_file;
pub mod speech;
pub mod terminal;
pub mod tone;
