pub mod app;
pub mod event;
pub mod view_state;
pub mod widgets;
