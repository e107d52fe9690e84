pub mod context_menu;
pub mod handler;
pub mod schemas;
pub mod session;
pub mod ui_state;
