pub mod config;
pub mod contact;
pub mod desktop;
pub mod effects;
pub mod error;
pub mod terminal;
pub mod window;
