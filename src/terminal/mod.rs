pub mod builtins;
pub mod guard;
pub mod output;
pub mod registry;
pub mod shell;
