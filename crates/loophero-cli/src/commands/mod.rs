pub mod apps;
pub mod config;
pub mod setup;
pub mod watch;
