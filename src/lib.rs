pub mod app;
pub mod boards;
pub mod cli;
pub mod logging;
pub mod realm;
pub mod seed;
pub mod settings;
pub mod store;
pub mod tasks;
pub mod theme;
pub mod types;
pub mod ui;
pub mod view;
