// Library surface for the binary and the headless/integration tests.
pub mod analysis;
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod navigation;
pub mod particles;
pub mod payload;
pub mod progress;
pub mod runtime;
pub mod scroll;
pub mod share;
pub mod shell;
pub mod slides;
pub mod transition;
pub mod ui;
pub mod upload;
pub mod util;
pub mod wrapped;
