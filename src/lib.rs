pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;
