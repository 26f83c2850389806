// Library surface for headless/integration tests and reuse.
// Terminal setup and the CLI stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod filter;
pub mod logging;
pub mod question;
pub mod runtime;
pub mod session;
pub mod store;
pub mod ui;
pub mod util;
