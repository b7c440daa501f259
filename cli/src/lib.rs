pub mod commands;
pub mod context;
pub mod logging;
pub mod repl;
pub mod script;

pub use context::{CliContext, CycleReport, HostState};
pub use repl::readline;
