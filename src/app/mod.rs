// Application layer: turns parsed CLI commands into service calls and renders the results.

pub mod commands;
pub mod output;

pub use commands::CommandRunner;
pub use output::CommandOutput;
