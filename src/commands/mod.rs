//! CLI command handlers. Each prints its user-facing output to stdout and
//! returns errors with a `<command> error:` prefix.

pub mod daemon;
pub mod history;
