// Library root: exposes argument parsing, config loading and table rendering
// so integration tests can drive them without spawning the binary.

pub mod args;
pub mod config;
pub mod output;
