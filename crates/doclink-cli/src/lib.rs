//! Command line front end: reads a project document and its symbol table
//! from JSON, runs the repair pass and writes the repaired project back.

pub mod args;
pub mod driver;
pub mod tracing_config;
