//! Command-line front end for literal value sets
//!
//! Reads literals in their JSON wire format, prints them, tests subset and
//! equality relations, and folds operators over them.

pub mod cli;
