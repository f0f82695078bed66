//! CLI functionality for the literal set tool
//!
//! This module contains:
//! - Literal file loading
//! - The show, check, fold and operators commands
//! - Output formatting

pub mod check;
pub mod fold;
pub mod input;
pub mod operators;
pub mod output;
pub mod show;
