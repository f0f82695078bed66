//! Handle-based storage for literals
//!
//! Callers that keep literals outside of Rust ownership (an evaluation
//! graph, a foreign caller) refer to them through a [`Handle`] obtained from
//! a [`LiteralStore`]. [`LiteralArena`] is the in-memory implementation.

use std::fmt;

use crate::error::{LiteralError, LiteralResult};
use crate::literal::LiteralValue;

/// Opaque reference to a stored literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage that hands out handles for literals and resolves them again
pub trait LiteralStore {
    /// Take ownership of `value` and return its handle
    fn create_instance(&mut self, value: LiteralValue) -> LiteralResult<Handle>;

    /// Borrow the literal behind `handle`
    fn bind_instance(&self, handle: Handle) -> LiteralResult<&LiteralValue>;

    /// Borrow several literals at once, failing on the first unknown handle
    fn bind_all(&self, handles: &[Handle]) -> LiteralResult<Vec<&LiteralValue>> {
        handles.iter().map(|&h| self.bind_instance(h)).collect()
    }
}

/// Append-only literal arena
#[derive(Debug, Default)]
pub struct LiteralArena {
    values: Vec<LiteralValue>,
}

impl LiteralArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored literals with their handles, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &LiteralValue)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (Handle(i as u32), v))
    }
}

impl LiteralStore for LiteralArena {
    fn create_instance(&mut self, value: LiteralValue) -> LiteralResult<Handle> {
        let handle = u32::try_from(self.values.len())
            .map(Handle)
            .map_err(|_| LiteralError::value("literal arena is full"))?;
        log::trace!("storing {} literal as {handle}", value.kind());
        self.values.push(value);
        Ok(handle)
    }

    fn bind_instance(&self, handle: Handle) -> LiteralResult<&LiteralValue> {
        self.values
            .get(handle.index())
            .ok_or_else(|| LiteralError::value(format!("unknown literal handle {handle}")))
    }
}
