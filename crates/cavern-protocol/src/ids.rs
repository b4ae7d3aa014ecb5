//! Identifier sources.
//!
//! Sessions and players are both named by opaque strings minted from an
//! [`IdSource`]. Uniqueness over the process lifetime is assumed by the
//! session core, never checked.

use std::sync::atomic::{AtomicU64, Ordering};

/// Produces globally unique opaque identifiers.
///
/// `Send + Sync` because one source is shared by every request handler.
pub trait IdSource: Send + Sync + 'static {
    /// Returns a fresh identifier.
    fn new_id(&self) -> String;
}

/// Random UUID v4 identifiers. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn new_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Predictable identifiers: `"{prefix}-1"`, `"{prefix}-2"`, ...
///
/// Useful in tests where readable, ordered ids make assertions simple.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    /// Creates a source whose first id is `"{prefix}-1"`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdSource for SequentialIds {
    fn new_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
