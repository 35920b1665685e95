//! Identifier generation for new client records.

use uuid::Uuid;

use super::ClientId;

/// Source of fresh client identifiers.
///
/// Implementations must never hand out the same identifier twice and must
/// not leak insertion order.
#[cfg_attr(test, mockall::automock)]
pub trait ClientIdGenerator: Send + Sync {
    /// Produce an identifier for a client that is about to be inserted.
    fn next_id(&self) -> ClientId;
}

/// Random UUID v4 identifiers (122 random bits each).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidClientIdGenerator;

impl ClientIdGenerator for UuidClientIdGenerator {
    fn next_id(&self) -> ClientId {
        ClientId::from_uuid(Uuid::new_v4())
    }
}
