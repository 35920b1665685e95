//! Client records, their identifiers, and the match ledger entries that
//! feed a client's aggregate score.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors raised by client constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientValidationError {
    /// The identifier was empty or only whitespace.
    #[error("client id must not be empty")]
    EmptyId,
    /// The name was empty or only whitespace.
    #[error("client name must not be empty")]
    EmptyName,
    /// A new client was given a negative starting score.
    #[error("initial client score must not be negative, got {score}")]
    NegativeScore { score: i64 },
}

/// Opaque client identifier.
///
/// Identifiers are assigned once by a [`ClientIdGenerator`] and never change.
/// Values read back from the store are accepted as long as they are not
/// blank.
///
/// [`ClientIdGenerator`]: crate::domain::ClientIdGenerator
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(String);

impl ClientId {
    /// Validate and construct a [`ClientId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ClientValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ClientValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Build an identifier from a freshly generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ClientId> for String {
    fn from(value: ClientId) -> Self {
        value.0
    }
}

/// Required, non-blank client name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientName(String);

impl ClientName {
    /// Validate and construct a [`ClientName`].
    pub fn new(name: impl Into<String>) -> Result<Self, ClientValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ClientValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ClientName> for String {
    fn from(value: ClientName) -> Self {
        value.0
    }
}

/// Store-assigned sequential identifier of a match ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchId(i64);

impl MatchId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A client about to be inserted.
///
/// ## Invariants
/// - `score` is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    id: ClientId,
    name: ClientName,
    birthday: Option<DateTime<Utc>>,
    score: i64,
}

impl NewClient {
    /// Build a new client, rejecting negative starting scores.
    pub fn new(
        id: ClientId,
        name: ClientName,
        birthday: Option<DateTime<Utc>>,
        score: i64,
    ) -> Result<Self, ClientValidationError> {
        if score < 0 {
            return Err(ClientValidationError::NegativeScore { score });
        }
        Ok(Self {
            id,
            name,
            birthday,
            score,
        })
    }

    /// Identifier assigned before insertion.
    pub fn id(&self) -> &ClientId {
        &self.id
    }

    /// Client name.
    pub fn name(&self) -> &ClientName {
        &self.name
    }

    /// Optional birthday.
    pub fn birthday(&self) -> Option<DateTime<Utc>> {
        self.birthday
    }

    /// Starting aggregate score.
    pub fn score(&self) -> i64 {
        self.score
    }
}

/// Persisted client as read back from the store.
///
/// `score` is the cached aggregate of the client's match ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub birthday: Option<DateTime<Utc>>,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

/// Sparse filter over client columns.
///
/// Each `Some` field contributes one predicate; `None` fields contribute
/// nothing. `name_pattern` is matched with SQL `LIKE`, so callers supply their
/// own `%` and `_` wildcards. All other fields are compared for equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub id: Option<String>,
    pub name_pattern: Option<String>,
    pub birthday: Option<DateTime<Utc>>,
    pub score: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ClientFilter {
    /// Number of predicates this filter contributes.
    pub fn predicate_count(&self) -> usize {
        [
            self.id.is_some(),
            self.name_pattern.is_some(),
            self.birthday.is_some(),
            self.score.is_some(),
            self.created_at.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
