//! Internal Diesel row structs and row marshaling.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain. Conversions into domain types resolve nullable columns
//! to fixed defaults:
//!
//! | column       | null reads as                    |
//! |--------------|----------------------------------|
//! | `birthday`   | absent (`None`)                  |
//! | `score`      | [`NULL_SCORE_DEFAULT`] (`0`)     |
//! | `created_at` | [`null_created_at_default`] (Unix epoch) |

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Client, ClientId, ClientName, ClientValidationError, NewClient};

use super::schema::{client_matches, clients};

/// Score reported for rows whose `score` column is null.
pub const NULL_SCORE_DEFAULT: i64 = 0;

/// Timestamp reported for rows whose `created_at` column is null.
pub fn null_created_at_default() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Row struct for reading from the clients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClientRow {
    pub id: String,
    pub name: String,
    pub birthday: Option<DateTime<Utc>>,
    pub score: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ClientRow> for Client {
    type Error = ClientValidationError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let ClientRow {
            id,
            name,
            birthday,
            score,
            created_at,
        } = row;

        Ok(Self {
            id: ClientId::new(id)?,
            name: ClientName::new(name)?,
            birthday,
            score: score.unwrap_or(NULL_SCORE_DEFAULT),
            created_at: created_at.unwrap_or_else(null_created_at_default),
        })
    }
}

/// Insertable struct for creating client records.
///
/// `created_at` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub(crate) struct NewClientRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub birthday: Option<DateTime<Utc>>,
    pub score: i64,
}

impl<'a> From<&'a NewClient> for NewClientRow<'a> {
    fn from(client: &'a NewClient) -> Self {
        Self {
            id: client.id().as_ref(),
            name: client.name().as_ref(),
            birthday: client.birthday(),
            score: client.score(),
        }
    }
}

/// Insertable struct for appending to the match ledger.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = client_matches)]
pub(crate) struct NewMatchRow<'a> {
    pub client_id: &'a str,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn populated_row() -> ClientRow {
        ClientRow {
            id: "c-1".to_owned(),
            name: "Linus".to_owned(),
            birthday: Some(Utc.with_ymd_and_hms(1969, 12, 28, 0, 0, 0).unwrap()),
            score: Some(17),
            created_at: Some(Utc.with_ymd_and_hms(2024, 2, 29, 8, 30, 0).unwrap()),
        }
    }

    #[rstest]
    fn populated_row_keeps_stored_values(populated_row: ClientRow) {
        let expected_created_at = populated_row.created_at;
        let client = Client::try_from(populated_row).expect("row converts");

        assert_eq!(client.id.as_ref(), "c-1");
        assert_eq!(client.score, 17);
        assert!(client.birthday.is_some());
        assert_eq!(Some(client.created_at), expected_created_at);
    }

    #[rstest]
    fn null_columns_resolve_to_documented_defaults(mut populated_row: ClientRow) {
        populated_row.birthday = None;
        populated_row.score = None;
        populated_row.created_at = None;

        let client = Client::try_from(populated_row).expect("row converts");

        assert_eq!(client.birthday, None);
        assert_eq!(client.score, NULL_SCORE_DEFAULT);
        assert_eq!(client.created_at, null_created_at_default());
        assert_eq!(client.created_at.timestamp(), 0);
    }

    #[rstest]
    fn blank_stored_name_is_rejected(mut populated_row: ClientRow) {
        populated_row.name = String::new();

        let err = Client::try_from(populated_row).expect_err("blank name fails");

        assert_eq!(err, ClientValidationError::EmptyName);
    }
}
