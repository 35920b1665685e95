//! Composes the client id query from a sparse [`ClientFilter`].
//!
//! Every present filter field adds exactly one predicate, joined with `AND`.
//! Values always travel as bind parameters; nothing from the filter is
//! spliced into the SQL text. The order is fixed: highest score first, then
//! ascending id so ties come back in the same order on every call.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;

use crate::domain::ClientFilter;

use super::schema::clients;

/// Boxed `SELECT id FROM clients ...` statement borrowing filter values.
pub(crate) type ClientIdQuery<'a> = clients::BoxedQuery<'a, Pg, Text>;

/// Build the id projection for `filter`.
pub(crate) fn build_client_id_query(filter: &ClientFilter) -> ClientIdQuery<'_> {
    let ClientFilter {
        id,
        name_pattern,
        birthday,
        score,
        created_at,
    } = filter;

    let mut query = clients::table.select(clients::id).into_boxed();

    if let Some(id) = id {
        query = query.filter(clients::id.eq(id.as_str()));
    }
    if let Some(pattern) = name_pattern {
        query = query.filter(clients::name.like(pattern.as_str()));
    }
    if let Some(birthday) = birthday {
        query = query.filter(clients::birthday.eq(*birthday));
    }
    if let Some(score) = score {
        query = query.filter(clients::score.eq(*score));
    }
    if let Some(created_at) = created_at {
        query = query.filter(clients::created_at.eq(*created_at));
    }

    query.order((clients::score.desc(), clients::id.asc()))
}
