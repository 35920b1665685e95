//! Diesel table definitions for the clients store.
//!
//! These definitions must match `backend/migrations` exactly. `score` and
//! `created_at` are nullable in storage; [`super::models`] documents how
//! null values are read.

diesel::table! {
    /// Client records and their cached aggregate score.
    clients (id) {
        /// Opaque identifier assigned by the service before insertion.
        id -> Text,
        /// Required client name.
        name -> Text,
        /// Optional birthday.
        birthday -> Nullable<Timestamptz>,
        /// Running sum of the client's match ledger (defaults to 0).
        score -> Nullable<Int8>,
        /// Insertion timestamp (defaults to `now()`).
        created_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only match ledger.
    client_matches (id) {
        /// Sequential identifier assigned by the store.
        id -> Int8,
        /// Owning client; rows cascade when the client is deleted.
        client_id -> Text,
        /// Score delta contributed by this match.
        score -> Int8,
    }
}

diesel::joinable!(client_matches -> clients (client_id));
diesel::allow_tables_to_appear_in_same_query!(clients, client_matches);
