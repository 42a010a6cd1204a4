//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Volunteer postings.
    ///
    /// `volunteers_needed` is the remaining capacity and is guarded by a
    /// `CHECK (volunteers_needed >= 0)` constraint.
    volunteer_posts (id) {
        id -> Uuid,
        thumbnail -> Text,
        /// Posting title (max 120 characters).
        title -> Varchar,
        description -> Text,
        category -> Text,
        location -> Text,
        volunteers_needed -> Int4,
        deadline -> Timestamptz,
        organizer_name -> Text,
        /// Ownership key for organizer-scoped listings.
        organizer_email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Requests submitted against a posting.
    volunteer_requests (id) {
        id -> Uuid,
        volunteer_post_id -> Uuid,
        volunteer_name -> Text,
        /// Ownership key for volunteer-scoped listings.
        volunteer_email -> Varchar,
        suggestion -> Text,
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(volunteer_posts, volunteer_requests);
