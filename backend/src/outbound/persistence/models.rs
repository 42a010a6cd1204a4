//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{volunteer_posts, volunteer_requests};

// ---------------------------------------------------------------------------
// Volunteer posting models
// ---------------------------------------------------------------------------

/// Row struct for reading from the volunteer_posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = volunteer_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VolunteerPostRow {
    pub id: Uuid,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub volunteers_needed: i32,
    pub deadline: DateTime<Utc>,
    pub organizer_name: String,
    pub organizer_email: String,
}

/// Insertable struct for creating volunteer posting records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = volunteer_posts)]
pub(crate) struct NewVolunteerPostRow<'a> {
    pub id: Uuid,
    pub thumbnail: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub volunteers_needed: i32,
    pub deadline: DateTime<Utc>,
    pub organizer_name: &'a str,
    pub organizer_email: &'a str,
}

/// Changeset struct for replacing posting fields on upsert.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = volunteer_posts)]
pub(crate) struct VolunteerPostUpdate<'a> {
    pub thumbnail: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub volunteers_needed: i32,
    pub deadline: DateTime<Utc>,
    pub organizer_name: &'a str,
    pub organizer_email: &'a str,
}

// ---------------------------------------------------------------------------
// Volunteer request models
// ---------------------------------------------------------------------------

/// Row struct for reading from the volunteer_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = volunteer_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VolunteerRequestRow {
    pub id: Uuid,
    pub volunteer_post_id: Uuid,
    pub volunteer_name: String,
    pub volunteer_email: String,
    pub suggestion: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating volunteer request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = volunteer_requests)]
pub(crate) struct NewVolunteerRequestRow<'a> {
    pub id: Uuid,
    pub volunteer_post_id: Uuid,
    pub volunteer_name: &'a str,
    pub volunteer_email: &'a str,
    pub suggestion: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}
