//! SQL schema for the Sprout SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Referential integrity lives here, not in application code. Column defaults
/// cover every field the API treats as optional-with-default.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS activities (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL,
    date  TEXT NOT NULL               -- calendar date, YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS children (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL,
    age   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS checklists (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    is_checked  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS checklist_items (
    id                 INTEGER PRIMARY KEY,
    child_id           INTEGER NOT NULL REFERENCES children(id),
    activity_id        INTEGER NOT NULL REFERENCES activities(id),
    assigned_date      TEXT,           -- ISO 8601 UTC
    due_date           TEXT,           -- ISO 8601 UTC
    status             TEXT NOT NULL DEFAULT 'pending',
    home_observation   TEXT,           -- opaque JSON
    school_observation TEXT,           -- opaque JSON
    custom_steps_used  TEXT            -- opaque JSON
);

CREATE TABLE IF NOT EXISTS custom_steps (
    id           INTEGER PRIMARY KEY,
    activity_id  INTEGER NOT NULL REFERENCES activities(id),
    teacher_id   TEXT NOT NULL,
    steps        TEXT NOT NULL         -- opaque JSON array
);

CREATE TABLE IF NOT EXISTS follow_up_suggestions (
    id                     INTEGER PRIMARY KEY,
    child_id               INTEGER NOT NULL REFERENCES children(id),
    completed_activity_id  INTEGER NOT NULL REFERENCES activities(id),
    suggested_activity_id  INTEGER NOT NULL REFERENCES activities(id),
    auto_assigned          INTEGER NOT NULL DEFAULT 0,
    assigned_date          TEXT
);

CREATE TABLE IF NOT EXISTS plannings (
    id           INTEGER PRIMARY KEY,
    title        TEXT NOT NULL,
    description  TEXT
);

CREATE TABLE IF NOT EXISTS planned_activities (
    id              INTEGER PRIMARY KEY,
    planning_id     INTEGER NOT NULL REFERENCES plannings(id),
    activity_id     INTEGER NOT NULL REFERENCES activities(id),
    scheduled_date  TEXT NOT NULL,
    scheduled_time  TEXT,
    reminder        INTEGER NOT NULL DEFAULT 1,
    completed       INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS notifications (
    id          INTEGER PRIMARY KEY,
    message     TEXT NOT NULL,
    created_at  TEXT
);

CREATE TABLE IF NOT EXISTS users (
    id             INTEGER PRIMARY KEY,
    name           TEXT NOT NULL,
    email          TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL       -- argon2 PHC string
);

CREATE TABLE IF NOT EXISTS api_tokens (
    id          INTEGER PRIMARY KEY,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    token_hash  TEXT NOT NULL UNIQUE,  -- sha-256 hex of the bearer token
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS checklist_items_child_idx    ON checklist_items(child_id);
CREATE INDEX IF NOT EXISTS checklist_items_activity_idx ON checklist_items(activity_id);
CREATE INDEX IF NOT EXISTS planned_activities_planning_idx ON planned_activities(planning_id);

PRAGMA user_version = 1;
";
