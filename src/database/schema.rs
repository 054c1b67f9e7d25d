// DDL for the two helpdesk tables. Column sizes must stay in step with the
// MAX_*_LEN constants in `models`, which the memory store enforces.

pub const CREATE_USER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS "user" (
    id       SERIAL PRIMARY KEY,
    username VARCHAR(80)  NOT NULL UNIQUE,
    email    VARCHAR(120) NOT NULL UNIQUE
)"#;

pub const CREATE_TICKET_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ticket (
    id          SERIAL PRIMARY KEY,
    title       VARCHAR(120) NOT NULL,
    description TEXT         NOT NULL,
    status      VARCHAR(20)  NOT NULL DEFAULT 'Open',
    user_id     INTEGER      NOT NULL REFERENCES "user"(id)
)"#;

/// In dependency order
pub const ALL_TABLES: &[(&str, &str)] = &[
    ("user", CREATE_USER_TABLE),
    ("ticket", CREATE_TICKET_TABLE),
];
