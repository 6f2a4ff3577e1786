//! SQL schema for the Khata SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id           INTEGER PRIMARY KEY,
    username     TEXT NOT NULL,
    officer_name TEXT,
    role         TEXT NOT NULL DEFAULT 'officer',
    password     TEXT,           -- stored as received from the client
    territory_id TEXT
);

-- Territory ids are client-chosen strings derived from the name. The
-- default covers generic inserts, which never carry an id of their own.
CREATE TABLE IF NOT EXISTS territories (
    id      TEXT PRIMARY KEY NOT NULL DEFAULT (lower(hex(randomblob(8)))),
    name    TEXT NOT NULL,
    part    TEXT,
    officer TEXT
);

-- Natural key (territory_id, month); sync upserts on it.
CREATE TABLE IF NOT EXISTS targets (
    id                      INTEGER PRIMARY KEY,
    territory_id            TEXT NOT NULL REFERENCES territories(id),
    month                   TEXT NOT NULL,  -- 'YYYY-MM'
    files                   INTEGER,
    proj_files              INTEGER,
    amount                  REAL,
    proj_reg                REAL,
    proj_adv                REAL,
    lm_np_target_amount     REAL,
    lm_np_target_files      INTEGER,
    total_od                REAL,
    od_growth_sply          REAL,
    per_file_od             REAL,
    six_plus_od_files       INTEGER,
    six_plus_od_growth_splm REAL,
    UNIQUE (territory_id, month)
);

CREATE TABLE IF NOT EXISTS projections (
    id           INTEGER PRIMARY KEY,
    territory_id TEXT,
    month        TEXT,
    files        INTEGER,
    amount       REAL,
    reg          REAL,
    adv          REAL
);

CREATE TABLE IF NOT EXISTS collections (
    id           INTEGER PRIMARY KEY,
    territory_id TEXT,
    month        TEXT,
    files        INTEGER,
    amount       REAL
);

CREATE TABLE IF NOT EXISTS offroad_vehicles (
    id            INTEGER PRIMARY KEY,
    customer_id   TEXT,
    customer_name TEXT,
    model         TEXT,
    territory_id  TEXT,
    reason        TEXT,
    since         TEXT
);

CREATE TABLE IF NOT EXISTS settlements (
    id            INTEGER PRIMARY KEY,
    customer_id   TEXT,
    customer_name TEXT,
    territory_id  TEXT,
    amount        REAL,
    waiver        REAL,
    settled_on    TEXT
);

-- One row per territory; readers see this folded into a map.
CREATE TABLE IF NOT EXISTS admin_unlocks (
    territory_id TEXT PRIMARY KEY,
    unlock_until INTEGER NOT NULL   -- epoch milliseconds
);

-- No stable natural key; sync replaces the whole table.
CREATE TABLE IF NOT EXISTS vehicle_performance (
    id            INTEGER PRIMARY KEY,
    customer_id   TEXT,
    customer_name TEXT,
    model         TEXT,
    km1           REAL,
    km2           REAL,
    earning       REAL,
    overdue_no    INTEGER,
    overdue_amt   REAL,
    extra1        TEXT,
    extra2        TEXT
);

CREATE INDEX IF NOT EXISTS targets_territory_idx ON targets(territory_id);
CREATE INDEX IF NOT EXISTS users_role_idx        ON users(role);

PRAGMA user_version = 1;
";
