//! v001: evaluations, questions, items, answers.
//!
//! Table names follow the questionnaire database the service reads from
//! (`avaliation` is an evaluation).

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS avaliation (
    id          INTEGER PRIMARY KEY,
    client      INTEGER NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS question (
    id       INTEGER PRIMARY KEY,
    number   INTEGER NOT NULL,
    content  TEXT NOT NULL,
    area     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS item (
    id     INTEGER PRIMARY KEY,
    score  REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS answer (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    avaliation  INTEGER NOT NULL REFERENCES avaliation(id) ON DELETE CASCADE,
    question    INTEGER NOT NULL REFERENCES question(id),
    item        INTEGER NOT NULL REFERENCES item(id)
);
";
