//! v002: indexes backing the comparison-set and later-evaluation fetches.

pub const MIGRATION_SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_avaliation_client ON avaliation(client, id);
CREATE INDEX IF NOT EXISTS idx_answer_avaliation ON answer(avaliation);
";
