use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Create the session table and its date index if missing.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS courtsession (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            SessionDate         TEXT NOT NULL,
            StartTime           TEXT NOT NULL,
            SessionDescription  TEXT NOT NULL,
            CourtRoomCode       TEXT NOT NULL DEFAULT '',
            JudicialOfficerCode TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_courtsession_date
            ON courtsession (SessionDate);
        "#,
    )?;
    debug!("courtsession schema ready");
    Ok(())
}
