use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::RawSession;
use chrono::NaiveDate;
use rusqlite::{Result, Row, params};

/// Sessions with `from <= SessionDate <= to`, ordered by date and time.
pub fn load_raw_sessions(pool: &mut DbPool, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<RawSession>> {
    let mut stmt = pool.conn.prepare(
        "SELECT SessionDate, StartTime, SessionDescription, CourtRoomCode, JudicialOfficerCode
         FROM courtsession
         WHERE SessionDate BETWEEN ?1 AND ?2
         ORDER BY SessionDate ASC, StartTime ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![from.format("%Y-%m-%d").to_string(), to.format("%Y-%m-%d").to_string()],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_row(row: &Row) -> Result<RawSession> {
    let date_str: String = row.get("SessionDate")?;

    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(RawSession {
        date,
        start_time: row.get("StartTime")?,
        description: row.get("SessionDescription")?,
        court_room: row.get("CourtRoomCode")?,
        officer_code: row.get("JudicialOfficerCode")?,
    })
}

/// Insert one session row; used by `init` fixtures and tests.
pub fn insert_raw_session(pool: &mut DbPool, s: &RawSession) -> AppResult<i64> {
    pool.conn.execute(
        "INSERT INTO courtsession
            (SessionDate, StartTime, SessionDescription, CourtRoomCode, JudicialOfficerCode)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            s.date.format("%Y-%m-%d").to_string(),
            s.start_time,
            s.description,
            s.court_room,
            s.officer_code
        ],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn session(date: &str, time: &str, desc: &str) -> RawSession {
        RawSession {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: time.into(),
            description: desc.into(),
            court_room: "101".into(),
            officer_code: "JSB".into(),
        }
    }

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn loads_range_in_order() {
        let mut p = pool();
        insert_raw_session(&mut p, &session("2025-01-07", "13:30:00", "B")).unwrap();
        insert_raw_session(&mut p, &session("2025-01-06", "09:00:00", "A")).unwrap();
        insert_raw_session(&mut p, &session("2024-12-31", "09:00:00", "OLD")).unwrap();

        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let rows = load_raw_sessions(&mut p, from, to).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(rows[0].officer_code, "JSB");
    }

    #[test]
    fn bad_date_is_an_error() {
        let mut p = pool();
        p.conn
            .execute(
                "INSERT INTO courtsession (SessionDate, StartTime, SessionDescription)
                 VALUES ('2025-02-30', '09:00', 'X')",
                [],
            )
            .unwrap();
        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert!(load_raw_sessions(&mut p, from, to).is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = DbPool::open(&dir.path().join("nope.sqlite")).err().unwrap();
        assert!(matches!(err, AppError::MissingDatabase(_)));
    }
}
