#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use court_calendar::config::Config;
use court_calendar::db::DbPool;
use court_calendar::db::initialize::init_db;
use court_calendar::db::queries::insert_raw_session;
use court_calendar::models::RawSession;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn cc() -> Command {
    cargo_bin_cmd!("court-calendar")
}

/// A temp directory holding a default configuration and an empty session
/// database, laid out the way `init` would.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: PathBuf,
    pub db: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("court_calendar.yaml");
        let db = dir.path().join("court_sessions.sqlite");

        let yaml = Config::default_template(&db, &dir.path().join("output"), &dir.path().join("logs"));
        fs::write(&config, yaml).expect("write config");

        let pool = DbPool::create(&db).expect("create db");
        init_db(&pool.conn).expect("schema");

        Self { dir, config, db }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    pub fn load_config(&self) -> Config {
        Config::load(Some(&self.config)).expect("valid config")
    }

    pub fn seed(&self, sessions: &[RawSession]) {
        let mut pool = DbPool::open(&self.db).expect("open db");
        for s in sessions {
            insert_raw_session(&mut pool, s).expect("insert session");
        }
    }

    /// Global flags pointing the binary at this environment.
    pub fn flags(&self) -> Vec<String> {
        vec![
            "--config".to_string(),
            self.config.to_string_lossy().to_string(),
            "--db".to_string(),
            self.db.to_string_lossy().to_string(),
        ]
    }
}

pub fn session(date: &str, time: &str, desc: &str, room: &str, officer: &str) -> RawSession {
    RawSession {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date"),
        start_time: time.to_string(),
        description: desc.to_string(),
        court_room: room.to_string(),
        officer_code: officer.to_string(),
    }
}

/// Week of Monday 2025-01-06: a jury trial block Monday to Wednesday, a
/// pre-trial block on Wednesday and one timed arraignment on Tuesday.
pub fn sample_week() -> Vec<RawSession> {
    vec![
        session("2025-01-06", "09:00:00", "SU CR JURY TRIALS", "101", "JSB"),
        session("2025-01-07", "09:00:00", "SU CR JURY TRIALS", "101", "JSB"),
        session("2025-01-08", "09:00:00", "SU CR JURY TRIALS", "101", "JSB"),
        session("2025-01-08", "13:30:00", "DI CR PRETRIAL CONFERENCE", "204", "MKL"),
        session("2025-01-07", "09:30:00", "(ABC) ARRAIGNMENTS", "105", "ARD"),
    ]
}
