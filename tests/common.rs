#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rdose::db::initialize::init_db;
use rdose::db::pool::DbPool;
use rdose::models::time_of_day::TimeOfDay;
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with its config directory redirected to a temp dir so the
/// user's real configuration is never read or written.
pub fn rdo(name: &str) -> Command {
    let mut cfg_dir: PathBuf = env::temp_dir();
    cfg_dir.push(format!("{}_rdose_cfg", name));

    let mut cmd = cargo_bin_cmd!("rdose");
    cmd.env("RDOSE_CONFIG_DIR", cfg_dir).env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdose.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// `rdose --test init` on a fresh database.
pub fn init_cli_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    rdo(name)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// In-memory database with the full schema.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

pub fn t(h: u32, m: u32) -> TimeOfDay {
    TimeOfDay::new(h, m).expect("valid time")
}

pub fn dt(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(h, min, 0).expect("valid datetime")
}
