#![allow(dead_code)]

use aupostcode_core::db::open_db;
use aupostcode_core::{PostcodeRecord, PostcodeRepository, SqlitePostcodeRepository};
use std::path::{Path, PathBuf};

pub fn sample_records() -> Vec<PostcodeRecord> {
    vec![
        PostcodeRecord::new("SPRINGVALE", "VIC", "3171"),
        PostcodeRecord::new("ALICE SPRINGS", "NT", "0870"),
        PostcodeRecord::new("WILLOW SPRINGS", "SA", "5434"),
        PostcodeRecord::new("DARWIN", "NT", "0800"),
        PostcodeRecord::new("SPRINGVALE SOUTH", "VIC", "3172"),
        PostcodeRecord::new("O'CONNOR", "ACT", "2602"),
        PostcodeRecord::new("ALICE SPRINGS", "NT", "0871"),
    ]
}

/// Creates a migrated SQLite file seeded with `records` and returns its path.
pub fn seed_db(dir: &Path, records: &[PostcodeRecord]) -> PathBuf {
    let path = dir.join("postcodes.sqlite3");
    let mut conn = open_db(&path).unwrap();
    SqlitePostcodeRepository::new(&mut conn)
        .replace_all(records)
        .unwrap();
    path
}
