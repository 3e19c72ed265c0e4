use aupostcode_core::db::open_db;
use aupostcode_core::{
    import_feed_file, ImportError, PostcodeRecord, PostcodeRepository, SqlitePostcodeRepository,
};

const FEED: &str = r#"[
    {"id": 1, "postcode": "0870", "locality": "ALICE SPRINGS", "state": "NT", "long": 133.88, "lat": -23.7},
    {"id": 2, "postcode": 3171, "locality": "SPRINGVALE", "state": "VIC", "long": 145.15, "lat": -37.95},
    {"id": 3, "postcode": "0800", "locality": "DARWIN", "state": "NT"}
]"#;

#[test]
fn import_replaces_table_contents_from_feed() {
    let dir = tempfile::tempdir().unwrap();
    let feed_path = dir.path().join("australian_postcodes.json");
    std::fs::write(&feed_path, FEED).unwrap();
    let mut conn = open_db(dir.path().join("postcodes.sqlite3")).unwrap();

    assert_eq!(import_feed_file(&mut conn, &feed_path).unwrap(), 3);
    assert_eq!(import_feed_file(&mut conn, &feed_path).unwrap(), 3);

    let repo = SqlitePostcodeRepository::new(&mut conn);
    assert_eq!(repo.count().unwrap(), 3);
    assert_eq!(
        repo.list_ordered().unwrap()[0],
        PostcodeRecord::new("ALICE SPRINGS", "NT", "0870")
    );
}

#[test]
fn missing_feed_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut conn = open_db(dir.path().join("postcodes.sqlite3")).unwrap();

    let err = import_feed_file(&mut conn, dir.path().join("missing.json")).unwrap_err();

    assert!(matches!(err, ImportError::Io(_)));
}

#[test]
fn feed_with_blank_state_is_rejected_without_touching_rows() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    std::fs::write(&good, FEED).unwrap();
    std::fs::write(
        &bad,
        r#"[{"postcode": "3171", "locality": "SPRINGVALE", "state": ""}]"#,
    )
    .unwrap();
    let mut conn = open_db(dir.path().join("postcodes.sqlite3")).unwrap();
    import_feed_file(&mut conn, &good).unwrap();

    let err = import_feed_file(&mut conn, &bad).unwrap_err();

    assert!(matches!(
        err,
        ImportError::Validation { index: 0, .. }
    ));
    assert_eq!(SqlitePostcodeRepository::new(&mut conn).count().unwrap(), 3);
}
