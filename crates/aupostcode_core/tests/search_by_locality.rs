mod common;

use aupostcode_core::{PostcodePool, PostcodeRecord, PostcodeService, SqlitePostcodeSource};
use std::sync::Arc;

fn loaded_service(records: &[PostcodeRecord]) -> (tempfile::TempDir, PostcodeService) {
    let dir = tempfile::tempdir().unwrap();
    let path = common::seed_db(dir.path(), records);
    let pool = Arc::new(PostcodePool::new(SqlitePostcodeSource::new(path)));
    pool.load(false).unwrap();
    (dir, PostcodeService::new(pool))
}

#[test]
fn too_short_term_is_rejected() {
    let (_dir, service) = loaded_service(&common::sample_records());

    let envelope = service.search_by_locality("Sp");

    assert_eq!(envelope.status.code, 400);
    assert_eq!(envelope.status.text, "Must have at least 3 characters: 'Sp'");
    assert!(envelope.data.is_none());
}

#[test]
fn empty_term_is_rejected_as_too_short() {
    let (_dir, service) = loaded_service(&common::sample_records());

    let envelope = service.search_by_locality("");

    assert_eq!(envelope.status.code, 400);
    assert_eq!(envelope.status.text, "Must have at least 3 characters: ''");
}

#[test]
fn invalid_characters_are_rejected_regardless_of_length() {
    let (_dir, service) = loaded_service(&common::sample_records());

    let envelope = service.search_by_locality("%^& Spring");

    assert_eq!(envelope.status.code, 400);
    assert_eq!(
        envelope.status.text,
        "'%^& Spring' is invalid. Accept only letters, space, hyphen and single quote characters."
    );

    for term in ["0870", "Springvale 3171", "Spring;drop"] {
        assert_eq!(service.search_by_locality(term).status.code, 400, "{term}");
    }
}

#[test]
fn unmatched_term_returns_not_found() {
    let (_dir, service) = loaded_service(&common::sample_records());

    let envelope = service.search_by_locality("xyz");

    assert_eq!(envelope.status.code, 404);
    assert_eq!(envelope.status.text, "No localities matched 'xyz'");
    assert!(envelope.data.is_none());
}

#[test]
fn partial_match_is_case_insensitive_and_keeps_pool_order() {
    let (_dir, service) = loaded_service(&common::sample_records());

    let envelope = service.search_by_locality("spring");

    assert_eq!(envelope.status.code, 200);
    assert_eq!(envelope.status.text, "");
    assert_eq!(
        envelope.localities_or_empty(),
        &[
            PostcodeRecord::new("ALICE SPRINGS", "NT", "0870"),
            PostcodeRecord::new("ALICE SPRINGS", "NT", "0871"),
            PostcodeRecord::new("SPRINGVALE", "VIC", "3171"),
            PostcodeRecord::new("SPRINGVALE SOUTH", "VIC", "3172"),
            PostcodeRecord::new("WILLOW SPRINGS", "SA", "5434"),
        ]
    );
}

#[test]
fn longer_partial_term_narrows_results() {
    let (_dir, service) = loaded_service(&common::sample_records());

    let envelope = service.search_by_locality("springva");

    assert!(envelope.is_ok());
    assert!(envelope
        .localities_or_empty()
        .contains(&PostcodeRecord::new("SPRINGVALE", "VIC", "3171")));
    assert!(envelope
        .localities_or_empty()
        .iter()
        .all(|record| record.locality.contains("SPRINGVA")));
}

#[test]
fn apostrophe_terms_match_and_quote_in_messages() {
    let (_dir, service) = loaded_service(&common::sample_records());

    let found = service.search_by_locality("o'con");
    assert_eq!(
        found.localities_or_empty(),
        &[PostcodeRecord::new("O'CONNOR", "ACT", "2602")]
    );

    let missing = service.search_by_locality("d'arcy");
    assert_eq!(missing.status.code, 404);
    assert_eq!(missing.status.text, "No localities matched \"d'arcy\"");
}

#[test]
fn matches_are_rendered_in_uppercase() {
    let (_dir, service) = loaded_service(&[PostcodeRecord::new("Springvale", "vic", "3171")]);

    let envelope = service.search_by_locality("SPRING");

    assert_eq!(
        envelope.localities_or_empty(),
        &[PostcodeRecord::new("SPRINGVALE", "VIC", "3171")]
    );
}

#[test]
fn unloaded_pool_answers_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let pool = Arc::new(PostcodePool::new(SqlitePostcodeSource::new(
        dir.path().join("missing.sqlite3"),
    )));
    assert!(pool.load(false).is_err());
    let service = PostcodeService::new(pool);

    let envelope = service.search_by_locality("spring");

    assert_eq!(envelope.status.code, 404);
}

#[test]
fn every_returned_field_is_non_empty() {
    let (_dir, service) = loaded_service(&common::sample_records());

    for record in service.search_by_locality("ali").localities_or_empty() {
        assert!(!record.locality.is_empty());
        assert!(!record.state.is_empty());
        assert!(!record.postcode.is_empty());
    }
}
