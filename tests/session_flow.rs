//! End-to-end search → review → commit against a sheet file.

use company_search::grid::SheetFile;
use company_search::model::types::{CellStyle, CellValue, SessionState};
use company_search::session::{SearchOutcome, SearchSession};
use tempfile::TempDir;

mod util;

use util::{TestTracing, read_sheet, sheet_path, test_config, write_sheet};

#[tokio::test]
async fn tech_search_skips_known_companies_and_commits_the_rest() {
    let dir = TempDir::new().unwrap();
    let path = sheet_path(&dir);
    write_sheet(&path, vec!["Microsoft".into(), "Apple".into()]);

    let mut session = SearchSession::new(SheetFile::new(&path), test_config());
    let outcome = session.search("tech companies", 5, None).await.unwrap();

    assert_eq!(outcome, SearchOutcome::Found(3));
    assert_eq!(session.state(), SessionState::ResultsReady);
    assert_eq!(
        session.snapshot().results,
        vec!["Google LLC", "Amazon.com Inc.", "Meta Platforms Inc."]
    );
    // Nothing is written before commit.
    assert_eq!(read_sheet(&path).rows.len(), 2);

    assert_eq!(session.commit().await.unwrap(), 3);
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.results().is_empty());

    let doc = read_sheet(&path);
    let values: Vec<_> = doc.rows.iter().map(|r| r.value.clone()).collect();
    assert_eq!(
        values,
        vec![
            CellValue::from("Microsoft"),
            CellValue::from("Apple"),
            CellValue::from("Google LLC"),
            CellValue::from("Amazon.com Inc."),
            CellValue::from("Meta Platforms Inc."),
        ]
    );
    assert!(doc.rows[..2].iter().all(|r| r.style.is_none()));
    assert!(
        doc.rows[2..]
            .iter()
            .all(|r| r.style.as_ref() == Some(&CellStyle::default()))
    );
}

#[tokio::test]
async fn second_search_sees_committed_rows() {
    let dir = TempDir::new().unwrap();
    let path = sheet_path(&dir);

    let mut session = SearchSession::new(SheetFile::new(&path), test_config());
    session.search("medical devices", 4, None).await.unwrap();
    session.commit().await.unwrap();

    let outcome = session.search("pharma", 4, None).await.unwrap();
    assert_eq!(outcome, SearchOutcome::NoNewResults);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.existing_names().len(), 4);

    let outcome = session.search("pharma", 6, None).await.unwrap();
    assert_eq!(outcome, SearchOutcome::Found(2));
    assert_eq!(
        session.snapshot().results,
        vec!["Abbott Laboratories", "Medtronic plc"]
    );
}

#[tokio::test]
async fn non_text_cells_still_count_toward_the_append_row() {
    let dir = TempDir::new().unwrap();
    let path = sheet_path(&dir);
    write_sheet(
        &path,
        vec![
            "Name".into(),
            CellValue::Number(2024.0),
            CellValue::Empty,
            "Nike".into(),
        ],
    );

    let mut session = SearchSession::new(SheetFile::new(&path), test_config());
    session.search("consumer brands", 10, None).await.unwrap();
    assert_eq!(session.existing_names(), ["name", "nike"]);
    // "Nike Inc." is dropped; the other nine retail names remain.
    assert_eq!(session.results().len(), 9);

    session.commit().await.unwrap();
    let doc = read_sheet(&path);
    assert_eq!(doc.rows.len(), 13);
    assert_eq!(doc.rows[4].value, CellValue::from("Walmart Inc."));
}

#[tokio::test]
async fn trailing_blank_rows_are_reused_on_commit() {
    let dir = TempDir::new().unwrap();
    let path = sheet_path(&dir);
    write_sheet(
        &path,
        vec!["Name".into(), "Nike".into(), CellValue::Empty, CellValue::Empty],
    );

    let mut session = SearchSession::new(SheetFile::new(&path), test_config());
    session.search("retail", 2, None).await.unwrap();
    session.commit().await.unwrap();

    let doc = read_sheet(&path);
    assert_eq!(doc.rows.len(), 4);
    assert_eq!(doc.rows[2].value, CellValue::from("Walmart Inc."));
    assert_eq!(doc.rows[3].value, CellValue::from("Target Corporation"));
}

#[tokio::test]
async fn corrupt_sheet_surfaces_as_session_error() {
    let dir = TempDir::new().unwrap();
    let path = sheet_path(&dir);
    std::fs::write(&path, "not json at all").unwrap();

    let mut session = SearchSession::new(SheetFile::new(&path), test_config());
    let err = session.search("tech", 3, None).await.unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));
    assert_eq!(session.state(), SessionState::Error);

    session.dismiss_error();
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn search_logs_its_progress() {
    let tracing = TestTracing::new();
    let _guard = tracing.install();

    let dir = TempDir::new().unwrap();
    let mut session = SearchSession::new(SheetFile::new(sheet_path(&dir)), test_config());
    session.search("banks", 2, None).await.unwrap();

    tracing.assert_contains("source selected");
    tracing.assert_contains("fallback category selected");
    tracing.assert_contains("search finished");
}
