//! Downloads served from a directory on disk.

use std::sync::Arc;

use actix_web::test;
use file_bridge_lib::services::LocalFetcher;

use super::test_helpers::{RecordingObserver, create_test_app, default_settings, header};

fn library() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("reports")).unwrap();
    std::fs::write(dir.path().join("reports/q1.csv"), b"region,total\nwest,10\n").unwrap();
    dir
}

#[actix_web::test]
async fn test_serves_file_from_disk() {
    let dir = library();
    let app = create_test_app(
        Arc::new(LocalFetcher::new(dir.path())),
        Arc::new(RecordingObserver::default()),
        default_settings(),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/sftp/reports/q1.csv?fileName=q1.csv&contentType=text/csv")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(header(&resp, "Content-Length"), Some("21"));
    assert_eq!(header(&resp, "Content-Type"), Some("text/csv"));
    assert_eq!(test::read_body(resp).await, "region,total\nwest,10\n");
}

#[actix_web::test]
async fn test_missing_file_on_disk_is_404() {
    let dir = library();
    let app = create_test_app(
        Arc::new(LocalFetcher::new(dir.path())),
        Arc::new(RecordingObserver::default()),
        default_settings(),
    )
    .await;

    let req = test::TestRequest::get().uri("/sftp/reports/q2.csv").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
    assert_eq!(test::read_body(resp).await, "File not found: /reports/q2.csv");
}

#[actix_web::test]
async fn test_parent_traversal_is_refused() {
    let dir = library();
    let app = create_test_app(
        Arc::new(LocalFetcher::new(dir.path().join("reports"))),
        Arc::new(RecordingObserver::default()),
        default_settings(),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/sftp/..%2Freports%2Fq1.csv")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 500);
}
