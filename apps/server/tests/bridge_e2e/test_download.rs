//! Successful downloads through the full app.

use std::sync::Arc;

use actix_web::test;
use file_bridge_lib::config::BridgeSettings;

use super::test_helpers::{
    RecordingObserver, StubBehavior, StubFetcher, create_test_app, default_settings, header,
    payload,
};

#[actix_web::test]
async fn test_end_to_end_csv_download() {
    let stub = Arc::new(
        StubFetcher::new().with("/reports/q1.csv", StubBehavior::Serve { len: 1234, chunk: 100 }),
    );
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub.clone(), observer.clone(), default_settings()).await;

    let req = test::TestRequest::get()
        .uri("/sftp/reports/q1.csv?fileName=q1.csv&contentType=text/csv")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        header(&resp, "Content-Disposition"),
        Some("attachment; filename=\"q1.csv\"")
    );
    assert_eq!(header(&resp, "Content-Type"), Some("text/csv"));
    assert_eq!(header(&resp, "Content-Length"), Some("1234"));

    let body = test::read_body(resp).await;
    assert_eq!(body.to_vec(), payload(1234));
    assert_eq!(stub.calls(), vec!["/reports/q1.csv".to_string()]);
    assert_eq!(
        *observer.completed.lock().unwrap(),
        vec![("/reports/q1.csv".to_string(), 1234)]
    );
}

#[actix_web::test]
async fn test_headers_omitted_without_parameters() {
    let stub =
        Arc::new(StubFetcher::new().with("/a.txt", StubBehavior::Serve { len: 5, chunk: 5 }));
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub, observer, default_settings()).await;

    let req = test::TestRequest::get().uri("/sftp/a.txt").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(header(&resp, "Content-Disposition").is_none());
    assert!(header(&resp, "Content-Type").is_none());
    assert_eq!(header(&resp, "Content-Length"), Some("5"));
}

#[actix_web::test]
async fn test_parameter_order_does_not_matter() {
    let stub =
        Arc::new(StubFetcher::new().with("/a.txt", StubBehavior::Serve { len: 5, chunk: 5 }));
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub, observer, default_settings()).await;

    let req = test::TestRequest::get()
        .uri("/sftp/a.txt?contentType=text/plain&extra=1&fileName=report.csv")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        header(&resp, "Content-Disposition"),
        Some("attachment; filename=\"report.csv\"")
    );
    assert_eq!(header(&resp, "Content-Type"), Some("text/plain"));
}

#[actix_web::test]
async fn test_empty_file_has_zero_length() {
    let stub =
        Arc::new(StubFetcher::new().with("/empty.txt", StubBehavior::Serve { len: 0, chunk: 1 }));
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub, observer, default_settings()).await;

    let req = test::TestRequest::get().uri("/sftp/empty.txt").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(header(&resp, "Content-Length"), Some("0"));
    assert!(test::read_body(resp).await.is_empty());
}

#[actix_web::test]
async fn test_many_small_writes_are_counted_exactly() {
    let len = 60_000;
    let stub = Arc::new(
        StubFetcher::new().with("/chunks.bin", StubBehavior::Serve { len, chunk: 7 }),
    );
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub, observer, default_settings()).await;

    let req = test::TestRequest::get().uri("/sftp/chunks.bin").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(header(&resp, "Content-Length"), Some("60000"));
    assert_eq!(test::read_body(resp).await.to_vec(), payload(len));
}

#[actix_web::test]
async fn test_large_file_streams_without_length() {
    let len = 4 * 1024 * 1024;
    let stub = Arc::new(
        StubFetcher::new().with("/big.iso", StubBehavior::Serve { len, chunk: 4096 }),
    );
    let observer = Arc::new(RecordingObserver::default());
    let settings = BridgeSettings {
        response_buffer_size: 16 * 1024,
        channel_capacity: 2,
    };
    let app = create_test_app(stub, observer.clone(), settings).await;

    let req = test::TestRequest::get()
        .uri("/sftp/big.iso?fileName=big.iso")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        header(&resp, "Content-Disposition"),
        Some("attachment; filename=\"big.iso\"")
    );
    // Committed before the transfer finished, so no length could be sent.
    assert!(header(&resp, "Content-Length").is_none());

    let body = test::read_body(resp).await;
    assert_eq!(body.len(), len);
    assert_eq!(
        *observer.completed.lock().unwrap(),
        vec![("/big.iso".to_string(), len as u64)]
    );
}

#[actix_web::test]
async fn test_encoded_path_is_decoded_for_backend() {
    let stub = Arc::new(
        StubFetcher::new().with("/my dir/a b.txt", StubBehavior::Serve { len: 3, chunk: 3 }),
    );
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub.clone(), observer, default_settings()).await;

    let req = test::TestRequest::get()
        .uri("/sftp/my%20dir/a%20b.txt")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(stub.calls(), vec!["/my dir/a b.txt".to_string()]);
}

#[actix_web::test]
async fn test_malformed_forwarded_host_does_not_break_download() {
    let stub =
        Arc::new(StubFetcher::new().with("/a.txt", StubBehavior::Serve { len: 5, chunk: 5 }));
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub.clone(), observer, default_settings()).await;

    let req = test::TestRequest::get()
        .uri("/sftp/a.txt")
        .insert_header(("X-Forwarded-Host", "a b"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(header(&resp, "Content-Length"), Some("5"));
    assert_eq!(stub.calls(), vec!["/a.txt".to_string()]);
}

#[actix_web::test]
async fn test_prefix_below_api_scope_reaches_backend() {
    let stub =
        Arc::new(StubFetcher::new().with("/x.txt", StubBehavior::Serve { len: 3, chunk: 3 }));
    let observer = Arc::new(RecordingObserver::default());
    let app = create_test_app(stub.clone(), observer, default_settings()).await;

    let req = test::TestRequest::get().uri("/api/v1/sftp/x.txt").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(test::read_body(resp).await.to_vec(), payload(3));
    assert_eq!(stub.calls(), vec!["/x.txt".to_string()]);
}
