//! Resource listing and recall tests

use edushare::api::ApiClient;
use edushare::config::ApiConfig;
use edushare::error::Error;
use edushare::nav::Navigator;
use edushare::resources::{self, AuditStatus, Page, Resource};
use edushare::session::{Session, SessionStore};

#[test]
fn test_audit_status_wire_values_round_trip() {
    let statuses = [
        (AuditStatus::Pending, "pending"),
        (AuditStatus::Approved, "approved"),
        (AuditStatus::Rejected, "rejected"),
        (AuditStatus::Removed, "removed"),
        (AuditStatus::RecallPending, "recall_pending"),
    ];

    for (status, wire) in statuses {
        assert_eq!(status.as_str(), wire);
        let parsed: AuditStatus =
            serde_json::from_str(&format!("\"{}\"", wire)).expect("Failed to parse status");
        assert_eq!(parsed, status);
    }
}

#[test]
fn test_listing_page_parses_real_shape() {
    let raw = r#"{
        "count": 3,
        "next": null,
        "previous": "http://127.0.0.1:8000/api/my-uploads/?page=1",
        "results": [
            {
                "id": 11,
                "title": "fractions.pdf",
                "file": "resources/4/ab12cd34_fractions.pdf",
                "md5": "5eb63bbbe01eeed093cb22bb8f5acdc3",
                "version": "V1.0",
                "school": "Springfield Elementary",
                "subject": "math",
                "grade": "grade-5",
                "audit_status": "recall_pending",
                "created_time": "2026-03-01T09:30:00Z"
            }
        ]
    }"#;

    let page: Page<Resource> = serde_json::from_str(raw).expect("Failed to parse page");
    assert_eq!(page.count, 3);
    assert!(page.next.is_none());
    assert_eq!(page.results[0].id, 11);
    assert_eq!(page.results[0].audit_status, AuditStatus::RecallPending);
    assert!(page.results[0].created_time.is_some());
}

#[tokio::test]
async fn test_recall_rejects_empty_reason_before_any_network_call() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = SessionStore::open(dir.path().join("session.toml"));
    store
        .commit(Session::new(
            "tok".to_string(),
            "a".to_string(),
            "1".to_string(),
        ))
        .expect("Failed to commit");
    let mut nav = Navigator::new();
    let client = ApiClient::new(&ApiConfig::default()).expect("Failed to build client");

    let result = resources::request_recall(&client, &mut store, &mut nav, 1, "   ").await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
