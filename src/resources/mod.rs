//! Personal resource list and recall applications

use crate::api::{string_or_number, ApiClient};
use crate::error::{Error, Result};
use crate::nav::Navigator;
use crate::session::SessionStore;
use serde::{Deserialize, Serialize};
use std::fmt;

const MY_UPLOADS_PATH: &str = "/api/my-uploads/";

/// Audit lifecycle of an uploaded resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Pending,
    Approved,
    Rejected,
    Removed,
    RecallPending,
}

impl AuditStatus {
    /// Wire value used in query strings and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Pending => "pending",
            AuditStatus::Approved => "approved",
            AuditStatus::Rejected => "rejected",
            AuditStatus::Removed => "removed",
            AuditStatus::RecallPending => "recall_pending",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resource record as returned by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub title: String,

    #[serde(default)]
    pub file: Option<String>,

    #[serde(default)]
    pub md5: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub school: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub grade: String,

    pub audit_status: AuditStatus,

    #[serde(default)]
    pub created_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Page-number pagination envelope used by the listing endpoint
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    pub results: Vec<T>,
}

/// Acknowledgement of a recall application
#[derive(Debug, Deserialize)]
pub struct RecallReceipt {
    #[serde(default)]
    pub message: String,

    #[serde(deserialize_with = "string_or_number")]
    pub resource_id: String,

    pub status: AuditStatus,
}

/// Fetch one page of the caller's uploaded resources, newest first,
/// optionally filtered by audit status.
pub async fn list_my_uploads(
    client: &ApiClient,
    store: &mut SessionStore,
    nav: &mut Navigator,
    status: Option<AuditStatus>,
    page: Option<u32>,
) -> Result<Page<Resource>> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(status) = status {
        query.push(("status", status.as_str().to_string()));
    }
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }

    client.get_json(MY_UPLOADS_PATH, &query, store, nav).await
}

/// Submit a recall application for one of the caller's resources.
///
/// The reason must be non-empty; only approved resources qualify, which
/// the server enforces and the caller can pre-check from the listing.
pub async fn request_recall(
    client: &ApiClient,
    store: &mut SessionStore,
    nav: &mut Navigator,
    resource_id: i64,
    reason: &str,
) -> Result<RecallReceipt> {
    if reason.trim().is_empty() {
        return Err(Error::InvalidInput(
            "a recall application needs a reason".to_string(),
        ));
    }

    let path = format!("/api/resources/{}/recall/", resource_id);
    let body = serde_json::json!({ "reason": reason });
    client.post_json(&path, &body, store, nav).await
}

/// Locate a single resource by id by paging the caller's uploads.
/// The backend exposes no single-resource endpoint.
pub async fn find_resource(
    client: &ApiClient,
    store: &mut SessionStore,
    nav: &mut Navigator,
    resource_id: i64,
) -> Result<Resource> {
    let mut page = 1u32;
    loop {
        let listing = list_my_uploads(client, store, nav, None, Some(page)).await?;
        if let Some(resource) = listing.results.into_iter().find(|r| r.id == resource_id) {
            return Ok(resource);
        }
        if listing.next.is_none() {
            return Err(Error::ResourceNotFound(resource_id));
        }
        page += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_status_wire_values() {
        assert_eq!(AuditStatus::Pending.as_str(), "pending");
        assert_eq!(AuditStatus::RecallPending.as_str(), "recall_pending");

        let parsed: AuditStatus =
            serde_json::from_str("\"recall_pending\"").expect("Failed to parse status");
        assert_eq!(parsed, AuditStatus::RecallPending);
    }

    #[test]
    fn test_page_envelope_parses() {
        let raw = r#"{
            "count": 2,
            "next": "http://127.0.0.1:8000/api/my-uploads/?page=2",
            "previous": null,
            "results": [
                {"id": 1, "title": "algebra.pdf", "audit_status": "approved"},
                {"id": 2, "title": "geometry.pdf", "audit_status": "pending"}
            ]
        }"#;
        let page: Page<Resource> = serde_json::from_str(raw).expect("Failed to parse page");
        assert_eq!(page.count, 2);
        assert!(page.next.is_some());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].audit_status, AuditStatus::Approved);
    }
}
