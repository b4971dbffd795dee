//! Upload transfer flow: init, chunk posts, resume, status

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::nav::Navigator;
use crate::session::SessionStore;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

use super::{
    chunk_count, fingerprint, missing_chunks, read_chunk, TaskStatus, UploadOutcome, UploadStatus,
    UploadTask,
};

const INIT_PATH: &str = "/api/chunk-upload/init/";
const CHUNK_PATH: &str = "/api/chunk-upload/";
const STATUS_PATH: &str = "/api/chunk-upload/status/";

/// Response to a single chunk post: the final chunk yields the merged
/// resource, earlier ones a progress record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChunkResponse {
    Completed(UploadOutcome),
    Progress(ChunkProgress),
}

#[derive(Debug, Deserialize)]
struct ChunkProgress {
    #[serde(default)]
    message: String,

    chunk_index: u32,

    #[serde(default)]
    progress: Option<String>,
}

/// Upload a file in chunks, resuming any chunks the server already holds.
///
/// `on_chunk(done, total)` is called after every chunk the server
/// acknowledges, including chunks skipped on resume.
pub async fn upload_file(
    client: &ApiClient,
    store: &mut SessionStore,
    nav: &mut Navigator,
    config: &Config,
    path: &Path,
    subject: &str,
    grade: &str,
    mut on_chunk: impl FnMut(u32, u32),
) -> Result<UploadOutcome> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidInput(format!("invalid file name: {}", path.display())))?
        .to_string();

    let chunk_size = config.chunk_size();
    let fp = fingerprint(path)?;
    if fp.size == 0 {
        return Err(Error::InvalidInput(
            "cannot upload an empty file".to_string(),
        ));
    }

    let total_chunks = chunk_count(fp.size, chunk_size);
    tracing::debug!(
        "Uploading '{}' ({} bytes, {} chunks, md5 {})",
        filename,
        fp.size,
        total_chunks,
        fp.md5
    );

    let init = serde_json::json!({
        "file_md5": fp.md5,
        "filename": filename,
        "total_chunks": total_chunks,
        "subject": subject,
        "grade": grade,
    });
    let task: UploadTask = client.post_json(INIT_PATH, &init, store, nav).await?;

    let pending = missing_chunks(task.total_chunks, &task.uploaded_chunks);
    let mut done = task.total_chunks - pending.len() as u32;
    if done > 0 {
        tracing::info!("Resuming upload, {} chunks already on the server", done);
        on_chunk(done, task.total_chunks);
    }

    let mut outcome = None;
    for index in pending {
        let bytes = read_chunk(path, index, chunk_size)?;
        let form = Form::new()
            .text("file_md5", fp.md5.clone())
            .text("chunk_index", index.to_string())
            .part(
                "chunk_file",
                Part::bytes(bytes).file_name(format!("chunk_{}", index)),
            );

        let response: ChunkResponse = client.post_multipart(CHUNK_PATH, form, store, nav).await?;
        done += 1;
        on_chunk(done, task.total_chunks);

        match response {
            ChunkResponse::Completed(merged) => {
                outcome = Some(merged);
            }
            ChunkResponse::Progress(progress) => {
                tracing::debug!(
                    "Chunk {} accepted ({}): {}",
                    progress.chunk_index,
                    progress.progress.as_deref().unwrap_or("-"),
                    progress.message
                );
            }
        }
    }

    outcome.ok_or_else(|| {
        Error::Other(format!(
            "upload of '{}' did not complete; check 'edushare status'",
            filename
        ))
    })
}

/// Query the server-side state of an upload task by file fingerprint
pub async fn query_status(
    client: &ApiClient,
    store: &mut SessionStore,
    nav: &mut Navigator,
    file_md5: &str,
) -> Result<UploadStatus> {
    let query = [("file_md5", file_md5.to_string())];
    client.get_json(STATUS_PATH, &query, store, nav).await
}

/// True once the server has merged the task into a resource
pub fn is_complete(status: &UploadStatus) -> bool {
    status.task.status == TaskStatus::Completed
}
