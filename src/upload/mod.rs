//! Chunked file upload
//!
//! The upload protocol is keyed on the file's MD5: an init call registers
//! the task, chunks go up as multipart posts, and the server merges after
//! the final chunk. Interrupted uploads resume by skipping the chunk
//! indices the server already holds.

mod transfer;

pub use transfer::*;

use crate::error::{Error, Result};
use crate::resources::AuditStatus;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Server-side upload task state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

/// Server-side record of a chunked upload
#[derive(Debug, Deserialize)]
pub struct UploadTask {
    #[serde(default)]
    pub id: Option<i64>,

    pub file_md5: String,
    pub filename: String,
    pub total_chunks: u32,

    /// Indices the server has already received
    #[serde(default)]
    pub uploaded_chunks: Vec<u32>,

    pub status: TaskStatus,
}

/// Task state as reported by the status endpoint
#[derive(Debug, Deserialize)]
pub struct UploadStatus {
    #[serde(flatten)]
    pub task: UploadTask,

    #[serde(default)]
    pub progress: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub grade: Option<String>,
}

/// Final response once the server has merged all chunks
#[derive(Debug, Deserialize)]
pub struct UploadOutcome {
    #[serde(default)]
    pub message: String,

    pub resource_id: i64,

    #[serde(default)]
    pub resource_title: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub grade: String,

    pub audit_status: AuditStatus,
}

/// MD5 fingerprint and size of a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFingerprint {
    pub md5: String,
    pub size: u64,
}

/// Compute the streaming MD5 fingerprint of a file
pub fn fingerprint(path: &Path) -> Result<FileFingerprint> {
    use md5::{Digest, Md5};

    let file = fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 64 * 1024];
    let mut size = 0u64;

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        size += read as u64;
    }

    Ok(FileFingerprint {
        md5: format!("{:x}", hasher.finalize()),
        size,
    })
}

/// Number of chunks a file of `size` bytes splits into
pub fn chunk_count(size: u64, chunk_size: u64) -> u32 {
    size.div_ceil(chunk_size) as u32
}

/// Chunk indices not yet held by the server, in upload order
pub fn missing_chunks(total_chunks: u32, uploaded: &[u32]) -> Vec<u32> {
    let uploaded: HashSet<u32> = uploaded.iter().copied().collect();
    (0..total_chunks)
        .filter(|index| !uploaded.contains(index))
        .collect()
}

/// Read one chunk of the file
pub fn read_chunk(path: &Path, index: u32, chunk_size: u64) -> Result<Vec<u8>> {
    let mut file = fs::File::open(path)?;
    file.seek(SeekFrom::Start(u64::from(index) * chunk_size))?;

    let mut buffer = vec![0u8; chunk_size as usize];
    let mut filled = 0usize;
    while filled < buffer.len() {
        let read = file.read(&mut buffer[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    buffer.truncate(filled);

    if buffer.is_empty() {
        return Err(Error::InvalidInput(format!(
            "chunk {} is past the end of the file",
            index
        )));
    }
    Ok(buffer)
}
