//! CLI interface for edushare

pub mod commands;
mod output;

pub use output::*;

use crate::resources::AuditStatus;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edushare")]
#[command(version = "1.0.0")]
#[command(about = "Share and manage teaching resources", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new edushare.toml configuration file
    Init,

    /// Log in to the platform
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Register a new account (pending school review)
    Register {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// School name (prompted when omitted)
        #[arg(long)]
        school: Option<String>,

        /// Teaching subject (prompted when omitted)
        #[arg(long)]
        subject: Option<String>,

        /// Path or reference to supporting audit material
        #[arg(long)]
        audit_material: Option<String>,
    },

    /// Show the current session
    Whoami,

    /// Upload a file in chunks (resumes interrupted uploads)
    Upload {
        /// The file to upload
        file: PathBuf,

        /// Subject the resource belongs to
        #[arg(short, long)]
        subject: Option<String>,

        /// Grade the resource targets
        #[arg(short, long)]
        grade: Option<String>,
    },

    /// List your uploaded resources
    Uploads {
        /// Filter by audit status
        #[arg(short, long)]
        status: Option<StatusFilter>,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the server-side status of an upload
    Status {
        /// A local file path or the file's MD5 fingerprint
        target: String,
    },

    /// Apply to recall one of your approved resources
    Recall {
        /// Resource id
        id: i64,

        /// Reason for the recall application (prompted when omitted)
        #[arg(short, long)]
        reason: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show one of your resources
    Show {
        /// Resource id
        id: i64,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Audit-status filter accepted by the listing command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
    Removed,
    RecallPending,
}

impl From<StatusFilter> for AuditStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Pending => AuditStatus::Pending,
            StatusFilter::Approved => AuditStatus::Approved,
            StatusFilter::Rejected => AuditStatus::Rejected,
            StatusFilter::Removed => AuditStatus::Removed,
            StatusFilter::RecallPending => AuditStatus::RecallPending,
        }
    }
}
