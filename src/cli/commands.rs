//! CLI command implementations

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::ApiClient;
use crate::auth::{self, Credentials, RegisterRequest};
use crate::cli::{
    confirm, error, info, print_resource_detail, print_resource_table, success, warn,
    OutputFormat, StatusFilter,
};
use crate::config::{self, Config};
use crate::error::Error;
use crate::nav::{Navigation, Navigator, Route};
use crate::resources;
use crate::session::SessionStore;
use crate::upload;

/// Everything a command needs: configuration, the API client, the session
/// store, and the navigator. Owned here and passed down explicitly.
struct App {
    config: Config,
    client: ApiClient,
    store: SessionStore,
    nav: Navigator,
}

fn open_app() -> Result<App> {
    let config = config::load_config()?;
    let client = ApiClient::new(&config.api)?;
    let store = SessionStore::open(config.session_file());
    Ok(App {
        config,
        client,
        store,
        nav: Navigator::new(),
    })
}

impl App {
    /// Run the route guard for the route backing a command
    fn enter(&mut self, route: Route) -> Result<()> {
        match self.nav.navigate(route, self.store.session()) {
            Navigation::Allowed { .. } => Ok(()),
            Navigation::Redirected { from, to } => {
                warn(&format!("{} requires login. Redirected to {}", from, to));
                info("Log in with 'edushare login'");
                Err(Error::LoginRequired.into())
            }
        }
    }
}

/// Initialize a new edushare.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new("edushare.toml");

    if config_path.exists() {
        warn("edushare.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created edushare.toml");
    info("Edit the configuration file and run 'edushare login' to get started");

    Ok(())
}

/// Log in and persist the session
pub async fn login(username: Option<String>) -> Result<()> {
    let mut app = open_app()?;
    app.enter(Route::Login)?;

    let theme = ColorfulTheme::default();
    let username = match username {
        Some(name) => name,
        None => Input::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    let credentials = Credentials { username, password };

    match auth::login(&app.client, &mut app.store, &mut app.nav, &credentials).await {
        Ok(session) => {
            success(&format!("Logged in as '{}'", session.username));
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            Err(e.into())
        }
    }
}

/// Log out and forget the stored session
pub async fn logout() -> Result<()> {
    let mut app = open_app()?;

    if !app.store.is_logged_in() {
        info("Not logged in");
        return Ok(());
    }

    auth::logout(&mut app.store)?;
    success("Logged out");
    Ok(())
}

/// Register a new account
pub async fn register(
    username: Option<String>,
    school: Option<String>,
    subject: Option<String>,
    audit_material: Option<String>,
) -> Result<()> {
    let mut app = open_app()?;
    app.enter(Route::Register)?;

    let theme = ColorfulTheme::default();
    let username = match username {
        Some(name) => name,
        None => Input::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    let school = match school {
        Some(school) => school,
        None => Input::with_theme(&theme)
            .with_prompt("School")
            .interact_text()?,
    };
    let subject = match subject {
        Some(subject) => subject,
        None => Input::with_theme(&theme)
            .with_prompt("Subject")
            .interact_text()?,
    };
    let audit_material = match audit_material {
        Some(material) => material,
        None => Input::with_theme(&theme)
            .with_prompt("Audit material (path or reference)")
            .interact_text()?,
    };

    let request = RegisterRequest {
        username,
        password: password.clone(),
        password_confirm: password,
        school,
        subject,
        audit_material,
    };

    match auth::register(&app.client, &mut app.store, &mut app.nav, &request).await {
        Ok(data) => {
            success(&format!(
                "Registered '{}'. The account is pending school review",
                data.username
            ));
            Ok(())
        }
        Err(e) => {
            error(&format!("Registration failed: {}", e));
            Err(e.into())
        }
    }
}

/// Show the current session
pub async fn whoami() -> Result<()> {
    let app = open_app()?;

    if app.store.is_logged_in() {
        let session = app.store.session();
        println!("{} (user id {})", session.username, session.user_id);
        info(&format!("Session stored at {}", app.store.path().display()));
    } else {
        info("Not logged in");
    }

    Ok(())
}

/// Upload a file in chunks, resuming when the server already holds some
pub async fn upload(file: PathBuf, subject: Option<String>, grade: Option<String>) -> Result<()> {
    let mut app = open_app()?;
    app.enter(Route::Upload)?;

    let subject = subject.unwrap_or_else(|| app.config.upload.default_subject.clone());
    let grade = grade.unwrap_or_else(|| app.config.upload.default_grade.clone());

    info(&format!("Uploading {}", file.display()));

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} chunks")
            .unwrap(),
    );

    let outcome = upload::upload_file(
        &app.client,
        &mut app.store,
        &mut app.nav,
        &app.config,
        &file,
        &subject,
        &grade,
        |done, total| {
            bar.set_length(u64::from(total));
            bar.set_position(u64::from(done));
        },
    )
    .await;
    bar.finish_and_clear();

    match outcome {
        Ok(merged) => {
            success(&format!(
                "Upload complete: resource {} ('{}'), status {}",
                merged.resource_id, merged.resource_title, merged.audit_status
            ));
            Ok(())
        }
        Err(e) => {
            error(&format!("Upload failed: {}", e));
            Err(e.into())
        }
    }
}

/// List the caller's uploaded resources
pub async fn uploads(
    status: Option<StatusFilter>,
    page: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let mut app = open_app()?;
    app.enter(Route::MyUploads)?;

    let listing = resources::list_my_uploads(
        &app.client,
        &mut app.store,
        &mut app.nav,
        status.map(Into::into),
        page,
    )
    .await?;

    match format {
        OutputFormat::Table => {
            print_resource_table(&listing);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&listing.results)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&listing.results)?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// Show the server-side status of an upload task
pub async fn status(target: String) -> Result<()> {
    let mut app = open_app()?;
    app.enter(Route::Upload)?;

    let file_md5 = resolve_fingerprint(&target)?;
    let report = upload::query_status(&app.client, &mut app.store, &mut app.nav, &file_md5).await?;

    println!("{}", report.task.filename);
    info(&format!(
        "Chunks on server: {}/{}",
        report.task.uploaded_chunks.len(),
        report.task.total_chunks
    ));
    if let Some(progress) = &report.progress {
        info(&format!("Progress: {}", progress));
    }
    if upload::is_complete(&report) {
        success("Upload complete");
    } else {
        info("Upload incomplete. Run 'edushare upload' again to resume");
    }

    Ok(())
}

/// Apply to recall an approved resource
pub async fn recall(id: i64, reason: Option<String>, yes: bool) -> Result<()> {
    let mut app = open_app()?;
    app.enter(Route::ResourceDetail(id))?;

    let reason = match reason {
        Some(reason) => reason,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Reason for the recall application")
            .interact_text()?,
    };

    if !yes && !confirm(&format!("Submit a recall application for resource {}?", id)) {
        info("Cancelled");
        return Ok(());
    }

    match resources::request_recall(&app.client, &mut app.store, &mut app.nav, id, &reason).await {
        Ok(receipt) => {
            success(&format!(
                "Recall application submitted, resource {} is now {}",
                receipt.resource_id, receipt.status
            ));
            Ok(())
        }
        Err(e) => {
            error(&format!("Recall application failed: {}", e));
            Err(e.into())
        }
    }
}

/// Show one of the caller's resources
pub async fn show(id: i64, format: OutputFormat) -> Result<()> {
    let mut app = open_app()?;
    app.enter(Route::ResourceDetail(id))?;

    let resource = resources::find_resource(&app.client, &mut app.store, &mut app.nav, id).await?;

    match format {
        OutputFormat::Table => {
            print_resource_detail(&resource);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&resource)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&resource)?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// Accept either a local file (fingerprinted on the spot) or a bare MD5
fn resolve_fingerprint(target: &str) -> Result<String> {
    let path = Path::new(target);
    if path.exists() {
        return Ok(upload::fingerprint(path)?.md5);
    }

    if target.len() == 32 && target.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(target.to_lowercase());
    }

    Err(Error::InvalidInput(format!(
        "'{}' is neither an existing file nor an MD5 fingerprint",
        target
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fingerprint_accepts_md5() {
        let md5 = "5eb63bbbe01eeed093cb22bb8f5acdc3";
        assert_eq!(resolve_fingerprint(md5).expect("md5 rejected"), md5);
    }

    #[test]
    fn test_resolve_fingerprint_rejects_garbage() {
        assert!(resolve_fingerprint("not-a-fingerprint").is_err());
    }

    #[test]
    fn test_resolve_fingerprint_hashes_files() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("hello.txt");
        fs::write(&path, b"hello world").expect("Failed to write");

        let md5 = resolve_fingerprint(path.to_str().expect("utf-8 path"))
            .expect("file rejected");
        assert_eq!(md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }
}
