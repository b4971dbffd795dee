//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::resources::{AuditStatus, Page, Resource};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format an audit status as a colored string
pub fn format_status(status: AuditStatus) -> String {
    let text = status.as_str();
    match status {
        AuditStatus::Approved => text.green().to_string(),
        AuditStatus::Rejected | AuditStatus::Removed => text.red().to_string(),
        AuditStatus::Pending | AuditStatus::RecallPending => text.yellow().to_string(),
    }
}

fn status_color(status: AuditStatus) -> Color {
    match status {
        AuditStatus::Approved => Color::Green,
        AuditStatus::Rejected | AuditStatus::Removed => Color::Red,
        AuditStatus::Pending | AuditStatus::RecallPending => Color::Yellow,
    }
}

/// Print a table of one page of resources
pub fn print_resource_table(page: &Page<Resource>) {
    if page.results.is_empty() {
        info("No resources found. Upload one with 'edushare upload <file>'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Subject").fg(Color::Cyan),
            Cell::new("Grade").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Uploaded").fg(Color::Cyan),
        ]);

    for resource in &page.results {
        let uploaded = resource
            .created_time
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        table.add_row(vec![
            Cell::new(resource.id),
            Cell::new(&resource.title),
            Cell::new(&resource.subject),
            Cell::new(&resource.grade),
            Cell::new(resource.audit_status.as_str()).fg(status_color(resource.audit_status)),
            Cell::new(uploaded),
        ]);
    }

    println!("{table}");

    if page.next.is_some() {
        info(&format!(
            "{} resources in total. Next page with '--page <n>'",
            page.count
        ));
    }
}

/// Print detailed resource information
pub fn print_resource_detail(resource: &Resource) {
    println!("{}", "Resource Details".bold().underline());
    println!();
    println!("  {} {}", "Id:".bold(), resource.id);
    println!("  {} {}", "Title:".bold(), resource.title);
    println!("  {} {}", "Version:".bold(), resource.version);
    println!("  {} {}", "School:".bold(), resource.school);
    println!("  {} {}", "Subject:".bold(), resource.subject);
    println!("  {} {}", "Grade:".bold(), resource.grade);
    println!(
        "  {} {}",
        "Status:".bold(),
        format_status(resource.audit_status)
    );

    if !resource.md5.is_empty() {
        println!("  {} {}", "MD5:".bold(), resource.md5);
    }

    if let Some(created) = resource.created_time {
        println!(
            "  {} {}",
            "Uploaded:".bold(),
            created.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}

/// Confirm an action with the user
pub fn confirm(message: &str) -> bool {
    use std::io::{self, Write};

    print!("{} [y/N] ", message);
    io::stdout().flush().unwrap();

    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
