//! Terminal rendering for the contract table, detail card, stats, and uploads.

use contralens_core::{
    ContractDetail, ContractPage, DashboardStats, RiskLevel, StatusKind, UploadStatus,
    UploadedFile, format_date, format_file_size, percent,
};

const MAX_LIST_ITEMS: usize = 10;
const NAME_WIDTH: usize = 32;
const PARTIES_WIDTH: usize = 28;

// ── Contract table ──

/// Print one page of the filtered contract list with its pagination footer.
pub fn print_contract_table(page: &ContractPage<'_>, empty_message: &str) {
    if page.total_filtered == 0 {
        println!("No contracts found");
        println!("{empty_message}");
        return;
    }

    println!(
        "{:<10} {:<NAME_WIDTH$} {:<PARTIES_WIDTH$} {:<13} {:<13} {}",
        "ID", "NAME", "PARTIES", "EXPIRY", "STATUS", "RISK"
    );
    for c in &page.visible_rows {
        println!(
            "{:<10} {:<NAME_WIDTH$} {:<PARTIES_WIDTH$} {:<13} {:<13} {}",
            c.id,
            truncate(&c.name, NAME_WIDTH),
            truncate(&c.parties, PARTIES_WIDTH),
            format_date(&c.expiry),
            status_label(&c.status),
            risk_label(&c.risk),
        );
    }

    println!();
    match page.range() {
        Some((first, last)) => println!(
            "Showing {first} to {last} of {} contracts  (page {} of {})",
            page.total_filtered, page.current_page, page.total_pages
        ),
        None => println!(
            "Page {} is past the end ({} pages, {} contracts)",
            page.current_page, page.total_pages, page.total_filtered
        ),
    }
}

// ── Detail card ──

/// Print a contract detail as a vertical card.
pub fn print_contract_card(detail: &ContractDetail) {
    println!("=== {} ===", detail.name);
    println!("{}", detail.id);
    println!();

    println!("Overview");
    println!("  {:<10} {}", "parties", detail.parties);
    println!("  {:<10} {}", "start", format_date(&detail.start));
    println!("  {:<10} {}", "expiry", format_date(&detail.expiry));
    println!("  {:<10} {}", "status", status_label(&detail.status));
    println!("  {:<10} {}", "risk", risk_label(&detail.risk));
    println!();

    if !detail.clauses.is_empty() {
        println!("Key Clauses ({}):", detail.clauses.len());
        for clause in detail.clauses.iter().take(MAX_LIST_ITEMS) {
            println!("  {:<40} {:>3}% confidence", truncate(&clause.title, 40), percent(clause.confidence));
            println!("    {}", clause.summary);
        }
        print_overflow(detail.clauses.len());
        println!();
    }

    if !detail.insights.is_empty() {
        println!("AI Insights ({}):", detail.insights.len());
        for insight in detail.insights.iter().take(MAX_LIST_ITEMS) {
            println!("  [{}] {}", risk_label(&insight.risk), insight.message);
        }
        print_overflow(detail.insights.len());
        println!();
    }

    if !detail.evidence.is_empty() {
        println!("Evidence ({}):", detail.evidence.len());
        for item in detail.evidence.iter().take(MAX_LIST_ITEMS) {
            println!("  {:<40} {:>3}% relevant", truncate(&item.source, 40), percent(item.relevance));
            println!("    \"{}\"", item.snippet);
        }
        print_overflow(detail.evidence.len());
        println!();
    }
}

fn print_overflow(len: usize) {
    if len > MAX_LIST_ITEMS {
        println!("  ... and {} more", len - MAX_LIST_ITEMS);
    }
}

// ── Stats ──

pub fn print_stats(stats: &DashboardStats) {
    println!("  {:<18} {}", "Total Contracts", stats.total);
    println!("  {:<18} {}", "High Risk", stats.high_risk);
    println!("  {:<18} {}", "Expiring Soon", stats.renewal_due);
    println!("  {:<18} {}", "Active", stats.active);
}

// ── Uploads ──

pub fn print_upload_progress(files: &[UploadedFile]) {
    for f in files {
        let state = match f.status {
            UploadStatus::Uploading => format!("{:>3.0}%", f.progress),
            UploadStatus::Success => "done".to_string(),
            UploadStatus::Error => "failed".to_string(),
        };
        println!(
            "  {:<10} {:<NAME_WIDTH$} {:>10}  {}",
            f.id,
            truncate(&f.name, NAME_WIDTH),
            format_file_size(f.size),
            state
        );
    }
}

// ── Helpers ──

/// Known statuses print as-is; anything else is flagged as unrecognised.
fn status_label(status: &str) -> String {
    match StatusKind::classify(status) {
        StatusKind::Other => format!("{status}?"),
        _ => status.to_string(),
    }
}

fn risk_label(risk: &str) -> String {
    match RiskLevel::classify(risk) {
        RiskLevel::High => format!("{risk} !"),
        RiskLevel::Other => format!("{risk}?"),
        _ => risk.to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
