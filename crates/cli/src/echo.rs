use folio_core::ScrapedData;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Folio".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Scrape web pages into PDF, HTML, or JSON reports\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print what was extracted from the page
pub fn print_scrape_summary(data: &ScrapedData) {
    let headings = data.headings.h1.len() + data.headings.h2.len() + data.headings.h3.len();
    let lists: usize = data.lists.iter().map(|list| list.items.len()).sum();

    eprintln!("  {} {}", "Title:".dimmed(), data.title.bright_white());
    eprintln!("  {} {}", "URL:".dimmed(), data.url.bright_white().underline());
    for (label, count) in [
        ("Headings:", headings),
        ("Links:", data.links.len()),
        ("Images:", data.images.len()),
        ("Paragraphs:", data.paragraphs.len()),
        ("List items:", lists),
    ] {
        eprintln!("  {} {}", label.dimmed(), count.to_string().bright_white());
    }
    eprintln!();
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
