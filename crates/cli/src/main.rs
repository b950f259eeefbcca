mod echo;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use folio_core::{
    Extractor, FetchConfig, JsonConfig, PdfEngine, ReportFormat, ReportOptions, ScrapedData, SourceKind,
    build_report, convert_to_json, extract_from_html, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;
use time::OffsetDateTime;
use url::Url;

use crate::echo::{
    format_size, print_banner, print_info, print_scrape_summary, print_step, print_success, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const STDIN_URL: &str = "file:///dev/stdin";

/// Output format for the scraped page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Pdf,
    Html,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: pdf, html, json", s)),
        }
    }
}

/// Scrape a web page into a PDF, HTML, or JSON report
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Scrape a web page into a PDF, HTML, or JSON report", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file, or "-" for stdout (default: scraped-data-<millis>.<ext> in --out-dir)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory for the generated file when --output is not given
    #[arg(long, default_value = ".", value_name = "DIR")]
    out_dir: PathBuf,

    /// Output format (pdf, html, json); pdf falls back to html when conversion fails
    #[arg(short, long, default_value = "pdf", value_name = "FORMAT")]
    format: OutputFormat,

    /// How remote pages are retrieved (http, browser)
    #[arg(long, default_value = "http", value_name = "SOURCE")]
    source: SourceKind,

    /// Fetch timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for page requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Page URL recorded for file or stdin input
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Chrome/Chromium binary used for PDF output and the browser source
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Args {
    fn fetch_config(&self) -> FetchConfig {
        let defaults = FetchConfig::default();
        FetchConfig {
            timeout: self.timeout,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            chrome_path: self.chrome.clone(),
            ..defaults
        }
    }
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// URL recorded for a local file: `--url` when given, else the file's `file://` URL.
fn file_url(path: &Path, explicit: Option<&str>) -> anyhow::Result<String> {
    if let Some(url) = explicit {
        return Ok(url.to_string());
    }
    let absolute = fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|_| anyhow::anyhow!("Cannot express {} as a file URL", absolute.display()))
}

async fn scrape(args: &Args, input: &str) -> anyhow::Result<ScrapedData> {
    if input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let html = fetch_stdin().context("Failed to read from stdin")?;
        if args.verbose {
            eprintln!("  {} {}\n", "Size:".dimmed(), format_size(html.len()).bright_white());
        }
        let url = args.url.as_deref().unwrap_or(STDIN_URL);
        return extract_from_html(&html, url).context("Failed to extract content");
    }

    if is_remote(input) {
        if args.verbose {
            print_step(1, 3, &format!("Fetching from {}", input.bright_white().underline()));
        }
        let extractor =
            Extractor::from_config(args.source, &args.fetch_config()).context("Failed to set up page source")?;
        return extractor.extract(input).await.context("Failed to scrape URL");
    }

    if args.verbose {
        print_step(1, 3, &format!("Reading from file {}", input.bright_white()));
    }
    let html = fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?;
    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), format_size(html.len()).bright_white());
    }
    let url = file_url(Path::new(input), args.url.as_deref())?;
    extract_from_html(&html, &url).context("Failed to extract content")
}

#[cfg(feature = "browser")]
fn pdf_engine(args: &Args) -> Option<Box<dyn PdfEngine>> {
    Some(Box::new(folio_core::ChromiumPdfEngine::new(args.chrome.clone())))
}

#[cfg(not(feature = "browser"))]
fn pdf_engine(_args: &Args) -> Option<Box<dyn PdfEngine>> {
    None
}

/// Renders the requested output; the returned extension reflects any fallback.
async fn render(args: &Args, data: &ScrapedData) -> anyhow::Result<(Vec<u8>, &'static str)> {
    match args.format {
        OutputFormat::Json => {
            let config = JsonConfig { include_summary: true, pretty: true };
            let json = convert_to_json(data, &config).context("Failed to convert to JSON")?;
            Ok((json.into_bytes(), OutputFormat::Json.extension()))
        }
        OutputFormat::Html => {
            let report = build_report(data, None, &ReportOptions::default()).await;
            Ok((report.body, report.format.extension()))
        }
        OutputFormat::Pdf => {
            let engine = pdf_engine(args);
            let report = build_report(data, engine.as_deref(), &ReportOptions::default()).await;
            if report.format != ReportFormat::Pdf {
                let reason = report.fallback_reason.as_deref().unwrap_or("PDF support is not compiled in");
                print_warning(&format!("PDF conversion failed ({}), writing HTML instead", reason));
            }
            Ok((report.body, report.format.extension()))
        }
    }
}

fn output_path(args: &Args, extension: &str) -> PathBuf {
    match &args.output {
        Some(path) if path.extension().is_some_and(|ext| ext != extension) && args.format == OutputFormat::Pdf => {
            path.with_extension(extension)
        }
        Some(path) => path.clone(),
        None => {
            let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
            args.out_dir.join(format!("scraped-data-{}.{}", millis, extension))
        }
    }
}

fn init_logging(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("folio_core=debug"))
            .with_writer(io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "folio", &mut io::stdout());
        return Ok(());
    }

    let Some(input) = args.input.clone() else {
        bail!("INPUT is required");
    };

    init_logging(args.verbose);
    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let data = scrape(&args, &input).await?;

    if args.verbose {
        print_scrape_summary(&data);
        print_step(2, 3, &format!("Rendering {}", args.format.extension().to_uppercase()));
    }

    let (body, extension) = render(&args, &data).await?;

    if args.verbose {
        print_step(3, 3, "Writing output");
        eprintln!("  {} {}\n", "Size:".dimmed(), format_size(body.len()).bright_white());
    }

    if args.output.as_deref() == Some(Path::new("-")) {
        io::stdout().write_all(&body).context("Failed to write to stdout")?;
        return Ok(());
    }

    let path = output_path(&args, extension);
    fs::write(&path, &body).with_context(|| format!("Failed to write to file: {}", path.display()))?;
    print_success(&format!("Report written to {}", path.display().bright_white()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["folio"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = args(&["page.html"]);
        assert_eq!(args.format, OutputFormat::Pdf);
        assert_eq!(args.source, SourceKind::Http);
        assert_eq!(args.fetch_config().timeout, 30);
        assert!(args.fetch_config().user_agent.contains("Mozilla"));
    }

    #[test]
    fn test_input_required_without_completions() {
        assert!(Args::try_parse_from(["folio"]).is_err());
        assert!(Args::try_parse_from(["folio", "--completions", "bash"]).is_ok());
    }

    #[test]
    fn test_output_path_follows_fallback() {
        let args = args(&["page.html", "-o", "report.pdf"]);
        assert_eq!(output_path(&args, "pdf"), PathBuf::from("report.pdf"));
        assert_eq!(output_path(&args, "html"), PathBuf::from("report.html"));
    }

    #[test]
    fn test_generated_output_name() {
        let args = args(&["page.html", "-f", "json", "--out-dir", "/tmp/out"]);
        let path = output_path(&args, "json");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(path.starts_with("/tmp/out"));
        assert!(name.starts_with("scraped-data-") && name.ends_with(".json"));
    }

    #[test]
    fn test_long_flags_use_kebab_case() {
        let command = Args::command();
        let longs: Vec<&str> = command.get_arguments().filter_map(|arg| arg.get_long()).collect();
        assert!(longs.contains(&"out-dir"));
        assert!(longs.contains(&"user-agent"));
        assert!(!longs.iter().any(|long| long.contains('_')));
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com"));
        assert!(!is_remote("page.html"));
        assert!(!is_remote("-"));
    }
}
