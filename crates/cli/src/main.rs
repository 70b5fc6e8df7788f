use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use missive_core::{
    ArticleRecord, Document, FetchConfig, HttpSummarizer, Platform, SummarizerConfig, extract_article, fetch_url,
    summarize_chunked,
};
use owo_colors::OwoColorize;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted articles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Platform selection, either explicit or detected from the input URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlatformArg {
    Auto,
    Fixed(Platform),
}

impl FromStr for PlatformArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<Platform>()
            .map(Self::Fixed)
            .map_err(|_| format!("Invalid platform: {}. Valid options: substack, beehiiv, auto", s))
    }
}

/// Extract structured newsletter articles from Substack and Beehiiv pages
#[derive(Parser, Debug)]
#[command(name = "missive")]
#[command(author = "Missive Contributors")]
#[command(version)]
#[command(about = "Extract newsletter articles from Substack and Beehiiv", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Newsletter platform (substack, beehiiv, auto)
    #[arg(short, long, default_value = "auto", value_name = "PLATFORM")]
    platform: PlatformArg,

    /// Append an LLM-generated summary (requires a summarizer backend)
    #[arg(long)]
    summarize: bool,

    /// Summarizer endpoint (OpenAI-compatible chat completions)
    #[arg(long, value_name = "URL")]
    summarizer_url: Option<String>,

    /// Summarizer model name
    #[arg(long, value_name = "MODEL")]
    summarizer_model: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "15", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Renders the record as pretty JSON, with the summary attached when present.
fn render_json(record: &ArticleRecord, summary: Option<&str>) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(record)?;
    if let Some(summary) = summary
        && let Some(map) = value.as_object_mut()
    {
        map.insert("summary".to_string(), serde_json::Value::String(summary.to_string()));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Renders the record as plain text, with the summary appended when present.
fn render_text(record: &ArticleRecord, summary: Option<&str>) -> String {
    match summary {
        Some(summary) => format!("{}\n\nSummary:\n{}", record.to_text(), summary),
        None => record.to_text(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let total_steps = if args.summarize { 5 } else { 4 };

    if args.verbose {
        echo::print_banner();
    }

    let is_url = args.input.starts_with("http://") || args.input.starts_with("https://");

    let platform = match args.platform {
        PlatformArg::Fixed(platform) => platform,
        PlatformArg::Auto if is_url => Platform::from_url(&args.input).context("Failed to detect platform")?,
        PlatformArg::Auto => anyhow::bail!("--platform is required for file or stdin input"),
    };

    if args.verbose {
        echo::print_info(&format!("Platform: {}", platform));
        eprintln!();
    }

    let (html, size) = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, total_steps, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        let len = buffer.len();
        (buffer, len)
    } else if is_url {
        if args.verbose {
            echo::print_step(
                1,
                total_steps,
                &format!("Fetching from {}", args.input.bright_white().underline()),
            );
        }

        let mut config = FetchConfig { timeout: args.timeout, ..Default::default() };
        if let Some(user_agent) = args.user_agent.clone() {
            config.user_agent = user_agent;
        }

        let content = fetch_url(&args.input, &config).await.context("Failed to fetch URL")?;
        let len = content.len();
        (content, len)
    } else {
        if args.verbose {
            echo::print_step(1, total_steps, &format!("Reading from file {}", args.input.bright_white()));
        }
        let content =
            fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        let len = content.len();
        (content, len)
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(size).bright_white());
        eprintln!();
        echo::print_step(2, total_steps, "Parsing HTML document");
    }

    let doc = Document::parse(&html).context("Failed to parse HTML")?;

    if args.verbose {
        echo::print_step(3, total_steps, &format!("Extracting {} article", platform));
    }

    let record = extract_article(&doc, platform).context("Failed to extract article")?;

    if args.verbose {
        echo::print_record_details(&record);
    }

    let summary = if args.summarize {
        if args.verbose {
            echo::print_step(4, total_steps, "Summarizing article");
        }

        let mut config = SummarizerConfig::default();
        if let Some(endpoint) = args.summarizer_url.clone() {
            config.endpoint = endpoint;
        }
        if let Some(model) = args.summarizer_model.clone() {
            config.model = model;
        }
        config.api_key = std::env::var("MISSIVE_SUMMARIZER_API_KEY").ok();
        if config.api_key.is_none() {
            echo::print_warning("MISSIVE_SUMMARIZER_API_KEY is not set; the summarizer backend may reject requests");
        }

        let summarizer = HttpSummarizer::new(config).context("Failed to build summarizer client")?;
        Some(summarize_chunked(&summarizer, &record.full_text).await)
    } else {
        None
    };

    let output = match args.format {
        OutputFormat::Json => render_json(&record, summary.as_deref()).context("Failed to serialize record")?,
        OutputFormat::Text => render_text(&record, summary.as_deref()),
    };

    if args.verbose {
        echo::print_step(total_steps, total_steps, "Writing output");
        eprintln!(
            "  {} {}",
            "Format:".dimmed(),
            format!("{:?}", args.format).bright_white()
        );
        eprintln!();
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
