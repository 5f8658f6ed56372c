use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use mdscribe_core::{Document, MarkdownConfig, Scribe, ScribeConfig, fetch_file, fetch_stdin, fetch_url};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

use echo::{format_size, print_banner, print_detail, print_step, print_success, print_timing_summary, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the converted document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: markdown, json", s)),
        }
    }
}

/// Convert a rich-text article page to clean Markdown
#[derive(Parser, Debug)]
#[command(name = "mdscribe")]
#[command(version = VERSION)]
#[command(about = "Convert rich-text articles to Markdown", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    format: OutputFormat,

    /// Include TOML frontmatter (Markdown only)
    #[arg(long)]
    frontmatter: bool,

    /// Include title heading, cover image and byline (Markdown only)
    #[arg(long)]
    title: bool,

    /// Include reference table with all links (Markdown only)
    #[arg(long)]
    references: bool,

    /// Treat the input as a bare HTML fragment instead of a full article page
    #[arg(long)]
    fragment: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Cookie header sent with HTTP requests
    #[arg(long, env = "MDSCRIBE_COOKIE", value_name = "COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn is_url(input: &str) -> bool {
    Url::parse(input).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,mdscribe_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn scribe_config(args: &Args) -> ScribeConfig {
    let mut builder = ScribeConfig::builder().timeout(args.timeout);

    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua);
    }
    if let Some(cookie) = &args.cookie {
        builder = builder.cookie(cookie);
    }

    builder.build()
}

fn render(doc: &Document, args: &Args) -> anyhow::Result<String> {
    match args.format {
        OutputFormat::Markdown => {
            let config = MarkdownConfig {
                include_frontmatter: args.frontmatter,
                include_title_heading: args.title,
                include_references: args.references,
            };
            Ok(doc.to_markdown_with_config(&config))
        }
        OutputFormat::Json => {
            let json = doc.to_json().context("Failed to serialize document")?;
            Ok(format!("{:#}", json))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
    }

    let scribe = Scribe::with_config(scribe_config(&args));
    tracing::debug!(input = %args.input, fragment = args.fragment, "starting conversion");
    let started = Instant::now();
    let mut timings: Vec<(&str, Duration)> = Vec::new();

    let url = is_url(&args.input).then(|| args.input.clone());
    let html = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else if let Some(url) = &url {
        if args.verbose {
            print_step(1, 3, &format!("Fetching {}", url.bright_white().underline()));
        }
        fetch_url(url, &scribe.config().fetch)
            .await
            .with_context(|| format!("Failed to fetch {}", url))?
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };
    timings.push(("Read", started.elapsed()));

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, 3, "Converting to Markdown");
    }

    let step = Instant::now();
    let doc = if args.fragment {
        scribe.parse_fragment(&html)
    } else if let Some(url) = &url {
        scribe.parse_with_url(&html, url)
    } else {
        scribe.parse(&html)
    }
    .context("Failed to convert article")?;
    timings.push(("Convert", step.elapsed()));

    if args.verbose {
        if !doc.metadata.title.is_empty() {
            print_detail("Title", &doc.metadata.title);
        }
        if !doc.metadata.author.is_empty() {
            print_detail("Author", &doc.metadata.author);
        }
        print_detail("Blocks", &doc.blocks.len().to_string());
        eprintln!();
    }
    if doc.blocks.is_empty() {
        print_warning("The article body contains no blocks");
    }

    let output = render(&doc, &args)?;

    if args.verbose {
        print_step(3, 3, "Writing output");
        print_detail("Format", &format!("{:?}", args.format));
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    if args.verbose {
        print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}
