use clap::{Parser, Subcommand};
use simple_sitemap::collection::{self, generate_sitemap_collection};
use simple_sitemap::generate::{generate_sitemap, generate_sitemap_index};
use simple_sitemap::stream::generate_sitemap_stream;
use simple_sitemap::types::{SitemapEntry, UrlRecord};
use simple_sitemap::{config, naming, output, validate};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Shared flags for commands that read a JSON input and write one document.
#[derive(clap::Args, Clone)]
struct DocumentArgs {
    /// JSON input file
    #[arg(long)]
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "simple-sitemap")]
#[command(about = "XML sitemap generator")]
#[command(long_about = "\
XML sitemap generator

Reads URL records as JSON and writes sitemaps.org documents, including the
image, video, and news extensions and xhtml:link alternates.

Input format (urlset, stream, collection, check):

  [
    {
      \"loc\": \"https://example.com/\",
      \"lastmod\": \"2024-01-15\",
      \"changefreq\": \"weekly\",
      \"priority\": 0.8,
      \"images\": [{ \"loc\": \"https://example.com/a.jpg\", \"title\": \"A\" }],
      \"alternates\": [{ \"href\": \"https://example.com/de/\", \"hreflang\": \"de\" }]
    }
  ]

Input format (index):

  [{ \"loc\": \"https://example.com/sitemap-0.xml\", \"lastmod\": \"2024-01-15\" }]

Logging goes to stderr and is controlled by RUST_LOG.

Run 'simple-sitemap gen-config' to generate a documented sitemap.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing sitemap.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Write single-line XML instead of indented output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one sitemap from URL records
    Urlset(DocumentArgs),
    /// Generate a sitemap index from sitemap entries
    Index(DocumentArgs),
    /// Split URL records into sitemap files plus an index
    Collection {
        /// JSON input file
        #[arg(long)]
        input: PathBuf,
        /// Public URL the sitemap files are served under
        #[arg(long)]
        base_url: String,
        /// Directory the sitemap files are written to
        #[arg(long)]
        out_dir: PathBuf,
        /// URLs per sitemap file (overrides config)
        #[arg(long)]
        max_urls: Option<usize>,
        /// Sitemap file prefix (overrides config)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Generate one sitemap, writing each element as it is rendered
    Stream(DocumentArgs),
    /// Validate URL records without writing XML
    Check {
        /// JSON input file
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a stock sitemap.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    setup_logging("simple_sitemap=info");
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Urlset(args) => {
            let site_config = load_settings(&cli.config, cli.compact)?;
            let urls: Vec<UrlRecord> = read_json(&args.input)?;
            let xml = generate_sitemap(&urls, &site_config.generate_options())?;
            write_document(&xml, args.output.as_deref())?;
            if let Some(path) = &args.output {
                output::print_document_output(urls.len(), ("URL", "URLs"), path);
            }
        }
        Command::Index(args) => {
            let site_config = load_settings(&cli.config, cli.compact)?;
            let entries: Vec<SitemapEntry> = read_json(&args.input)?;
            let xml = generate_sitemap_index(&entries, &site_config.generate_options())?;
            write_document(&xml, args.output.as_deref())?;
            if let Some(path) = &args.output {
                output::print_document_output(entries.len(), ("sitemap", "sitemaps"), path);
            }
        }
        Command::Collection {
            input,
            base_url,
            out_dir,
            max_urls,
            prefix,
        } => {
            let mut site_config = load_settings(&cli.config, cli.compact)?;
            if let Some(n) = max_urls {
                site_config.collection.max_urls_per_sitemap = n;
            }
            if let Some(p) = prefix {
                site_config.collection.prefix = p;
            }
            site_config.validate()?;

            let urls: Vec<UrlRecord> = read_json(&input)?;
            let options = site_config.collection_options();
            let result = generate_sitemap_collection(&base_url, &urls, &options)?;

            std::fs::create_dir_all(&out_dir)?;
            let sizes = collection::chunk_sizes(urls.len(), options.max_urls_per_sitemap);
            let mut written = Vec::with_capacity(result.sitemaps.len());
            for (i, (xml, location)) in result.sitemaps.iter().zip(&result.locations).enumerate() {
                let file_name = naming::file_name_of(location)
                    .map(str::to_string)
                    .unwrap_or_else(|| naming::chunk_filename(&site_config.collection.prefix, i));
                std::fs::write(out_dir.join(&file_name), xml)?;
                written.push(output::WrittenChunk {
                    file_name,
                    urls: sizes[i],
                });
            }
            let index_file = &site_config.collection.index_filename;
            std::fs::write(out_dir.join(index_file), &result.sitemap_index)?;
            output::print_collection_output(&result, &written, index_file);
        }
        Command::Stream(args) => {
            let site_config = load_settings(&cli.config, cli.compact)?;
            let urls: Vec<UrlRecord> = read_json(&args.input)?;
            let stream = generate_sitemap_stream(&urls, &site_config.generate_options())?;
            let mut sink: Box<dyn Write> = match &args.output {
                Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
                None => Box::new(std::io::stdout().lock()),
            };
            for chunk in stream {
                sink.write_all(&chunk?)?;
            }
            sink.flush()?;
            drop(sink);
            if let Some(path) = &args.output {
                output::print_document_output(urls.len(), ("URL", "URLs"), path);
            }
        }
        Command::Check { input } => {
            load_settings(&cli.config, cli.compact)?;
            let urls: Vec<UrlRecord> = read_json(&input)?;
            validate::url_records(&urls)?;
            output::print_check_output(&urls);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `sitemap.toml`, apply `--compact`, and size the thread pool.
fn load_settings(dir: &Path, compact: bool) -> Result<config::SitemapConfig, config::ConfigError> {
    let mut site_config = config::load_config(dir)?;
    if compact {
        site_config.pretty_print = false;
    }
    init_thread_pool(&site_config.processing);
    Ok(site_config)
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`.
fn setup_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    tracing::debug!(input = %path.display(), "read input");
    Ok(value)
}

fn write_document(xml: &str, destination: Option<&Path>) -> std::io::Result<()> {
    match destination {
        Some(path) => std::fs::write(path, xml),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(xml.as_bytes())?;
            stdout.flush()
        }
    }
}
