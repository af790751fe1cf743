//! lucide-svg CLI
//!
//! Usage:
//!   lucide-svg update [VERSION] [-o PATH]   Download a release into an icon archive
//!   lucide-svg render NAME [OPTIONS]        Print an icon's markup
//!   lucide-svg list                         List icons in the archive
//!
//! Options:
//!   -v, --verbose  Log debug output to stderr
//!   -h, --help     Print help

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lucide_svg::fetch::{update_archive, HttpReleaseClient};
use lucide_svg::{AttrValue, IconConfig, IconTemplate};

#[derive(Parser)]
#[command(name = "lucide-svg")]
#[command(about = "Render Lucide icons and maintain the icon archive")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download a Lucide release and write it as an icon archive
    Update {
        /// Dotted version or tag (e.g. 0.469.0 or v0.469.0); latest if omitted
        version: Option<String>,

        /// Archive to write
        #[arg(short, long, default_value = "lucide.zip")]
        output: PathBuf,
    },

    /// Print an icon's markup, falling back like a template would
    Render {
        /// Icon name
        name: String,

        /// Width and height
        #[arg(short, long, conflicts_with = "no_size")]
        size: Option<u32>,

        /// Omit width and height
        #[arg(long)]
        no_size: bool,

        /// Extra attribute as key=value (escaped)
        #[arg(short, long = "attr", value_parser = parse_key_value)]
        attrs: Vec<(String, String)>,

        /// Extra attribute as key=value (written verbatim)
        #[arg(long = "raw-attr", value_parser = parse_key_value)]
        raw_attrs: Vec<(String, String)>,

        #[command(flatten)]
        archive: ArchiveArgs,
    },

    /// List the icons in the archive
    List {
        #[command(flatten)]
        archive: ArchiveArgs,
    },
}

#[derive(Args)]
struct ArchiveArgs {
    /// Icon archive to read instead of the configured one
    #[arg(long)]
    archive: Option<PathBuf>,
}

impl ArchiveArgs {
    fn config(&self) -> IconConfig {
        let config = IconConfig::from_env().unwrap_or_else(|e| {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        });
        match &self.archive {
            Some(path) => config.with_icons_zip_path(path),
            None => config,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Update { version, output } => update(version.as_deref(), output),
        Command::Render {
            name,
            size,
            no_size,
            attrs,
            raw_attrs,
            archive,
        } => {
            let template = IconTemplate::from_config(&archive.config());
            let mut render_attrs = template.attributes();
            if no_size {
                render_attrs.size = None;
            } else if size.is_some() {
                render_attrs.size = size;
            }
            for (key, value) in attrs {
                render_attrs.insert(key, AttrValue::Plain(value));
            }
            for (key, value) in raw_attrs {
                render_attrs.insert(key, AttrValue::Trusted(value));
            }
            println!("{}", template.render(&name, &render_attrs));
        }
        Command::List { archive } => {
            let template = IconTemplate::from_config(&archive.config());
            match template.store().names() {
                Ok(names) => {
                    for name in names {
                        println!("{}", name);
                    }
                }
                Err(e) => {
                    eprintln!("Error reading icon archive: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn update(version: Option<&str>, output: PathBuf) {
    let client = match HttpReleaseClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match update_archive(&client, version, &output) {
        Ok(report) => {
            println!("Using Lucide release tag: {}", report.tag);
            for icon in &report.icons {
                println!("{}", icon);
            }
            println!("\nWritten {} icons to {}", report.icons.len(), report.path.display());
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
