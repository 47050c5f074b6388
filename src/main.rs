use anyhow::Result;
use clap::Parser;
use k8s_downloads::commands::{serve_command, update_index_command, url_command};
use k8s_downloads::index::{
    DEFAULT_BINARY_DETAILS, DEFAULT_INDEX_OUTPUT, DEFAULT_VERSION_COUNT, IndexOptions,
};
use k8s_downloads::picker::rules;
use k8s_downloads::serve::DEFAULT_ADDR;
use std::net::SocketAddr;
use std::path::PathBuf;

/// k8s-downloads - Kubernetes binary download page
///
/// Generates the static "download Kubernetes" page from the release bucket,
/// serves an endpoint that regenerates it, and computes download URLs the
/// same way the page's picker does.
///
/// Examples:
///   k8s-downloads update-index
///   k8s-downloads url --version 1.30.2 --os osx --arch arm64
#[derive(Parser, Debug)]
#[command(author, version = env!("K8S_DOWNLOADS_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Release bucket URL (defaults to https://dl.k8s.io/release)
    #[arg(
        long = "base-url",
        env = "K8S_DOWNLOADS_BASE_URL",
        value_name = "URL",
        global = true
    )]
    pub base_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch the latest stable releases and write the page and data file
    UpdateIndex(IndexArgs),

    /// Serve an /update endpoint that regenerates the page
    Serve(ServeArgs),

    /// Print the download URL for a binary kind, OS, architecture and version
    Url(UrlArgs),
}

#[derive(clap::Args, Debug)]
pub struct IndexArgs {
    /// The location of the HTML page this program writes
    #[arg(long = "index-output", value_name = "PATH", default_value = DEFAULT_INDEX_OUTPUT)]
    pub index_output: PathBuf,

    /// The location of the JSON file this program writes
    #[arg(long = "binary-details", value_name = "PATH", default_value = DEFAULT_BINARY_DETAILS)]
    pub binary_details: PathBuf,

    /// Number of stable minor releases to list
    #[arg(long = "versions", value_name = "N", default_value_t = DEFAULT_VERSION_COUNT)]
    pub versions: usize,
}

impl From<IndexArgs> for IndexOptions {
    fn from(args: IndexArgs) -> Self {
        IndexOptions {
            index_output: args.index_output,
            binary_details: args.binary_details,
            version_count: args.versions,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, value_name = "ADDR", default_value = DEFAULT_ADDR)]
    pub addr: SocketAddr,

    #[command(flatten)]
    pub index: IndexArgs,
}

#[derive(clap::Args, Debug)]
pub struct UrlArgs {
    /// Release version, with or without the leading "v"
    #[arg(long, value_name = "VERSION", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub version: String,

    /// Binary kind: client, server or node
    #[arg(long, default_value = rules::CLIENT)]
    pub binary: String,

    /// Operating system: linux, osx (or darwin) or windows
    #[arg(long, default_value = rules::LINUX)]
    pub os: String,

    /// Architecture, e.g. amd64 or arm64
    #[arg(long, default_value = rules::AMD64)]
    pub arch: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = k8s_downloads::runtime::RealRuntime;

    match cli.command {
        Commands::UpdateIndex(args) => {
            update_index_command(runtime, cli.base_url, args.into()).await?
        }
        Commands::Serve(args) => {
            serve_command(runtime, args.addr, cli.base_url, args.index.into()).await?
        }
        Commands::Url(args) => {
            let url = url_command(&args.binary, &args.os, &args.arch, &args.version)?;
            println!("{}", url);
        }
    }
    Ok(())
}
