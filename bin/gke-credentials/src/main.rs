use anyhow::Result;
use clap::{Parser, Subcommand};
use gke_container::{ContainerConfig, ContainerConnector};
use gke_core::{ClusterResolver, ResolverConfig};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

/// Resolve GKE cluster metadata and Kubernetes credentials
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GCP project owning the clusters
    #[arg(long, env = "GKE_PROJECT")]
    project: Option<String>,

    /// Region (or zone) of the cluster
    #[arg(long, env = "GKE_REGION")]
    region: String,

    /// Container API endpoint
    #[arg(long, env = "GKE_CONTAINER_ENDPOINT", default_value = gke_api::v1::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Bearer token to embed instead of the gcp auth provider
    #[arg(long, env = "GKE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Fetch a token from Application Default Credentials and embed it
    #[arg(long, conflicts_with = "token")]
    embed_token: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List clusters across all locations of the project
    List,
    /// Print a cluster descriptor
    Get { name: String },
    /// Build a client for a cluster and query its API server version
    Auth {
        name: String,
        /// Also list the cluster's namespaces
        #[arg(long)]
        namespaces: bool,
    },
    /// Print a kubeconfig for a cluster
    Kubeconfig { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let project = cli
        .project
        .or_else(|| std::env::var("GOOGLE_CLOUD_PROJECT").ok())
        .unwrap_or_default();
    let config = ResolverConfig::new(project, cli.region)?;
    debug!("Using project {} region {}", config.project, config.region);

    let connector = ContainerConnector::new(ContainerConfig {
        base_url: cli.endpoint,
        timeout: Duration::from_secs(cli.timeout),
    });
    let resolver = ClusterResolver::new(config, connector)?;

    let token = if cli.embed_token {
        Some(gke_container::access_token().await?)
    } else {
        cli.token
    };
    let resolver = match token {
        Some(token) => resolver.with_credentials(gke_core::StaticTokenProvider::new(token)),
        None => resolver,
    };

    match cli.command {
        Commands::List => commands::list(&resolver).await,
        Commands::Get { name } => commands::get(&resolver, &name).await,
        Commands::Auth { name, namespaces } => commands::auth(&resolver, &name, namespaces).await,
        Commands::Kubeconfig { name } => commands::kubeconfig(&resolver, &name).await,
    }
}
