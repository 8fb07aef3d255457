//! Subcommand handlers; results go to stdout, logs to stderr

use anyhow::Result;
use gke_core::{ClusterResolver, Connector};
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, ListParams};
use serde_json::json;
use tracing::{info, warn};

pub async fn list<C: Connector>(resolver: &ClusterResolver<C>) -> Result<()> {
    let response = resolver.list_clusters().await?;
    let running = response.clusters.iter().filter(|c| c.is_running()).count();
    info!("Found {} clusters ({} running)", response.clusters.len(), running);
    for zone in &response.missing_zones {
        warn!("Zone {} could not be reached", zone);
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub async fn get<C: Connector>(resolver: &ClusterResolver<C>, name: &str) -> Result<()> {
    let cluster = resolver.get_cluster(name).await?;

    println!("{}", serde_json::to_string_pretty(&cluster)?);
    Ok(())
}

pub async fn auth<C: Connector>(
    resolver: &ClusterResolver<C>,
    name: &str,
    namespaces: bool,
) -> Result<()> {
    let cluster = resolver.get_cluster_client(name).await?;
    let version = cluster.client().apiserver_version().await?;
    info!("Connected to {} ({})", cluster.context(), version.git_version);

    let mut output = json!({
        "context": cluster.context(),
        "server": cluster.config().cluster_url.to_string(),
        "version": version.git_version,
    });

    if namespaces {
        let api: Api<Namespace> = Api::all(cluster.client().clone());
        let names: Vec<String> = api
            .list(&ListParams::default())
            .await?
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect();
        output["namespaces"] = json!(names);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub async fn kubeconfig<C: Connector>(resolver: &ClusterResolver<C>, name: &str) -> Result<()> {
    let config = resolver.get_cluster_kubeconfig(name).await?;

    print!("{}", config.to_yaml()?);
    Ok(())
}
