//! Kubernetes client construction

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::path::Path;
use tracing::debug;

/// Read and merge a kubeconfig path list
///
/// `KUBECONFIG` may hold several files separated by the platform path
/// separator; earlier files win, as with kubectl.
pub fn read_kubeconfig(paths: &Path) -> Result<Kubeconfig> {
    let mut merged: Option<Kubeconfig> = None;
    for path in std::env::split_paths(paths).filter(|p| !p.as_os_str().is_empty()) {
        let next = Kubeconfig::read_from(&path)
            .with_context(|| format!("Failed to read kubeconfig file: {}", path.display()))?;
        merged = Some(match merged {
            Some(config) => config
                .merge(next)
                .with_context(|| format!("Failed to merge kubeconfig file: {}", path.display()))?,
            None => next,
        });
    }
    merged.with_context(|| format!("No kubeconfig file in: {}", paths.display()))
}

/// Build a client from an explicit kubeconfig, or from the default chain
/// (`~/.kube/config`, in-cluster service account)
pub async fn init_kube_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let client = match kubeconfig {
        Some(path) => {
            let kubeconfig = read_kubeconfig(path)?;

            let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .with_context(|| {
                    format!("Failed to create config from kubeconfig: {}", path.display())
                })?;

            Client::try_from(config)
                .context("Failed to create Kubernetes client from custom kubeconfig")?
        }
        None => Client::try_default()
            .await
            .context("Failed to create Kubernetes client")?,
    };

    debug!(default_namespace = %client.default_namespace(), "Kubernetes client ready");
    Ok(client)
}
