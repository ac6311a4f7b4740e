use crate::error::{self, Result};
use log::debug;
use secretsys_model::clients::SecretClient;
use snafu::ResultExt;
use std::path::PathBuf;

/// Where and how to reach the cluster. Built once from the global arguments.
#[derive(Debug, Clone)]
pub(crate) struct ClusterConfig {
    kubeconfig: Option<PathBuf>,
    namespace: String,
}

impl ClusterConfig {
    pub(crate) fn new(kubeconfig: Option<PathBuf>, namespace: String) -> Self {
        Self {
            kubeconfig,
            namespace,
        }
    }

    /// Create a secret client for the configured namespace.
    pub(crate) async fn client(&self) -> Result<SecretClient> {
        debug!("Connecting to the cluster, namespace '{}'", self.namespace);
        match &self.kubeconfig {
            Some(path) => SecretClient::new_from_kubeconfig_path(path, &self.namespace)
                .await
                .context(error::ClientSnafu {
                    what: format!("client from kubeconfig '{}'", path.display()),
                }),
            None => SecretClient::new(&self.namespace)
                .await
                .context(error::ClientSnafu {
                    what: "default client",
                }),
        }
    }
}
