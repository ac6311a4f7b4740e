use crate::clients::error::{self, Result};
use crate::constants::{FIELD_MANAGER, SECRET_DATA_KEY, SECRET_TYPE_OPAQUE};
use crate::{ExecutionContext, SecretId, SecretSpec};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::{ObjectMeta, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use log::{debug, trace};
use snafu::{OptionExt, ResultExt};
use std::collections::BTreeMap;
use std::path::Path;

/// The capability to register a secret with a cluster manager.
///
/// Implementations return the identifier the server assigned, or the server's error as-is. Callers
/// should go through [`submit_secret`] so that the call is bound to an [`ExecutionContext`].
#[async_trait::async_trait]
pub trait SecretApi: Send + Sync {
    async fn create_secret(&self, spec: SecretSpec) -> Result<SecretId>;
}

/// Submit `spec` through `api` exactly once.
///
/// The call is abandoned if `ctx` is cancelled or its deadline passes. Errors returned by `api` are
/// passed through untouched and nothing is retried.
pub async fn submit_secret<A>(ctx: &ExecutionContext, api: &A, spec: SecretSpec) -> Result<SecretId>
where
    A: SecretApi + ?Sized,
{
    debug!(
        "submitting secret '{}' with {} label(s) and {} byte(s)",
        spec.name,
        spec.labels.len(),
        spec.data.len()
    );
    ctx.run(api.create_secret(spec)).await
}

/// An API client that stores secrets as Kubernetes `Secret` objects in a namespace.
///
/// # Example
///
/// ```
///# use secretsys_model::clients::{submit_secret, SecretClient};
///# use secretsys_model::{ExecutionContext, SecretSpec};
///# async fn no_run() {
/// let client = SecretClient::new("default").await.unwrap();
/// let spec = SecretSpec::new("db-pass", Default::default(), b"hunter2".to_vec());
/// let id = submit_secret(&ExecutionContext::new(), &client, spec).await.unwrap();
///# }
/// ```
#[derive(Clone)]
pub struct SecretClient {
    api: Api<Secret>,
}

impl SecretClient {
    /// Create a new [`SecretClient`] using either `KUBECONFIG` or the in-cluster environment
    /// variables.
    pub async fn new(namespace: &str) -> Result<Self> {
        let k8s_client = Client::try_default()
            .await
            .context(error::InitializationSnafu)?;
        Ok(Self::new_from_k8s_client(k8s_client, namespace))
    }

    /// Create a [`SecretClient`] from the path to a kubeconfig file.
    pub async fn new_from_kubeconfig_path(kubeconfig_path: &Path, namespace: &str) -> Result<Self> {
        let kubeconfig = Kubeconfig::read_from(kubeconfig_path).context(error::ConfigReadSnafu)?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .context(error::ClientCreateKubeconfigSnafu)?;
        let k8s_client = Client::try_from(config).context(error::InitializationSnafu)?;
        Ok(Self::new_from_k8s_client(k8s_client, namespace))
    }

    pub fn new_from_k8s_client(k8s_client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(k8s_client, namespace),
        }
    }
}

#[async_trait::async_trait]
impl SecretApi for SecretClient {
    async fn create_secret(&self, spec: SecretSpec) -> Result<SecretId> {
        let name = spec.name.clone();
        let post_params = PostParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };
        let created = self
            .api
            .create(&post_params, &k8s_secret(spec))
            .await
            .context(error::KubeApiCallSnafu {
                method: "create",
                what: "secret",
            })?;
        let uid = created.metadata.uid.context(error::MissingUidSnafu {
            what: "secret",
            name: &name,
        })?;
        trace!("secret '{}' created with uid '{}'", name, uid);
        Ok(SecretId::new(uid))
    }
}

/// Lay out a [`SecretSpec`] as an opaque Kubernetes `Secret` holding the content under a single
/// key.
fn k8s_secret(spec: SecretSpec) -> Secret {
    let labels = if spec.labels.is_empty() {
        None
    } else {
        Some(spec.labels)
    };
    let mut data = BTreeMap::new();
    data.insert(SECRET_DATA_KEY.to_string(), ByteString(spec.data));

    Secret {
        data: Some(data),
        immutable: None,
        metadata: ObjectMeta {
            name: Some(spec.name),
            labels,
            ..Default::default()
        },
        string_data: None,
        type_: Some(SECRET_TYPE_OPAQUE.to_string()),
    }
}
