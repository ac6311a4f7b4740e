use crate::cluster::ClusterConfig;
use crate::error::Result;
use crate::secret_update;
use clap::Parser;
use secretsys_model::ExecutionContext;

/// Manage secrets in the cluster.
#[derive(Debug, Parser)]
pub(crate) struct Secret {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Update a secret from a file or STDIN as content.
    Update(secret_update::SecretUpdate),
}

impl Secret {
    pub(crate) async fn run(self, cluster: &ClusterConfig, ctx: &ExecutionContext) -> Result<()> {
        match self.command {
            Command::Update(update) => update.run(cluster, ctx).await,
        }
    }
}
