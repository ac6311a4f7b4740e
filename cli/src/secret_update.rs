use crate::cluster::ClusterConfig;
use crate::content::{read_content, ContentSource};
use crate::error::{self, Result};
use clap::Parser;
use log::debug;
use secretsys_model::clients::{submit_secret, SecretApi};
use secretsys_model::{labels_from_tokens, split_label, ExecutionContext, SecretId, SecretSpec};
use snafu::{ensure, OptionExt, ResultExt};
use std::future::Future;
use std::io::{Read, Write};

/// Update a secret from a file or STDIN as content. Prints the id the cluster assigned.
#[derive(Debug, Parser)]
pub(crate) struct SecretUpdate {
    /// Name of the secret.
    #[clap(value_name = "SECRET")]
    name: String,

    /// Read from a file or STDIN ('-').
    #[clap(long = "file", short = 'f')]
    file: Option<String>,

    /// Secret labels (key=value). May be given more than once.
    #[clap(long = "label", short = 'l', value_parser = parse_label)]
    labels: Vec<String>,
}

impl SecretUpdate {
    pub(crate) async fn run(self, cluster: &ClusterConfig, ctx: &ExecutionContext) -> Result<()> {
        let config = self.into_config(|key| std::env::var(key).ok())?;
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        config
            .execute(ctx, &mut stdin.lock(), &mut stdout.lock(), move || {
                cluster.client()
            })
            .await?;
        Ok(())
    }

    /// Check the arguments and turn them into an [`UpdateConfig`]. Nothing is read and nothing is
    /// sent if this fails. A bare label key is looked up with `env`.
    fn into_config<E>(self, env: E) -> Result<UpdateConfig>
    where
        E: Fn(&str) -> Option<String>,
    {
        ensure!(
            !self.name.is_empty(),
            error::ConfigurationSnafu {
                message: "The secret name must not be empty",
            }
        );
        let file = self
            .file
            .filter(|file| !file.is_empty())
            .context(error::ConfigurationSnafu {
                message: "Please specify either a file name or STDIN ('-') with --file",
            })?;
        Ok(UpdateConfig {
            name: self.name,
            source: ContentSource::from_arg(&file),
            labels: self
                .labels
                .into_iter()
                .map(|token| resolve_label(token, &env))
                .collect(),
        })
    }
}

/// A bare `key` takes the value of the environment variable of the same name, if it is set.
fn resolve_label<E>(token: String, env: &E) -> String
where
    E: Fn(&str) -> Option<String>,
{
    if token.contains('=') {
        return token;
    }
    match env(&token) {
        Some(value) => format!("{}={}", token, value),
        None => token,
    }
}

/// The validated settings of a single `secret update` invocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct UpdateConfig {
    name: String,
    source: ContentSource,
    labels: Vec<String>,
}

impl UpdateConfig {
    /// Read the secret content and combine it with the name and labels.
    fn secret_spec<R>(&self, stdin: &mut R) -> Result<SecretSpec>
    where
        R: Read + ?Sized,
    {
        let data = read_content(&self.source, stdin)?;
        let labels = labels_from_tokens(&self.labels);
        debug!(
            "Assembled secret '{}' with {} label(s)",
            self.name,
            labels.len()
        );
        Ok(SecretSpec::new(self.name.as_str(), labels, data))
    }

    /// Read the content, submit the secret and write the assigned id to `out`.
    ///
    /// `connect` is only called once the content has been read, so a bad source never reaches the
    /// cluster.
    async fn execute<A, F, Fut, R, W>(
        &self,
        ctx: &ExecutionContext,
        stdin: &mut R,
        out: &mut W,
        connect: F,
    ) -> Result<SecretId>
    where
        A: SecretApi,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<A>>,
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let spec = self.secret_spec(stdin)?;
        let api = connect().await?;
        let id = submit_secret(ctx, &api, spec)
            .await
            .context(error::ApiSnafu)?;
        report_id(out, &id)?;
        Ok(id)
    }
}

/// Write `id` and a newline, nothing else.
fn report_id<W>(out: &mut W, id: &SecretId) -> Result<()>
where
    W: Write + ?Sized,
{
    writeln!(out, "{}", id).context(error::WriteSnafu)?;
    out.flush().context(error::WriteSnafu)
}

/// Accepts `key=value` or a bare `key`. The key must be non-empty and free of whitespace.
fn parse_label(token: &str) -> std::result::Result<String, String> {
    let (key, _) = split_label(token);
    if key.is_empty() {
        return Err(format!("invalid label '{}': the key is empty", token));
    }
    if key.contains(char::is_whitespace) {
        return Err(format!("invalid label '{}': the key contains whitespace", key));
    }
    Ok(token.to_string())
}
