pub(crate) mod error;
mod secret_client;

pub use error::{Error, Result};
pub use secret_client::{submit_secret, SecretApi, SecretClient};
