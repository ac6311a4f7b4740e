/*!

This library provides the secret specification sent to a cluster and the API client used to submit
it.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use context::ExecutionContext;
pub use secret::{labels_from_tokens, split_label, SecretId, SecretSpec};

pub mod clients;
pub mod constants;
mod context;
mod secret;
