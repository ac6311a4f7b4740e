/// Helper macro to avoid retyping the base domain-like name of our system when creating further
/// string constants from it. When given no parameters, this returns the base domain-like name of
/// the system. When given a string literal parameter it adds `/parameter` to the end.
macro_rules! secretsys {
    () => {
        "secretsys.dev"
    };
    ($s:literal) => {
        concat!(secretsys!(), "/", $s)
    };
}

// System identifiers
pub const DEFAULT_NAMESPACE: &str = "default";

// Secret layout
/// The key under which the raw secret content is stored in the Kubernetes `Secret` data map.
pub const SECRET_DATA_KEY: &str = "content";
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// Passed to `--file` to read secret content from standard input instead of a file.
pub const STDIN_MARKER: &str = "-";

// Field manager recorded by the API server for objects this tool writes.
pub const FIELD_MANAGER: &str = secretsys!("cli");

#[test]
fn secretsys_constants_macro_test() {
    assert_eq!("secretsys.dev", secretsys!());
    assert_eq!("secretsys.dev/cli", FIELD_MANAGER);
}
