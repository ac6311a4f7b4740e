use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// The complete payload submitted to a cluster to create or refresh a secret.
///
/// A `SecretSpec` is built once per invocation and is moved into the submission call, so it cannot
/// be submitted twice.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SecretSpec {
    /// The name of the secret. Uniqueness is decided by the server.
    pub name: String,
    /// User-defined key/value tags attached to the secret.
    pub labels: BTreeMap<String, String>,
    /// The secret content. It is never inspected or transformed.
    pub data: Vec<u8>,
}

impl SecretSpec {
    pub fn new<S>(name: S, labels: BTreeMap<String, String>, data: Vec<u8>) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            labels,
            data,
        }
    }
}

/// The opaque identifier a server assigns to a secret it accepted.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SecretId(String);

impl SecretId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SecretId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl AsRef<str> for SecretId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Split a `key=value` token at the first `=`. A token without `=` is a key with an empty value.
pub fn split_label(token: &str) -> (&str, &str) {
    token.split_once('=').unwrap_or((token, ""))
}

/// Build a label map from `key=value` tokens.
///
/// When a key appears more than once, the value from the later token replaces the earlier one.
pub fn labels_from_tokens<I, S>(tokens: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut labels = BTreeMap::new();
    for token in tokens {
        let (key, value) = split_label(token.as_ref());
        // Last one wins.
        labels.insert(key.to_owned(), value.to_owned());
    }
    labels
}

#[cfg(test)]
mod test {
    use super::*;
    use maplit::btreemap;

    #[test]
    fn duplicate_label_last_wins() {
        let labels = labels_from_tokens(["a=1", "a=2"]);
        assert_eq!(labels, btreemap! { "a".to_string() => "2".to_string() });
    }

    #[test]
    fn empty_tokens_empty_map() {
        let labels = labels_from_tokens(Vec::<String>::new());
        assert!(labels.is_empty());
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        let labels = labels_from_tokens(["url=http://x?a=b", "env=prod", "flag"]);
        assert_eq!(
            labels,
            btreemap! {
                "env".to_string() => "prod".to_string(),
                "flag".to_string() => "".to_string(),
                "url".to_string() => "http://x?a=b".to_string(),
            }
        );
    }

    #[test]
    fn assemble_spec() {
        let spec = SecretSpec::new(
            "db-pass",
            labels_from_tokens(["env=prod"]),
            b"hunter2".to_vec(),
        );
        assert_eq!(spec.name, "db-pass");
        assert_eq!(spec.labels.get("env").map(String::as_str), Some("prod"));
        assert_eq!(spec.data, b"hunter2");
    }
}
