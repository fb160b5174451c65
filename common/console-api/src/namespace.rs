use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The backend identifier of a namespace
#[derive(Serialize, Deserialize, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NamespaceId(pub String);

impl NamespaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NamespaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for NamespaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A namespace, as returned by the backend catalog.
///
/// Page records carry a clone of this as their namespace reference.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    #[serde(rename = "namespace-id")]
    pub id: NamespaceId,
    #[serde(rename = "namespace-name", default)]
    pub name: String,
    #[serde(rename = "namespace-url", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The namespace reference held by tabs and pages
pub type NamespaceRef = Namespace;

impl Namespace {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NamespaceId(id.into()),
            name: name.into(),
            url: None,
        }
    }

    /// The label shown on the namespace tab.  Falls back to the id for unnamed namespaces.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            self.name.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Namespace;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_backend_fields() -> anyhow::Result<()> {
        let json = r#"{"namespace-id":"ns1","namespace-name":"NS One","namespace-url":"https://ns1.example"}"#;
        let namespace: Namespace = serde_json::from_str(json)?;

        assert_eq!("ns1", namespace.id.as_str());
        assert_eq!("NS One", namespace.name);
        assert_eq!(Some("https://ns1.example".to_string()), namespace.url);

        Ok(())
    }

    #[test]
    fn label_falls_back_to_id() {
        let namespace = Namespace::new("ns1", "");
        assert_eq!("ns1", namespace.label());
    }
}
