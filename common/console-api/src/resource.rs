use serde::{Deserialize, Serialize};
use std::fmt::Display;
use typed_builder::TypedBuilder;

/// A header, query parameter, or variable entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(TypedBuilder, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    #[builder(setter(into))]
    #[serde(rename = "namespace-account-id")]
    pub id: String,
    #[builder(setter(into))]
    #[serde(rename = "namespace-account-name", default)]
    pub name: String,
    #[builder(default)]
    #[serde(rename = "namespace-account-header", default)]
    pub headers: Vec<KeyValue>,
    #[builder(default)]
    #[serde(default)]
    pub variables: Vec<KeyValue>,
    #[builder(default)]
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(TypedBuilder, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Method {
    #[builder(setter(into))]
    #[serde(rename = "namespace-method-id")]
    pub id: String,
    #[builder(setter(into))]
    #[serde(rename = "namespace-method-name", default)]
    pub name: String,
    /// The HTTP verb, e.g. `GET`
    #[builder(default = "GET".to_string(), setter(into))]
    #[serde(rename = "namespace-method-type", default)]
    pub method_type: String,
    #[builder(default)]
    #[serde(rename = "namespace-method-queryParams", default)]
    pub query_params: Vec<KeyValue>,
    #[builder(default)]
    #[serde(rename = "namespace-method-header", default)]
    pub headers: Vec<KeyValue>,
    #[builder(default)]
    #[serde(rename = "save-data", default)]
    pub save_data: bool,
}

#[derive(TypedBuilder, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    #[serde(rename = "schemaName", default)]
    pub name: String,
    /// The JSON-Schema body
    #[builder(default)]
    #[serde(default)]
    pub schema: serde_json::Value,
}

#[derive(TypedBuilder, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Webhook {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    #[serde(rename = "webhookName", default)]
    pub name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub url: String,
}

#[derive(TypedBuilder, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Lambda {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    #[serde(rename = "functionName", default)]
    pub function_name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub runtime: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub handler: String,
    /// Memory in megabytes
    #[builder(default = 128)]
    #[serde(default = "default_memory")]
    pub memory: u32,
    /// Timeout in seconds
    #[builder(default = 3)]
    #[serde(default = "default_timeout")]
    pub timeout: u32,
}

fn default_memory() -> u32 {
    128
}

fn default_timeout() -> u32 {
    3
}

/// The resource kinds scoped under a namespace
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Account,
    Method,
    Schema,
    Webhook,
    Lambda,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Account,
        ResourceKind::Method,
        ResourceKind::Schema,
        ResourceKind::Webhook,
        ResourceKind::Lambda,
    ];

    /// The REST collection segment, e.g. `accounts`
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Account => "accounts",
            ResourceKind::Method => "methods",
            ResourceKind::Schema => "schemas",
            ResourceKind::Webhook => "webhooks",
            ResourceKind::Lambda => "lambdas",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Account => "account",
            ResourceKind::Method => "method",
            ResourceKind::Schema => "schema",
            ResourceKind::Webhook => "webhook",
            ResourceKind::Lambda => "lambda",
        };

        f.write_str(name)
    }
}

/// Any namespace-scoped entity
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Resource {
    Account(Account),
    Method(Method),
    Schema(Schema),
    Webhook(Webhook),
    Lambda(Lambda),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Account(_) => ResourceKind::Account,
            Resource::Method(_) => ResourceKind::Method,
            Resource::Schema(_) => ResourceKind::Schema,
            Resource::Webhook(_) => ResourceKind::Webhook,
            Resource::Lambda(_) => ResourceKind::Lambda,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::Account(account) => account.id.as_str(),
            Resource::Method(method) => method.id.as_str(),
            Resource::Schema(schema) => schema.id.as_str(),
            Resource::Webhook(webhook) => webhook.id.as_str(),
            Resource::Lambda(lambda) => lambda.id.as_str(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Account(account) => account.name.as_str(),
            Resource::Method(method) => method.name.as_str(),
            Resource::Schema(schema) => schema.name.as_str(),
            Resource::Webhook(webhook) => webhook.name.as_str(),
            Resource::Lambda(lambda) => lambda.function_name.as_str(),
        }
    }
}

/// The per-namespace resource caches populated by `fetch_namespace_details`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceDetails {
    pub accounts: Vec<Account>,
    pub methods: Vec<Method>,
    pub schemas: Vec<Schema>,
    pub webhooks: Vec<Webhook>,
    pub lambdas: Vec<Lambda>,
}

impl NamespaceDetails {
    pub fn len(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Account => self.accounts.len(),
            ResourceKind::Method => self.methods.len(),
            ResourceKind::Schema => self.schemas.len(),
            ResourceKind::Webhook => self.webhooks.len(),
            ResourceKind::Lambda => self.lambdas.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        ResourceKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Finds a cached entity by kind and id
    pub fn find(&self, kind: ResourceKind, id: &str) -> Option<Resource> {
        match kind {
            ResourceKind::Account => self
                .accounts
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .map(Resource::Account),
            ResourceKind::Method => self
                .methods
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .map(Resource::Method),
            ResourceKind::Schema => self
                .schemas
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .map(Resource::Schema),
            ResourceKind::Webhook => self
                .webhooks
                .iter()
                .find(|w| w.id == id)
                .cloned()
                .map(Resource::Webhook),
            ResourceKind::Lambda => self
                .lambdas
                .iter()
                .find(|l| l.id == id)
                .cloned()
                .map(Resource::Lambda),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn account_backend_fields() -> anyhow::Result<()> {
        let json = r#"{
            "namespace-account-id": "a1",
            "namespace-account-name": "billing",
            "namespace-account-header": [{"key": "x-token", "value": "abc"}],
            "variables": [],
            "tags": ["prod"]
        }"#;

        let account: Account = serde_json::from_str(json)?;
        let expected = Account::builder()
            .id("a1")
            .name("billing")
            .headers(vec![KeyValue::new("x-token", "abc")])
            .tags(vec!["prod".to_string()])
            .build();

        assert_eq!(expected, account);
        Ok(())
    }

    #[test]
    fn method_save_data_defaults_false() -> anyhow::Result<()> {
        let json = r#"{"namespace-method-id": "m1", "namespace-method-name": "list", "namespace-method-type": "POST"}"#;
        let method: Method = serde_json::from_str(json)?;

        assert_eq!("POST", method.method_type);
        assert!(!method.save_data);
        assert!(method.query_params.is_empty());
        Ok(())
    }

    #[test]
    fn lambda_defaults() -> anyhow::Result<()> {
        let json = r#"{"id": "l1", "functionName": "resize", "runtime": "nodejs18.x", "handler": "index.handler"}"#;
        let lambda: Lambda = serde_json::from_str(json)?;

        assert_eq!(128, lambda.memory);
        assert_eq!(3, lambda.timeout);
        assert_eq!("resize", Resource::Lambda(lambda).name());
        Ok(())
    }

    #[test]
    fn details_find() {
        let mut details = NamespaceDetails::default();
        assert!(details.is_empty());

        details
            .methods
            .push(Method::builder().id("m1").name("list").build());

        assert_eq!(1, details.len(ResourceKind::Method));
        assert_eq!(
            Some("list"),
            details
                .find(ResourceKind::Method, "m1")
                .as_ref()
                .map(Resource::name)
        );
        assert_eq!(None, details.find(ResourceKind::Account, "m1"));
    }
}
