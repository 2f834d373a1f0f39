//! Static metadata fragments merged into the base document.

use crate::Result;
use crate::error::OpenApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A tag declaration (`{name, description}`) used to group operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A server declaration (`{url, description}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// A security scheme definition, serialized the way OpenAPI spells it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "http", rename_all = "camelCase")]
    Http {
        scheme: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        flows: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "openIdConnect", rename_all = "camelCase")]
    OpenIdConnect {
        open_id_connect_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl SecurityScheme {
    /// HTTP bearer authentication with a token format hint such as `JWT`.
    pub fn bearer(format: impl Into<String>) -> Self {
        SecurityScheme::Http {
            scheme: "bearer".to_string(),
            bearer_format: Some(format.into()),
            description: None,
        }
    }

    /// An API key carried in a header.
    pub fn api_key_header(name: impl Into<String>) -> Self {
        SecurityScheme::ApiKey {
            name: name.into(),
            location: ApiKeyLocation::Header,
            description: None,
        }
    }
}

/// The static metadata merged into every assembled document.
///
/// Merge rules:
/// - `tags` are keyed by `name` and `servers` by `url`: a matching entry in the
///   base document is replaced, anything else is appended.
/// - `security_schemes` go under `components.securitySchemes`, creating the
///   intermediate objects when absent. Same-name schemes are replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Metadata {
    pub tags: Vec<Tag>,
    pub servers: Vec<Server>,
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn security_scheme(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.security_schemes.insert(name.into(), scheme);
        self
    }

    /// Merge the fragments into `doc`.
    ///
    /// On error `doc` may be partially modified and should be discarded.
    pub fn merge_into(&self, doc: &mut Value) -> Result<()> {
        let root = doc
            .as_object_mut()
            .ok_or_else(|| OpenApiError::invalid("description document must be a JSON object"))?;

        if !self.tags.is_empty() {
            let tags = self
                .tags
                .iter()
                .map(serde_json::to_value)
                .collect::<serde_json::Result<Vec<_>>>()?;
            merge_keyed(root, "tags", "name", tags)?;
        }

        if !self.servers.is_empty() {
            let servers = self
                .servers
                .iter()
                .map(serde_json::to_value)
                .collect::<serde_json::Result<Vec<_>>>()?;
            merge_keyed(root, "servers", "url", servers)?;
        }

        if !self.security_schemes.is_empty() {
            let components = object_entry(root, "components")?;
            let schemes = object_entry(components, "securitySchemes")?;
            for (name, scheme) in &self.security_schemes {
                schemes.insert(name.clone(), serde_json::to_value(scheme)?);
            }
        }

        Ok(())
    }
}

/// Get `parent[key]` as an object, inserting an empty one when absent.
fn object_entry<'a>(parent: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Map<String, Value>> {
    parent
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| OpenApiError::invalid(format!("`{key}` must be an object")))
}

fn merge_keyed(
    root: &mut Map<String, Value>,
    key: &str,
    id_field: &str,
    entries: Vec<Value>,
) -> Result<()> {
    let list = root
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| OpenApiError::invalid(format!("`{key}` must be an array")))?;

    for entry in entries {
        let id = entry.get(id_field).cloned();
        match list.iter_mut().find(|existing| existing.get(id_field) == id.as_ref()) {
            Some(existing) => *existing = entry,
            None => list.push(entry),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Metadata {
        Metadata::new()
            .tag(Tag::new("Users").with_description("Operations with users"))
            .server(Server::new("http://localhost:8000").with_description("Dev server"))
            .security_scheme("ApiKey", SecurityScheme::api_key_header("X-API-Key"))
    }

    #[test]
    fn test_merge_into_empty_document() {
        let mut doc = json!({});
        sample().merge_into(&mut doc).unwrap();

        assert_eq!(
            doc["tags"],
            json!([{"name": "Users", "description": "Operations with users"}])
        );
        assert_eq!(
            doc["servers"],
            json!([{"url": "http://localhost:8000", "description": "Dev server"}])
        );
        assert_eq!(
            doc["components"]["securitySchemes"]["ApiKey"],
            json!({"type": "apiKey", "name": "X-API-Key", "in": "header"})
        );
    }

    #[test]
    fn test_merge_keeps_existing_components() {
        let mut doc = json!({
            "components": {"schemas": {"Product": {"type": "object"}}}
        });
        sample().merge_into(&mut doc).unwrap();

        assert!(doc["components"]["schemas"]["Product"].is_object());
        assert!(doc["components"]["securitySchemes"]["ApiKey"].is_object());
    }

    #[test]
    fn test_merge_replaces_same_name_and_appends_new() {
        let mut doc = json!({
            "tags": [
                {"name": "Users"},
                {"name": "Legacy", "description": "Old endpoints"}
            ],
            "servers": [{"url": "http://localhost:8000"}]
        });
        let metadata = Metadata::new()
            .tag(Tag::new("Users").with_description("Operations with users"))
            .tag(Tag::new("Health"))
            .server(Server::new("https://api.example.com"));

        metadata.merge_into(&mut doc).unwrap();

        assert_eq!(
            doc["tags"],
            json!([
                {"name": "Users", "description": "Operations with users"},
                {"name": "Legacy", "description": "Old endpoints"},
                {"name": "Health"}
            ])
        );
        assert_eq!(
            doc["servers"],
            json!([
                {"url": "http://localhost:8000"},
                {"url": "https://api.example.com"}
            ])
        );
    }

    #[test]
    fn test_empty_metadata_leaves_document_untouched() {
        let mut doc = json!({"openapi": "3.0.3"});
        Metadata::new().merge_into(&mut doc).unwrap();
        assert_eq!(doc, json!({"openapi": "3.0.3"}));
    }

    #[test]
    fn test_non_object_document_is_invalid() {
        let mut doc = json!([]);
        let err = sample().merge_into(&mut doc).unwrap_err();
        assert!(matches!(err, OpenApiError::InvalidSpec { .. }));
    }

    #[test]
    fn test_wrong_member_types_are_invalid() {
        let mut doc = json!({"tags": "Users"});
        assert!(sample().merge_into(&mut doc).is_err());

        let mut doc = json!({"components": []});
        let metadata = Metadata::new().security_scheme("BearerAuth", SecurityScheme::bearer("JWT"));
        assert!(metadata.merge_into(&mut doc).is_err());
    }

    #[test]
    fn test_security_scheme_wire_format() {
        assert_eq!(
            serde_json::to_value(SecurityScheme::bearer("JWT")).unwrap(),
            json!({"type": "http", "scheme": "bearer", "bearerFormat": "JWT"})
        );

        let parsed: SecurityScheme = serde_json::from_value(json!({
            "type": "openIdConnect",
            "openIdConnectUrl": "https://example.com/.well-known/openid-configuration"
        }))
        .unwrap();
        assert!(matches!(parsed, SecurityScheme::OpenIdConnect { .. }));
    }
}
