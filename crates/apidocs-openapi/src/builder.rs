//! Base document builder: routes and models in, OpenAPI document out.

use crate::Result;
use crate::error::OpenApiError;
use crate::types::{OpenApiPath, OpenApiSchema};
use serde_json::{Map, Value};

/// OpenAPI version written into every built document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Builder for the base description document.
///
/// # Example
///
/// ```ignore
/// use apidocs_openapi::OpenApiBuilder;
///
/// let spec = OpenApiBuilder::new()
///     .title("My API")
///     .version("1.0.0")
///     .merge_paths(routes)?
///     .merge_schemas(models)?
///     .build();
/// ```
///
/// # Conflict Resolution
///
/// - **Paths**: Last write wins (later merges override earlier ones for same path+method).
/// - **Schemas**: Identical schemas are deduplicated; different schemas with same name cause an error.
#[derive(Debug, Clone, Default)]
pub struct OpenApiBuilder {
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    paths: Map<String, Value>,
    schemas: Map<String, Value>,
}

impl OpenApiBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the API version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the API description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Merge typed paths.
    pub fn merge_paths(mut self, paths: impl IntoIterator<Item = OpenApiPath>) -> Result<Self> {
        for path_def in paths {
            let operation = serde_json::to_value(&path_def.operation)?;
            self.insert_operation(&path_def.path, &path_def.method.to_lowercase(), operation);
        }
        Ok(self)
    }

    /// Merge typed schemas.
    pub fn merge_schemas(mut self, schemas: impl IntoIterator<Item = OpenApiSchema>) -> Result<Self> {
        for schema_def in schemas {
            self.merge_schema(schema_def.name, schema_def.schema)?;
        }
        Ok(self)
    }

    fn insert_operation(&mut self, path: &str, method: &str, operation: Value) {
        let path_entry = self
            .paths
            .entry(path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if let Some(path_obj) = path_entry.as_object_mut() {
            path_obj.insert(method.to_string(), operation);
        }
    }

    /// Merge a single schema with conflict detection.
    fn merge_schema(&mut self, name: String, schema: Value) -> Result<()> {
        match self.schemas.get(&name) {
            Some(existing) if existing != &schema => Err(OpenApiError::SchemaConflict { name }),
            Some(_) => Ok(()),
            None => {
                self.schemas.insert(name, schema);
                Ok(())
            }
        }
    }

    /// Build the base document.
    pub fn build(self) -> Value {
        let mut spec = Map::new();

        spec.insert(
            "openapi".to_string(),
            Value::String(OPENAPI_VERSION.to_string()),
        );

        let mut info = Map::new();
        info.insert(
            "title".to_string(),
            Value::String(self.title.unwrap_or_else(|| "API".to_string())),
        );
        info.insert(
            "version".to_string(),
            Value::String(self.version.unwrap_or_else(|| "0.1.0".to_string())),
        );
        if let Some(desc) = self.description {
            info.insert("description".to_string(), Value::String(desc));
        }
        spec.insert("info".to_string(), Value::Object(info));

        // OpenAPI requires `paths`, even when empty
        spec.insert("paths".to_string(), Value::Object(self.paths));

        if !self.schemas.is_empty() {
            let mut components = Map::new();
            components.insert("schemas".to_string(), Value::Object(self.schemas));
            spec.insert("components".to_string(), Value::Object(components));
        }

        Value::Object(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OpenApiOperation, OpenApiParameter};
    use serde_json::json;

    #[test]
    fn test_basic_builder() {
        let spec = OpenApiBuilder::new()
            .title("My API")
            .version("1.0.0")
            .description("API for managing users and products")
            .build();

        assert_eq!(spec["info"]["title"], "My API");
        assert_eq!(spec["info"]["version"], "1.0.0");
        assert_eq!(spec["info"]["description"], "API for managing users and products");
        assert_eq!(spec["openapi"], OPENAPI_VERSION);
        assert!(spec["paths"].as_object().unwrap().is_empty());
        assert!(spec.get("components").is_none());
    }

    #[test]
    fn test_defaults_without_info() {
        let spec = OpenApiBuilder::new().build();
        assert_eq!(spec["info"]["title"], "API");
        assert_eq!(spec["info"]["version"], "0.1.0");
        assert!(spec["info"].get("description").is_none());
    }

    #[test]
    fn test_path_override() {
        let combined = OpenApiBuilder::new()
            .merge_paths(vec![
                OpenApiPath::new("/users", "get").with_operation(OpenApiOperation::new("First")),
                OpenApiPath::new("/products", "get").with_operation(OpenApiOperation::new("Products")),
            ])
            .unwrap()
            .merge_paths(vec![
                OpenApiPath::new("/users", "get").with_operation(OpenApiOperation::new("Second")),
            ])
            .unwrap()
            .build();

        // Last write wins
        assert_eq!(combined["paths"]["/users"]["get"]["summary"], "Second");
        assert_eq!(combined["paths"]["/products"]["get"]["summary"], "Products");
    }

    #[test]
    fn test_schema_deduplication() {
        let schema = json!({"type": "object", "properties": {"email": {"type": "string"}}});

        let result = OpenApiBuilder::new().merge_schemas(vec![
            OpenApiSchema::new("UserBase", schema.clone()),
            OpenApiSchema::new("UserBase", schema),
        ]);
        assert!(result.is_ok());

        let combined = result.unwrap().build();
        assert!(combined["components"]["schemas"]["UserBase"].is_object());
    }

    #[test]
    fn test_schema_conflict() {
        let result = OpenApiBuilder::new().merge_schemas(vec![
            OpenApiSchema::new("User", json!({"type": "object", "properties": {"email": {"type": "string"}}})),
            OpenApiSchema::new("User", json!({"type": "object", "properties": {"id": {"type": "integer"}}})),
        ]);

        let err = result.unwrap_err();
        assert!(matches!(err, OpenApiError::SchemaConflict { name } if name == "User"));
    }

    #[test]
    fn test_merge_typed_paths() {
        let paths = vec![
            OpenApiPath::new("/users", "GET").with_operation(
                OpenApiOperation::new("Get users")
                    .with_id("get_users")
                    .with_parameter(OpenApiParameter::query("skip", false)),
            ),
            OpenApiPath::new("/users", "post")
                .with_operation(OpenApiOperation::new("Create user").with_id("create_user")),
        ];

        let spec = OpenApiBuilder::new()
            .title("Test")
            .merge_paths(paths)
            .unwrap()
            .build();

        assert_eq!(spec["paths"]["/users"]["get"]["summary"], "Get users");
        assert_eq!(spec["paths"]["/users"]["get"]["operationId"], "get_users");
        assert_eq!(spec["paths"]["/users"]["get"]["parameters"][0]["name"], "skip");
        assert_eq!(spec["paths"]["/users"]["post"]["summary"], "Create user");
    }
}
