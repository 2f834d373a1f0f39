//! Registered routes and models, and the base description derived from them.

use crate::config::AppConfig;
use crate::models::{HealthStatus, Message, Product, UserBase, UserCreate, UserResponse};
use apidocs_openapi::{
    DescriptionSource, OpenApiBuilder, OpenApiOperation, OpenApiParameter, OpenApiPath,
    OpenApiSchema, Result,
};
use schemars::generate::SchemaSettings;
use serde_json::{Value, json};

pub const HEALTH: &str = "/";
pub const USERS: &str = "/users";
pub const USER: &str = "/users/{user_id}";
pub const PRODUCTS: &str = "/products";

/// Every path the API router serves, documentation endpoints excluded.
pub const ROUTE_PATHS: &[&str] = &[HEALTH, USERS, USER, PRODUCTS];

pub const TAG_USERS: &str = "Users";
pub const TAG_PRODUCTS: &str = "Products";
pub const TAG_HEALTH: &str = "Health";

/// Title, description and version written into `info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

impl ApiInfo {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: (!config.description.is_empty()).then(|| config.description.clone()),
            version: config.version.clone(),
        }
    }
}

/// The routes and models known to the application.
///
/// Deriving the base document is a pure transformation of this catalog.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    info: ApiInfo,
    routes: Vec<OpenApiPath>,
    models: Vec<OpenApiSchema>,
}

impl RouteCatalog {
    /// An empty catalog.
    pub fn new(info: ApiInfo) -> Self {
        Self {
            info,
            routes: Vec::new(),
            models: Vec::new(),
        }
    }

    /// The catalog of everything the API router serves.
    pub fn standard(info: ApiInfo) -> Self {
        Self::new(info).routes(api_routes()).models(model_schemas())
    }

    pub fn routes(mut self, routes: impl IntoIterator<Item = OpenApiPath>) -> Self {
        self.routes.extend(routes);
        self
    }

    pub fn model(mut self, model: OpenApiSchema) -> Self {
        self.models.push(model);
        self
    }

    pub fn models(mut self, models: impl IntoIterator<Item = OpenApiSchema>) -> Self {
        self.models.extend(models);
        self
    }
}

impl DescriptionSource for RouteCatalog {
    fn derive_base(&self) -> Result<Value> {
        let mut builder = OpenApiBuilder::new()
            .title(&self.info.title)
            .version(&self.info.version);
        if let Some(description) = &self.info.description {
            builder = builder.description(description);
        }

        let doc = builder
            .merge_paths(self.routes.iter().cloned())?
            .merge_schemas(self.models.iter().cloned())?
            .build();

        tracing::debug!(
            routes = self.routes.len(),
            models = self.models.len(),
            "derived base API description"
        );
        Ok(doc)
    }
}

/// JSON schemas for every model, keyed by type name, in OpenAPI 3.0 dialect.
pub fn model_schemas() -> Vec<OpenApiSchema> {
    let mut generator = SchemaSettings::openapi3().into_generator();
    generator.subschema_for::<UserBase>();
    generator.subschema_for::<UserCreate>();
    generator.subschema_for::<UserResponse>();
    generator.subschema_for::<Product>();
    generator.subschema_for::<HealthStatus>();
    generator.subschema_for::<Message>();

    let mut schemas: Vec<OpenApiSchema> = generator
        .take_definitions(true)
        .into_iter()
        .map(|(name, schema)| OpenApiSchema::new(name, schema))
        .collect();
    schemas.push(OpenApiSchema::new("ErrorResponse", error_response_schema()));
    schemas
}

fn error_response_schema() -> Value {
    json!({
        "type": "object",
        "required": ["code", "message"],
        "properties": {
            "code": {
                "type": "string",
                "enum": ["INVALID_INPUT", "NOT_FOUND", "UNPROCESSABLE", "INTERNAL"]
            },
            "message": { "type": "string" },
            "details": {}
        }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": OpenApiSchema::reference("ErrorResponse") }
        }
    })
}

fn user_id_param(description: &str) -> OpenApiParameter {
    OpenApiParameter::path("user_id")
        .with_schema(json!({"type": "integer", "format": "int64", "minimum": 1}))
        .with_description(description)
}

/// Operations served by the API router.
pub fn api_routes() -> Vec<OpenApiPath> {
    vec![
        OpenApiPath::new(HEALTH, "get").with_operation(
            OpenApiOperation::new("Root")
                .with_id("root")
                .with_tag(TAG_HEALTH)
                .with_description("Health check endpoint")
                .with_json_response("200", "Service is healthy", OpenApiSchema::reference("HealthStatus")),
        ),
        OpenApiPath::new(USERS, "get").with_operation(
            OpenApiOperation::new("Get users")
                .with_id("get_users")
                .with_tag(TAG_USERS)
                .with_description("Retrieve all users with pagination.")
                .with_parameter(
                    OpenApiParameter::query("skip", false)
                        .with_schema(json!({"type": "integer", "minimum": 0, "default": 0}))
                        .with_description("Number of records to skip"),
                )
                .with_parameter(
                    OpenApiParameter::query("limit", false)
                        .with_schema(json!({"type": "integer", "minimum": 0, "default": 10}))
                        .with_description("Maximum number of records to return"),
                )
                .with_json_response("200", "Successful Response", OpenApiSchema::array_of("UserResponse")),
        ),
        OpenApiPath::new(USER, "get").with_operation(
            OpenApiOperation::new("Get user")
                .with_id("get_user")
                .with_tag(TAG_USERS)
                .with_description("Get a specific user by ID.")
                .with_parameter(user_id_param("The ID of the user to retrieve"))
                .with_json_response("200", "Successful Response", OpenApiSchema::reference("UserResponse"))
                .with_response("404", error_response("User not found"))
                .with_response("422", error_response("Validation Error")),
        ),
        OpenApiPath::new(USERS, "post").with_operation(
            OpenApiOperation::new("Create user")
                .with_id("create_user")
                .with_tag(TAG_USERS)
                .with_description("Create a new user.")
                .with_json_body(OpenApiSchema::reference("UserCreate"))
                .with_json_response("201", "Successful Response", OpenApiSchema::reference("UserResponse"))
                .with_response("422", error_response("Validation Error")),
        ),
        OpenApiPath::new(USER, "put").with_operation(
            OpenApiOperation::new("Update user")
                .with_id("update_user")
                .with_tag(TAG_USERS)
                .with_description("Update an existing user.")
                .with_parameter(user_id_param("The ID of the user to update"))
                .with_json_body(OpenApiSchema::reference("UserBase"))
                .with_json_response("200", "Successful Response", OpenApiSchema::reference("UserResponse")),
        ),
        OpenApiPath::new(USER, "delete").with_operation(
            OpenApiOperation::new("Delete user")
                .with_id("delete_user")
                .with_tag(TAG_USERS)
                .with_description("Delete a user by ID.")
                .with_parameter(user_id_param("The ID of the user to delete"))
                .with_json_response("200", "Successful Response", OpenApiSchema::reference("Message")),
        ),
        OpenApiPath::new(PRODUCTS, "get").with_operation(
            OpenApiOperation::new("Get products")
                .with_id("get_products")
                .with_tag(TAG_PRODUCTS)
                .with_description("Get all products, optionally filtered by category.")
                .with_parameter(
                    OpenApiParameter::query("category", false).with_description("Filter by category"),
                )
                .with_json_response("200", "Successful Response", OpenApiSchema::array_of("Product")),
        ),
    ]
}
