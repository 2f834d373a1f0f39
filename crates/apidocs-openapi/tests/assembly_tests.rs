//! End-to-end assembly: typed routes and models through the builder, metadata
//! merged on top, result cached.

use apidocs_openapi::{
    DescriptionSource, Metadata, OpenApiBuilder, OpenApiError, OpenApiOperation, OpenApiPath,
    OpenApiSchema, Result, SchemaAssembler, SecurityScheme, Server, Tag,
};
use serde_json::{Value, json};
use std::sync::Mutex;

struct Registry {
    routes: Vec<OpenApiPath>,
    models: Mutex<Vec<OpenApiSchema>>,
}

impl DescriptionSource for Registry {
    fn derive_base(&self) -> Result<Value> {
        let models = self.models.lock().unwrap().clone();
        Ok(OpenApiBuilder::new()
            .title("My API")
            .version("1.0.0")
            .merge_paths(self.routes.clone())?
            .merge_schemas(models)?
            .build())
    }
}

fn registry(models: Vec<OpenApiSchema>) -> Registry {
    Registry {
        routes: vec![
            OpenApiPath::new("/users", "get")
                .with_operation(OpenApiOperation::new("Get users").with_tag("Users")),
        ],
        models: Mutex::new(models),
    }
}

fn metadata() -> Metadata {
    Metadata::new()
        .tag(Tag::new("Users").with_description("Operations with users"))
        .server(Server::new("http://localhost:8000").with_description("Dev server"))
        .security_scheme("BearerAuth", SecurityScheme::bearer("JWT"))
}

#[test]
fn test_assembled_document() {
    let assembler = SchemaAssembler::new(
        registry(vec![OpenApiSchema::new("Product", json!({"type": "object"}))]),
        metadata(),
    );
    let doc = assembler.get_description().unwrap();

    assert_eq!(doc["info"]["title"], "My API");
    assert_eq!(doc["paths"]["/users"]["get"]["tags"], json!(["Users"]));
    assert_eq!(doc["tags"][0]["name"], "Users");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:8000");
    // Merged next to the derived schemas, not in place of them
    assert!(doc["components"]["schemas"]["Product"].is_object());
    assert_eq!(
        doc["components"]["securitySchemes"]["BearerAuth"]["bearerFormat"],
        "JWT"
    );
}

#[test]
fn test_recovers_after_upstream_is_fixed() {
    let source = registry(vec![
        OpenApiSchema::new("Product", json!({"type": "object"})),
        OpenApiSchema::new("Product", json!({"type": "string"})),
    ]);
    let assembler = SchemaAssembler::new(source, metadata());

    let err = assembler.get_description().unwrap_err();
    assert!(matches!(err, OpenApiError::DescriptionGenerationFailed(_)));
    assert!(!assembler.is_cached());

    assembler.source().models.lock().unwrap().pop();
    let doc = assembler.get_description().unwrap();
    assert_eq!(doc["components"]["schemas"]["Product"]["type"], "object");
    assert!(assembler.is_cached());
}

#[test]
fn test_document_is_fixed_once_stored() {
    let assembler = SchemaAssembler::new(registry(Vec::new()), metadata());
    let first = assembler.get_description().unwrap();

    assembler
        .source()
        .models
        .lock()
        .unwrap()
        .push(OpenApiSchema::new("Late", json!({"type": "object"})));

    let second = assembler.get_description().unwrap();
    assert_eq!(first, second);
    assert!(second["components"]["schemas"].get("Late").is_none());
}
