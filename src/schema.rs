use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

/// Provider-neutral description of a tool's argument shape.
///
/// A recursive tree mirroring JSON Schema: object nodes carry `properties`
/// and `required`, array nodes carry `items`, leaf nodes carry a type tag
/// plus an optional description and enum. The registry does not enforce
/// provider-specific constraints beyond this shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub kind: String,
    pub description: String,
    pub properties: BTreeMap<String, Schema>,
    pub required: Vec<String>,
    pub items: Option<Box<Schema>>,
    pub enum_values: Vec<Value>,
}

impl Schema {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn object() -> Self {
        Self::new("object")
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new("string").with_description(description)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn with_required(mut self, names: &[&str]) -> Self {
        self.required = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_items(mut self, items: Schema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| json!(v)).collect();
        self
    }
}

/// Lower a schema tree into the JSON-schema-like object the provider's
/// function-calling format expects.
///
/// Pure and deterministic. Empty fields are omitted rather than emitted as
/// empty placeholders. This is the only seam between the schema model and a
/// provider dialect; a different provider gets a different translator, not a
/// different `Schema`.
pub fn to_provider_value(schema: &Schema) -> Value {
    let mut out = Map::new();

    if !schema.kind.is_empty() {
        out.insert("type".to_string(), json!(schema.kind));
    }
    if !schema.description.is_empty() {
        out.insert("description".to_string(), json!(schema.description));
    }
    if !schema.enum_values.is_empty() {
        out.insert("enum".to_string(), Value::Array(schema.enum_values.clone()));
    }
    if !schema.required.is_empty() {
        out.insert("required".to_string(), json!(schema.required));
    }
    if !schema.properties.is_empty() {
        let mut properties = Map::new();
        for (name, child) in &schema.properties {
            properties.insert(name.clone(), to_provider_value(child));
        }
        out.insert("properties".to_string(), Value::Object(properties));
    }
    if let Some(items) = &schema.items {
        out.insert("items".to_string(), to_provider_value(items));
    }

    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_omitted() {
        let schema = Schema::new("string");
        let value = to_provider_value(&schema);

        assert_eq!(value, json!({ "type": "string" }));
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("properties"));
        assert!(!obj.contains_key("required"));
        assert!(!obj.contains_key("items"));
        assert!(!obj.contains_key("enum"));
    }

    #[test]
    fn nested_properties_are_preserved() {
        let schema = Schema::object()
            .with_property(
                "operation",
                Schema::string("The operation to perform").with_enum(&["add", "subtract"]),
            )
            .with_property("a", Schema::string("First number"))
            .with_required(&["operation", "a"]);

        let value = to_provider_value(&schema);

        assert_eq!(value["type"], "object");
        assert_eq!(value["required"], json!(["operation", "a"]));
        assert_eq!(value["properties"]["a"]["type"], "string");
        assert_eq!(value["properties"]["a"]["description"], "First number");
        assert_eq!(
            value["properties"]["operation"]["enum"],
            json!(["add", "subtract"])
        );
    }

    #[test]
    fn items_recurse_for_array_schemas() {
        let schema = Schema::new("array").with_items(
            Schema::object()
                .with_property("name", Schema::string("Entry name"))
                .with_required(&["name"]),
        );

        let value = to_provider_value(&schema);

        assert_eq!(value["type"], "array");
        assert_eq!(value["items"]["type"], "object");
        assert_eq!(value["items"]["required"], json!(["name"]));
        assert_eq!(value["items"]["properties"]["name"]["type"], "string");
    }

    #[test]
    fn translation_is_deterministic() {
        let schema = Schema::object()
            .with_property("b", Schema::string("second"))
            .with_property("a", Schema::string("first"));

        assert_eq!(to_provider_value(&schema), to_provider_value(&schema));
    }
}
