//! Core data types describing an extracted API.
//!
//! [`ApiSchema`] is the only unit exchanged between extraction and every
//! consumer (code generation, export, advisors). Instances are built once,
//! either from a model reply or from client-supplied JSON, and then only read.

use serde::{Deserialize, Serialize};

/// A single parameter accepted by an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Identifier-like parameter name.
    pub name: String,
    /// Free-form type label ("string", "integer", ...). Not checked against a fixed set.
    #[serde(rename = "type")]
    pub param_type: String,
    /// Whether callers must supply the parameter.
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// One HTTP operation exposed by the documented API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// URL path, possibly containing `{placeholder}` segments.
    pub path: String,
    /// HTTP verb as written by the documentation (conventionally upper case).
    pub method: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered parameters. Order drives generated signature order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Opaque response shape, carried through unvalidated.
    #[serde(default)]
    pub response_schema: Option<serde_json::Value>,
}

impl Endpoint {
    /// True when the endpoint is a `GET` (exact, case-sensitive match).
    ///
    /// Query-string vs body placement everywhere in the crate keys off this.
    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}

/// Structured description of a documented API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSchema {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Expected to look like `scheme://host[/prefix]`. Not validated here.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Ordered endpoints. Duplicate method+path pairs are legal.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl ApiSchema {
    /// Check the structural rules serde cannot express.
    ///
    /// Returns a human-readable reason for the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            if endpoint.path.trim().is_empty() {
                return Err(format!("endpoints[{i}].path must not be empty"));
            }
            if endpoint.method.trim().is_empty() {
                return Err(format!("endpoints[{i}].method must not be empty"));
            }
            for (j, param) in endpoint.parameters.iter().enumerate() {
                if param.name.trim().is_empty() {
                    return Err(format!(
                        "endpoints[{i}].parameters[{j}].name must not be empty"
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_schema_defaults() {
        let schema: ApiSchema = serde_json::from_value(json!({ "title": "Pets" })).unwrap();
        assert_eq!(schema.title, "Pets");
        assert!(schema.description.is_none());
        assert!(schema.base_url.is_none());
        assert!(schema.endpoints.is_empty());
    }

    #[test]
    fn test_parameter_type_field_name() {
        let param: Parameter = serde_json::from_value(json!({
            "name": "id",
            "type": "integer",
            "required": true
        }))
        .unwrap();
        assert_eq!(param.param_type, "integer");

        let back = serde_json::to_value(&param).unwrap();
        assert_eq!(back["type"], "integer");
        assert!(back.get("param_type").is_none());
    }

    #[test]
    fn test_missing_title_rejected() {
        let result: Result<ApiSchema, _> = serde_json::from_value(json!({ "endpoints": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let result: Result<ApiSchema, _> = serde_json::from_value(json!({
            "title": "X",
            "endpoints": [{ "path": "/a", "method": "GET", "parameters": "nope" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_schema_passthrough() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "path": "/users",
            "method": "GET",
            "response_schema": { "items": [{ "id": 1 }], "next": null }
        }))
        .unwrap();
        let rs = endpoint.response_schema.unwrap();
        assert_eq!(rs["items"][0]["id"], 1);
        assert!(rs["next"].is_null());
    }

    #[test]
    fn test_validate_rejects_empty_parameter_name() {
        let schema: ApiSchema = serde_json::from_value(json!({
            "title": "X",
            "endpoints": [{
                "path": "/a",
                "method": "POST",
                "parameters": [{ "name": " ", "type": "string", "required": false }]
            }]
        }))
        .unwrap();
        let err = schema.validate().unwrap_err();
        assert!(err.contains("parameters[0].name"));
    }

    #[test]
    fn test_validate_accepts_duplicates() {
        let ep = Endpoint {
            path: "/a".to_string(),
            method: "GET".to_string(),
            description: None,
            parameters: vec![],
            response_schema: None,
        };
        let schema = ApiSchema {
            title: "Dup".to_string(),
            description: None,
            base_url: None,
            endpoints: vec![ep.clone(), ep],
        };
        assert!(schema.validate().is_ok());
    }
}
