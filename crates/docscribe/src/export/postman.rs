//! Postman Collection v2.1 export.

use crate::error::ExportError;
use crate::types::{ApiSchema, Endpoint};
use serde::{Deserialize, Serialize};

pub const POSTMAN_SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    pub item: Vec<PostmanItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanInfo {
    pub name: String,
    pub description: Option<String>,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanItem {
    pub name: String,
    pub request: PostmanRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanRequest {
    pub method: String,
    pub header: Vec<PostmanHeader>,
    pub url: PostmanUrl,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanHeader {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanUrl {
    pub raw: String,
    pub protocol: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    /// Only present for `GET` endpoints with parameters. Values are left empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<PostmanQueryParam>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanQueryParam {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

/// Split `scheme://rest` into the scheme and the `/`-separated host segments.
fn split_base_url(base_url: Option<&str>) -> Result<(&str, Vec<String>), ExportError> {
    let base = base_url.unwrap_or("");
    let (scheme, rest) = base
        .split_once("://")
        .ok_or_else(|| ExportError::InvalidBaseUrl {
            base_url: base.to_string(),
        })?;
    // Anything after a second "://" is not part of the host.
    let rest = rest.split("://").next().unwrap_or(rest);
    Ok((scheme, rest.split('/').map(str::to_string).collect()))
}

/// Convert a schema to a Postman collection.
///
/// Fails with [`ExportError::InvalidBaseUrl`] when the base URL is missing or
/// lacks `://`.
pub fn to_postman(schema: &ApiSchema) -> Result<PostmanCollection, ExportError> {
    let (protocol, host) = split_base_url(schema.base_url.as_deref())?;
    let base = schema.base_url.as_deref().unwrap_or("");

    let item = schema
        .endpoints
        .iter()
        .map(|endpoint| PostmanItem {
            name: format!("{} {}", endpoint.method, endpoint.path),
            request: request_for(endpoint, base, protocol, &host),
        })
        .collect();

    Ok(PostmanCollection {
        info: PostmanInfo {
            name: schema.title.clone(),
            description: schema.description.clone(),
            schema: POSTMAN_SCHEMA_URL.to_string(),
        },
        item,
    })
}

fn request_for(endpoint: &Endpoint, base: &str, protocol: &str, host: &[String]) -> PostmanRequest {
    let query = (endpoint.is_get() && !endpoint.parameters.is_empty()).then(|| {
        endpoint
            .parameters
            .iter()
            .map(|p| PostmanQueryParam {
                key: p.name.clone(),
                value: String::new(),
                description: p.description.clone(),
            })
            .collect()
    });

    PostmanRequest {
        method: endpoint.method.clone(),
        header: vec![PostmanHeader {
            key: "Content-Type".to_string(),
            value: "application/json".to_string(),
        }],
        url: PostmanUrl {
            raw: format!("{base}{}", endpoint.path),
            protocol: protocol.to_string(),
            host: host.to_vec(),
            path: endpoint
                .path
                .trim_matches('/')
                .split('/')
                .map(str::to_string)
                .collect(),
            query,
        },
        description: endpoint.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Parameter;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn schema(base_url: Option<&str>) -> ApiSchema {
        ApiSchema {
            title: "Pets".to_string(),
            description: Some("Pet store".to_string()),
            base_url: base_url.map(str::to_string),
            endpoints: vec![
                Endpoint {
                    path: "/pets".to_string(),
                    method: "GET".to_string(),
                    description: Some("List".to_string()),
                    parameters: vec![Parameter {
                        name: "limit".to_string(),
                        param_type: "integer".to_string(),
                        required: false,
                        description: Some("Max items".to_string()),
                    }],
                    response_schema: None,
                },
                Endpoint {
                    path: "/pets/{id}".to_string(),
                    method: "PUT".to_string(),
                    description: None,
                    parameters: vec![Parameter {
                        name: "name".to_string(),
                        param_type: "string".to_string(),
                        required: true,
                        description: None,
                    }],
                    response_schema: None,
                },
            ],
        }
    }

    #[test]
    fn test_postman_full_shape() {
        let collection = to_postman(&schema(Some("https://api.pets.io/v1"))).unwrap();
        let actual = serde_json::to_value(&collection).unwrap();

        assert_json_eq!(
            actual,
            json!({
                "info": {
                    "name": "Pets",
                    "description": "Pet store",
                    "schema": POSTMAN_SCHEMA_URL
                },
                "item": [
                    {
                        "name": "GET /pets",
                        "request": {
                            "method": "GET",
                            "header": [{ "key": "Content-Type", "value": "application/json" }],
                            "url": {
                                "raw": "https://api.pets.io/v1/pets",
                                "protocol": "https",
                                "host": ["api.pets.io", "v1"],
                                "path": ["pets"],
                                "query": [{ "key": "limit", "value": "", "description": "Max items" }]
                            },
                            "description": "List"
                        }
                    },
                    {
                        "name": "PUT /pets/{id}",
                        "request": {
                            "method": "PUT",
                            "header": [{ "key": "Content-Type", "value": "application/json" }],
                            "url": {
                                "raw": "https://api.pets.io/v1/pets/{id}",
                                "protocol": "https",
                                "host": ["api.pets.io", "v1"],
                                "path": ["pets", "{id}"]
                            },
                            "description": null
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn test_item_count_matches_endpoints() {
        let mut s = schema(Some("http://localhost:8080"));
        s.endpoints.push(s.endpoints[0].clone());
        let collection = to_postman(&s).unwrap();
        assert_eq!(collection.item.len(), s.endpoints.len());
        assert_eq!(collection.item[0].request.url.host, vec!["localhost:8080"]);
    }

    #[test]
    fn test_base_url_without_scheme_fails() {
        let err = to_postman(&schema(Some("api.pets.io/v1"))).unwrap_err();
        assert_eq!(
            err,
            ExportError::InvalidBaseUrl {
                base_url: "api.pets.io/v1".to_string()
            }
        );
    }

    #[test]
    fn test_missing_base_url_fails() {
        let err = to_postman(&schema(None)).unwrap_err();
        assert!(matches!(err, ExportError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_root_path_segments() {
        let mut s = schema(Some("https://x.io"));
        s.endpoints = vec![Endpoint {
            path: "/".to_string(),
            method: "GET".to_string(),
            description: None,
            parameters: vec![],
            response_schema: None,
        }];
        let collection = to_postman(&s).unwrap();
        assert_eq!(collection.item[0].request.url.path, vec![String::new()]);
        assert!(collection.item[0].request.url.query.is_none());
    }
}
