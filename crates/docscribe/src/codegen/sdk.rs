//! Python SDK generator.
//!
//! Emits a single `Client` class backed by `requests.Session`, with one method
//! per endpoint. Unset arguments are filtered out at call time; `GET` sends
//! the remaining arguments as query parameters, every other method sends them
//! as a JSON body.

use super::{derive_method_name, quoted};
use crate::types::{ApiSchema, Endpoint};

/// Generate the Python client source for a schema.
pub fn generate_sdk(schema: &ApiSchema) -> String {
    let mut out = String::new();
    let base_url = schema.base_url.as_deref().unwrap_or("");

    out.push_str("import requests\n\n\n");
    out.push_str("class Client:\n");
    out.push_str(&format!(
        "    def __init__(self, base_url={}, api_key=None):\n",
        quoted(base_url)
    ));
    out.push_str("        self.base_url = base_url\n");
    out.push_str("        self.session = requests.Session()\n");
    out.push_str("        if api_key:\n");
    out.push_str(
        "            self.session.headers.update({\"Authorization\": f\"Bearer {api_key}\"})\n",
    );

    for endpoint in &schema.endpoints {
        out.push('\n');
        push_method(&mut out, endpoint);
    }

    out
}

fn push_method(out: &mut String, endpoint: &Endpoint) {
    let name = derive_method_name(&endpoint.method, &endpoint.path);

    let mut signature = String::from("self, ");
    for param in &endpoint.parameters {
        signature.push_str(&format!("{}=None, ", param.name));
    }
    signature.push_str("**kwargs");

    out.push_str(&format!("    def {name}({signature}):\n"));
    if let Some(description) = endpoint.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!(
            "        \"\"\"{}\"\"\"\n",
            description.trim().replace("\"\"\"", "\\\"\\\"\\\"")
        ));
    }
    // Path placeholders are left in the f-string, so `{id}` picks up the `id` argument.
    out.push_str(&format!("        url = f\"{{self.base_url}}{}\"\n", endpoint.path));

    let payload = if endpoint.parameters.is_empty() {
        None
    } else {
        let entries: Vec<String> = endpoint
            .parameters
            .iter()
            .map(|p| format!("{}: {}", quoted(&p.name), p.name))
            .collect();
        out.push_str(&format!("        params = {{{}}}\n", entries.join(", ")));
        out.push_str("        params = {k: v for k, v in params.items() if v is not None}\n");
        Some(if endpoint.is_get() { "params=params" } else { "json=params" })
    };

    out.push_str(&format!(
        "        return self.session.request({}, url, ",
        quoted(&endpoint.method)
    ));
    if let Some(arg) = payload {
        out.push_str(arg);
        out.push_str(", ");
    }
    out.push_str("**kwargs)\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Parameter;

    fn param(name: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            param_type: "string".to_string(),
            required: false,
            description: None,
        }
    }

    fn endpoint(method: &str, path: &str, params: &[&str]) -> Endpoint {
        Endpoint {
            path: path.to_string(),
            method: method.to_string(),
            description: None,
            parameters: params.iter().map(|p| param(p)).collect(),
            response_schema: None,
        }
    }

    fn schema(endpoints: Vec<Endpoint>) -> ApiSchema {
        ApiSchema {
            title: "Pets".to_string(),
            description: None,
            base_url: Some("https://pets.example.com/v1".to_string()),
            endpoints,
        }
    }

    #[test]
    fn test_client_header() {
        let code = generate_sdk(&schema(vec![]));
        assert!(code.starts_with("import requests\n"));
        assert!(code.contains("class Client:"));
        assert!(code.contains("def __init__(self, base_url=\"https://pets.example.com/v1\", api_key=None):"));
        assert!(code.contains("\"Authorization\": f\"Bearer {api_key}\""));
        assert!(!code.contains("    def get_"));
    }

    #[test]
    fn test_missing_base_url_defaults_empty() {
        let mut s = schema(vec![]);
        s.base_url = None;
        let code = generate_sdk(&s);
        assert!(code.contains("base_url=\"\""));
    }

    #[test]
    fn test_get_uses_query_params() {
        let code = generate_sdk(&schema(vec![endpoint(
            "GET",
            "/users/{id}/posts",
            &["id", "limit"],
        )]));
        assert!(code.contains("    def get_users_id_posts(self, id=None, limit=None, **kwargs):"));
        assert!(code.contains("url = f\"{self.base_url}/users/{id}/posts\""));
        assert!(code.contains("params = {\"id\": id, \"limit\": limit}"));
        assert!(code.contains("if v is not None}"));
        assert!(code.contains("return self.session.request(\"GET\", url, params=params, **kwargs)"));
        assert!(!code.contains("json=params"));
    }

    #[test]
    fn test_post_uses_json_body() {
        let code = generate_sdk(&schema(vec![endpoint("POST", "/pets", &["name", "tag"])]));
        assert!(code.contains("def post_pets(self, name=None, tag=None, **kwargs):"));
        assert!(code.contains("return self.session.request(\"POST\", url, json=params, **kwargs)"));
        assert!(!code.contains("params=params"));
    }

    #[test]
    fn test_no_parameters_no_payload() {
        let code = generate_sdk(&schema(vec![endpoint("DELETE", "/pets/all", &[])]));
        assert!(code.contains("def delete_pets_all(self, **kwargs):"));
        assert!(!code.contains("params ="));
        assert!(code.contains("return self.session.request(\"DELETE\", url, **kwargs)"));
    }

    #[test]
    fn test_parameter_order_preserved() {
        let code = generate_sdk(&schema(vec![endpoint("PUT", "/x", &["z", "a", "m"])]));
        assert!(code.contains("(self, z=None, a=None, m=None, **kwargs)"));
    }

    #[test]
    fn test_duplicate_names_both_emitted_in_order() {
        let code = generate_sdk(&schema(vec![
            endpoint("GET", "/users/{id}", &["id"]),
            endpoint("GET", "/users/id", &[]),
        ]));
        let first = code.find("def get_users_id(self, id=None, **kwargs)").unwrap();
        let second = code.find("def get_users_id(self, **kwargs)").unwrap();
        assert!(first < second, "later definition must come last so it shadows");
    }

    #[test]
    fn test_description_becomes_docstring() {
        let mut ep = endpoint("GET", "/pets", &[]);
        ep.description = Some("List all pets.".to_string());
        let code = generate_sdk(&schema(vec![ep]));
        assert!(code.contains("        \"\"\"List all pets.\"\"\"\n"));
    }
}
