//! Single-endpoint code snippets.
//!
//! Non-`GET` endpoints with parameters get a JSON body where every parameter
//! holds the placeholder `"value"`. `GET` snippets never serialize parameters.

use super::quoted;
use crate::types::Endpoint;

/// Target language of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetLanguage {
    Curl,
    JavaScript,
    Python,
}

impl SnippetLanguage {
    /// Case-insensitive lookup. Anything unrecognized is Python.
    pub fn parse(language: &str) -> Self {
        match language.to_lowercase().as_str() {
            "curl" => SnippetLanguage::Curl,
            "javascript" => SnippetLanguage::JavaScript,
            _ => SnippetLanguage::Python,
        }
    }
}

/// Render a snippet for `endpoint` against `base_url`. Never fails.
pub fn generate_snippet(endpoint: &Endpoint, base_url: &str, language: &str) -> String {
    let url = format!("{base_url}{}", endpoint.path);
    let body = placeholder_body(endpoint);

    match SnippetLanguage::parse(language) {
        SnippetLanguage::Curl => curl_snippet(endpoint, &url, body.as_deref()),
        SnippetLanguage::JavaScript => js_snippet(endpoint, &url, body.as_deref()),
        SnippetLanguage::Python => python_snippet(endpoint, &url, body.as_deref()),
    }
}

/// `{"name": "value", ...}` for non-GET endpoints with parameters.
///
/// Keys keep parameter order; a repeated name is emitted once.
fn placeholder_body(endpoint: &Endpoint) -> Option<String> {
    if endpoint.is_get() || endpoint.parameters.is_empty() {
        return None;
    }
    let mut seen: Vec<&str> = Vec::new();
    let mut entries: Vec<String> = Vec::new();
    for param in &endpoint.parameters {
        if seen.contains(&param.name.as_str()) {
            continue;
        }
        seen.push(&param.name);
        entries.push(format!("{}: \"value\"", quoted(&param.name)));
    }
    Some(format!("{{{}}}", entries.join(", ")))
}

fn curl_snippet(endpoint: &Endpoint, url: &str, body: Option<&str>) -> String {
    let mut cmd = format!("curl -X {} \"{url}\"", endpoint.method);
    cmd.push_str(" \\\n  -H \"Content-Type: application/json\"");
    if let Some(body) = body {
        cmd.push_str(&format!(" \\\n  -d '{body}'"));
    }
    cmd
}

fn js_snippet(endpoint: &Endpoint, url: &str, body: Option<&str>) -> String {
    let data = body
        .map(|b| format!(",\n  body: JSON.stringify({b})"))
        .unwrap_or_default();

    format!(
        "fetch({url}, {{\n  method: {method},\n  headers: {{\n    \"Content-Type\": \"application/json\"\n  }}{data}\n}})\n\
         .then(response => response.json())\n\
         .then(data => console.log(data))\n\
         .catch(error => console.error('Error:', error));",
        url = quoted(url),
        method = quoted(&endpoint.method),
    )
}

fn python_snippet(endpoint: &Endpoint, url: &str, body: Option<&str>) -> String {
    let payload_section = body
        .map(|b| format!("\npayload = {b}\n"))
        .unwrap_or_default();

    let mut call = format!("response = requests.request({}, url", quoted(&endpoint.method));
    if body.is_some() {
        call.push_str(", json=payload");
    }
    call.push(')');

    format!(
        "import requests\n{payload_section}\nurl = {url}\n\n{call}\n\nprint(response.text)",
        url = quoted(url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Parameter;

    fn endpoint(method: &str, params: &[&str]) -> Endpoint {
        Endpoint {
            path: "/pets".to_string(),
            method: method.to_string(),
            description: None,
            parameters: params
                .iter()
                .map(|name| Parameter {
                    name: name.to_string(),
                    param_type: "string".to_string(),
                    required: true,
                    description: None,
                })
                .collect(),
            response_schema: None,
        }
    }

    const BASE: &str = "https://api.example.com";

    #[test]
    fn test_language_parse() {
        assert_eq!(SnippetLanguage::parse("CURL"), SnippetLanguage::Curl);
        assert_eq!(SnippetLanguage::parse("JavaScript"), SnippetLanguage::JavaScript);
        assert_eq!(SnippetLanguage::parse("python"), SnippetLanguage::Python);
        assert_eq!(SnippetLanguage::parse("js"), SnippetLanguage::Python);
        assert_eq!(SnippetLanguage::parse(""), SnippetLanguage::Python);
    }

    #[test]
    fn test_unknown_language_matches_python() {
        let ep = endpoint("POST", &["name"]);
        assert_eq!(
            generate_snippet(&ep, BASE, "cobol"),
            generate_snippet(&ep, BASE, "python")
        );
    }

    #[test]
    fn test_curl_post_with_body() {
        let code = generate_snippet(&endpoint("POST", &["name", "tag"]), BASE, "curl");
        assert_eq!(
            code,
            "curl -X POST \"https://api.example.com/pets\" \\\n  -H \"Content-Type: application/json\" \\\n  -d '{\"name\": \"value\", \"tag\": \"value\"}'"
        );
    }

    #[test]
    fn test_curl_get_has_no_body() {
        let code = generate_snippet(&endpoint("GET", &["limit"]), BASE, "curl");
        assert!(!code.contains("-d"));
        assert!(!code.contains("limit"));
    }

    #[test]
    fn test_javascript_post() {
        let code = generate_snippet(&endpoint("PATCH", &["name"]), BASE, "javascript");
        assert!(code.starts_with("fetch(\"https://api.example.com/pets\", {\n  method: \"PATCH\","));
        assert!(code.contains("  },\n  body: JSON.stringify({\"name\": \"value\"})\n})"));
        assert!(code.ends_with(".catch(error => console.error('Error:', error));"));
    }

    #[test]
    fn test_javascript_get() {
        let code = generate_snippet(&endpoint("GET", &["q"]), BASE, "javascript");
        assert!(code.contains("\"Content-Type\": \"application/json\"\n  }\n})"));
        assert!(!code.contains("body:"));
    }

    #[test]
    fn test_python_post() {
        let code = generate_snippet(&endpoint("POST", &["name"]), BASE, "python");
        assert_eq!(
            code,
            "import requests\n\npayload = {\"name\": \"value\"}\n\nurl = \"https://api.example.com/pets\"\n\nresponse = requests.request(\"POST\", url, json=payload)\n\nprint(response.text)"
        );
    }

    #[test]
    fn test_python_get() {
        let code = generate_snippet(&endpoint("GET", &["q"]), BASE, "python");
        assert_eq!(
            code,
            "import requests\n\nurl = \"https://api.example.com/pets\"\n\nresponse = requests.request(\"GET\", url)\n\nprint(response.text)"
        );
    }

    #[test]
    fn test_post_body_contains_every_parameter() {
        let names = ["alpha", "beta", "gamma"];
        for lang in ["curl", "javascript", "python"] {
            let code = generate_snippet(&endpoint("POST", &names), BASE, lang);
            for name in names {
                assert!(code.contains(&format!("\"{name}\": \"value\"")), "{lang} missing {name}");
            }
        }
    }

    #[test]
    fn test_post_without_parameters_has_no_body() {
        let code = generate_snippet(&endpoint("POST", &[]), BASE, "python");
        assert!(!code.contains("payload"));
    }

    #[test]
    fn test_repeated_parameter_emitted_once() {
        let code = generate_snippet(&endpoint("PUT", &["id", "id"]), BASE, "curl");
        assert_eq!(code.matches("\"id\"").count(), 1);
    }
}
