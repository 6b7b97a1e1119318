//! Source rendering of a generated mock.
//!
//! The output is a standalone axum program serving the same routes and
//! payload as the live mock, with the credential baked in as a constant.
//! Rendering is pure: equal inputs give byte-identical output.

use std::fmt::Write;

use crate::mock::{Credential, PayloadTemplate, RoutePair};

/// Everything a rendered artifact depends on.
#[derive(Debug, Clone)]
pub struct ArtifactSpec<'a> {
    pub file_name: &'a str,
    pub routes: &'a RoutePair,
    pub payload: &'a PayloadTemplate,
    pub auth_required: bool,
    pub credential: &'a Credential,
    /// Header carrying the credential, as configured.
    pub header: &'a str,
}

/// Render the artifact source.
pub fn render_artifact(spec: &ArtifactSpec<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_artifact(&mut out, spec);
    out
}

fn write_artifact(out: &mut String, spec: &ArtifactSpec<'_>) -> std::fmt::Result {
    writeln!(out, "//! Generated mock API: {}", spec.file_name)?;
    writeln!(out, "//!")?;
    writeln!(out, "//! Standalone server. Dependencies:")?;
    writeln!(out, "//!     axum = \"0.8\"")?;
    writeln!(out, "//!     serde_json = \"1\"")?;
    writeln!(out, "//!     tokio = {{ version = \"1\", features = [\"full\"] }}")?;
    writeln!(out)?;
    writeln!(out, "use axum::http::{{HeaderMap, StatusCode}};")?;
    writeln!(out, "use axum::response::{{IntoResponse, Response}};")?;
    writeln!(out, "use axum::routing::get;")?;
    writeln!(out, "use axum::{{Json, Router}};")?;
    writeln!(out)?;

    if !spec.auth_required {
        writeln!(out, "#[allow(dead_code)]")?;
    }
    writeln!(out, "const API_KEY: &str = {:?};", spec.credential.as_str())?;
    if spec.auth_required {
        writeln!(out, "const API_KEY_HEADER: &str = {:?};", spec.header.to_ascii_lowercase())?;
        writeln!(out)?;
        writeln!(out, "fn verify_api_key(headers: &HeaderMap) -> Result<(), Response> {{")?;
        writeln!(out, "    match headers.get(API_KEY_HEADER) {{")?;
        writeln!(out, "        Some(value) if value.as_bytes() == API_KEY.as_bytes() => Ok(()),")?;
        writeln!(out, "        _ => Err((")?;
        writeln!(out, "            StatusCode::UNAUTHORIZED,")?;
        writeln!(
            out,
            "            Json(serde_json::json!({{ \"detail\": {:?} }})),",
            format!("Invalid or missing {} header", spec.header)
        )?;
        writeln!(out, "        )")?;
        writeln!(out, "            .into_response()),")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
    }
    writeln!(out)?;

    if spec.auth_required {
        writeln!(out, "async fn get_data(headers: HeaderMap) -> Response {{")?;
        writeln!(out, "    if let Err(rejection) = verify_api_key(&headers) {{")?;
        writeln!(out, "        return rejection;")?;
        writeln!(out, "    }}")?;
    } else {
        writeln!(out, "async fn get_data(_headers: HeaderMap) -> Response {{")?;
    }
    writeln!(out, "    let body = serde_json::json!({{")?;
    writeln!(out, "        \"status\": \"success\",")?;
    writeln!(out, "        \"data\": {{")?;
    let entries: Vec<String> = spec
        .payload
        .iter()
        .map(|(field, value)| format!("            {:?}: {:?}", field, value))
        .collect();
    if !entries.is_empty() {
        writeln!(out, "{}", entries.join(",\n"))?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }});")?;
    writeln!(out, "    (StatusCode::OK, Json(body)).into_response()")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "#[tokio::main]")?;
    writeln!(out, "async fn main() {{")?;
    // Mirrored paths coincide when both slugs are equal; axum rejects duplicates.
    let mut paths: Vec<&str> = Vec::new();
    for path in spec.routes.iter() {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    let routes: Vec<String> = paths
        .iter()
        .map(|path| format!("        .route({:?}, get(get_data))", path))
        .collect();
    writeln!(out, "    let app = Router::new()")?;
    writeln!(out, "{};", routes.join("\n"))?;
    writeln!(out)?;
    writeln!(out, "    let listener = tokio::net::TcpListener::bind(\"0.0.0.0:8000\")")?;
    writeln!(out, "        .await")?;
    writeln!(out, "        .expect(\"failed to bind 0.0.0.0:8000\");")?;
    writeln!(out, "    axum::serve(listener, app).await.expect(\"server error\");")?;
    writeln!(out, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{payload_template, Slug};

    fn render(auth: bool, fields: &[&str]) -> String {
        let a = Slug::normalize("WhatsApp Swiggy");
        let b = Slug::normalize("Zomato");
        let routes = RoutePair::from_slugs(&a, &b);
        let payload = payload_template(fields);
        let credential = Credential::generate_with(&mut fastrand::Rng::with_seed(1), &a, &b);
        render_artifact(&ArtifactSpec {
            file_name: "whatsappswiggy_zomato_api.rs",
            routes: &routes,
            payload: &payload,
            auth_required: auth,
            credential: &credential,
            header: "X-API-Key",
        })
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(render(true, &["id", "name"]), render(true, &["id", "name"]));
    }

    #[test]
    fn test_embeds_credential_and_routes() {
        let a = Slug::normalize("WhatsApp Swiggy");
        let b = Slug::normalize("Zomato");
        let credential = Credential::generate_with(&mut fastrand::Rng::with_seed(1), &a, &b);
        let source = render(true, &["id"]);

        assert!(source.contains(&format!("const API_KEY: &str = \"{}\";", credential)));
        assert!(source.contains(".route(\"/whatsappswiggytozomato\", get(get_data))"));
        assert!(source.contains(".route(\"/zomatotowhatsappswiggy\", get(get_data))"));
        assert!(source.contains("\"id\": \"sample_id\""));
    }

    #[test]
    fn test_auth_gate_mirrors_live_rejection() {
        let source = render(true, &["id"]);
        assert!(source.contains("const API_KEY_HEADER: &str = \"x-api-key\";"));
        assert!(source.contains("value.as_bytes() == API_KEY.as_bytes()"));
        assert!(source.contains("StatusCode::UNAUTHORIZED"));
        assert!(source.contains("\"Invalid or missing X-API-Key header\""));
    }

    #[test]
    fn test_open_mock_has_no_gate() {
        let source = render(false, &["id"]);
        assert!(source.contains("const API_KEY: &str"));
        assert!(!source.contains("verify_api_key"));
        assert!(!source.contains("UNAUTHORIZED"));
    }

    #[test]
    fn test_payload_entries_in_field_order() {
        let source = render(false, &["status", "id"]);
        let status = source.find("\"status\": \"sample_status\"").unwrap();
        let id = source.find("\"id\": \"sample_id\"").unwrap();
        assert!(status < id);
    }

    #[test]
    fn test_same_slugs_render_one_route() {
        let a = Slug::normalize("echo");
        let routes = RoutePair::from_slugs(&a, &a);
        let payload = payload_template(["id"]);
        let credential = Credential::generate(&a, &a);
        let source = render_artifact(&ArtifactSpec {
            file_name: "echo_echo_api.rs",
            routes: &routes,
            payload: &payload,
            auth_required: false,
            credential: &credential,
            header: "X-API-Key",
        });
        assert_eq!(source.matches(".route(").count(), 1);
        assert!(source.contains(".route(\"/echotoecho\", get(get_data));"));
    }

    #[test]
    fn test_literals_are_escaped() {
        let source = render(false, &["say \"hi\""]);
        assert!(source.contains(r#""say \"hi\"": "sample_say \"hi\"""#));
    }
}
