//! Static page shell
//!
//! The page runs the same scrape, summarise, translate and save flow as the
//! CLI client. Its dictionary and summary settings are filled in from
//! `blogsum_common::text` when the page is served.

use axum::response::Html;
use blogsum_common::text::{DICTIONARY, NO_CONTENT, SUMMARY_CHARS};
use serde_json::{Map, Value};

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

pub async fn index() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    let dictionary: Map<String, Value> = DICTIONARY
        .iter()
        .map(|(english, urdu)| (english.to_string(), Value::from(*urdu)))
        .collect();

    INDEX_TEMPLATE
        .replace("__DICTIONARY__", &Value::Object(dictionary).to_string())
        .replace("__SUMMARY_CHARS__", &SUMMARY_CHARS.to_string())
        .replace("__NO_CONTENT__", &Value::from(NO_CONTENT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use axum::http::{header, StatusCode};
    use blogsum_common::storage::WritePolicy;

    #[tokio::test]
    async fn test_index_serves_shell() {
        let app = app(WritePolicy::Independent);
        let response = send(&app.router, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html")));

        let html = body_text(response).await;
        assert!(html.contains("<title>Blog Summariser</title>"));
        assert!(html.contains("Summarise blogs with Urdu translation and save results"));
    }

    #[test]
    fn test_form_posts_to_both_endpoints() {
        let html = render_index();
        assert!(html.contains(r#"<form id="summarise-form">"#));
        assert!(html.contains(r#"postJson("/api/scrape", { url })"#));
        assert!(html.contains(r#"postJson("/api/save", { url, summary, urduSummary, fullText })"#));
    }

    #[test]
    fn test_placeholders_filled_in() {
        let html = render_index();
        assert!(!html.contains("__DICTIONARY__"));
        assert!(!html.contains("__SUMMARY_CHARS__"));
        assert!(!html.contains("__NO_CONTENT__"));

        assert!(html.contains(r#""blog":"بلاگ""#));
        assert!(html.contains("const SUMMARY_CHARS = 60;"));
        assert!(html.contains(r#"const NO_CONTENT = "No content found";"#));
    }
}
