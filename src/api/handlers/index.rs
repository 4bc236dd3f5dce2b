use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Single page front end; everything else it needs comes from the JSON API.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
