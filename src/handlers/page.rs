use crate::render::page::index_page;
use axum::response::Html;

/// GET / - submission form
pub async fn index() -> Html<String> {
    Html(index_page(None))
}
