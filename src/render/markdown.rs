/// Markdown to HTML for the advisory guides.

use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{html, Event, Options, Parser};

/// Render guide markdown. Raw HTML in the source is emitted as escaped
/// text, since class names inside the guide come from the classifier.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Escape text for HTML bodies and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String does not fail.
    let _ = escape_html(&mut out, text);
    out
}
