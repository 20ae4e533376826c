//! Tooltip assembly.
//!
//! Parsers describe a tooltip as a title plus `(label, content)` rows; the
//! builder turns that into the small HTML table the track widgets display.
//! Content is trusted markup (links to external resources are common), labels
//! and the title are escaped.

use std::fmt::Write;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tooltip {
    title: String,
    rows: Vec<(String, String)>,
}

impl Tooltip {
    pub fn new(title: impl Into<String>) -> Self {
        Tooltip {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Rows with empty content are skipped.
    pub fn row(mut self, label: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.trim().is_empty() {
            self.rows.push((label.into(), content));
        }
        self
    }

    /// Append a row only when `content` is present.
    pub fn optional_row(self, label: impl Into<String>, content: Option<impl Into<String>>) -> Self {
        match content {
            Some(content) => self.row(label, content),
            None => self,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        let _ = write!(html, "<h4>{}</h4>", escape(&self.title));
        if self.rows.is_empty() {
            return html;
        }
        html.push_str("<table>");
        for (label, content) in &self.rows {
            let _ = write!(html, "<tr><td>{}</td><td>{}</td></tr>", escape(label), content);
        }
        html.push_str("</table>");
        html
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
