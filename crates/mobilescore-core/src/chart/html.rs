//! Self-contained HTML shell for chart documents.

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding: 24px; color: #2a3f5f; background: #ffffff; }
h1 { font-size: 20px; font-weight: 600; margin: 0 0 16px 0; }
.chart { display: flex; flex-wrap: wrap; align-items: flex-start; gap: 24px; }
svg { max-width: 800px; width: 100%; height: auto; }
.grid { fill: none; stroke: #e5ecf6; stroke-width: 1; }
.spoke { stroke: #c8d4e3; stroke-width: 1; }
.axis-label { font-size: 12px; fill: #2a3f5f; }
.tick-label { font-size: 10px; fill: #7f8fa6; }
.trace polygon { stroke-width: 2; fill-opacity: 0.25; }
.trace circle { stroke-width: 0; }
.trace.hidden { display: none; }
.legend { list-style: none; margin: 0; padding: 0; font-size: 13px; }
.legend-item { cursor: pointer; padding: 4px 0; user-select: none; }
.legend-item.hidden { opacity: 0.4; }
.swatch { display: inline-block; width: 12px; height: 12px; margin-right: 8px; vertical-align: middle; border-radius: 2px; }
footer { margin-top: 16px; font-size: 11px; color: #7f8fa6; }
"#;

const SCRIPT: &str = r#"
document.querySelectorAll('.legend-item').forEach(function (item) {
  item.addEventListener('click', function () {
    var trace = document.getElementById('trace-' + item.dataset.trace);
    if (!trace) { return; }
    trace.classList.toggle('hidden');
    item.classList.toggle('hidden');
  });
});
"#;

/// Escape text for use in HTML content and attribute values.
pub(super) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Make JSON safe to embed inside a `<script>` element.
pub(super) fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub(super) struct Document<'a> {
    pub title: &'a str,
    pub svg: &'a str,
    pub legend: &'a str,
    pub data_json: &'a str,
    pub generated_at: &'a str,
}

impl Document<'_> {
    pub(super) fn render(&self) -> String {
        let title = escape(self.title);
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("<title>{}</title>\n", title));
        html.push_str(&format!("<style>{}</style>\n", STYLE));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", title));
        html.push_str("<div class=\"chart\">\n");
        html.push_str(self.svg);
        html.push_str(self.legend);
        html.push_str("</div>\n");
        html.push_str(&format!(
            "<footer>Generated {}</footer>\n",
            escape(self.generated_at)
        ));
        html.push_str(&format!(
            "<script type=\"application/json\" id=\"chart-data\">{}</script>\n",
            script_safe_json(self.data_json)
        ));
        html.push_str(&format!("<script>{}</script>\n", SCRIPT));
        html.push_str("</body>\n</html>\n");

        html
    }
}
