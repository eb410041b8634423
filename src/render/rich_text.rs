use crate::domain::model::RichText;

/// Concatenates the plain text of every span.
pub fn plain_text(spans: &[RichText]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}

fn color_class(color: &str) -> &'static str {
    match color {
        "gray" => "text-gray-500",
        "brown" => "text-amber-700",
        "orange" => "text-orange-500",
        "yellow" => "text-yellow-500",
        "green" => "text-green-500",
        "blue" => "text-blue-500",
        "purple" => "text-purple-500",
        "pink" => "text-pink-500",
        "red" => "text-red-500",
        "gray_background" => "bg-gray-100 dark:bg-gray-800",
        "brown_background" => "bg-amber-100 dark:bg-amber-900/30",
        "orange_background" => "bg-orange-100 dark:bg-orange-900/30",
        "yellow_background" => "bg-yellow-100 dark:bg-yellow-900/30",
        "green_background" => "bg-green-100 dark:bg-green-900/30",
        "blue_background" => "bg-blue-100 dark:bg-blue-900/30",
        "purple_background" => "bg-purple-100 dark:bg-purple-900/30",
        "pink_background" => "bg-pink-100 dark:bg-pink-900/30",
        "red_background" => "bg-red-100 dark:bg-red-900/30",
        _ => "",
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_span(span: &RichText) -> String {
    let a = &span.annotations;
    let mut html = escape_html(&span.plain_text);

    if let Some(url) = span.link_url() {
        html = format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="text-primary underline underline-offset-2">{}</a>"#,
            escape_html(url),
            html
        );
    }
    if a.code {
        html = format!(
            r#"<code class="bg-muted rounded px-1.5 py-0.5 font-mono text-sm">{}</code>"#,
            html
        );
    }
    if a.bold {
        html = format!("<strong>{}</strong>", html);
    }
    if a.italic {
        html = format!("<em>{}</em>", html);
    }
    if a.strikethrough {
        html = format!("<s>{}</s>", html);
    }
    if a.underline {
        html = format!("<u>{}</u>", html);
    }

    let class = color_class(&a.color);
    if !class.is_empty() {
        html = format!(r#"<span class="{}">{}</span>"#, class, html);
    }
    html
}

/// Inline HTML for a rich-text array. Empty input renders as an empty string.
pub fn render_rich_text(spans: &[RichText]) -> String {
    spans.iter().map(render_span).collect()
}
