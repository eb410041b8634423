use crate::domain::model::{BlockGroup, BlockKind, ContentBlock, Icon, ListKind};
use crate::render::rich_text::{escape_html, plain_text, render_rich_text};

const DEFAULT_IMAGE_ALT: &str = "Project image";
const DEFAULT_CALLOUT_ICON: &str = "💡";

/// Markup for one block. Unsupported blocks render as nothing.
pub fn render_block(block: &ContentBlock) -> String {
    match &block.kind {
        BlockKind::Paragraph { paragraph } => {
            if paragraph.rich_text.is_empty() {
                r#"<div class="h-4"></div>"#.to_string()
            } else {
                format!(
                    r#"<p class="text-muted-foreground mb-4 leading-7">{}</p>"#,
                    render_rich_text(&paragraph.rich_text)
                )
            }
        }
        BlockKind::Heading1 { heading_1 } => format!(
            r#"<h1 class="mt-8 mb-6 text-3xl font-bold tracking-tight">{}</h1>"#,
            render_rich_text(&heading_1.rich_text)
        ),
        BlockKind::Heading2 { heading_2 } => format!(
            r#"<h2 class="mt-6 mb-4 text-2xl font-semibold tracking-tight">{}</h2>"#,
            render_rich_text(&heading_2.rich_text)
        ),
        BlockKind::Heading3 { heading_3 } => format!(
            r#"<h3 class="mt-4 mb-3 text-xl font-semibold">{}</h3>"#,
            render_rich_text(&heading_3.rich_text)
        ),
        BlockKind::BulletedListItem { bulleted_list_item } => format!(
            r#"<li class="text-muted-foreground ml-6 list-disc leading-7">{}</li>"#,
            render_rich_text(&bulleted_list_item.rich_text)
        ),
        BlockKind::NumberedListItem { numbered_list_item } => format!(
            r#"<li class="text-muted-foreground ml-6 list-decimal leading-7">{}</li>"#,
            render_rich_text(&numbered_list_item.rich_text)
        ),
        BlockKind::Code { code } => {
            let label = code
                .language
                .as_deref()
                .filter(|lang| !lang.is_empty())
                .map(|lang| {
                    format!(
                        r#"<span class="bg-muted text-muted-foreground inline-block rounded-t-md px-3 py-1 font-mono text-xs">{}</span>"#,
                        escape_html(lang)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="mb-4">{}<pre class="bg-muted overflow-x-auto rounded-md rounded-tl-none p-4"><code class="font-mono text-sm">{}</code></pre></div>"#,
                label,
                escape_html(&plain_text(&code.rich_text))
            )
        }
        BlockKind::Image { image } => {
            let Some(src) = image.source.url() else {
                return String::new();
            };
            let caption = plain_text(&image.caption);
            let alt = if caption.is_empty() {
                DEFAULT_IMAGE_ALT.to_string()
            } else {
                caption
            };
            let figcaption = if image.caption.is_empty() {
                String::new()
            } else {
                format!(
                    r#"<figcaption class="text-muted-foreground mt-2 text-center text-sm">{}</figcaption>"#,
                    render_rich_text(&image.caption)
                )
            };
            format!(
                r#"<figure class="mb-6"><div class="relative aspect-video overflow-hidden rounded-lg"><img src="{}" alt="{}" class="object-cover" loading="lazy"></div>{}</figure>"#,
                escape_html(src),
                escape_html(&alt),
                figcaption
            )
        }
        BlockKind::Quote { quote } => format!(
            r#"<blockquote class="border-primary text-muted-foreground mb-4 border-l-4 pl-4 italic">{}</blockquote>"#,
            render_rich_text(&quote.rich_text)
        ),
        BlockKind::Callout { callout } => {
            let emoji = match &callout.icon {
                Some(Icon::Emoji { emoji }) => emoji.as_str(),
                _ => DEFAULT_CALLOUT_ICON,
            };
            format!(
                r#"<div class="bg-muted/50 mb-4 flex gap-3 rounded-lg p-4"><span class="text-xl">{}</span><div class="text-muted-foreground leading-7">{}</div></div>"#,
                escape_html(emoji),
                render_rich_text(&callout.rich_text)
            )
        }
        BlockKind::Divider => r#"<hr class="border-border my-8">"#.to_string(),
        BlockKind::Bookmark { bookmark } => {
            let Some(url) = bookmark.url.as_deref() else {
                return String::new();
            };
            let caption = plain_text(&bookmark.caption);
            let caption_html = if caption.is_empty() {
                String::new()
            } else {
                format!(
                    r#"<span class="text-muted-foreground mt-1 block text-xs">{}</span>"#,
                    escape_html(&caption)
                )
            };
            format!(
                r#"<a href="{url}" target="_blank" rel="noopener noreferrer" class="border-border bg-muted/30 hover:bg-muted/50 mb-4 block rounded-lg border p-4 transition-colors"><span class="text-primary text-sm break-all">{url}</span>{caption}</a>"#,
                url = escape_html(url),
                caption = caption_html
            )
        }
        BlockKind::ToDo { to_do } => {
            let (checked, class) = if to_do.checked {
                (" checked", "text-muted-foreground line-through")
            } else {
                ("", "text-muted-foreground")
            };
            format!(
                r#"<div class="mb-1 flex items-start gap-2"><input type="checkbox"{} disabled class="mt-1.5"><span class="{}">{}</span></div>"#,
                checked,
                class,
                render_rich_text(&to_do.rich_text)
            )
        }
        BlockKind::Toggle { toggle } => format!(
            r#"<details class="mb-4"><summary class="cursor-pointer font-medium">{}</summary></details>"#,
            render_rich_text(&toggle.rich_text)
        ),
        BlockKind::Unsupported => String::new(),
    }
}

/// Renders grouped blocks; each list run shares one `<ul>` or `<ol>`.
pub fn render_groups(groups: &[BlockGroup]) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<div class="notion-content">"#);
    for group in groups {
        match group {
            BlockGroup::Run(kind, items) => {
                let tag = match kind {
                    ListKind::Bulleted => "ul",
                    ListKind::Numbered => "ol",
                };
                html.push_str(&format!(r#"<{} class="mb-4">"#, tag));
                for item in items {
                    html.push_str(&render_block(item));
                }
                html.push_str(&format!("</{}>", tag));
            }
            BlockGroup::Single(block) => {
                html.push_str(&format!(
                    r#"<div data-block-id="{}">{}</div>"#,
                    escape_html(&block.id),
                    render_block(block)
                ));
            }
        }
    }
    html.push_str("</div>");
    html
}
