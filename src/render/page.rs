use crate::core::grouper::group_blocks;
use crate::domain::model::{Project, ProjectDetail};
use crate::render::blocks::render_groups;
use crate::render::rich_text::escape_html;

fn link_button(label: &str, url: Option<&str>) -> String {
    url.map(|url| {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="project-link">{}</a>"#,
            escape_html(url),
            label
        )
    })
    .unwrap_or_default()
}

fn render_header(project: &Project) -> String {
    let tags: String = project
        .tags
        .iter()
        .map(|tag| format!(r#"<li class="tag">{}</li>"#, escape_html(tag)))
        .collect();

    format!(
        concat!(
            r#"<header class="project-header">"#,
            r#"<img src="{image}" alt="{title}" class="project-cover">"#,
            r#"<h1>{title}</h1>"#,
            r#"<p class="project-description">{description}</p>"#,
            r#"<ul class="tags">{tags}</ul>"#,
            r#"<nav class="project-links">{demo}{github}</nav>"#,
            "</header>"
        ),
        image = escape_html(&project.image),
        title = escape_html(&project.title),
        description = escape_html(&project.description),
        tags = tags,
        demo = link_button("Live demo", project.demo_url.as_deref()),
        github = link_button("GitHub", project.github_url.as_deref()),
    )
}

/// Standalone HTML document for one project's detail page.
pub fn render_project_page(site_name: &str, detail: &ProjectDetail) -> String {
    let project = &detail.project;
    let body = render_groups(&group_blocks(detail.blocks.clone()));

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title} | {site}</title>",
            r#"<meta name="description" content="{description}">"#,
            "</head><body><main class=\"project-detail\">{header}<article>{body}</article></main></body></html>\n"
        ),
        title = escape_html(&project.title),
        site = escape_html(site_name),
        description = escape_html(&project.description),
        header = render_header(project),
        body = body,
    )
}

/// Page shown for a project id that no longer resolves.
pub fn render_not_found_page(site_name: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            "<title>Project not found | {site}</title></head>",
            "<body><main><h1>Project not found</h1></main></body></html>\n"
        ),
        site = escape_html(site_name)
    )
}
