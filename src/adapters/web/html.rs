//! Server-side HTML rendering for the repository pages.

use std::fmt::Write;

use crate::adapters::datetime::format_datetime;
use crate::domain::models::{Issue, Repository};

/// Escape text for use in element content and quoted attribute values.
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - repodex</title>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">All</a> | <a href=\"/repositories\">By stars</a></nav>\n\
         {body}\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

/// Table of repositories in the given order, each linking to its detail page.
pub fn render_repository_list(title: &str, repositories: &[Repository]) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape_html(title));

    if repositories.is_empty() {
        body.push_str("<p>No repositories indexed yet.</p>\n");
        return page(title, &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>Repository</th><th>Description</th>\
         <th>Stars</th><th>Open issues</th><th>Contributors</th></tr></thead>\n<tbody>\n",
    );
    for repo in repositories {
        let _ = writeln!(
            body,
            "<tr><td><a href=\"/repositories/{id}\">{name}</a></td><td>{description}</td>\
             <td>{stars}</td><td>{open_issues}</td><td>{contributors}</td></tr>",
            id = repo.id,
            name = escape_html(&repo.full_name),
            description = escape_html(repo.description.as_deref().unwrap_or("")),
            stars = repo.stars,
            open_issues = repo.open_issues_count,
            contributors = repo.contributors_count,
        );
    }
    body.push_str("</tbody>\n</table>\n");

    page(title, &body)
}

/// A repository with its stored issues, newest first.
pub fn render_repository_detail(repository: &Repository, issues: &[Issue]) -> String {
    let mut body = format!(
        "<h1><a href=\"{url}\">{name}</a></h1>\n",
        url = escape_html(&repository.html_url),
        name = escape_html(&repository.full_name),
    );

    if let Some(description) = repository.description.as_deref() {
        let _ = writeln!(body, "<p>{}</p>", escape_html(description));
    }

    let _ = writeln!(
        body,
        "<ul>\n<li>Stars: {}</li>\n<li>Open issues: {}</li>\n<li>Contributors: {}</li>\n</ul>",
        repository.stars, repository.open_issues_count, repository.contributors_count
    );

    body.push_str("<h2>Recent open issues</h2>\n");
    if issues.is_empty() {
        body.push_str("<p>No open issues recorded.</p>\n");
    } else {
        body.push_str("<ol>\n");
        for issue in issues {
            let _ = writeln!(
                body,
                "<li><a href=\"{url}\">#{number} {title}</a> <time>{created}</time></li>",
                url = escape_html(&issue.html_url),
                number = issue.issue_number,
                title = escape_html(&issue.title),
                created = format_datetime(&issue.created_at),
            );
        }
        body.push_str("</ol>\n");
    }

    page(&repository.full_name, &body)
}

/// Minimal page for 4xx/5xx responses.
pub fn render_error(title: &str, message: &str) -> String {
    page(title, &format!("<h1>{}</h1>\n<p>{}</p>\n", escape_html(title), escape_html(message)))
}
