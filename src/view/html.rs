use super::{ListView, TaskRow};
use url::Url;

/// Escapes text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Only http(s) links are turned into anchors
fn safe_link(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Only inline image data is used as an image source
fn safe_image(data_uri: &str) -> Option<&str> {
    data_uri.starts_with("data:image/").then_some(data_uri)
}

fn render_row(row: &TaskRow) -> String {
    let mut media = String::new();
    if let Some(src) = row.image.as_deref().and_then(safe_image) {
        media.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\">🖼️</a>",
            escape_html(src)
        ));
    }
    if let Some(href) = row.video_link.as_deref().and_then(safe_link) {
        media.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\">🎥</a>",
            escape_html(&href)
        ));
    }

    let description = escape_html(&row.description);
    format!(
        "<tr>\
<td><span class=\"day-badge\">{}</span></td>\
<td>{}</td>\
<td>{}</td>\
<td>{}</td>\
<td><div class=\"media-icons\">{}</div></td>\
<td class=\"description-cell\" title=\"{}\">{}</td>\
</tr>",
        escape_html(&row.day_badge),
        escape_html(&row.staff_name),
        escape_html(&row.team_name),
        escape_html(&row.assigned_date),
        media,
        description,
        description
    )
}

/// Renders the list view as an HTML fragment
pub fn render_html(view: &ListView) -> String {
    if view.is_empty() {
        return "<div class=\"empty-state\">No tasks found</div>\n".to_string();
    }

    let mut out = String::from("<table>\n<thead><tr><th>Day</th><th>Staff</th><th>Team</th><th>Date</th><th>Media</th><th>Description</th></tr></thead>\n<tbody>\n");
    for row in &view.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str("</tbody>\n</table>\n");

    if let Some(p) = &view.pagination {
        out.push_str(&format!(
            "<div class=\"pagination\"><span class=\"pagination-info\">{}</span>\
<button{}>Previous</button><span class=\"page-info\">{}</span><button{}>Next</button></div>\n",
            p.showing,
            if p.can_previous { "" } else { " disabled" },
            p.page,
            if p.can_next { "" } else { " disabled" }
        ));
    }
    out
}
