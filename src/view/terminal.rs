use super::ListView;
use colored::*;

/// Makes user text inert on a terminal: control characters, including the
/// escape that starts ANSI sequences, are printed as escapes.
pub fn escape_terminal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

fn cell(text: &str, width: usize) -> String {
    let escaped = escape_terminal(text);
    let count = escaped.chars().count();
    if count > width {
        let truncated: String = escaped.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    } else {
        format!("{}{}", escaped, " ".repeat(width - count))
    }
}

const COLUMNS: [(&str, usize); 5] = [
    ("Day", 8),
    ("Staff", 18),
    ("Team", 14),
    ("Date", 13),
    ("Media", 6),
];

/// Renders the list view as plain terminal text
pub fn render_terminal(view: &ListView) -> String {
    if view.is_empty() {
        return format!("{}\n", "No tasks found".yellow());
    }

    let mut out = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|(name, w)| cell(name, *w)).collect();
    out.push_str(&format!("{} {}\n", header.join(" ").bold(), "Description".bold()));

    for row in &view.rows {
        let mut media = String::new();
        if row.image.is_some() {
            media.push('I');
        }
        if row.video_link.is_some() {
            media.push('V');
        }
        let cells = [
            cell(&row.day_badge, COLUMNS[0].1).cyan().to_string(),
            cell(&row.staff_name, COLUMNS[1].1),
            cell(&row.team_name, COLUMNS[2].1),
            cell(&row.assigned_date, COLUMNS[3].1),
            cell(&media, COLUMNS[4].1),
        ];
        out.push_str(&format!(
            "{} {}\n",
            cells.join(" "),
            escape_terminal(&row.description)
        ));
    }

    if let Some(p) = &view.pagination {
        out.push_str(&format!("\n{}  {}\n", p.showing.dimmed(), p.page.bold()));
    }
    out
}
