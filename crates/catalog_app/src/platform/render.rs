use catalog_core::{AppViewModel, ListingStatus, PerformerSummaryView, RecordRowView};

/// Renders the view model as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(performer) = &view.performer {
        lines.extend(performer_lines(performer));
    }
    lines.push(controls_line(view));

    match &view.status {
        ListingStatus::Loading => lines.push("Loading catalog…".to_string()),
        ListingStatus::Failed { message } => {
            lines.push(format!("Could not load the catalog: {message}"));
        }
        ListingStatus::Empty => lines.push("Nothing matches the current filters.".to_string()),
        ListingStatus::Ready => {
            if view.range_fallback {
                lines.push("(no records in this window; showing all dates)".to_string());
            }
            lines.extend(view.rows.iter().map(row_line));
            lines.push(format!(
                "page {}/{} · {} matched",
                view.current_page, view.page_count, view.total_matched
            ));
        }
    }
    lines
}

fn controls_line(view: &AppViewModel) -> String {
    let mut line = format!("sort: {}", view.selected_sort.as_str());
    if view.effective_sort != view.selected_sort {
        line.push_str(&format!(" (using {})", view.effective_sort.as_str()));
    }
    line.push_str(&format!(" | range: {}", view.range.as_str()));
    if !view.search_query.is_empty() {
        line.push_str(&format!(" | search: \"{}\"", view.search_query));
    }
    if view.search_pending {
        line.push_str(" …");
    }
    line
}

fn row_line(row: &RecordRowView) -> String {
    format!(
        "{:>4}. {} — {} | {} views | {} | {}",
        row.position, row.title, row.performer, row.views, row.duration, row.published
    )
}

fn performer_lines(summary: &PerformerSummaryView) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: {} videos, {} views",
        summary.performer, summary.matched_count, summary.matched_views
    )];
    if let Some(rank) = summary.rank {
        let mut stats = format!("rank #{rank}");
        for (label, value) in [
            ("score", &summary.score),
            ("like rate", &summary.like_rate),
            ("total", &summary.total_minutes),
        ] {
            if let Some(value) = value {
                stats.push_str(&format!(" · {label} {value}"));
            }
        }
        lines.push(stats);
    }
    lines
}
