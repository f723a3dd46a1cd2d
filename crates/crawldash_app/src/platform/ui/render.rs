//! Draws the dashboard as plain text.

use std::fmt::Write;

use crawldash_core::{AppViewModel, Notice, PollHealth, COLUMNS};

use super::constants::HELP_LINES;
use super::layout::{column_widths, fit, Widths};

/// Clears the terminal and moves the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn render(view: &AppViewModel, notices: &[Notice], show_help: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "crawldash | endpoint: {} | limit: {} | {}",
        view.endpoint,
        view.limit,
        poll_summary(&view.poll, view.total_rows)
    );
    if let Some(filter) = &view.filter {
        let _ = writeln!(
            out,
            "filter: {:?} ({} of {} shown)",
            filter,
            view.rows.len(),
            view.total_rows
        );
    }
    out.push('\n');

    render_table(&mut out, view);

    out.push('\n');
    let _ = writeln!(
        out,
        "pending input: {} line(s) | submissions in flight: {}",
        view.pending_lines, view.submissions_in_flight
    );
    for notice in notices {
        let _ = writeln!(out, "> {notice}");
    }
    if show_help {
        for line in HELP_LINES {
            let _ = writeln!(out, "{line}");
        }
    } else {
        out.push_str("Type :help for commands.\n");
    }
    out
}

fn poll_summary(poll: &PollHealth, rows: usize) -> String {
    match poll {
        PollHealth::Waiting => "status: waiting for first poll".to_string(),
        PollHealth::Ok { at } => format!("status: ok at {at} ({rows} job(s))"),
        PollHealth::Failing {
            consecutive,
            last_error,
        } => format!("status: failing x{consecutive}: {last_error}"),
    }
}

fn render_table(out: &mut String, view: &AppViewModel) {
    if view.rows.is_empty() {
        let text = if view.total_rows == 0 {
            "No jobs reported yet."
        } else {
            "No jobs match the filter."
        };
        let _ = writeln!(out, "{text}");
        return;
    }

    let widths = column_widths(&view.rows);
    push_line(out, &COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &view.rows {
        push_line(out, &row.cells(), &widths);
    }
}

fn push_line(out: &mut String, cells: &[&str; 4], widths: &Widths) {
    let fitted: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| fit(cell, *width))
        .collect();
    let _ = writeln!(out, "{}", fitted.join(" | ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawldash_core::{update, AppState, JobRecord, Msg};
    use serde_json::json;

    fn view_with(rows: serde_json::Value) -> AppViewModel {
        let rows: Vec<JobRecord> = serde_json::from_value(rows).unwrap();
        let (state, _) = update(
            AppState::new(),
            Msg::StatusReceived {
                rows,
                received_at: "09:30:00".to_string(),
            },
        );
        state.view()
    }

    #[test]
    fn empty_table_says_so() {
        let text = render(&AppState::new().view(), &[], false);
        assert!(text.contains("No jobs reported yet."));
        assert!(text.contains("status: waiting for first poll"));
        assert!(text.contains("Type :help for commands."));
    }

    #[test]
    fn rows_are_rendered_under_headings() {
        let view = view_with(json!([
            {"details": {"title": "Intro"}, "_comments": 0, "captions": 2, "status": "Done"}
        ]));
        let text = render(&view, &[], false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[2], "Video | Comments    | Captions | Status");
        assert_eq!(lines[3], "------+-------------+----------+-------");
        assert_eq!(lines[4], "Intro | Downloading | Done: 2  | Done");
        assert!(text.contains("status: ok at 09:30:00 (1 job(s))"));
    }

    #[test]
    fn notices_and_help_are_listed() {
        let text = render(
            &AppState::new().view(),
            &[Notice::EndpointSaved, Notice::PendingTasks],
            true,
        );
        assert!(text.contains("> Server URL saved!"));
        assert!(text.contains("> There may be pending tasks, cannot crawl"));
        assert!(text.contains(":submit"));
        assert!(!text.contains("Type :help"));
    }
}
