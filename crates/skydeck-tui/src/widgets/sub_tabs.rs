//! Horizontal sub-tab bar for the content tabs (specs / photos / videos).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// Renders a horizontal tab bar line with the active tab highlighted.
///
/// Each label is rendered inline. The active tab gets Signal Yellow +
/// bold; inactive tabs are muted.
pub fn render_sub_tabs(labels: &[String], active_index: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }

        if i == active_index {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme::tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label.clone(), theme::tab_inactive()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn active_tab_is_bracketed() {
        let labels = vec!["Photos (2)".to_owned(), "Videos (0)".to_owned()];
        let line = render_sub_tabs(&labels, 0);

        let text: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert_eq!(text, "[Photos (2)]  Videos (0)");
    }
}
