//! Content browser screen — the tabbed viewer with its lightbox.
//!
//! Wraps the core [`ContentBrowser`] state machine; this file only maps
//! terminal events onto it and renders the result. List selection is
//! screen-local view state, clamped whenever the item set or tab changes.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use skydeck_core::{ContentBrowser, ContentItem, Locale, SyncState, ViewerTab};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::sub_tabs;

/// Approximate width of one terminal cell in device-independent pixels,
/// used to feed mouse-drag columns into the swipe tracker.
const CELL_WIDTH_PX: f32 = 8.0;

pub struct BrowserScreen {
    browser: ContentBrowser,
    sync_state: SyncState,
    locale: Locale,
    selected: usize,
}

impl BrowserScreen {
    pub fn new(hint: ViewerTab, locale: Locale) -> Self {
        Self {
            browser: ContentBrowser::new(hint),
            sync_state: SyncState::Loading,
            locale,
            selected: 0,
        }
    }

    /// Currently selected item under the active tab.
    pub fn selected_item(&self) -> Option<ContentItem> {
        self.browser.active_items().get(self.selected).map(|&i| i.clone())
    }

    pub fn lightbox_open(&self) -> bool {
        self.browser.lightbox_index().is_some()
    }

    fn active_len(&self) -> usize {
        self.browser.active_items().len()
    }

    fn clamp_selection(&mut self) {
        let len = self.active_len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let next = (self.selected as isize + delta).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }

    fn tab_index(&self) -> usize {
        ViewerTab::ALL
            .iter()
            .position(|&t| t == self.browser.active_tab())
            .unwrap_or(0)
    }

    // ── Key handling ─────────────────────────────────────────────────

    fn handle_lightbox_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseLightbox),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPhoto),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPhoto),
            _ => None,
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),

            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') => {
                self.selected = self.active_len().saturating_sub(1);
                None
            }

            KeyCode::Enter => {
                if self.browser.active_tab() == ViewerTab::Photos && self.active_len() > 0 {
                    Some(Action::OpenLightbox(self.selected))
                } else {
                    None
                }
            }

            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('a') => Some(Action::OpenAddForm(self.browser.active_tab().kind())),
            KeyCode::Char('e') => self
                .selected_item()
                .map(|item| Action::OpenEditForm(Box::new(item))),
            KeyCode::Char('d') => self.selected_item().map(|item| {
                Action::ShowConfirm(crate::action::ConfirmAction::DeleteItem(Box::new(item)))
            }),

            _ => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn tab_labels(&self) -> Vec<String> {
        ViewerTab::ALL
            .iter()
            .map(|tab| {
                let count = match tab {
                    ViewerTab::Specifications => self.browser.specifications().len(),
                    ViewerTab::Photos => self.browser.photos().len(),
                    ViewerTab::Videos => self.browser.videos().len(),
                };
                format!("{} ({count})", tab.label(self.locale))
            })
            .collect()
    }

    fn render_items(&self, frame: &mut Frame, area: Rect) {
        let items = self.browser.active_items();

        if items.is_empty() {
            let notice = self.browser.active_tab().empty_notice(self.locale);
            let paragraph = Paragraph::new(Line::from(Span::styled(notice, theme::empty_notice())))
                .centered();
            frame.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("#").style(theme::table_header()),
            Cell::from("Title").style(theme::table_header()),
            Cell::from("Description").style(theme::table_header()),
            Cell::from("File").style(theme::table_header()),
        ]);

        let rows: Vec<Row> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_selected = i == self.selected;
                let prefix = if is_selected { "▸" } else { " " };
                let title = item.title.resolve(self.locale);
                let description = item
                    .description
                    .as_ref()
                    .map(|d| d.resolve(self.locale))
                    .unwrap_or_default();
                let file = if item.file_url.is_empty() {
                    "(pending upload)"
                } else {
                    item.file_url.as_str()
                };

                let row_style = if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };

                Row::new(vec![
                    Cell::from(format!("{prefix}{}", item.order)),
                    Cell::from(title.to_owned()).style(Style::default().fg(theme::SIGNAL_YELLOW)),
                    Cell::from(description.to_owned()),
                    Cell::from(file.to_owned()).style(Style::default().fg(theme::SKY_BLUE)),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Min(24),
            Constraint::Min(24),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_lightbox(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_NIGHT)),
            area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let counter = format!(
            "{} / {}",
            self.browser.lightbox_index().map_or(0, |i| i + 1),
            self.browser.photo_count()
        );

        let lines: Vec<Line> = match self.browser.current_photo() {
            Some(photo) => {
                let mut lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        photo.title.resolve(self.locale).to_owned(),
                        theme::title_style(),
                    ))
                    .centered(),
                    Line::from(""),
                    Line::from(Span::styled(
                        photo.file_url.clone(),
                        Style::default().fg(theme::SKY_BLUE),
                    ))
                    .centered(),
                ];
                if let Some(description) = &photo.description {
                    lines.push(Line::from(""));
                    lines.push(
                        Line::from(Span::styled(
                            description.resolve(self.locale).to_owned(),
                            theme::table_row(),
                        ))
                        .centered(),
                    );
                }
                lines.push(
                    Line::from(Span::styled(
                        photo.created_at.format("%d.%m.%Y").to_string(),
                        theme::key_hint(),
                    ))
                    .centered(),
                );
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(counter, theme::key_hint())).centered());
                lines.push(
                    Line::from(Span::styled(
                        "← h  │  drag to swipe  │  l →     Esc close",
                        theme::key_hint(),
                    ))
                    .centered(),
                );
                lines
            }
            // The photo set shrank underneath the open lightbox.
            None => vec![
                Line::from(""),
                Line::from(Span::styled("Photo no longer available", theme::empty_notice()))
                    .centered(),
                Line::from(Span::styled("Esc close", theme::key_hint())).centered(),
            ],
        };

        let vertical_pad = inner.height.saturating_sub(8) / 2;
        let layout = Layout::vertical([
            Constraint::Length(vertical_pad),
            Constraint::Min(1),
        ])
        .split(inner);

        frame.render_widget(Paragraph::new(lines), layout[1]);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.sync_state {
            SyncState::Loading => Line::from(Span::styled(
                "Loading content...",
                Style::default().fg(theme::WARNING_ORANGE),
            )),
            SyncState::Error(message) => Line::from(Span::styled(
                format!("Error: {message}"),
                Style::default().fg(theme::ERROR_RED),
            )),
            SyncState::Ready => Line::from(vec![
                Span::styled(
                    format!("{} items", self.browser.items().len()),
                    theme::key_hint(),
                ),
                Span::styled(
                    "   a add  e edit  d delete  r refresh  Enter open",
                    theme::key_hint(),
                ),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for BrowserScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.lightbox_open() {
            return Ok(self.handle_lightbox_key(key));
        }
        Ok(self.handle_browse_key(key))
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.lightbox_open() {
            // Horizontal drags page the lightbox; columns are converted to
            // approximate device pixels for the 50px threshold.
            let x = f32::from(mouse.column) * CELL_WIDTH_PX;
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self.browser.touch_start(x),
                MouseEventKind::Drag(MouseButton::Left) => self.browser.touch_move(x),
                MouseEventKind::Up(MouseButton::Left) => self.browser.touch_end(),
                _ => {}
            }
            return Ok(None);
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_selection(1),
            MouseEventKind::ScrollUp => self.move_selection(-1),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SyncUpdated(snapshot) => {
                self.sync_state = snapshot.state.clone();
                self.browser.set_items(snapshot.items.clone());
                self.clamp_selection();
            }

            Action::SwitchTab(tab) => {
                self.browser.select_tab(*tab);
                self.clamp_selection();
            }
            Action::NextTab => {
                let next = ViewerTab::ALL[(self.tab_index() + 1) % ViewerTab::ALL.len()];
                self.browser.select_tab(next);
                self.clamp_selection();
            }
            Action::PrevTab => {
                let len = ViewerTab::ALL.len();
                let prev = ViewerTab::ALL[(self.tab_index() + len - 1) % len];
                self.browser.select_tab(prev);
                self.clamp_selection();
            }

            Action::OpenLightbox(index) => self.browser.open_lightbox(*index),
            Action::CloseLightbox => self.browser.close_lightbox(),
            Action::NextPhoto => self.browser.next_photo(),
            Action::PrevPhoto => self.browser.prev_photo(),

            Action::ToggleLanguage => self.locale = self.locale.toggled(),

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if self.lightbox_open() {
            self.render_lightbox(frame, area);
            return;
        }

        let layout = Layout::vertical([
            Constraint::Length(1), // content tabs
            Constraint::Min(1),    // item list
            Constraint::Length(1), // state / hints line
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&self.tab_labels(), self.tab_index())),
            layout[0],
        );

        match &self.sync_state {
            SyncState::Error(message) => {
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(theme::ERROR_RED),
                )))
                .centered();
                frame.render_widget(paragraph, layout[1]);
            }
            _ => self.render_items(frame, layout[1]),
        }

        self.render_status_line(frame, layout[2]);
    }

    fn id(&self) -> &str {
        "browser"
    }
}
