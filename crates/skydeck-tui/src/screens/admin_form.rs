//! Add/edit form overlay for content items.
//!
//! Collects the locale-paired titles and descriptions plus an optional
//! file path. Submission is orchestrated by the app loop; the form only
//! owns input state and the busy indicator that brackets the async span.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use skydeck_core::{ContentItem, ContentKind, Locale};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const FIELD_COUNT: usize = 5;
const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "Title (English)",
    "Title (Ukrainian)",
    "Description (English)",
    "Description (Ukrainian)",
    "File path",
];

/// What the form will do on submit.
#[derive(Debug, Clone)]
pub enum FormMode {
    Add { drone_id: String, kind: ContentKind },
    Edit(Box<ContentItem>),
}

impl FormMode {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Add { kind, .. } => *kind,
            Self::Edit(item) => item.kind,
        }
    }
}

/// Values read out of the form at submit time.
#[derive(Debug, Clone)]
pub struct FormValues {
    pub title: String,
    pub title_uk: String,
    pub description: String,
    pub description_uk: String,
    pub file_path: Option<String>,
}

pub struct AdminFormScreen {
    mode: Option<FormMode>,
    inputs: [Input; FIELD_COUNT],
    focus: usize,
    busy: bool,
    throbber: ThrobberState,
}

impl AdminFormScreen {
    pub fn new() -> Self {
        Self {
            mode: None,
            inputs: std::array::from_fn(|_| Input::default()),
            focus: 0,
            busy: false,
            throbber: ThrobberState::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn mode(&self) -> Option<&FormMode> {
        self.mode.as_ref()
    }

    /// Open a blank form for creating an item of `kind` under `drone_id`.
    pub fn open_add(&mut self, drone_id: String, kind: ContentKind) {
        self.inputs = std::array::from_fn(|_| Input::default());
        self.focus = 0;
        self.busy = false;
        self.mode = Some(FormMode::Add { drone_id, kind });
    }

    /// Open the form pre-filled from an existing item. The kind is fixed.
    pub fn open_edit(&mut self, item: ContentItem) {
        let description = item.description.clone().unwrap_or_default();
        self.inputs = [
            Input::new(item.title.resolve(Locale::En).to_owned()),
            Input::new(item.title.get(Locale::Uk).unwrap_or_default().to_owned()),
            Input::new(description.resolve(Locale::En).to_owned()),
            Input::new(description.get(Locale::Uk).unwrap_or_default().to_owned()),
            Input::default(),
        ];
        self.focus = 0;
        self.busy = false;
        self.mode = Some(FormMode::Edit(Box::new(item)));
    }

    pub fn close(&mut self) {
        self.mode = None;
        self.busy = false;
    }

    /// Toggle the loading indicator around the async submit span.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Read the current input values.
    pub fn values(&self) -> FormValues {
        let value = |i: usize| {
            self.inputs
                .get(i)
                .map(|input| input.value().trim().to_owned())
                .unwrap_or_default()
        };
        let file_path = value(4);
        FormValues {
            title: value(0),
            title_uk: value(1),
            description: value(2),
            description_uk: value(3),
            file_path: (!file_path.is_empty()).then_some(file_path),
        }
    }

    fn title_line(&self) -> String {
        match &self.mode {
            Some(FormMode::Add { kind, .. }) => format!(" Add {kind} "),
            Some(FormMode::Edit(item)) => format!(" Edit {} ", item.kind),
            None => String::new(),
        }
    }
}

impl Default for AdminFormScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AdminFormScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.busy {
            // The submit span is in flight; only allow bailing out.
            return Ok(matches!(key.code, KeyCode::Esc).then_some(Action::CloseForm));
        }

        match key.code {
            KeyCode::Esc => Ok(Some(Action::CloseForm)),
            KeyCode::Enter => Ok(Some(Action::SubmitForm)),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_COUNT;
                Ok(None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
                Ok(None)
            }
            _ => {
                if let Some(input) = self.inputs.get_mut(self.focus) {
                    input.handle_event(&crossterm::event::Event::Key(key));
                }
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Tick = action {
            if self.busy {
                self.throbber.calc_next();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 64u16.min(area.width.saturating_sub(4));
        let height = 16u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let popup = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(self.title_line())
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints = vec![Constraint::Length(2); FIELD_COUNT];
        constraints.push(Constraint::Length(1)); // spacer
        constraints.push(Constraint::Length(1)); // footer
        let rows = Layout::vertical(constraints).split(inner);

        for (i, label) in FIELD_LABELS.iter().enumerate() {
            let Some(row) = rows.get(i) else { break };
            let focused = i == self.focus;
            let label_text = if i == 4 {
                match self.mode {
                    Some(FormMode::Edit(_)) => "Replace file (optional)",
                    _ => *label,
                }
            } else {
                *label
            };
            let marker = if focused { "▸ " } else { "  " };
            let value = self.inputs.get(i).map(Input::value).unwrap_or_default();

            let line = Line::from(vec![
                Span::styled(
                    format!("{marker}{label_text}: "),
                    if focused {
                        theme::key_hint_key()
                    } else {
                        theme::key_hint()
                    },
                ),
                Span::styled(
                    value.to_owned(),
                    if focused {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    },
                ),
            ]);
            frame.render_widget(Paragraph::new(line), *row);
        }

        if let Some(footer) = rows.last() {
            if self.busy {
                let throbber = Throbber::default()
                    .label("Uploading...")
                    .style(Style::default().fg(theme::WARNING_ORANGE));
                let mut state = self.throbber.clone();
                frame.render_stateful_widget(throbber, *footer, &mut state);
            } else {
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        "Enter submit   Tab next field   Esc cancel",
                        theme::key_hint(),
                    ))),
                    *footer,
                );
            }
        }
    }

    fn id(&self) -> &str {
        "admin-form"
    }
}
