//! Application core — event loop, action dispatch, mutation orchestration.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use skydeck_core::{
    AdminFlow, ContentForm, ContentItem, ContentRepository, ContentSelector, ContentSync,
    DroneModel, FileAttachment, Locale, SyncSnapshot, ViewerTab, admin,
};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screens::{AdminFormScreen, BrowserScreen, FormMode};
use crate::theme;
use crate::tui::Tui;

/// How many ticks (4 Hz) a toast stays on screen.
const NOTIFICATION_TICKS: u8 = 12;

/// Top-level application state and event loop.
pub struct App {
    running: bool,
    repo: Arc<ContentRepository>,
    locale: Locale,

    /// Drone catalog: built-in fleet until the store catalog loads.
    drones: Vec<DroneModel>,
    selected_drone: usize,

    /// Sync for the selected drone; replaced wholesale on drone switch.
    sync: Option<ContentSync>,
    watch_cancel: CancellationToken,
    snapshot: SyncSnapshot,

    browser: BrowserScreen,
    form: AdminFormScreen,
    confirm: Option<ConfirmAction>,
    notification: Option<(Notification, u8)>,
    help_visible: bool,

    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(
        repo: Arc<ContentRepository>,
        locale: Locale,
        initial_drone: Option<&str>,
        tab_hint: ViewerTab,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let drones = DroneModel::builtin();
        let selected_drone = initial_drone
            .and_then(|id| drones.iter().position(|d| d.id == id))
            .unwrap_or(0);

        Self {
            running: true,
            repo,
            locale,
            drones,
            selected_drone,
            sync: None,
            watch_cancel: CancellationToken::new(),
            snapshot: SyncSnapshot::default(),
            browser: BrowserScreen::new(tab_hint, locale),
            form: AdminFormScreen::new(),
            confirm: None,
            notification: None,
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    fn selected_drone_id(&self) -> String {
        self.drones
            .get(self.selected_drone)
            .map(|d| d.id.clone())
            .unwrap_or_default()
    }

    /// Start (or restart) the content sync for the selected drone.
    ///
    /// A selector change is always a cold fetch: the old sync instance and
    /// its watcher are dropped, a fresh one starts from `loading`.
    fn mount_selected_drone(&mut self) {
        self.watch_cancel.cancel();
        self.watch_cancel = CancellationToken::new();

        let selector = ContentSelector::all(self.selected_drone_id());
        let sync = ContentSync::spawn(Arc::clone(&self.repo), selector);
        data_bridge::spawn_content_watch(
            sync.clone(),
            self.action_tx.clone(),
            self.watch_cancel.clone(),
        );
        self.sync = Some(sync);
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        self.browser.init(self.action_tx.clone())?;
        self.form.init(self.action_tx.clone())?;
        self.browser.set_focused(true);

        self.mount_selected_drone();
        data_bridge::spawn_catalog_fetch(Arc::clone(&self.repo), self.action_tx.clone());

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.watch_cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Event → Action mapping ───────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // A blocking confirmation eats every key until acknowledged.
        if self.confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if self.form.is_open() {
            return self.form.handle_key_event(key);
        }

        // With the lightbox open, the browser sees keys first so that
        // `q` closes the lightbox instead of quitting.
        if self.browser.lightbox_open() {
            return self.browser.handle_key_event(key);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char('u')) => return Ok(Some(Action::ToggleLanguage)),

            // Drone selection via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let index = usize::from(c as u8 - b'1');
                if index < self.drones.len() {
                    return Ok(Some(Action::SelectDrone(index)));
                }
            }

            _ => {}
        }

        self.browser.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.form.is_open() || self.confirm.is_some() || self.help_visible {
            return Ok(None);
        }
        self.browser.handle_mouse_event(mouse)
    }

    // ── Action processing ────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(_, _) | Action::Render => {}

            Action::Tick => {
                if let Some((_, ticks)) = &mut self.notification {
                    *ticks = ticks.saturating_sub(1);
                    if *ticks == 0 {
                        self.notification = None;
                    }
                }
                let _ = self.form.update(action)?;
            }

            Action::SelectDrone(index) => {
                if *index != self.selected_drone && *index < self.drones.len() {
                    debug!(index, "switching drone");
                    self.selected_drone = *index;
                    self.mount_selected_drone();
                }
            }

            Action::CatalogLoaded(models) => {
                let current_id = self.selected_drone_id();
                self.drones = models.clone();
                // Keep the same drone selected when it survives the reload.
                self.selected_drone = self
                    .drones
                    .iter()
                    .position(|d| d.id == current_id)
                    .unwrap_or(0);
                if self.selected_drone_id() != current_id {
                    self.mount_selected_drone();
                }
            }

            Action::Refresh => {
                if let Some(sync) = &self.sync {
                    sync.invalidate();
                }
            }

            Action::SyncUpdated(snapshot) => {
                self.snapshot = snapshot.clone();
                let _ = self.browser.update(action)?;
            }

            Action::ToggleLanguage => {
                self.locale = self.locale.toggled();
                let _ = self.browser.update(action)?;
            }

            Action::OpenAddForm(kind) => {
                self.form.open_add(self.selected_drone_id(), *kind);
            }

            Action::OpenEditForm(item) => {
                self.form.open_edit((**item).clone());
            }

            Action::CloseForm => {
                self.form.close();
            }

            Action::SubmitForm => {
                self.submit_form();
            }

            Action::MutationFinished(result) => match result {
                Ok(message) => {
                    self.form.close();
                    self.notify(Notification::success(message.clone()));
                    if let Some(sync) = &self.sync {
                        sync.invalidate();
                    }
                }
                Err(message) => {
                    // Leave the form open and editable for retry.
                    self.form.set_busy(false);
                    self.notify(Notification::error(message.clone()));
                }
            },

            Action::ShowConfirm(confirm) => {
                self.confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.confirm.take() {
                    match confirm {
                        ConfirmAction::DeleteItem(item) => self.delete_item(*item),
                    }
                }
            }

            Action::ConfirmNo => {
                self.confirm = None;
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), NOTIFICATION_TICKS));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // Viewer actions are the browser's business.
            other => {
                if let Some(follow_up) = self.browser.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, NOTIFICATION_TICKS));
    }

    // ── Mutation orchestration ───────────────────────────────────────

    /// Validate and launch the submit task. The presence check happens
    /// here, before any I/O; a missing title surfaces a blocking notice
    /// and aborts the submit.
    fn submit_form(&mut self) {
        let Some(mode) = self.form.mode().cloned() else {
            return;
        };
        let values = self.form.values();

        if values.title.is_empty() {
            self.notify(Notification::warning("Title is required"));
            return;
        }

        if let Some(ref path) = values.file_path {
            if !admin::matches_accepted_extension(mode.kind(), path) {
                self.notify(Notification::warning(format!(
                    "'{path}' doesn't look like a {} file (uploading anyway)",
                    mode.kind()
                )));
            }
        }

        self.form.set_busy(true);

        let repo = Arc::clone(&self.repo);
        let loaded = self.snapshot.items.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = run_submit(repo, mode, values, &loaded).await;
            let _ = tx.send(Action::MutationFinished(result));
        });
    }

    fn delete_item(&self, item: ContentItem) {
        let repo = Arc::clone(&self.repo);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let flow = AdminFlow::new(repo);
            let result = flow
                .delete(&item)
                .await
                .map(|()| "Item deleted".to_owned())
                .map_err(|e| e.to_string());
            let _ = tx.send(Action::MutationFinished(result));
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(1), // drone selector
            Constraint::Min(1),    // browser
            Constraint::Length(1), // status bar
        ])
        .split(area);

        self.render_drone_bar(frame, layout[0]);
        self.browser.render(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if self.form.is_open() {
            self.form.render(frame, area);
        }
        if let Some(confirm) = &self.confirm {
            self.render_confirm(frame, area, confirm);
        }
        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
        if let Some((notification, _)) = &self.notification {
            self.render_notification(frame, area, notification);
        }
    }

    fn render_drone_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .drones
            .iter()
            .enumerate()
            .map(|(i, drone)| {
                let style = if i == self.selected_drone {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", i + 1, drone.name.resolve(self.locale)),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(self.selected_drone);

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let language = match self.locale {
            Locale::En => "EN",
            Locale::Uk => "UK",
        };

        let line = Line::from(vec![
            Span::styled(" SKYDECK ", theme::title_style()),
            Span::styled(
                format!("│ {language} "),
                Style::default().fg(theme::SKY_BLUE),
            ),
            Span::styled(
                "│ 1-9 drone  Tab section  u language  ? help  q quit",
                theme::key_hint(),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_notification(&self, frame: &mut Frame, area: Rect, notification: &Notification) {
        let color = match notification.level {
            NotificationLevel::Info => theme::SKY_BLUE,
            NotificationLevel::Success => theme::SUCCESS_GREEN,
            NotificationLevel::Warning => theme::WARNING_ORANGE,
            NotificationLevel::Error => theme::ERROR_RED,
        };

        let width = u16::try_from(notification.message.len() + 4)
            .unwrap_or(u16::MAX)
            .min(area.width);
        let toast = Rect::new(area.width.saturating_sub(width), 1, width, 3);

        frame.render_widget(Clear, toast);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let inner = block.inner(toast);
        frame.render_widget(block, toast);
        frame.render_widget(
            Paragraph::new(Span::styled(
                notification.message.clone(),
                Style::default().fg(color),
            )),
            inner,
        );
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let message = confirm.to_string();
        let width = u16::try_from(message.len() + 6)
            .unwrap_or(u16::MAX)
            .clamp(30, area.width.saturating_sub(4));
        let height = 5;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let popup = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ERROR_RED))
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(Span::styled(message, theme::table_row())).centered(),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", theme::key_hint_key()),
                Span::styled(" confirm   ", theme::key_hint()),
                Span::styled("n", theme::key_hint_key()),
                Span::styled(" cancel", theme::key_hint()),
            ])
            .centered(),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let width = 46u16.min(area.width.saturating_sub(4));
        let height = 16u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let popup = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let hint = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let lines = vec![
            Line::from(""),
            hint("1-9", "Select drone model"),
            hint("Tab", "Next content section"),
            hint("j/k ↑/↓", "Move selection"),
            hint("Enter", "Open photo lightbox"),
            hint("h/l ← →", "Previous / next photo"),
            hint("drag", "Swipe between photos"),
            hint("a", "Add item to current section"),
            hint("e", "Edit selected item"),
            hint("d", "Delete selected item"),
            hint("r", "Refetch content"),
            hint("u", "Toggle language (EN/UK)"),
            hint("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled("           Esc or ? to close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Submit task body ─────────────────────────────────────────────────

/// Build the `ContentForm` from the dialog values (reading the optional
/// file from disk) and run the create or edit path.
async fn run_submit(
    repo: Arc<ContentRepository>,
    mode: FormMode,
    values: crate::screens::admin_form::FormValues,
    loaded: &[ContentItem],
) -> Result<String, String> {
    let mut form = ContentForm::for_new(mode.kind());
    form.title = values.title;
    form.title_uk = values.title_uk;
    form.description = values.description;
    form.description_uk = values.description_uk;

    if let Some(path) = values.file_path {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| format!("failed to read '{path}': {e}"))?;
        let filename = std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("not a file path: {path}"))?
            .to_owned();
        form.file = Some(FileAttachment {
            filename,
            bytes,
            content_type: None,
        });
    }

    let flow = AdminFlow::new(repo);
    match mode {
        FormMode::Add { drone_id, .. } => flow
            .submit_new(&drone_id, &form, loaded)
            .await
            .map(|_| "Item added".to_owned())
            .map_err(|e| e.to_string()),
        FormMode::Edit(item) => flow
            .submit_edit(&item, &form)
            .await
            .map(|()| "Item updated".to_owned())
            .map_err(|e| e.to_string()),
    }
}
