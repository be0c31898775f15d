//! Content command handlers.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use skydeck_core::{AdminFlow, ContentForm, ContentItem, ContentRepository, Locale};

use crate::cli::{ContentCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ContentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Order")]
    order: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Title (uk)")]
    title_uk: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "File")]
    file: String,
}

impl From<&ContentItem> for ContentRow {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            kind: item.kind.to_string(),
            order: item.order,
            title: item.title.resolve(Locale::En).to_owned(),
            title_uk: item.title.resolve(Locale::Uk).to_owned(),
            created: item.created_at.format("%Y-%m-%d").to_string(),
            file: if item.file_url.is_empty() {
                "(pending)".to_owned()
            } else {
                item.file_url.clone()
            },
        }
    }
}

// ── Upload spinner ──────────────────────────────────────────────────

fn upload_spinner(quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message("Uploading...");
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(bar)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    repo: &Arc<ContentRepository>,
    command: ContentCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ContentCommand::List { drone, kind } => {
            let items = repo.list_content(&drone, kind.map(Into::into)).await?;
            let out = output::render_list(
                &global.output,
                &items,
                |item| ContentRow::from(item),
                |item| item.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContentCommand::Add {
            drone,
            kind,
            title,
            title_uk,
            description,
            description_uk,
            file,
        } => {
            let mut form = ContentForm::for_new(kind.into());
            form.title = title;
            form.title_uk = title_uk.unwrap_or_default();
            form.description = description.unwrap_or_default();
            form.description_uk = description_uk.unwrap_or_default();
            if let Some(ref path) = file {
                form.file = Some(util::read_attachment(path, form.kind)?);
            }

            // Order is computed from the currently loaded partition.
            let loaded = repo.list_content(&drone, None).await?;

            let spinner = form.file.as_ref().and_then(|_| upload_spinner(global.quiet));
            let flow = AdminFlow::new(Arc::clone(repo));
            let result = flow.submit_new(&drone, &form, &loaded).await;
            if let Some(bar) = spinner {
                bar.finish_and_clear();
            }

            let id = result?;
            output::print_success(
                &format!("Content item added: {id}"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        ContentCommand::Update {
            id,
            drone,
            title,
            title_uk,
            description,
            description_uk,
            file,
        } => {
            let item = util::find_item(repo, &drone, &id).await?;

            let mut form = ContentForm::for_edit(&item);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(title_uk) = title_uk {
                form.title_uk = title_uk;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(description_uk) = description_uk {
                form.description_uk = description_uk;
            }
            if let Some(ref path) = file {
                form.file = Some(util::read_attachment(path, item.kind)?);
            }

            let spinner = form.file.as_ref().and_then(|_| upload_spinner(global.quiet));
            let flow = AdminFlow::new(Arc::clone(repo));
            let result = flow.submit_edit(&item, &form).await;
            if let Some(bar) = spinner {
                bar.finish_and_clear();
            }

            result?;
            output::print_success("Content item updated", &global.color, global.quiet);
            Ok(())
        }

        ContentCommand::Delete { id, drone } => {
            let item = util::find_item(repo, &drone, &id).await?;

            let title = item.title.resolve(Locale::En);
            if !util::confirm(
                &format!("Delete {} '{title}'? This also removes its file.", item.kind),
                global.yes,
            )? {
                return Ok(());
            }

            let flow = AdminFlow::new(Arc::clone(repo));
            flow.delete(&item).await?;
            output::print_success("Content item deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}
