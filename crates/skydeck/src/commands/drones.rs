//! Drone catalog command handlers.

use std::sync::Arc;

use tabled::Tabled;

use skydeck_core::{
    ContentRepository, DroneModel, DronePatch, Locale, LocalizedText, NewDroneModel,
};

use crate::cli::{DronesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DroneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Name (uk)")]
    name_uk: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Order")]
    order: i64,
}

impl From<&DroneModel> for DroneRow {
    fn from(model: &DroneModel) -> Self {
        Self {
            id: model.id.clone(),
            name: model.name.resolve(Locale::En).to_owned(),
            name_uk: model.name.resolve(Locale::Uk).to_owned(),
            slug: model.slug.clone(),
            order: model.order,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    repo: &Arc<ContentRepository>,
    command: DronesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        DronesCommand::List { builtin } => {
            let models = if builtin {
                DroneModel::builtin()
            } else {
                repo.list_drone_models().await?
            };
            let out = output::render_list(
                &global.output,
                &models,
                |model| DroneRow::from(model),
                |model| model.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DronesCommand::Add {
            name,
            name_uk,
            slug,
            order,
        } => {
            let model = NewDroneModel {
                name: LocalizedText::new(name)
                    .with(Locale::Uk, name_uk.unwrap_or_default()),
                slug,
                order,
            };
            let id = repo.add_drone_model(&model).await?;
            output::print_success(
                &format!("Drone model added: {id}"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        DronesCommand::Update {
            id,
            name,
            name_uk,
            slug,
            order,
        } => {
            let localized_name = match (name, name_uk) {
                (None, None) => None,
                (name, name_uk) => Some(
                    LocalizedText::default()
                        .with(Locale::En, name.unwrap_or_default())
                        .with(Locale::Uk, name_uk.unwrap_or_default()),
                ),
            };
            let patch = DronePatch {
                name: localized_name,
                slug,
                order,
            };
            repo.update_drone_model(&id, &patch).await?;
            output::print_success("Drone model updated", &global.color, global.quiet);
            Ok(())
        }

        DronesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete drone model '{id}'? Its content keeps pointing at this id."),
                global.yes,
            )? {
                return Ok(());
            }
            repo.delete_drone_model(&id).await?;
            output::print_success("Drone model deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}
