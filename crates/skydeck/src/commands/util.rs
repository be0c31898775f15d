//! Shared helpers for command handlers.

use std::path::Path;

use skydeck_core::{ContentItem, ContentKind, ContentRepository, FileAttachment, admin};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Locate a content item by id within a drone's content set.
pub async fn find_item(
    repo: &ContentRepository,
    drone: &str,
    id: &str,
) -> Result<ContentItem, CliError> {
    let items = repo.list_content(drone, None).await?;
    items
        .into_iter()
        .find(|item| item.id == id)
        .ok_or_else(|| CliError::NotFound {
            resource: "content item".into(),
            identifier: id.to_owned(),
            list_command: format!("content list {drone}"),
        })
}

/// Read a file from disk into a `FileAttachment`, warning (but not
/// failing) when the extension doesn't match the advisory filter for the
/// content kind.
pub fn read_attachment(path: &Path, kind: ContentKind) -> Result<FileAttachment, CliError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Validation {
            field: "file".into(),
            reason: format!("not a file path: {}", path.display()),
        })?
        .to_owned();

    if !admin::matches_accepted_extension(kind, &filename) {
        eprintln!(
            "warning: '{filename}' doesn't look like a {kind} file (expected one of: {})",
            kind.accepted_extensions().join(", ")
        );
    }

    let bytes = std::fs::read(path)?;
    let content_type = guess_content_type(&filename).map(ToOwned::to_owned);

    Ok(FileAttachment {
        filename,
        bytes,
        content_type,
    })
}

/// Minimal extension → MIME mapping for the upload Content-Type header.
fn guess_content_type(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    })
}
