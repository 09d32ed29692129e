//! Shared helpers for command handlers.

use std::io::IsTerminal;

use larder_core::{ContentFacade, Item, ItemId};

use crate::error::CliError;

/// Select the item with `id` against a fresh list, or fail with not-found.
pub async fn select_existing(facade: &ContentFacade, id: &str) -> Result<Item, CliError> {
    let id = ItemId::from(id);
    facade
        .select_content_by_id(Some(&id))
        .await?
        .map(|item| item.as_ref().clone())
        .ok_or_else(|| CliError::NotFound {
            resource_type: "item".into(),
            identifier: id.to_string(),
            list_command: "items list".into(),
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
