//! Item command handlers.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tabled::Tabled;
use tracing::debug;

use larder_core::{ContentList, Item};

use crate::cli::{ItemChanges, ItemsArgs, ItemsCommand, NewItemArgs};
use crate::error::CliError;
use crate::output;
use crate::router::View;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Expires")]
    expires: String,
}

impl ItemRow {
    fn new(item: &Item, today: NaiveDate) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            category: item.category.to_string(),
            received: date_or_dash(item.receive_date),
            expires: expiry_label(item, today),
        }
    }
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".into(), |d| d.to_string())
}

fn expiry_label(item: &Item, today: NaiveDate) -> String {
    match item.effective_expiration() {
        None => "-".into(),
        Some(date) if item.is_expired_on(today) => format!("{date} (expired)"),
        Some(date) => date.to_string(),
    }
}

fn detail(item: &Item, today: NaiveDate, color: bool) -> String {
    let mut expires = expiry_label(item, today);
    if color && item.is_expired_on(today) {
        expires = expires.red().to_string();
    }
    [
        format!("ID:       {}", item.id),
        format!("Name:     {}", item.name),
        format!("Quantity: {}", item.quantity),
        format!("Category: {}", item.category),
        format!("Received: {}", date_or_dash(item.receive_date)),
        format!("Expires:  {expires}"),
    ]
    .join("\n")
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// ── Views ───────────────────────────────────────────────────────────

fn render_dashboard(ctx: &Context, list: &ContentList) -> Result<String, CliError> {
    let today = today();
    output::render_list(
        ctx.output,
        list.as_slice(),
        |item| ItemRow::new(item, today),
        |item| item.id.to_string(),
    )
}

fn render_detail(ctx: &Context, item: &Arc<Item>) -> Result<String, CliError> {
    let today = today();
    output::render_single(
        ctx.output,
        item,
        |item| detail(item, today, ctx.color),
        |item| item.id.to_string(),
    )
}

/// Print whichever view the facade last navigated to.
fn render_active_view(ctx: &Context) -> Result<(), CliError> {
    let out = match &*ctx.router.active() {
        View::Dashboard => render_dashboard(ctx, &ctx.facade.current_list())?,
        View::Detail(item) => render_detail(ctx, item)?,
    };
    output::print_output(&out, ctx.quiet);
    Ok(())
}

fn status(ctx: &Context, message: &str) {
    if !ctx.quiet {
        eprintln!("{message}");
    }
}

// ── Form helpers ────────────────────────────────────────────────────

fn new_item(args: NewItemArgs, today: NaiveDate) -> Item {
    Item {
        name: args.name,
        quantity: args.quantity,
        category: args.category,
        receive_date: Some(args.received.unwrap_or(today)),
        has_expiration: args.expires.is_some(),
        expiration_date: args.expires,
        ..Item::default()
    }
}

/// Overlay flag values on an existing item. Clearing the expiration flag
/// leaves the old date in place; the facade drops it before sending.
fn apply_changes(mut item: Item, changes: ItemChanges) -> Item {
    if let Some(name) = changes.name {
        item.name = name;
    }
    if let Some(quantity) = changes.quantity {
        item.quantity = quantity;
    }
    if let Some(category) = changes.category {
        item.category = category;
    }
    if let Some(received) = changes.received {
        item.receive_date = Some(received);
    }
    if let Some(expires) = changes.expires {
        item.has_expiration = true;
        item.expiration_date = Some(expires);
    }
    if changes.no_expiration {
        item.has_expiration = false;
    }
    item
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: ItemsArgs) -> Result<(), CliError> {
    match args.command {
        ItemsCommand::List => {
            ctx.facade.wait_for_content().await?;
            ctx.facade.reset_content();
            render_active_view(ctx)
        }

        ItemsCommand::Show { id } => {
            let item = util::select_existing(&ctx.facade, &id).await?;
            ctx.facade.go_to_content(&item);
            render_active_view(ctx)
        }

        ItemsCommand::Add(args) => {
            let item = new_item(args, today());
            item.validate()?;
            // The startup load must settle before the post-add reload.
            ctx.facade.wait_for_content().await?;
            let added = ctx.facade.add_content(item).await?;
            status(ctx, &format!("Added '{}' ({})", added.name, added.id));
            render_active_view(ctx)
        }

        ItemsCommand::Update { id, changes } => {
            let current = util::select_existing(&ctx.facade, &id).await?;
            ctx.facade.go_to_content(&current);

            let edited = apply_changes(current, changes);
            edited.validate()?;
            let saved = ctx.facade.update_content(edited).await?;
            status(ctx, &format!("Updated '{}' ({})", saved.name, saved.id));
            render_active_view(ctx)
        }

        ItemsCommand::Delete { id } => {
            let item = util::select_existing(&ctx.facade, &id).await?;
            ctx.facade.go_to_content(&item);

            if !util::confirm(
                &format!("Delete '{}' ({})?", item.name, item.id),
                "items delete",
                ctx.yes,
            )? {
                return Ok(());
            }
            if ctx.facade.delete_content(&item).await? {
                status(ctx, &format!("Deleted '{}' ({})", item.name, item.id));
            }
            render_active_view(ctx)
        }

        ItemsCommand::Watch { interval } => watch(ctx, Duration::from_secs(interval.max(1))).await,
    }
}

/// Reload on a timer and print the dashboard whenever the list changes,
/// until interrupted.
async fn watch(ctx: &Context, interval: Duration) -> Result<(), CliError> {
    let mut updates = ctx.facade.content_list();
    let mut ticker = tokio::time::interval(interval);
    let mut last: Option<ContentList> = None;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("watch interrupted");
                return Ok(());
            }
            _ = ticker.tick() => {
                // Failures are logged by the facade; the next tick retries.
                drop(ctx.facade.spawn_load());
            }
            changed = updates.changed() => {
                let Some(list) = changed else {
                    return Ok(());
                };
                if last.as_ref().is_some_and(|prev| prev == &list) {
                    continue;
                }
                let out = render_dashboard(ctx, &list)?;
                output::print_output(&out, ctx.quiet);
                last = Some(list);
            }
        }
    }
}
