//! Apartment command handlers.

use tabled::Tabled;

use roost_core::{Apartment, ApartmentDraft, ApartmentId, HttpStore, ListFilter};

use crate::cli::{AddArgs, EditArgs, GlobalOpts, ListArgs, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

const DESCRIPTION_PREVIEW_CHARS: usize = 40;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApartmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rooms")]
    rooms: i64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Apartment> for ApartmentRow {
    fn from(a: &Apartment) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            rooms: a.rooms,
            price: format_price(a.price),
            description: preview(&a.description),
        }
    }
}

fn format_price(price: f64) -> String {
    if price.fract().abs() < f64::EPSILON {
        format!("{price:.0}")
    } else {
        format!("{price:.2}")
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_owned();
    }
    let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS - 1).collect();
    format!("{cut}…")
}

fn detail(a: &Apartment) -> String {
    let mut lines = vec![
        format!("ID:          {}", a.id),
        format!("Name:        {}", a.name),
        format!("Rooms:       {}", a.rooms),
        format!("Price:       {}", format_price(a.price)),
    ];
    if !a.description.is_empty() {
        lines.push(format!("Description: {}", a.description));
    }
    lines.join("\n")
}

fn render_one(a: &Apartment, format: OutputFormat) -> String {
    output::render_single(format, a, detail, |a| a.id.to_string())
}

// ── Handlers ────────────────────────────────────────────────────────

/// Refresh and render. A failed refresh falls back to the cached listing
/// when there is one.
pub async fn list(
    store: &HttpStore,
    args: ListArgs,
    cfg: &Config,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let filter = ListFilter::new(config::sort_direction(args.sort, cfg)).with_rooms(args.rooms);

    if let Err(err) = store.refresh(filter).await {
        if store.apartments().is_empty() {
            return Err(err.into());
        }
        output::warn(
            &format!("{err}\nshowing the last cached listing, which may be out of date"),
            global.color,
        );
    }

    let apartments = store.apartments();
    let title = format!("Available apartments ({})", apartments.len());
    let out = output::render_list(
        format,
        &title,
        &apartments,
        |a| ApartmentRow::from(a),
        |a| a.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn show(
    store: &HttpStore,
    id: &str,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let apartment = store.fetch_selected(&ApartmentId::from(id)).await?;
    output::print_output(&render_one(&apartment, format), global.quiet);
    Ok(())
}

pub async fn add(
    store: &HttpStore,
    args: AddArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let draft = ApartmentDraft::new(args.name, args.rooms, args.price)
        .with_description(args.description);

    let created = store.create(&draft).await?;
    output::note(
        &format!("Apartment '{}' created", created.id),
        global.quiet,
        global.color,
    );
    output::print_output(&render_one(&created, format), global.quiet);
    Ok(())
}

/// Load the current values, overlay the given fields, save.
pub async fn edit(
    store: &HttpStore,
    args: EditArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let EditArgs {
        id,
        name,
        rooms,
        price,
        description,
    } = args;

    if name.is_none() && rooms.is_none() && price.is_none() && description.is_none() {
        return Err(CliError::Validation {
            field: "edit".into(),
            reason: "nothing to change; pass at least one of --name, --rooms, --price, \
                     --description"
                .into(),
        });
    }

    let id = ApartmentId::from(id);
    store.refresh(ListFilter::default()).await?;
    let current = store
        .find(&id)
        .ok_or_else(|| CliError::NotFound { id: id.to_string() })?;
    store.select(Some(current.clone()));

    let mut draft = current.to_draft();
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(rooms) = rooms {
        draft.rooms = rooms;
    }
    if let Some(price) = price {
        draft.price = price;
    }
    if let Some(description) = description {
        draft.description = description;
    }

    if current.matches_draft(&draft) {
        output::note("Nothing changed", global.quiet, global.color);
        return Ok(());
    }

    let updated = store.edit(&id, &draft).await?;
    output::note(
        &format!("Apartment '{id}' updated"),
        global.quiet,
        global.color,
    );
    output::print_output(&render_one(&updated, format), global.quiet);
    Ok(())
}

pub async fn remove(store: &HttpStore, id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm(
        &format!("Delete apartment '{id}'? This cannot be undone."),
        "remove",
        global.yes,
    )? {
        return Ok(());
    }

    store.remove(&ApartmentId::from(id)).await?;
    output::note(
        &format!("Apartment '{id}' removed"),
        global.quiet,
        global.color,
    );
    Ok(())
}
