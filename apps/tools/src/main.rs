use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use inventory_core::{
    config::{self, capture_max_age, Settings},
    today, InventoryStore,
};
use shared::{
    capture::CaptureRecord,
    domain::{FoodItem, FoodItemDraft, FoodType, ItemId},
    expiration::{days_until_expiration, describe_expiration, expiring_soon},
    summary::InventorySummary,
};
use storage::Storage;

#[derive(Parser, Debug)]
#[command(about = "Household food inventory")]
struct Cli {
    /// Overrides the configured database (file path or sqlite URL).
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Add(AddArgs),
    List {
        /// Only items with fewer than two days left.
        #[arg(long)]
        expiring: bool,
    },
    Show {
        id: String,
    },
    Edit(EditArgs),
    Delete {
        id: String,
    },
    Summary,
    AttachCapture {
        id: String,
        #[arg(long)]
        capture_file: Option<PathBuf>,
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        max_age_minutes: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    name: String,
    #[arg(long, value_parser = parse_food_type, default_value = "produce")]
    food_type: FoodType,
    #[arg(long, default_value = "")]
    quantity: String,
    #[arg(long, default_value = "")]
    container: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long, value_parser = parse_date)]
    expires: Option<NaiveDate>,
    #[arg(long)]
    image_path: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, value_parser = parse_food_type)]
    food_type: Option<FoodType>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    container: Option<String>,
    #[arg(long, value_parser = parse_date)]
    expires: Option<NaiveDate>,
    #[arg(long)]
    image_path: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

fn parse_food_type(raw: &str) -> Result<FoodType, String> {
    raw.parse::<FoodType>().map_err(|err| err.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = config::load_settings();
    if let Some(url) = cli.database_url {
        settings.database_url = Some(url);
    }

    let database_url = settings.database_url();
    tracing::debug!(%database_url, "opening inventory");
    let storage = Storage::new(&database_url)
        .await
        .with_context(|| format!("could not open inventory at {database_url}"))?;
    let store = InventoryStore::open_storage(storage.clone()).await?;

    let stdout = std::io::stdout();
    run(cli.command, &storage, &store, &settings, today(), &mut stdout.lock()).await
}

async fn run(
    command: Command,
    storage: &Storage,
    store: &InventoryStore,
    settings: &Settings,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add(args) => {
            let mut draft =
                FoodItemDraft::new(args.name, args.food_type, args.expires.unwrap_or(today));
            draft.quantity = args.quantity;
            draft.container = args.container;
            draft.image_path = args.image_path;
            draft.image_url = args.image_url;
            let item = store.add_food_item(draft, today).await?;
            writeln!(out, "added {} ({})", item.name, item.id)?;
        }
        Command::List { expiring } => {
            let items = store.items();
            let shown: Vec<&FoodItem> = if expiring {
                expiring_soon(&items, today)
            } else {
                items.iter().collect()
            };
            if shown.is_empty() {
                writeln!(out, "No items yet")?;
            }
            for item in shown {
                writeln!(out, "{}", list_line(item, today))?;
            }
        }
        Command::Show { id } => {
            let id = ItemId(id);
            let item = store
                .find_item(&id)
                .with_context(|| format!("no food item with id {id}"))?;
            print_details(&item, today, out)?;
        }
        Command::Edit(args) => {
            let id = ItemId(args.id);
            let existing = store
                .find_item(&id)
                .with_context(|| format!("no food item with id {id}"))?;
            let mut draft = FoodItemDraft::from_item(&existing);
            if let Some(v) = args.name {
                draft.name = v;
            }
            if let Some(v) = args.food_type {
                draft.food_type = v;
            }
            if let Some(v) = args.quantity {
                draft.quantity = v;
            }
            if let Some(v) = args.container {
                draft.container = v;
            }
            if let Some(v) = args.expires {
                draft.expiration_date = v;
            }
            if let Some(v) = args.image_path {
                draft.image_path = Some(v);
            }
            if let Some(v) = args.image_url {
                draft.image_url = Some(v);
            }
            let item = store.update_food_item(&id, draft).await?;
            writeln!(out, "updated {} ({})", item.name, item.id)?;
        }
        Command::Delete { id } => {
            let id = ItemId(id);
            store.delete_food_item(&id).await?;
            writeln!(out, "deleted {id}")?;
        }
        Command::Summary => {
            let summary = InventorySummary::from_counts(storage.count_by_food_type().await?);
            writeln!(out, "Total items: {}", summary.total)?;
            for category in &summary.categories {
                writeln!(out, "  {:<8} {}", category.food_type.display_name(), category.count)?;
            }
        }
        Command::AttachCapture {
            id,
            capture_file,
            max_age_minutes,
        } => {
            let minutes = max_age_minutes.unwrap_or(settings.capture_max_age_minutes);
            let max_age = capture_max_age(minutes)
                .with_context(|| format!("capture max age of {minutes} minutes is out of range"))?;
            let capture_file = capture_file.unwrap_or_else(|| settings.capture_file.clone());
            let record = CaptureRecord::load(&capture_file)?;
            let item = store
                .attach_capture(&ItemId(id), &record, Local::now().naive_local(), max_age)
                .await?;
            writeln!(out, "attached {} to {}", record.photo.display(), item.name)?;
        }
    }

    Ok(())
}

fn list_line(item: &FoodItem, today: NaiveDate) -> String {
    let mut detail = item.food_type.display_name().to_string();
    if !item.quantity.is_empty() {
        detail.push_str(" • ");
        detail.push_str(&item.quantity);
    }
    format!(
        "{}  {:<24} {:<20} Expires: {} ({})",
        item.id,
        item.name,
        detail,
        item.expiration_date,
        describe_expiration(days_until_expiration(item, today)).to_lowercase()
    )
}

fn print_details(item: &FoodItem, today: NaiveDate, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", item.name)?;
    writeln!(out, "{}", describe_expiration(days_until_expiration(item, today)))?;
    writeln!(out, "Food Type:  {}", item.food_type.display_name())?;
    writeln!(out, "Container:  {}", item.container)?;
    writeln!(out, "Quantity:   {}", item.quantity)?;
    writeln!(out, "Expires On: {}", item.expiration_date)?;
    writeln!(out, "Added On:   {}", item.creation_date)?;
    if let Some(path) = &item.image_path {
        writeln!(out, "Photo:      {path}")?;
    }
    if let Some(url) = &item.image_url {
        writeln!(out, "Image URL:  {url}")?;
    }
    Ok(())
}
