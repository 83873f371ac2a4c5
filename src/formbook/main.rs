use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use formbook::api::FormbookApi;
use formbook::config::FormbookConfig;
use formbook::error::{FormbookError, Result};
use formbook::form::{AddressField, SubmitOutcome};
use formbook::list::EntryList;
use formbook::model::{Address, Entry};
use formbook::store::fs::FileStore;
use formbook::store::ENTRIES_KEY;
use formbook::validate::Field;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, EntryFields};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: FormbookApi<FileStore>,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields),
        Some(Commands::List { page }) => handle_list(&mut ctx, page),
        Some(Commands::Show { position }) => handle_show(&ctx, position),
        Some(Commands::Edit { position, fields }) => handle_edit(&mut ctx, position, fields),
        Some(Commands::Delete { position }) => handle_delete(&mut ctx, position),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Path) => handle_path(&ctx),
        None => handle_list(&mut ctx, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => {
            let proj_dirs = ProjectDirs::from("com", "formbook", "formbook")
                .expect("Could not determine data dir");
            proj_dirs.data_dir().to_path_buf()
        }
    };

    let config = FormbookConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(&data_dir);
    let api = FormbookApi::with_page_size(store, config.get_page_size())?;

    Ok(AppContext { api, data_dir })
}

fn handle_add(ctx: &mut AppContext, fields: EntryFields) -> Result<()> {
    apply_fields(ctx, &fields)?;
    finish_submit(ctx)
}

fn handle_edit(ctx: &mut AppContext, position: usize, fields: EntryFields) -> Result<()> {
    ctx.api.edit(to_zero_based(position)?)?;
    apply_fields(ctx, &fields)?;
    finish_submit(ctx)
}

fn apply_fields(ctx: &mut AppContext, fields: &EntryFields) -> Result<()> {
    if let Some(v) = &fields.name {
        ctx.api.set_field(Field::Name, v);
    }
    if let Some(v) = &fields.email {
        ctx.api.set_field(Field::Email, v);
    }
    if let Some(v) = &fields.phone {
        ctx.api.set_field(Field::PhoneNumber, v);
    }
    if let Some(v) = &fields.dob {
        ctx.api.set_field(Field::Dob, v);
    }
    if let Some(v) = &fields.city {
        ctx.api.set_address_field(AddressField::City, v);
    }
    if let Some(v) = &fields.district {
        ctx.api.set_address_field(AddressField::District, v);
    }
    if let Some(v) = &fields.province {
        ctx.api.set_address_field(AddressField::Province, v);
    }
    if let Some(path) = &fields.picture {
        ctx.api.attach_picture(path)?;
    }
    Ok(())
}

fn finish_submit(ctx: &mut AppContext) -> Result<()> {
    match ctx.api.submit()? {
        SubmitOutcome::Saved(entry) => {
            if let Some(notice) = ctx.api.success_notice(Utc::now()) {
                println!("{}", notice.green());
            }
            let list = ctx.api.list();
            if let Some(pos) = list.entries().iter().position(|e| e.id == entry.id) {
                println!(
                    "{}",
                    format!("{} is entry {} of {}.", entry.name, pos + 1, list.len()).dimmed()
                );
            }
            Ok(())
        }
        SubmitOutcome::Rejected => {
            for error in ctx.api.form().errors().values() {
                eprintln!("{}", error.to_string().red());
            }
            Err(FormbookError::Api("Entry not saved".into()))
        }
    }
}

fn handle_list(ctx: &mut AppContext, page: Option<usize>) -> Result<()> {
    if let Some(page) = page {
        ctx.api.set_page(page);
    }
    print_entries(ctx.api.list());
    Ok(())
}

fn handle_show(ctx: &AppContext, position: usize) -> Result<()> {
    let entry = ctx
        .api
        .list()
        .entry_at(to_zero_based(position)?)
        .ok_or_else(|| FormbookError::Api(format!("No entry at position {}", position)))?;
    print_entry(position, entry);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, position: usize) -> Result<()> {
    let removed = ctx.api.delete(to_zero_based(position)?)?;
    println!("Deleted {}.", removed.name.bold());
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = FormbookConfig::load(&ctx.data_dir).unwrap_or_default();
    match (key.as_deref(), value) {
        (None, _) | (Some("page-size"), None) => {
            println!("page-size = {}", config.get_page_size());
        }
        (Some("page-size"), Some(v)) => {
            let size: usize = v
                .parse()
                .map_err(|_| FormbookError::Api(format!("Not a page size: {}", v)))?;
            config.set_page_size(size);
            config.save(&ctx.data_dir)?;
            println!("page-size = {}", config.get_page_size());
        }
        (Some(other), _) => println!("Unknown config key: {}", other),
    }
    Ok(())
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    let store = FileStore::new(&ctx.data_dir);
    println!("{}", store.key_path(ENTRIES_KEY).display());
    Ok(())
}

/// CLI positions are 1-based to match the listing.
fn to_zero_based(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| FormbookError::Api("Positions start at 1".into()))
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const EMAIL_WIDTH: usize = 28;
const PHONE_WIDTH: usize = 12;
const PICTURE_WIDTH: usize = 16;

fn print_entries(list: &EntryList) {
    if list.is_empty() {
        println!("No entries yet.");
        return;
    }

    for (i, entry) in list.page_entries().iter().enumerate() {
        let idx_str = format!("{:>3}. ", list.page_start() + i + 1);
        let name_width = LINE_WIDTH.saturating_sub(
            idx_str.width() + EMAIL_WIDTH + PHONE_WIDTH + PICTURE_WIDTH + TIME_WIDTH,
        );
        let picture = entry.profile_picture.as_deref().unwrap_or("N/A");
        let time_ago = format_time_ago(entry.created_at);

        println!(
            "{}{}{}{}{}{}",
            idx_str,
            pad_cell(&entry.name, name_width).bold(),
            pad_cell(&entry.email, EMAIL_WIDTH),
            pad_cell(&entry.phone_number, PHONE_WIDTH),
            pad_cell(picture, PICTURE_WIDTH).dimmed(),
            time_ago.dimmed()
        );
    }

    if list.controls_visible() {
        println!();
        println!(
            "{}",
            format!(
                "Page {} of {} ({} entries)",
                list.current_page(),
                list.total_pages(),
                list.len()
            )
            .dimmed()
        );
    }
}

fn print_entry(position: usize, entry: &Entry) {
    println!("{} {}", format!("{}.", position).yellow(), entry.name.bold());
    println!("--------------------------------");
    println!("Email:    {}", entry.email);
    println!("Phone:    {}", entry.phone_number);
    println!("Born:     {}", blank_as_na(&entry.dob));
    println!("Address:  {}", format_address(&entry.address));
    println!(
        "Picture:  {}",
        entry.profile_picture.as_deref().unwrap_or("N/A")
    );
    println!("Added:    {}", format_time_ago(entry.created_at).trim_start());
}

fn blank_as_na(s: &str) -> &str {
    if s.is_empty() {
        "N/A"
    } else {
        s
    }
}

fn format_address(address: &Address) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !address.city.is_empty() {
        parts.push(address.city.clone());
    }
    if !address.district.is_empty() {
        parts.push(address.district.clone());
    }
    if !address.province.is_empty() {
        parts.push(format!("Province {}", address.province));
    }
    parts.push(address.country.clone());
    parts.join(", ")
}

/// Truncate to a cell's content width, leaving a two-space gutter.
fn pad_cell(s: &str, width: usize) -> String {
    let cell = truncate_to_width(s, width.saturating_sub(2));
    let padding = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
