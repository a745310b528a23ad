//! # CLI Layer
//!
//! One possible UI client for the wallet. This is the only place that knows
//! about terminal I/O, parses arguments and formats output. Everything else
//! goes through [`WalletApi`].

mod print;
mod setup;

use codewallet::api::WalletApi;
use codewallet::config::WalletConfig;
use codewallet::error::{Result, WalletError};
use codewallet::model::FragmentPatch;
use codewallet::preferences::Theme;
use codewallet::store::fs_backend::FsBackend;
use clap::Parser;
use log::debug;
use print::{print_fragments, print_full_fragments, print_messages, print_tags, print_theme};
use setup::{Cli, Commands, TagCommands, ThemeCommands};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

struct AppContext {
    api: WalletApi<FsBackend>,
    import_extensions: Vec<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            title,
            body,
            file,
            tags,
        }) => handle_add(&mut ctx, title, body, file, tags),
        Some(Commands::List { tag }) => handle_list(&ctx, tag),
        Some(Commands::Search { term }) => handle_search(&ctx, term.join(" ")),
        Some(Commands::Show { indexes }) => handle_show(&ctx, indexes),
        Some(Commands::Edit {
            index,
            title,
            body,
            file,
            tags,
        }) => handle_edit(&mut ctx, index, title, body, file, tags),
        Some(Commands::Delete { indexes }) => handle_delete(&mut ctx, indexes),
        Some(Commands::Import { paths }) => handle_import(&mut ctx, paths),
        Some(Commands::Tags { action }) => handle_tags(&mut ctx, action),
        Some(Commands::Theme { action }) => handle_theme(&ctx, action),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        None => handle_list(&ctx, None),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = WalletConfig::load()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let data_dir = config.data_dir()?;
    debug!("Using data directory {}", data_dir.display());

    let api = WalletApi::with_default_color(
        FsBackend::new(data_dir),
        config.default_tag_color.clone(),
    );
    Ok(AppContext {
        api,
        import_extensions: config.import_extensions(),
    })
}

/// Body from `--body`, then `--file`, then piped stdin.
fn read_body(body: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    if let Some(body) = body {
        return Ok(Some(body));
    }
    if let Some(path) = file {
        return read_file(&path).map(Some);
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(Some(buffer))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(WalletError::Io)
}

fn handle_add(
    ctx: &mut AppContext,
    title: String,
    body: Option<String>,
    file: Option<PathBuf>,
    tags: Vec<String>,
) -> Result<()> {
    let body = read_body(body, file)?.unwrap_or_default();
    let result = ctx.api.create_fragment(title, body, tags)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, tag: Option<String>) -> Result<()> {
    let result = ctx.api.list_fragments(tag.as_deref())?;
    print_fragments(&result.listed_fragments);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: String) -> Result<()> {
    let result = ctx.api.search_fragments(&term)?;
    print_fragments(&result.listed_fragments);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.view_fragments(&indexes)?;
    print_full_fragments(&result.listed_fragments);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    index: String,
    title: Option<String>,
    body: Option<String>,
    file: Option<PathBuf>,
    tags: Option<Vec<String>>,
) -> Result<()> {
    let body = match (body, file) {
        (Some(body), _) => Some(body),
        (None, Some(path)) => Some(read_file(&path)?),
        (None, None) => None,
    };
    let patch = FragmentPatch {
        title,
        body,
        tags,
    };
    let result = ctx.api.update_fragment(&index, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_fragments(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, paths: Vec<PathBuf>) -> Result<()> {
    let exts = ctx.import_extensions.clone();
    let result = ctx.api.import_fragments(paths, &exts)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &mut AppContext, action: Option<TagCommands>) -> Result<()> {
    let result = match action {
        None | Some(TagCommands::List) => ctx.api.list_tags(None)?,
        Some(TagCommands::Search { term }) => ctx.api.list_tags(Some(&term))?,
        Some(TagCommands::Add { name, color }) => ctx.api.add_tag(&name, color.as_deref())?,
        Some(TagCommands::Remove { names }) => ctx.api.remove_tags(&names)?,
        Some(TagCommands::Rename { old, new, merge }) => ctx.api.rename_tag(&old, &new, merge)?,
        Some(TagCommands::Color { name, color }) => ctx.api.set_tag_color(&name, &color)?,
    };
    print_tags(&result.listed_tags);
    print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &AppContext, action: Option<ThemeCommands>) -> Result<()> {
    let result = match action {
        None => ctx.api.theme()?,
        Some(ThemeCommands::Toggle) => ctx.api.toggle_theme()?,
        Some(ThemeCommands::Dark) => ctx.api.set_theme(Theme::Dark)?,
        Some(ThemeCommands::Light) => ctx.api.set_theme(Theme::Light)?,
    };
    if let Some(theme) = result.theme {
        print_theme(theme);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}
