use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use file_renamer_core::{
    app_paths, collect_files, find_filter, load_config, save_config, ExportSummary,
    NamingOptions, ProcessedFile, RenameEngine, SUPPORTED_FILE_EXTENSIONS,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "file-renamer-cli")]
#[command(about = "Batch-rename copies of files with a naming template and export them")]
struct Cli {
    /// -v for info, -vv for debug. RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rename(RenameArgs),
    Filters,
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    /// Write the current defaults to the config file.
    Init,
}

#[derive(Debug, Args)]
struct RenameArgs {
    files: Vec<PathBuf>,
    #[arg(long)]
    dir: Option<PathBuf>,
    #[arg(long)]
    recursive: bool,
    /// Extension group used with --dir (see `filters`).
    #[arg(long)]
    filter: Option<String>,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    template: Option<String>,
    /// Use this file's name (without extension) as the template.
    #[arg(long, conflicts_with = "template")]
    template_from: Option<PathBuf>,
    #[arg(long)]
    prefix: Option<String>,
    #[arg(long)]
    suffix: Option<String>,
    #[arg(long)]
    keep_name: bool,
    #[arg(long)]
    keep_numbering: bool,
    #[arg(long)]
    no_numbering: bool,
    #[arg(long)]
    start_index: Option<String>,
    #[arg(long)]
    descending: bool,
    #[arg(long)]
    overwrite: bool,
    #[arg(long)]
    subfolder: bool,
    #[arg(long)]
    open: bool,
    /// Print the mapping without copying anything.
    #[arg(long)]
    dry_run: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct RenameReport<'a> {
    files: &'a [ProcessedFile],
    export: Option<&'a ExportSummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rename(args) => cmd_rename(args),
        Commands::Filters => cmd_filters(),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let config = load_config()?;
    let options = build_options(config.naming, &args)?;

    let mut candidates = args.files.clone();
    if let Some(dir) = &args.dir {
        let key = args.filter.as_deref().unwrap_or(&config.filter_default);
        let filter = find_filter(key).with_context(|| format!("unknown filter: {key}"))?;
        let recursive = args.recursive || config.recursive_default;
        candidates.extend(collect_files(dir, recursive, filter)?);
    }
    if candidates.is_empty() {
        anyhow::bail!("no input files: pass file paths or --dir");
    }

    let mut engine = RenameEngine::with_options(options);
    let added = engine.add_files(candidates);
    if added.dropped() > 0 {
        eprintln!(
            "Only the first {} of {} files were selected.",
            added.selected, added.requested
        );
    }

    let processed = engine.process_files()?;
    eprintln!("{processed}");
    if processed.missing > 0 {
        eprintln!("Skipped {} paths that do not exist.", processed.missing);
    }
    for name in &processed.duplicate_names {
        eprintln!("warning: several files map to {name}");
    }

    let export = if args.dry_run {
        None
    } else {
        let output = args
            .output
            .as_deref()
            .context("--output is required unless --dry-run is set")?;
        Some(engine.export_files(output)?)
    };

    match args.format {
        OutputFormat::Json => {
            let report = RenameReport {
                files: engine.processed_files(),
                export: export.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => print_table(engine.processed_files()),
    }

    match &export {
        Some(summary) => {
            info!(exported = summary.exported, "export finished");
            eprintln!("{summary}");
        }
        None => eprintln!("dry run: nothing was copied. Pass --output without --dry-run to export."),
    }

    Ok(())
}

fn build_options(mut options: NamingOptions, args: &RenameArgs) -> Result<NamingOptions> {
    if let Some(template) = &args.template {
        options.set_template(template)?;
    }
    if let Some(path) = &args.template_from {
        options.set_template_from_file(path)?;
    }
    if let Some(prefix) = &args.prefix {
        options.set_prefix(prefix)?;
    }
    if let Some(suffix) = &args.suffix {
        options.set_suffix(suffix)?;
    }
    if let Some(start) = &args.start_index {
        options.set_numbering_start_index_str(start)?;
    }
    if args.keep_name {
        options.set_preserve_existing_name(true);
    }
    if args.keep_numbering {
        options.set_preserve_existing_numbering(true);
    }
    if args.no_numbering {
        options.set_add_numbering(false);
    }
    if args.descending {
        options.set_sort_ascending(false);
    }
    if args.overwrite {
        options.set_overwrite_files(true);
    }
    if args.subfolder {
        options.set_create_sub_folder(true);
    }
    if args.open {
        options.set_open_export_folder(true);
    }
    Ok(options)
}

fn cmd_filters() -> Result<()> {
    for filter in SUPPORTED_FILE_EXTENSIONS {
        println!(
            "{:<8} {:<12} {}",
            filter.key,
            filter.name,
            filter.extensions.join(", ")
        );
    }
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let config = load_config()?;
    save_config(&config)?;
    let paths = app_paths()?;
    println!("wrote {}", paths.config_path.display());
    Ok(())
}

fn print_table(files: &[ProcessedFile]) {
    println!("original -> new");
    for (index, file) in files.iter().enumerate() {
        let original = file
            .original_path
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("{:>4}. {} -> {}", index + 1, original, file.new_name);
    }
}
