//! CLI entry point for filetree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use filetree::output::{LineDecoration, VerifyDecoration};
use filetree::{
    Error, FileStats, FileStorage, Manifest, Result, TreeOptions, TreePath, TreePrinter, TreeStyle,
    VerifyReport, format_file_stats, list_files, logging, print_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "filetree")]
#[command(about = "Show the file tree of an archive manifest")]
#[command(version)]
struct Args {
    /// JSON manifest describing the archive files
    manifest: PathBuf,

    /// Show padding files and padding-only directories
    #[arg(long = "show-padding-files")]
    show_padding_files: bool,

    /// Do not show file sizes
    #[arg(long = "no-file-size")]
    no_file_size: bool,

    /// Do not show directory sizes
    #[arg(long = "no-dir-size")]
    no_dir_size: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Elide lines wider than N terminal cells
    #[arg(short = 'w', long = "max-width", value_name = "N")]
    max_width: Option<usize>,

    /// Text prepended to every line
    #[arg(short = 'p', long = "prefix", default_value = "")]
    prefix: String,

    /// Only show the subtree below this directory
    #[arg(short = 'r', long = "root", value_name = "DIR")]
    root: Option<String>,

    /// Show the completion of each file from a JSON verification report
    #[arg(long = "verify", value_name = "REPORT")]
    verify: Option<PathBuf>,

    /// List file paths instead of drawing a tree
    #[arg(long = "flat", conflicts_with_all = ["json", "stats"])]
    flat: bool,

    /// Output the rendered entries as JSON
    #[arg(long = "json", conflicts_with = "stats")]
    json: bool,

    /// Only show the summary line
    #[arg(long = "stats")]
    stats: bool,

    /// Do not print the summary after the tree
    #[arg(long = "no-report")]
    no_report: bool,

    /// Log debug diagnostics to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("filetree: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let storage = Manifest::load(&args.manifest)?.into_storage()?;

    if args.flat {
        for path in list_files(&storage, &args.prefix, args.show_padding_files) {
            println!("{}", path);
        }
        return Ok(());
    }

    if args.stats {
        println!(
            "{}",
            format_file_stats(&storage, &args.prefix, args.show_padding_files)
        );
        return Ok(());
    }

    let use_color = !args.json && should_use_color(args.color);
    let options = TreeOptions {
        show_file_size: !args.no_file_size,
        show_directory_size: !args.no_dir_size,
        use_color,
        list_padding_files: args.show_padding_files,
        max_entry_size: args.max_width,
    };
    let style = match std::env::var("LS_COLORS") {
        Ok(ls_colors) if use_color => TreeStyle::from_ls_colors(&ls_colors),
        _ => TreeStyle::default(),
    };
    let root = match &args.root {
        Some(dir) => TreePath::parse(dir)?,
        None => TreePath::root(),
    };

    let printer = TreePrinter::new(&storage, args.prefix.as_str(), options).with_style(style);
    let index = printer.index();
    if !index.contains_directory(&root) || (!root.is_root() && index.is_suppressed(&root)) {
        return Err(Error::UnknownDirectory(root.to_string()));
    }

    match &args.verify {
        Some(report_path) => {
            let report = VerifyReport::load(report_path)?;
            warn_unmatched(&report, &storage);
            render(printer.with_decoration(VerifyDecoration::new(report)), &root, args)
        }
        None => render(printer, &root, args),
    }
}

fn warn_unmatched(report: &VerifyReport, storage: &FileStorage) {
    for path in report.unmatched_paths(storage) {
        tracing::warn!(path = %path, "verification report entry matches no file");
    }
}

fn render<D: LineDecoration>(
    mut printer: TreePrinter<'_, D>,
    root: &TreePath,
    args: &Args,
) -> Result<()> {
    printer.walk(root)?;

    if args.json {
        print_json(printer.lines())?;
        return Ok(());
    }

    print!("{}", printer.result());
    if !args.no_report {
        let stats = FileStats::from_lines(printer.lines());
        println!();
        println!("{}", stats.report(&args.prefix, args.show_padding_files));
    }
    Ok(())
}
