use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;

use pngviewer::app::PngViewerApp;
use pngviewer::file_manager::{DeleteMode, ImageFileManager, ManagerOptions, RefreshPolicy};
use pngviewer::fs_utils::{validate_target, DEFAULT_PATTERN};
use pngviewer::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Browse PNG images alongside their generation parameters"
)]
struct Args {
    /// PNG file or directory to browse
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Files to show, as a glob relative to the browsing root
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// What deleting an image does to the file
    #[arg(short = 'm', long, value_enum, default_value_t = DeleteMode::Remove)]
    delete_mode: DeleteMode,

    /// When the file list is rebuilt from disk
    #[arg(long, value_enum, default_value_t = RefreshPolicy::Rescan)]
    refresh: RefreshPolicy,

    /// Never touch files on delete, only drop them from the list
    #[arg(short = 'd', long, default_value_t = false)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(if err.use_stderr() { 1 } else { 0 });
    });
    init_logging(args.verbose);

    validate_target(&args.path)?;
    let options = ManagerOptions {
        pattern: args.pattern,
        delete_mode: args.delete_mode,
        refresh: args.refresh,
        dry_run: args.dry_run,
    };
    let manager = ImageFileManager::new(&args.path, options)?;
    if !manager.has_files() {
        return Err(anyhow!(
            "No files matching {} found in {}",
            manager.pattern(),
            manager.root().display()
        ));
    }
    tracing::info!("Browsing {} images in {}", manager.len(), manager.root().display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PNG Viewer")
            .with_inner_size([1200.0, 600.0])
            .with_position([100.0, 100.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PNG Viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(PngViewerApp::new(cc, manager)?) as Box<dyn eframe::App>)),
    )
    .map_err(|err| anyhow!("{err}"))?;

    Ok(())
}
