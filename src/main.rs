//! symbol-outline - print the nested outline of a flat symbol list

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use symbol_outline::cli::{CliArgs, OutputFormat, RunConfig};
use symbol_outline::config::{OutlineSettings, SettingsFile, SettingsSource};
use symbol_outline::fs_watcher::FileWatcher;
use symbol_outline::messages::{ActiveEditor, LifecycleMsg};
use symbol_outline::model::{DocumentId, EditorId, OutlineModel};
use symbol_outline::outline::Range;
use symbol_outline::provider::FileSymbolProvider;
use symbol_outline::render::{breadcrumb, render_json, render_tree};
use symbol_outline::runtime::{OutlineRuntime, TreeListener};

/// The terminal as a tree host: remembers that the tree needs re-rendering
#[derive(Debug, Default)]
struct CliHost {
    dirty: bool,
}

impl TreeListener for CliHost {
    fn on_tree_changed(&mut self) {
        self.dirty = true;
    }

    fn reveal(&mut self, editor: Option<EditorId>, range: Range) {
        tracing::debug!("Reveal {} in {:?}", range, editor);
    }
}

type Runtime = OutlineRuntime<FileSymbolProvider, CliHost>;

fn main() -> Result<()> {
    symbol_outline::tracing::init();

    let config = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    let (settings, settings_path) = settings_source(&config);

    let model = OutlineModel::with_settings(settings);
    let mut runtime = OutlineRuntime::new(model, FileSymbolProvider, CliHost::default());

    runtime.lifecycle(LifecycleMsg::ActiveEditorChanged(Some(ActiveEditor {
        editor: EditorId(1),
        document: DocumentId::from_path(&config.symbols),
    })));

    refresh(&mut runtime)
        .with_context(|| format!("Failed to load symbols from {}", config.symbols.display()))?;
    print_outline(&runtime, &config)?;

    if config.watch {
        watch(&mut runtime, &config, settings_path)?;
    }

    Ok(())
}

/// Settings from `--config`, the default file, or built-in defaults
fn settings_source(config: &RunConfig) -> (Box<dyn SettingsSource>, Option<PathBuf>) {
    let file = match &config.settings {
        Some(path) => Some(SettingsFile::new(path.clone())),
        None => SettingsFile::default_location(),
    };
    match file {
        Some(file) => {
            let path = file.path().to_path_buf();
            (Box::new(file), Some(path))
        }
        None => (Box::new(OutlineSettings::default()), None),
    }
}

/// Ask for the root like a tree widget would and wait for the rebuild
fn refresh(runtime: &mut Runtime) -> Result<()> {
    runtime.listener_mut().dirty = false;
    runtime.get_children(None);
    runtime.wait_for_rebuild();

    match runtime.model().last_error() {
        Some(e) => Err(e.clone().into()),
        None => Ok(()),
    }
}

fn print_outline(runtime: &Runtime, config: &RunConfig) -> Result<()> {
    let model = runtime.model();

    match config.format {
        OutputFormat::Json => {
            let json = render_json(model).context("Failed to serialize outline")?;
            println!("{}", json);
        }
        OutputFormat::Tree => {
            if model.outline().is_empty() {
                println!("(no symbols)");
            } else {
                print!("{}", render_tree(model, config.expand_all));
            }
        }
    }

    if let Some(position) = config.position {
        match runtime.find_node_at_position(position) {
            Some(id) => println!("\nAt {}: {}", position, breadcrumb(model, id)),
            None => println!("\nAt {}: no symbol", position),
        }
    }

    Ok(())
}

/// Re-render whenever the symbols or settings file is saved
fn watch(runtime: &mut Runtime, config: &RunConfig, settings_path: Option<PathBuf>) -> Result<()> {
    let symbols_path = config.symbols.clone();
    let mut files = vec![symbols_path.clone()];
    files.extend(settings_path);

    let watcher = FileWatcher::new(&files).context("Failed to start file watcher")?;
    let document = DocumentId::from_path(&symbols_path);
    eprintln!("Watching {} (Ctrl-C to stop)", symbols_path.display());

    while let Some(changed) = watcher.wait_changed(Duration::from_secs(1)) {
        for path in changed {
            // files()[0] is the symbols file
            if Some(&path) == watcher.files().first() {
                runtime.lifecycle(LifecycleMsg::DocumentSaved(document.clone()));
            } else {
                runtime.lifecycle(LifecycleMsg::SettingsChanged);
            }
        }

        if !runtime.listener().dirty {
            continue;
        }
        match refresh(runtime) {
            Ok(()) => {
                println!();
                print_outline(runtime, config)?;
            }
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    Ok(())
}
