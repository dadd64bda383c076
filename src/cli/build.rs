//! Build command implementation.
//!
//! Validates the config, scans content files for class names and writes
//! the utility CSS. With `--watch` the build reruns whenever the config or
//! a content file changes.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use super::ProjectArgs;
use crate::discovery::{compile_patterns, is_content_path, Project};
use crate::error::{Result, ThemeError};
use crate::output::{display_path, plural, Printer};
use crate::parser::extract_from_files;
use crate::render::{CssRenderer, RenderOptions, RenderedCss};
use crate::validation::validate_config;

/// Quiet period before a rebuild, so bursts of saves trigger one build.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(100);

/// Generate utility CSS from the theme config
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output file (default: stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Emit every utility instead of only those used in content files
    #[arg(long)]
    pub all: bool,

    /// Rebuild when the config or content files change
    #[arg(long, short)]
    pub watch: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let project = args.project.resolve()?;
    first_build(&project, &args, printer)?;

    if args.watch {
        watch(project, &args, printer)?;
    }

    Ok(())
}

/// Validate, scan and render the project.
pub fn build_css(project: &Project, all: bool, printer: &Printer) -> Result<RenderedCss> {
    let result = validate_config(&project.config);
    if result.has_errors() || result.has_warnings() {
        printer.diagnostics(&result);
    }
    result.into_result()?;

    let renderer = CssRenderer::new(&project.config);
    if all {
        return Ok(renderer.render_document(&RenderOptions::all()));
    }

    let scan = project.scan_content()?;
    printer.status(
        "Scanning",
        &format!(
            "{} ({})",
            display_path(&project.root),
            plural(scan.total(), "content file", "content files")
        ),
    );
    let candidates: BTreeSet<String> = extract_from_files(scan.files().map(PathBuf::as_path))?;
    Ok(renderer.render_document(&RenderOptions::pruned(&candidates)))
}

/// The initial build. Under `--watch` a failure is reported and watching
/// continues.
fn first_build(project: &Project, args: &BuildArgs, printer: &Printer) -> Result<()> {
    match build_once(project, args, printer) {
        Err(e) if args.watch => {
            printer.error("Error", &e.to_string());
            Ok(())
        }
        result => result,
    }
}

fn build_once(project: &Project, args: &BuildArgs, printer: &Printer) -> Result<()> {
    let rendered = build_css(project, args.all, printer)?;
    let summary = format!(
        "{}, {}",
        plural(rendered.rules, "rule", "rules"),
        plural(rendered.keyframes, "keyframe", "keyframes")
    );

    match &args.output {
        Some(path) => {
            write_output(path, &rendered.css)?;
            printer.success("Wrote", &format!("{} ({})", display_path(path), summary));
        }
        None => {
            print!("{}", rendered.css);
            printer.success("Rendered", &summary);
        }
    }

    Ok(())
}

fn write_output(path: &Path, css: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ThemeError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    fs::write(path, css).map_err(|e| ThemeError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write CSS: {}", e),
    })
}

fn watch_error(e: notify::Error) -> ThemeError {
    ThemeError::Build {
        message: format!("Failed to watch for changes: {}", e),
        help: None,
    }
}

fn watch(mut project: Project, args: &BuildArgs, printer: &Printer) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;
    watcher
        .watch(&project.root, RecursiveMode::Recursive)
        .map_err(watch_error)?;
    printer.info("Watching", &display_path(&project.root));

    while let Ok(first) = rx.recv() {
        let mut events = vec![first];
        while let Ok(next) = rx.recv_timeout(WATCH_DEBOUNCE) {
            events.push(next);
        }

        let mut config_changed = false;
        let mut content_changed = false;
        for event in events {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    printer.warning("Watch", &e.to_string());
                    continue;
                }
            };
            if !is_change(&event.kind) {
                continue;
            }
            for path in &event.paths {
                match classify(&project, args.output.as_deref(), path) {
                    Some(ChangeKind::Config) => config_changed = true,
                    Some(ChangeKind::Content) => content_changed = true,
                    None => {}
                }
            }
        }

        if config_changed {
            match args.project.resolve() {
                Ok(reloaded) => {
                    printer.info("Reloaded", &project_label(&reloaded));
                    project = reloaded;
                }
                Err(e) => {
                    printer.error("Error", &e.to_string());
                    continue;
                }
            }
        } else if !content_changed {
            continue;
        }

        if let Err(e) = build_once(&project, args, printer) {
            printer.error("Error", &e.to_string());
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum ChangeKind {
    Config,
    Content,
}

fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// What a changed path means for the build, if anything.
fn classify(project: &Project, output: Option<&Path>, path: &Path) -> Option<ChangeKind> {
    if output.is_some_and(|out| same_file(out, path)) {
        return None;
    }
    if project.config_path().is_some_and(|config| same_file(config, path)) {
        return Some(ChangeKind::Config);
    }

    let relative = relative_to_root(&project.root, path)?;
    let patterns = compile_patterns(&project.config.content).ok()?;
    is_content_path(&patterns, &relative).then_some(ChangeKind::Content)
}

/// Watch events carry absolute paths; the root may be relative.
fn relative_to_root(root: &Path, path: &Path) -> Option<PathBuf> {
    if let Ok(relative) = path.strip_prefix(root) {
        return Some(relative.to_path_buf());
    }
    let root = root.canonicalize().ok()?;
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    path.strip_prefix(&root).ok().map(Path::to_path_buf)
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn project_label(project: &Project) -> String {
    project
        .config_path()
        .map(display_path)
        .unwrap_or_else(|| "built-in theme".to_string())
}
