//! luadoc: generate the Lua API reference from `// Lua API:` comment blocks.
//!
//! Scans a C/C++ source tree, rebuilds the table/class model from scratch and
//! writes one markdown page per table and class, plus the tabs, infraction and
//! commands listings:
//!
//! `luadoc --src src --docs docs`

mod error;
mod model;
mod parser;
mod registry;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use registry::Registry;
use render::Artifact;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "luadoc",
    about = "Generate Lua API documentation from annotated C++ sources"
)]
struct Cli {
    /// Root of the source tree to scan
    #[arg(long, default_value = "src")]
    src: PathBuf,

    /// Documentation root; pages are written under <docs>/lua/
    #[arg(long, default_value = "docs")]
    docs: PathBuf,

    /// Command dump file [default: <docs>/lua/commands_dump.txt]
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Delete stale table and class pages before writing
    #[arg(long)]
    clean: bool,

    /// Print the files that would be written without writing them
    #[arg(long)]
    dry_run: bool,
}

/// Resolved options for [`generate`].
struct GenerateConfig {
    src: PathBuf,
    docs: PathBuf,
    commands: PathBuf,
    clean: bool,
    dry_run: bool,
}

impl From<Cli> for GenerateConfig {
    fn from(cli: Cli) -> Self {
        let commands = cli
            .commands
            .unwrap_or_else(|| cli.docs.join(render::commands_dump()));
        Self {
            src: cli.src,
            docs: cli.docs,
            commands,
            clean: cli.clean,
            dry_run: cli.dry_run,
        }
    }
}

/// What a run produced.
#[derive(Debug)]
struct Summary {
    files_scanned: usize,
    written: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = GenerateConfig::from(Cli::parse());
    let summary = generate(&config)?;

    if config.dry_run {
        for path in &summary.written {
            println!("{}", path.display());
        }
    } else {
        info!(
            scanned = summary.files_scanned,
            written = summary.written.len(),
            docs = %config.docs.display(),
            "documentation written"
        );
    }
    Ok(())
}

/// Full rebuild: scan, validate, render, then write.
fn generate(config: &GenerateConfig) -> Result<Summary> {
    let mut registry = Registry::new();
    let files_scanned = parser::scan_tree(&config.src, &mut registry)?;
    info!(
        files = files_scanned,
        tables = registry.tables().count(),
        classes = registry.classes().count(),
        functions = registry.function_count(),
        tabs = registry.tabs.len(),
        infractions = registry.infractions.len(),
        "scan complete"
    );

    registry.validate()?;

    let commands = read_commands(&config.commands)?;
    let artifacts = render::render_all(&registry, commands.as_deref());

    let written: Vec<PathBuf> = artifacts
        .iter()
        .map(|a| config.docs.join(&a.path))
        .collect();

    if !config.dry_run {
        if config.clean {
            for dir in [render::tables_dir(), render::classes_dir()] {
                clean_pages(&config.docs.join(dir))?;
            }
        }
        write_artifacts(&config.docs, &artifacts)?;
    }

    Ok(Summary {
        files_scanned,
        written,
    })
}

/// Read the command dump; a missing dump only skips the commands page.
fn read_commands(path: &Path) -> Result<Option<Vec<render::commands::Command>>> {
    if !path.is_file() {
        warn!(path = %path.display(), "command dump not found, skipping commands page");
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read command dump: {}", path.display()))?;
    Ok(Some(render::commands::parse_dump(&text)))
}

fn write_artifacts(docs: &Path, artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        let out_path = docs.join(&artifact.path);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory: {}", parent.display())
            })?;
        }
        fs::write(&out_path, &artifact.contents)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(())
}

/// Remove every `.md` page in `dir`. A missing directory is fine.
fn clean_pages(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "md") {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(root: &Path) -> GenerateConfig {
        GenerateConfig {
            src: root.join("src"),
            docs: root.join("docs"),
            commands: root.join("docs/lua/commands_dump.txt"),
            clean: false,
            dry_run: false,
        }
    }

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn commands_default_under_docs() {
        let cli = Cli::parse_from(["luadoc", "--docs", "out"]);
        let config = GenerateConfig::from(cli);
        assert_eq!(config.commands, Path::new("out/lua/commands_dump.txt"));
        assert_eq!(config.src, Path::new("src"));
    }

    #[test]
    fn generate_writes_pages() {
        let dir = TempDir::new().unwrap();
        write(
            &dir.path().join("src/gui.hpp"),
            "// Lua API: Table\n// Name: gui\n// Gui helpers.\nnamespace gui {}\n",
        );
        let summary = generate(&config(dir.path())).unwrap();
        assert_eq!(summary.files_scanned, 1);

        let page = fs::read_to_string(dir.path().join("docs/lua/tables/gui.md")).unwrap();
        assert_eq!(page, "# Table: gui\n\nGui helpers.\n");
        assert!(dir.path().join("docs/lua/tabs.md").is_file());
        assert!(!dir.path().join("docs/lua/commands.md").exists());
    }

    #[test]
    fn duplicate_fields_write_nothing() {
        let dir = TempDir::new().unwrap();
        write(
            &dir.path().join("src/self.hpp"),
            "// Lua API: Field\n// Table: self\n// Field: id: integer\n\n\
             // Lua API: Field\n// Table: self\n// Field: id: string\n",
        );
        let err = generate(&config(dir.path())).unwrap_err();
        assert!(err.to_string().contains("table self"), "{err}");
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("src/a.cpp"), "// Lua API: Class\n// Name: tab\n");
        let mut cfg = config(dir.path());
        cfg.dry_run = true;
        let summary = generate(&cfg).unwrap();
        assert!(summary
            .written
            .contains(&dir.path().join("docs/lua/classes/tab.md")));
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn clean_removes_stale_pages() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("src/a.cpp"), "// Lua API: Class\n// Name: tab\n");
        let stale = dir.path().join("docs/lua/classes/removed.md");
        write(&stale, "old");

        let mut cfg = config(dir.path());
        generate(&cfg).unwrap();
        assert!(stale.exists(), "stale pages are kept by default");

        cfg.clean = true;
        generate(&cfg).unwrap();
        assert!(!stale.exists());
        assert!(dir.path().join("docs/lua/classes/tab.md").exists());
    }
}
