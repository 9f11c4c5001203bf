//! Renderer module: turns a fully scanned registry into output files.
//!
//! Rendering happens entirely in memory so nothing is written when a later
//! step fails.

pub mod commands;
pub mod markdown;

use crate::registry::Registry;
use commands::Command;
use std::path::{Path, PathBuf};

const LUA_DIR: &str = "lua";

/// A rendered file, with its path relative to the docs root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    fn new(path: PathBuf, contents: String) -> Self {
        Self { path, contents }
    }
}

pub fn tables_dir() -> PathBuf {
    Path::new(LUA_DIR).join("tables")
}

pub fn classes_dir() -> PathBuf {
    Path::new(LUA_DIR).join("classes")
}

/// Default location of the command dump, relative to the docs root.
pub fn commands_dump() -> PathBuf {
    Path::new(LUA_DIR).join("commands_dump.txt")
}

/// Render every page. The commands page is only produced when a dump was read.
pub fn render_all(reg: &Registry, commands: Option<&[Command]>) -> Vec<Artifact> {
    let mut artifacts = Vec::new();

    for table in reg.tables() {
        artifacts.push(Artifact::new(
            tables_dir().join(format!("{}.md", table.name)),
            markdown::render_table(table),
        ));
    }

    for class in reg.classes() {
        artifacts.push(Artifact::new(
            classes_dir().join(format!("{}.md", class.name)),
            markdown::render_class(reg, class),
        ));
    }

    artifacts.push(Artifact::new(
        Path::new(LUA_DIR).join("tabs.md"),
        markdown::render_tabs(&reg.tabs),
    ));
    artifacts.push(Artifact::new(
        Path::new(LUA_DIR).join("infraction.md"),
        markdown::render_infractions(&reg.infractions),
    ));

    if let Some(commands) = commands {
        artifacts.push(Artifact::new(
            Path::new(LUA_DIR).join("commands.md"),
            commands::render_commands(commands),
        ));
    }

    artifacts
}
