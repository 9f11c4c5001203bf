//! Comment scanner: walks the source tree and drives one block state machine
//! per file.
//!
//! A block opens on a marker comment such as `// Lua API: Function`, consumes
//! every following `//` line, and closes on the first line without one. There
//! is no explicit end marker. A marker inside a comment run only changes the
//! active kind; entities opened earlier in the run keep receiving lines.

pub mod block;
pub mod enumeration;

use crate::registry::Registry;
use anyhow::{Context, Result};
use block::Block;
use std::fs;
use std::path::Path;
use tracing::{debug, info_span, warn};
use walkdir::WalkDir;

const MARKER: &str = "lua api";
const SEPARATOR: char = ':';
const LINE_COMMENT: &str = "//";

/// Extensions are matched by prefix: `c` covers `.c`, `.cpp`, `.cc`, ...
const SOURCE_EXTENSION_PREFIXES: &[&str] = &["c", "h"];

/// Kind token that follows the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Table,
    Class,
    Field,
    Constructor,
    Function,
    Tabs,
    Infraction,
}

impl BlockKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "class" => Some(Self::Class),
            "field" => Some(Self::Field),
            "constructor" => Some(Self::Constructor),
            "function" => Some(Self::Function),
            "tabs" => Some(Self::Tabs),
            "infraction" => Some(Self::Infraction),
            _ => None,
        }
    }
}

/// How the scanner sees a single trimmed line.
#[derive(Debug, PartialEq, Eq)]
enum LineClass<'a> {
    /// Opens a block; carries the raw kind token.
    Marker(&'a str),
    Comment,
    Code,
}

fn classify(line: &str) -> LineClass<'_> {
    let lower = line.to_lowercase();
    if !lower.contains(LINE_COMMENT) {
        return LineClass::Code;
    }
    if lower.contains(MARKER) && lower.contains(SEPARATOR) {
        if let Some((_, kind)) = line.split_once(SEPARATOR) {
            return LineClass::Marker(kind.trim());
        }
    }
    LineClass::Comment
}

/// Scan every source file under `root`, in file-name order, into `registry`.
///
/// Returns the number of files scanned.
pub fn scan_tree(root: &Path, registry: &mut Registry) -> Result<usize> {
    let mut scanned = 0;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_source_file(path) {
            continue;
        }
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

        let _span = info_span!("scan", file = %path.display()).entered();
        debug!("scanning");
        scan_source(&String::from_utf8_lossy(&bytes), registry);
        scanned += 1;
    }
    Ok(scanned)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSION_PREFIXES.iter().any(|p| ext.starts_with(p)))
}

/// Run the block state machine over one file's contents.
pub fn scan_source(source: &str, registry: &mut Registry) {
    let mut lines = source.lines().enumerate();
    let mut block = Block::default();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim();
        match classify(line) {
            LineClass::Marker(token) => match BlockKind::from_token(token) {
                Some(BlockKind::Tabs) => {
                    let entries = enumeration::collect(lines.by_ref().map(|(_, l)| l));
                    registry.tabs.extend(entries);
                    block.suspend();
                }
                Some(BlockKind::Infraction) => {
                    let entries = enumeration::collect(lines.by_ref().map(|(_, l)| l));
                    registry.infractions.extend(entries);
                    block.suspend();
                }
                Some(kind) => {
                    block.open(kind);
                    debug!(line = index + 1, kind = ?block.kind(), "block opened");
                }
                None => {
                    warn!(line = index + 1, kind = token, "unknown annotation kind");
                    block.suspend();
                }
            },
            LineClass::Comment => block.feed(line, registry),
            LineClass::Code => block.close(),
        }
    }
}
