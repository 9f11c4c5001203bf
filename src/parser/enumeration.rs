//! Enumeration sub-scan for the `Tabs` and `Infraction` blocks.
//!
//! The marker comment sits above a C++ `enum class`; the entries are read
//! straight from the enum body rather than from comments.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RE_ENUM_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\benum\s+class\b").unwrap());

const ENUM_CLOSE: &str = "};";

/// Consume lines up to and including the enum's closing `};`, returning the
/// entry names in declaration order.
///
/// Blank lines, a lone `{` and comment lines are skipped. Running out of input
/// returns whatever was collected.
pub fn collect<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut entries = Vec::new();
    let mut inside = false;

    for line in lines {
        if !inside {
            inside = RE_ENUM_OPEN.is_match(line);
            continue;
        }
        if line.contains(ENUM_CLOSE) {
            return entries;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "{" || trimmed.contains("//") {
            continue;
        }
        entries.push(trimmed.replace(',', "").trim().to_string());
    }

    warn!(collected = entries.len(), "enumeration block not terminated");
    entries
}
