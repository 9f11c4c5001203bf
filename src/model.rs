//! Data model for the scripting API, format-agnostic.
//!
//! Tables and classes live in the [`Registry`](crate::registry::Registry) and
//! are referred to by id, so a class can be named as an inheritance target
//! long before its own block is scanned.

use std::collections::HashSet;
use std::fmt;

/// Index of a [`Table`] inside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub usize);

/// Index of a [`Class`] inside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub usize);

/// The entity a field or function is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Table(TableId),
    Class(ClassId),
}

impl Owner {
    /// Member-access separator used in usage examples: `gui.get_tab()` vs `tab:add_button()`.
    pub fn access_separator(self) -> &'static str {
        match self {
            Owner::Table(_) => ".",
            Owner::Class(_) => ":",
        }
    }
}

/// A table of free functions and fields (`gui`, `network`, ...).
#[derive(Debug, Default)]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
    pub functions: Vec<Function>,
    pub description: String,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            ..Default::default()
        }
    }
}

/// A class exposed to scripts.
#[derive(Debug, Default)]
pub struct Class {
    pub name: String,
    /// Classes this one extends, in declaration order. Repeats are kept.
    pub inheritance: Vec<ClassId>,
    pub fields: Vec<Field>,
    pub constructors: Vec<Constructor>,
    pub functions: Vec<Function>,
    pub description: String,
}

impl Class {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub description: String,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field: {}", self.name)?;
        writeln!(f, "Type: {}", self.ty)?;
        writeln!(f, "Description: {}", self.description.trim())
    }
}

#[derive(Debug)]
pub struct Constructor {
    pub parent: ClassId,
    pub parameters: Vec<Parameter>,
    pub description: String,
}

impl Constructor {
    pub fn new(parent: ClassId) -> Self {
        Self {
            parent,
            parameters: Vec::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug)]
pub struct Function {
    /// Empty until a `name:` directive is seen.
    pub name: String,
    pub parent: Owner,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub return_description: Option<String>,
    pub description: String,
}

impl Function {
    pub fn new(parent: Owner) -> Self {
        Self {
            name: String::new(),
            parent,
            parameters: Vec::new(),
            return_type: None,
            return_description: None,
            description: String::new(),
        }
    }

    /// Comma-joined parameter names, as used in headings and call examples.
    pub fn parameter_list(&self) -> String {
        parameter_list(&self.parameters)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
    pub description: String,
}

pub fn parameter_list(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append one line to an accumulated description, newline-joined.
pub fn append_description(dest: &mut String, text: &str) {
    if !dest.is_empty() {
        dest.push('\n');
    }
    dest.push_str(text);
}

/// Every field whose name was already used by an earlier field in the list.
/// Table and class names become file names, so they may not contain a path
/// separator.
pub fn is_page_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
}

pub fn duplicate_fields(fields: &[Field]) -> Vec<&Field> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .filter(|f| !seen.insert(f.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> Field {
        Field {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn description_joins_with_newline() {
        let mut desc = String::new();
        append_description(&mut desc, "first");
        append_description(&mut desc, "second");
        assert_eq!(desc, "first\nsecond");
    }

    #[test]
    fn empty_first_line_is_not_separated() {
        let mut desc = String::new();
        append_description(&mut desc, "");
        append_description(&mut desc, "text");
        assert_eq!(desc, "text");
    }

    #[test]
    fn duplicates_report_later_occurrences() {
        let fields = vec![field("a"), field("b"), field("a"), field("a")];
        let dups = duplicate_fields(&fields);
        assert_eq!(dups.len(), 2);
        assert!(dups.iter().all(|f| f.name == "a"));
    }

    #[test]
    fn no_duplicates_in_unique_list() {
        let fields = vec![field("a"), field("b")];
        assert!(duplicate_fields(&fields).is_empty());
    }

    #[test]
    fn field_display_trims_description() {
        let f = Field {
            name: "ped".to_string(),
            ty: "integer".to_string(),
            description: "  Player ped \n".to_string(),
        };
        assert_eq!(f.to_string(), "Field: ped\nType: integer\nDescription: Player ped\n");
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(Table::new("  gui ").name, "gui");
        assert_eq!(Class::new("tab\t").name, "tab");
    }

    #[test]
    fn access_separator_per_owner() {
        assert_eq!(Owner::Table(TableId(0)).access_separator(), ".");
        assert_eq!(Owner::Class(ClassId(0)).access_separator(), ":");
    }
}
