//! Block parsers, one handler per annotation kind.
//!
//! The scanner keeps one [`Block`] per file. A marker only switches the
//! active kind; the entities under construction stay in their slots until the
//! comment run ends, so a later marker in the same run keeps building them.

use super::BlockKind;
use crate::model::{append_description, ClassId, Owner, Parameter, TableId};
use crate::registry::{ConstructorRef, FieldRef, FunctionRef, Registry};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Leading word of a comment line, after any mix of `//` and whitespace.
static RE_DIRECTIVE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s|//)*([A-Za-z]+)").unwrap());

/// Entities currently being built, one slot per kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Current {
    pub table: Option<TableId>,
    pub class: Option<ClassId>,
    pub field: Option<FieldRef>,
    pub constructor: Option<ConstructorRef>,
    pub function: Option<FunctionRef>,
}

/// Active annotation kind together with the entity slots it writes into.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    kind: Option<BlockKind>,
    pub current: Current,
}

impl Block {
    pub fn kind(&self) -> Option<BlockKind> {
        self.kind
    }

    /// Switch to `kind`. Enumeration kinds are consumed by the scanner and
    /// never stay active.
    pub fn open(&mut self, kind: BlockKind) {
        self.kind = match kind {
            BlockKind::Tabs | BlockKind::Infraction => None,
            kind => Some(kind),
        };
    }

    /// Stop dispatching lines. The slots survive only until the next marker;
    /// a plain comment line first ends the run.
    pub fn suspend(&mut self) {
        self.kind = None;
    }

    /// End of the comment run: no active kind and empty slots.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Feed one comment line to the handler of the active kind. With no active
    /// kind the line ends the run.
    pub fn feed(&mut self, line: &str, reg: &mut Registry) {
        let Some(kind) = self.kind else {
            self.close();
            return;
        };
        let d = Directive::parse(line);
        let cur = &mut self.current;
        match kind {
            BlockKind::Table => table_line(cur, &d, reg),
            BlockKind::Class => class_line(cur, &d, reg),
            BlockKind::Field => field_line(cur, &d, reg),
            BlockKind::Constructor => constructor_line(cur, &d, reg),
            BlockKind::Function => function_line(cur, &d, reg),
            BlockKind::Tabs | BlockKind::Infraction => {}
        }
    }
}

// -- Directives ---------------------------------------------------------------

/// A comment line split into its leading word and the text after the first `:`.
#[derive(Debug)]
struct Directive<'a> {
    line: &'a str,
    /// Lowercased leading word, empty when the line has none.
    word: String,
    /// Everything after the first `:`, untrimmed.
    rest: Option<&'a str>,
}

impl<'a> Directive<'a> {
    fn parse(line: &'a str) -> Self {
        let word = RE_DIRECTIVE_WORD
            .captures(line)
            .map(|caps| caps[1].to_lowercase())
            .unwrap_or_default();
        Self {
            line,
            word,
            rest: line.split_once(':').map(|(_, rest)| rest),
        }
    }

    /// True when the line starts with `word` and carries a `:` value.
    fn is(&self, word: &str) -> bool {
        self.rest.is_some() && self.word.starts_with(word)
    }

    fn value(&self) -> &'a str {
        self.rest.unwrap_or_default().trim()
    }

    /// Up to `n` trimmed `:`-separated parts; the last one keeps any further colons.
    fn parts(&self, n: usize) -> Vec<&'a str> {
        match self.rest {
            Some(rest) => rest.splitn(n, ':').map(str::trim).collect(),
            None => Vec::new(),
        }
    }

    /// The line as description text: comment marker and one space removed.
    fn text(&self) -> &'a str {
        sanitize_description(self.line)
    }
}

pub fn sanitize_description(line: &str) -> &str {
    let text = line.strip_prefix("//").unwrap_or(line);
    let text = text.strip_prefix(' ').unwrap_or(text);
    text.trim_end()
}

/// `param: name: type: description`, missing parts default to empty.
fn parameter(d: &Directive) -> Parameter {
    let mut parts = d.parts(3).into_iter();
    let mut next = || parts.next().unwrap_or_default().to_string();
    Parameter {
        name: next(),
        ty: next(),
        description: next(),
    }
}

// -- Handlers -----------------------------------------------------------------

fn table_line(cur: &mut Current, d: &Directive, reg: &mut Registry) {
    if d.is("name") {
        cur.table = Some(reg.get_or_create_table(d.value()));
    } else if let Some(id) = cur.table {
        append_description(&mut reg.table_mut(id).description, d.text());
    }
}

fn class_line(cur: &mut Current, d: &Directive, reg: &mut Registry) {
    if d.is("name") {
        cur.class = Some(reg.get_or_create_class(d.value()));
        return;
    }
    let Some(id) = cur.class else {
        return;
    };
    if d.is("inherit") {
        let parent = reg.get_or_create_class(d.value());
        reg.class_mut(id).inheritance.push(parent);
    } else {
        append_description(&mut reg.class_mut(id).description, d.text());
    }
}

/// Resolve a `table:` / `class:` directive to its owner, creating it if needed.
/// The owner also becomes the current table or class.
fn owner_directive(cur: &mut Current, d: &Directive, reg: &mut Registry) -> Option<Owner> {
    if d.is("table") {
        let id = reg.get_or_create_table(d.value());
        cur.table = Some(id);
        Some(Owner::Table(id))
    } else if d.is("class") {
        let id = reg.get_or_create_class(d.value());
        cur.class = Some(id);
        Some(Owner::Class(id))
    } else {
        None
    }
}

fn field_line(cur: &mut Current, d: &Directive, reg: &mut Registry) {
    if let Some(owner) = owner_directive(cur, d, reg) {
        cur.field = Some(reg.add_field(owner));
        return;
    }
    let Some(r) = cur.field else {
        return;
    };
    let field = reg.field_mut(r);
    if d.is("field") {
        let parts = d.parts(2);
        field.name = parts.first().copied().unwrap_or_default().to_string();
        field.ty = parts.get(1).copied().unwrap_or_default().to_string();
    } else {
        append_description(&mut field.description, d.text());
    }
}

fn constructor_line(cur: &mut Current, d: &Directive, reg: &mut Registry) {
    if d.is("class") {
        let class = reg.get_or_create_class(d.value());
        cur.class = Some(class);
        cur.constructor = Some(reg.add_constructor(class));
        return;
    }
    let Some(r) = cur.constructor else {
        return;
    };
    let ctor = reg.constructor_mut(r);
    if d.is("param") {
        ctor.parameters.push(parameter(d));
    } else {
        append_description(&mut ctor.description, d.text());
    }
}

fn function_line(cur: &mut Current, d: &Directive, reg: &mut Registry) {
    if let Some(owner) = owner_directive(cur, d, reg) {
        cur.function = Some(reg.add_function(owner));
        return;
    }
    let Some(r) = cur.function else {
        return;
    };
    if d.is("name") {
        let name = d.value();
        if let Some(previous) = reg.function(name) {
            debug!(
                function = name,
                previous_owner = reg.owner_name(previous.parent),
                "replacing function index entry"
            );
        }
        reg.function_mut(r).name = name.to_string();
        reg.index_function(name, r);
        return;
    }

    let func = reg.function_mut(r);
    if d.is("param") {
        func.parameters.push(parameter(d));
    } else if d.is("return") {
        // `return: type: description`; a bare type leaves the description unset.
        let parts = d.parts(2);
        if let Some(ty) = parts.first() {
            func.return_type = Some(ty.to_string());
            func.return_description = parts.get(1).map(|s| s.to_string());
        }
    } else {
        append_description(&mut func.description, d.text());
    }
}
