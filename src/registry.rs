//! Name-keyed store of every table and class seen during one scan.
//!
//! Each name maps to exactly one instance for the lifetime of the registry, so
//! mentions spread over many files (in any order) all mutate the same entity.
//! Tables and classes use separate namespaces.

use crate::error::DocError;
use crate::model::*;
use std::collections::HashMap;

/// Position of a function inside its owner's function list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionRef {
    pub owner: Owner,
    pub index: usize,
}

/// Position of a field inside its owner's field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    pub owner: Owner,
    pub index: usize,
}

/// Position of a constructor inside its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorRef {
    pub class: ClassId,
    pub index: usize,
}

#[derive(Debug, Default)]
pub struct Registry {
    tables: Vec<Table>,
    table_ids: HashMap<String, TableId>,
    classes: Vec<Class>,
    class_ids: HashMap<String, ClassId>,
    /// Flat function-name index; the last function registered under a name wins.
    functions: HashMap<String, FunctionRef>,
    /// Raw tabs enumeration, sentinels included.
    pub tabs: Vec<String>,
    pub infractions: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Tables and classes ---------------------------------------------------

    pub fn get_or_create_table(&mut self, name: &str) -> TableId {
        let name = name.trim();
        if let Some(id) = self.find_table(name) {
            return id;
        }
        let id = TableId(self.tables.len());
        self.tables.push(Table::new(name));
        self.table_ids.insert(name.to_string(), id);
        id
    }

    pub fn get_or_create_class(&mut self, name: &str) -> ClassId {
        let name = name.trim();
        if let Some(id) = self.find_class(name) {
            return id;
        }
        let id = ClassId(self.classes.len());
        self.classes.push(Class::new(name));
        self.class_ids.insert(name.to_string(), id);
        id
    }

    pub fn find_table(&self, name: &str) -> Option<TableId> {
        self.table_ids.get(name.trim()).copied()
    }

    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.class_ids.get(name.trim()).copied()
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut Table {
        &mut self.tables[id.0]
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes[id.0]
    }

    /// Tables in first-mention order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Classes in first-mention order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.iter()
    }

    pub fn owner_name(&self, owner: Owner) -> &str {
        match owner {
            Owner::Table(id) => &self.table(id).name,
            Owner::Class(id) => &self.class(id).name,
        }
    }

    // -- Members --------------------------------------------------------------

    /// Append an unnamed function to `owner` and return a handle to it.
    pub fn add_function(&mut self, owner: Owner) -> FunctionRef {
        let list = self.functions_of_mut(owner);
        list.push(Function::new(owner));
        FunctionRef {
            owner,
            index: list.len() - 1,
        }
    }

    pub fn function_mut(&mut self, r: FunctionRef) -> &mut Function {
        &mut self.functions_of_mut(r.owner)[r.index]
    }

    pub fn function_at(&self, r: FunctionRef) -> &Function {
        match r.owner {
            Owner::Table(id) => &self.table(id).functions[r.index],
            Owner::Class(id) => &self.class(id).functions[r.index],
        }
    }

    /// Point the flat index entry for `name` at `r`, replacing any earlier one.
    pub fn index_function(&mut self, name: &str, r: FunctionRef) {
        self.functions.insert(name.to_string(), r);
    }

    /// Look a function up by name in the flat index.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name).map(|&r| self.function_at(r))
    }

    pub fn function_count(&self) -> usize {
        self.tables.iter().map(|t| t.functions.len()).sum::<usize>()
            + self.classes.iter().map(|c| c.functions.len()).sum::<usize>()
    }

    /// Append an unnamed field to `owner` and return a handle to it.
    pub fn add_field(&mut self, owner: Owner) -> FieldRef {
        let list = self.fields_of_mut(owner);
        list.push(Field::default());
        FieldRef {
            owner,
            index: list.len() - 1,
        }
    }

    pub fn field_mut(&mut self, r: FieldRef) -> &mut Field {
        &mut self.fields_of_mut(r.owner)[r.index]
    }

    pub fn add_constructor(&mut self, class: ClassId) -> ConstructorRef {
        let list = &mut self.class_mut(class).constructors;
        list.push(Constructor::new(class));
        ConstructorRef {
            class,
            index: list.len() - 1,
        }
    }

    pub fn constructor_mut(&mut self, r: ConstructorRef) -> &mut Constructor {
        &mut self.class_mut(r.class).constructors[r.index]
    }

    fn functions_of_mut(&mut self, owner: Owner) -> &mut Vec<Function> {
        match owner {
            Owner::Table(id) => &mut self.table_mut(id).functions,
            Owner::Class(id) => &mut self.class_mut(id).functions,
        }
    }

    fn fields_of_mut(&mut self, owner: Owner) -> &mut Vec<Field> {
        match owner {
            Owner::Table(id) => &mut self.table_mut(id).fields,
            Owner::Class(id) => &mut self.class_mut(id).fields,
        }
    }

    // -- Validation -----------------------------------------------------------

    /// Reject any table or class whose name is not a valid page name or that
    /// declares the same field name twice.
    pub fn validate(&self) -> Result<(), DocError> {
        let owners = self
            .tables
            .iter()
            .map(|t| ("table", &t.name, &t.fields))
            .chain(self.classes.iter().map(|c| ("class", &c.name, &c.fields)));

        for (kind, name, fields) in owners {
            let owner = format!("{kind} {name}");
            if !is_page_name(name) {
                return Err(DocError::InvalidPageName { owner });
            }
            let duplicates = duplicate_fields(fields);
            if !duplicates.is_empty() {
                return Err(DocError::DuplicateFields {
                    owner,
                    duplicates: duplicates.iter().map(|f| f.to_string()).collect(),
                });
            }
        }
        Ok(())
    }
}
