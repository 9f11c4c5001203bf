//! Markdown pages for tables, classes and the two enumerations.
//!
//! Text from the annotations is written as-is; only the headings, fences and
//! bullets added here carry markdown structure. Every page drops its final
//! newline.

use crate::model::*;
use crate::registry::Registry;

/// Functions of this table are globals and render without a prefix.
const GLOBAL_TABLE: &str = "Global Table";

/// Tab page entries get this prefix, matching the names scripts pass to `gui.get_tab`.
const TAB_PREFIX: &str = "GUI_TAB_";

const TABS_PREAMBLE: &str = "# Tabs

All the tabs from the menu are listed below, used as parameter for adding gui elements to them.

**Example Usage:**

```lua
missionsTab = gui.get_tab(\"GUI_TAB_MISSIONS\")
missionsTab:add_button(\"Click me\", function ()
    log.info(\"You clicked!\")
end)
```

For a complete list of available gui functions, please refer to the tab class documentation and the gui table documentation.

";

const INFRACTION_PREAMBLE: &str = "# Infraction

All the infraction from the menu are listed below, used as parameter for adding an infraction to a given player, for flagging them as modder.

**Example Usage:**

```lua
network.flag_player_as_modder(player_index, infraction.CUSTOM_REASON, \"My custom reason on why the player is flagged as a modder\")
```

";

pub fn render_table(table: &Table) -> String {
    let mut out = format!("# Table: {}\n\n", table.name);
    push_description(&mut out, &table.description);
    push_fields(&mut out, &table.fields);
    push_functions(&mut out, &table.functions, &table.name);

    pop_newline(out)
}

pub fn render_class(reg: &Registry, class: &Class) -> String {
    let mut out = format!("# Class: {}\n\n", class.name);

    if !class.inheritance.is_empty() {
        let names: Vec<&str> = class
            .inheritance
            .iter()
            .map(|&id| reg.class(id).name.as_str())
            .collect();
        out.push_str(&format!(
            "## Inherit from {} class: {}\n\n",
            names.len(),
            names.join(", ")
        ));
    }

    push_description(&mut out, &class.description);
    push_fields(&mut out, &class.fields);

    if !class.constructors.is_empty() {
        out.push_str(&format!("## Constructors ({})\n\n", class.constructors.len()));
        for ctor in &class.constructors {
            out.push_str(&render_constructor(reg, ctor));
        }
    }

    push_functions(&mut out, &class.functions, &class.name);

    pop_newline(out)
}

/// Tabs page. The first (`NONE`) and last (runtime-defined) entries are sentinels
/// and are left out.
pub fn render_tabs(tabs: &[String]) -> String {
    let visible = match tabs.len() {
        0..=2 => &[][..],
        n => &tabs[1..n - 1],
    };

    let mut out = TABS_PREAMBLE.to_string();
    out.push_str(&format!("## Tab Count: {}\n\n", visible.len()));
    for tab in visible {
        out.push_str(&format!("### `{}{}`\n\n", TAB_PREFIX, tab));
    }
    pop_newline(out)
}

pub fn render_infractions(infractions: &[String]) -> String {
    let mut out = INFRACTION_PREAMBLE.to_string();
    out.push_str(&format!("## Infraction Count: {}\n\n", infractions.len()));
    for infraction in infractions {
        out.push_str(&format!("### `{}`\n\n", infraction));
    }
    pop_newline(out)
}

// -- Members ------------------------------------------------------------------

fn render_field(field: &Field) -> String {
    let mut out = format!("### `{}`\n\n", field.name);
    push_description(&mut out, &field.description);
    if !field.ty.is_empty() {
        out.push_str(&format!("- Type: `{}`\n", field.ty));
    }
    out.push('\n');
    out
}

fn render_constructor(reg: &Registry, ctor: &Constructor) -> String {
    let params = parameter_list(&ctor.parameters);
    let class_name = &reg.class(ctor.parent).name;

    let mut out = format!("### `new({})`\n\n", params);
    push_description(&mut out, &ctor.description);
    push_parameters(&mut out, &ctor.parameters);

    out.push_str("**Example Usage:**\n\n```lua\n");
    out.push_str(&format!("myInstance = {}:new({})\n", class_name, params));
    out.push_str("```\n\n");
    out
}

fn render_function(func: &Function, owner_name: &str) -> String {
    let params = func.parameter_list();
    let prefix = if owner_name.contains(GLOBAL_TABLE) {
        String::new()
    } else {
        format!("{}{}", owner_name, func.parent.access_separator())
    };

    let mut out = format!("### `{}({})`\n\n", func.name, params);
    push_description(&mut out, &func.description);
    push_parameters(&mut out, &func.parameters);

    let return_type = func.return_type.as_deref().filter(|t| !t.is_empty());
    if let Some(ty) = return_type {
        out.push_str("- **Returns:**\n");
        match func.return_description.as_deref().filter(|d| !d.is_empty()) {
            Some(desc) => out.push_str(&format!("  - `{}`: {}\n", ty, desc)),
            None => out.push_str(&format!("  - `{}`\n", ty)),
        }
        out.push('\n');
    }

    out.push_str("**Example Usage:**\n\n```lua\n");
    if return_type.is_some() {
        out.push_str("result = ");
    }
    out.push_str(&format!("{}{}({})\n", prefix, func.name, params));
    out.push_str("```\n\n");
    out
}

// -- Helpers ------------------------------------------------------------------

fn push_description(out: &mut String, description: &str) {
    if !description.is_empty() {
        out.push_str(description);
        out.push_str("\n\n");
    }
}

fn push_fields(out: &mut String, fields: &[Field]) {
    if fields.is_empty() {
        return;
    }
    out.push_str(&format!("## Fields ({})\n\n", fields.len()));
    for field in fields {
        out.push_str(&render_field(field));
    }
}

fn push_functions(out: &mut String, functions: &[Function], owner_name: &str) {
    if functions.is_empty() {
        return;
    }
    out.push_str(&format!("## Functions ({})\n\n", functions.len()));
    for func in functions {
        out.push_str(&render_function(func, owner_name));
    }
}

fn push_parameters(out: &mut String, parameters: &[Parameter]) {
    if parameters.is_empty() {
        return;
    }
    out.push_str("- **Parameters:**\n");
    for param in parameters {
        out.push_str(&format!("  - `{}` ({})", param.name, param.ty));
        if param.description.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!(": {}\n", param.description));
        }
    }
    out.push('\n');
}

pub(crate) fn pop_newline(mut out: String) -> String {
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle_registry() -> (Registry, ClassId) {
        let mut reg = Registry::new();
        let id = reg.get_or_create_class("Vehicle");
        let r = reg.add_function(Owner::Class(id));
        let func = reg.function_mut(r);
        func.name = "repair".to_string();
        func.parameters.push(Parameter {
            name: "amount".to_string(),
            ty: "number".to_string(),
            description: "Repair amount".to_string(),
        });
        func.return_type = Some("boolean".to_string());
        func.return_description = Some("Whether repair succeeded".to_string());
        (reg, id)
    }

    #[test]
    fn class_function_page() {
        let (reg, id) = vehicle_registry();
        let page = render_class(&reg, reg.class(id));
        let expected = "# Class: Vehicle

## Functions (1)

### `repair(amount)`

- **Parameters:**
  - `amount` (number): Repair amount

- **Returns:**
  - `boolean`: Whether repair succeeded

**Example Usage:**

```lua
result = Vehicle:repair(amount)
```
";
        assert_eq!(page, expected);
    }

    #[test]
    fn table_functions_use_dot_access() {
        let mut reg = Registry::new();
        let id = reg.get_or_create_table("gui");
        let r = reg.add_function(Owner::Table(id));
        reg.function_mut(r).name = "show_message".to_string();
        let page = render_table(reg.table(id));
        assert!(page.contains("\ngui.show_message()\n"), "{page}");
        assert!(!page.contains("result = "));
    }

    #[test]
    fn global_table_functions_have_no_prefix() {
        let mut reg = Registry::new();
        let id = reg.get_or_create_table("Global Table");
        let r = reg.add_function(Owner::Table(id));
        reg.function_mut(r).name = "joaat".to_string();
        let page = render_table(reg.table(id));
        assert!(page.contains("\njoaat()\n"), "{page}");
    }

    #[test]
    fn class_header_lists_inheritance_in_order() {
        let mut reg = Registry::new();
        let button = reg.get_or_create_class("button");
        let base = reg.get_or_create_class("base_text_element");
        let other = reg.get_or_create_class("clickable");
        reg.class_mut(button).inheritance.extend([base, other, base]);
        reg.class_mut(button).description = "A clickable button.".to_string();
        let page = render_class(&reg, reg.class(button));
        assert!(page.starts_with(
            "# Class: button\n\n\
             ## Inherit from 3 class: base_text_element, clickable, base_text_element\n\n\
             A clickable button.\n"
        ));
    }

    #[test]
    fn fields_and_constructors() {
        let mut reg = Registry::new();
        let id = reg.get_or_create_class("vec3");
        let r = reg.add_field(Owner::Class(id));
        let field = reg.field_mut(r);
        field.name = "x".to_string();
        field.ty = "float".to_string();
        field.description = "x component".to_string();
        let c = reg.add_constructor(id);
        for name in ["x", "y"] {
            reg.constructor_mut(c).parameters.push(Parameter {
                name: name.to_string(),
                ty: "float".to_string(),
                description: String::new(),
            });
        }

        let page = render_class(&reg, reg.class(id));
        let expected = "# Class: vec3

## Fields (1)

### `x`

x component

- Type: `float`

## Constructors (1)

### `new(x, y)`

- **Parameters:**
  - `x` (float)
  - `y` (float)

**Example Usage:**

```lua
myInstance = vec3:new(x, y)
```
";
        assert_eq!(page, expected);
    }

    #[test]
    fn untyped_field_has_no_type_line() {
        let field = Field {
            name: "flag".to_string(),
            ..Default::default()
        };
        assert_eq!(render_field(&field), "### `flag`\n\n\n");
    }

    #[test]
    fn return_without_description() {
        let mut func = Function::new(Owner::Table(TableId(0)));
        func.name = "get_tab".to_string();
        func.return_type = Some("tab".to_string());
        let out = render_function(&func, "gui");
        assert!(out.contains("- **Returns:**\n  - `tab`\n\n"), "{out}");
        assert!(out.contains("result = gui.get_tab()\n"));
    }

    #[test]
    fn empty_return_type_is_ignored() {
        let mut func = Function::new(Owner::Table(TableId(0)));
        func.name = "f".to_string();
        func.return_type = Some(String::new());
        let out = render_function(&func, "t");
        assert!(!out.contains("Returns"));
        assert!(out.contains("\nt.f()\n"));
    }

    #[test]
    fn tabs_drop_sentinels() {
        let tabs: Vec<String> = ["NONE", "A", "B", "RUNTIME"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let page = render_tabs(&tabs);
        assert!(page.contains("## Tab Count: 2\n"));
        assert!(page.ends_with("### `GUI_TAB_A`\n\n### `GUI_TAB_B`\n"), "{page}");
        assert!(!page.contains("NONE"));
        assert!(!page.contains("RUNTIME"));
    }

    #[test]
    fn tabs_with_only_sentinels() {
        let tabs = vec!["NONE".to_string(), "RUNTIME".to_string()];
        let page = render_tabs(&tabs);
        assert!(page.ends_with("## Tab Count: 0\n"));
    }

    #[test]
    fn infractions_render_in_full() {
        let list = vec!["TRIGGERED_ANTICHEAT".to_string(), "CUSTOM_REASON".to_string()];
        let page = render_infractions(&list);
        assert!(page.starts_with("# Infraction\n"));
        assert!(page.ends_with(
            "## Infraction Count: 2\n\n### `TRIGGERED_ANTICHEAT`\n\n### `CUSTOM_REASON`\n"
        ));
    }

    #[test]
    fn descriptions_are_not_escaped() {
        let mut table = Table::new("t");
        table.description = "Uses <b>tags</b> and *stars*".to_string();
        let page = render_table(&table);
        assert!(page.contains("Uses <b>tags</b> and *stars*"));
    }
}
