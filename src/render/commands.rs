//! Commands page, built from the pipe-delimited dump the menu writes out.
//!
//! Each dump line is `<ignored>|name|label|description|arg_count`.

use super::markdown::pop_newline;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    /// Menu label; only logged, the page lists commands by name.
    pub label: String,
    pub description: String,
    pub arg_count: i32,
}

const COMMANDS_PREAMBLE: &str = "# Commands

All the current commands from the menu are listed below.

**Example Usage through Lua:**

```lua
command.call(\"spawn\", {joaat(\"adder\")})
command.call_player(somePlayerIndex, \"spawn\", {joaat(\"adder\")})
```

For a complete list of available command functions, please refer to the command table documentation.

";

/// Parse a whole dump. Blank lines are skipped, malformed ones are logged and skipped.
pub fn parse_dump(text: &str) -> Vec<Command> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| {
            let command = parse_line(line);
            match &command {
                Some(cmd) => debug!(name = %cmd.name, label = %cmd.label, "command"),
                None => warn!(line = index + 1, "skipping malformed command dump entry"),
            }
            command
        })
        .collect()
}

fn parse_line(line: &str) -> Option<Command> {
    let (_, rest) = line.split_once('|')?;
    let mut parts = rest.trim().split('|').map(str::trim);
    let name = parts.next()?.to_string();
    let label = parts.next()?.to_string();
    let description = parts.next()?.to_string();
    let arg_count = parts.next()?.parse().ok()?;
    Some(Command {
        name,
        label,
        description,
        arg_count,
    })
}

pub fn render_commands(commands: &[Command]) -> String {
    let mut out = COMMANDS_PREAMBLE.to_string();
    out.push_str(&format!("## Command Count: {}\n\n", commands.len()));
    for cmd in commands {
        out.push_str(&format!("### `{}`\n\n", cmd.name));
        out.push_str(&format!("{}\n", cmd.description));
        out.push_str(&format!("Arg Count: {}\n", cmd.arg_count));
        out.push('\n');
    }
    pop_newline(out)
}
