//! Built-in terminal commands. Every handler is a pure formatter over its
//! arguments and the session identity.

use crate::terminal::output::{BlockKind, OutputBlock};
use crate::terminal::registry::{CommandContext, CommandOutcome, CommandRegistry};
use serde_json::json;

const LS_LISTING: &str = "about.txt    contact.json    projects/    resume.pdf    skills.txt";

const PROJECTS: &[(&str, &str, &str)] = &[
    (
        "portfolio-os",
        "This site: a desktop-OS themed portfolio with a virtual terminal",
        "Rust, WebAssembly, Canvas",
    ),
    (
        "pulse-dashboard",
        "Real-time analytics dashboard with streaming charts",
        "TypeScript, WebSockets, D3",
    ),
    (
        "neon-synth",
        "Browser synthesizer with an audio-reactive visualizer",
        "Web Audio API, GLSL",
    ),
];

const SKILLS: &[(&str, &[&str])] = &[
    ("Frontend", &["HTML/CSS", "JavaScript", "TypeScript", "React", "Canvas/WebGL"]),
    ("Backend", &["Rust", "Node.js", "PostgreSQL", "REST & WebSocket APIs"]),
    ("Tooling", &["Git", "Vite", "Docker", "CI/CD"]),
    ("Design", &["Figma", "Motion design", "UI/UX"]),
];

fn print(text: &str) -> CommandOutcome {
    CommandOutcome::Print(OutputBlock::output(text))
}

fn help(ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    let width = ctx.registry.names().map(str::len).max().unwrap_or(0);
    let mut lines = vec!["Available commands:".to_string()];
    for command in ctx.registry.commands() {
        lines.push(format!("  {:<width$}  {}", command.name, command.summary, width = width));
    }
    CommandOutcome::Print(OutputBlock::from_lines(BlockKind::Output, lines))
}

fn about_text(ctx: &CommandContext<'_>) -> String {
    let id = ctx.identity;
    format!(
        "Hi, I'm {}, a {}.\n\
         I build playful, fast interfaces and the systems behind them.\n\
         This desktop is my portfolio: open the windows, poke at the terminal,\n\
         and type `projects` or `skills` to learn more.",
        id.owner_name, id.owner_role
    )
}

fn about(ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print(&about_text(ctx))
}

fn projects(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    let mut lines = vec!["Featured projects:".to_string()];
    for (i, (name, description, stack)) in PROJECTS.iter().enumerate() {
        lines.push(format!("  {}. {} - {}", i + 1, name, description));
        lines.push(format!("     stack: {}", stack));
    }
    CommandOutcome::Print(OutputBlock::from_lines(BlockKind::Output, lines))
}

fn skills_text() -> String {
    SKILLS
        .iter()
        .map(|(category, items)| format!("{:<9} {}", format!("{}:", category), items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn skills(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print(&skills_text())
}

fn contact(ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    let id = ctx.identity;
    let status = if id.available {
        "open to new opportunities"
    } else {
        "not taking new work right now"
    };
    print(&format!(
        "Email:   {}\nStatus:  {}\nTip: open the Contact window or run `cat contact.json`.",
        id.owner_email, status
    ))
}

fn contact_json(ctx: &CommandContext<'_>) -> String {
    let id = ctx.identity;
    let value = json!({
        "name": id.owner_name,
        "email": id.owner_email,
        "role": id.owner_role,
        "available": id.available,
    });
    format!("{:#}", value)
}

fn whoami(ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print(&ctx.identity.user)
}

fn ls(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print(LS_LISTING)
}

fn cat(ctx: &CommandContext<'_>, args: &[String]) -> CommandOutcome {
    if args.is_empty() {
        return CommandOutcome::Print(OutputBlock::error("cat: missing file operand"));
    }

    let mut kind = BlockKind::Output;
    let mut lines = Vec::new();
    for name in args {
        let content = match name.as_str() {
            "about.txt" => about_text(ctx),
            "skills.txt" => skills_text(),
            "contact.json" => contact_json(ctx),
            "projects" | "projects/" => {
                kind = BlockKind::Error;
                format!("cat: {}: Is a directory", name)
            }
            _ => {
                kind = BlockKind::Error;
                format!("cat: {}: No such file or directory", name)
            }
        };
        lines.extend(content.lines().map(str::to_string));
    }
    CommandOutcome::Print(OutputBlock::from_lines(kind, lines))
}

fn neofetch(ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    let id = ctx.identity;
    let title = format!("{}@{}", id.user, id.host);
    let info = [
        title.clone(),
        "-".repeat(title.len()),
        format!("OS: PortfolioOS {}", env!("CARGO_PKG_VERSION")),
        "Kernel: browser-tab".to_string(),
        "Shell: vtsh".to_string(),
        "WM: exclusive-window".to_string(),
        "Theme: neon [dark]".to_string(),
        format!("Owner: {} ({})", id.owner_name, id.owner_role),
    ];
    let logo = [
        "   ______   ",
        "  / ____ \\  ",
        " | |    | | ",
        " | |____| | ",
        "  \\______/  ",
        "   |_||_|   ",
        "            ",
        "            ",
    ];
    let lines = logo
        .iter()
        .zip(info.iter())
        .map(|(l, i)| format!("{}  {}", l, i))
        .collect();
    CommandOutcome::Print(OutputBlock::from_lines(BlockKind::Output, lines))
}

fn clear(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    CommandOutcome::ClearScreen
}

fn echo(_ctx: &CommandContext<'_>, args: &[String]) -> CommandOutcome {
    print(&args.join(" "))
}

fn date(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print(&chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string())
}

fn pwd(ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print(&format!("/home/{}", ctx.identity.user))
}

fn uname(_ctx: &CommandContext<'_>, args: &[String]) -> CommandOutcome {
    if args.iter().any(|a| a == "-a") {
        print(&format!(
            "PortfolioOS portfolio {} browser-tab wasm32",
            env!("CARGO_PKG_VERSION")
        ))
    } else {
        print("PortfolioOS")
    }
}

fn coffee(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print(
        "    ( (\n     ) )\n  ........\n  |      |]\n  \\      /\n   `----'\n\
         Brewing... fuel for the next commit.",
    )
}

fn matrix(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandOutcome {
    print("Wake up, Neo...\nThe Matrix has you...\nFollow the white rabbit.")
}

/// Registers every built-in; `help` lists them in this order.
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register("help", "List available commands", help);
    registry.register("about", "Who I am", about);
    registry.register("projects", "Things I've built", projects);
    registry.register("skills", "What I work with", skills);
    registry.register("contact", "How to reach me", contact);
    registry.register("whoami", "Print the current user", whoami);
    registry.register("ls", "List files", ls);
    registry.register("cat", "Print a file: cat <name>", cat);
    registry.register("neofetch", "System information", neofetch);
    registry.register("clear", "Clear the terminal", clear);
    registry.register("echo", "Print arguments", echo);
    registry.register("date", "Print the current date", date);
    registry.register("pwd", "Print working directory", pwd);
    registry.register("uname", "Print system name", uname);
    registry.register("coffee", "Take a break", coffee);
    registry.register("matrix", "???", matrix);
}

impl CommandRegistry {
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::registry::SessionIdentity;

    fn run(name: &str, args: &[&str]) -> CommandOutcome {
        let registry = CommandRegistry::with_builtins();
        let identity = SessionIdentity::default();
        let ctx = CommandContext {
            identity: &identity,
            registry: &registry,
        };
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let command = registry.lookup(name).unwrap();
        (command.handler)(&ctx, &args)
    }

    fn block(outcome: CommandOutcome) -> OutputBlock {
        match outcome {
            CommandOutcome::Print(block) => block,
            CommandOutcome::ClearScreen => panic!("expected a printed block"),
        }
    }

    #[test]
    fn help_lists_every_command() {
        let out = block(run("help", &[]));
        for name in CommandRegistry::with_builtins().names() {
            assert!(out.lines.iter().any(|l| l.trim_start().starts_with(name)), "{name} missing");
        }
    }

    #[test]
    fn cat_contact_json_is_valid_json() {
        let out = block(run("cat", &["contact.json"]));
        assert_eq!(out.kind, BlockKind::Output);
        let value: serde_json::Value = serde_json::from_str(&out.text()).unwrap();
        for field in ["name", "email", "role", "available"] {
            assert!(value.get(field).is_some(), "{field} missing");
        }
        assert_eq!(value["available"], true);
    }

    #[test]
    fn cat_unknown_file_is_an_error_block() {
        let out = block(run("cat", &["secrets.txt"]));
        assert_eq!(out.kind, BlockKind::Error);
        assert_eq!(out.text(), "cat: secrets.txt: No such file or directory");
    }

    #[test]
    fn cat_without_operand() {
        let out = block(run("cat", &[]));
        assert_eq!(out.kind, BlockKind::Error);
    }

    #[test]
    fn whoami_uses_identity() {
        assert_eq!(block(run("whoami", &[])).text(), "visitor");
    }

    #[test]
    fn clear_requests_truncation() {
        assert_eq!(run("clear", &[]), CommandOutcome::ClearScreen);
    }

    #[test]
    fn echo_joins_arguments() {
        assert_eq!(block(run("echo", &["hello", "World"])).text(), "hello World");
    }

    #[test]
    fn ls_is_static() {
        let out = block(run("ls", &[]));
        assert!(out.contains("contact.json"));
        assert_eq!(out, block(run("ls", &["-la"])));
    }
}
