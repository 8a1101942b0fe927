//! Slash command parsing.

use std::path::PathBuf;

use rigforge_core::build::LineId;
use rigforge_core::catalog::CategoryFilter;
use rigforge_core::view::ViewState;

/// Name, argument hint and description of every command, for help and completion.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("/login", "<name>", "Sign in with a username"),
    ("/guest", "", "Continue as a guest"),
    ("/logout", "", "Sign out (the build is kept)"),
    ("/go", "<screen>", "Open dashboard, builder, scanner, benchmark, forum or saved"),
    ("/catalog", "", "List catalog parts matching the search and category"),
    ("/search", "[text]", "Set the catalog search text"),
    ("/category", "<name>", "Set the catalog category (ALL, CPU, GPU, ...)"),
    ("/add", "<part id>", "Add a catalog part to the build"),
    ("/remove", "<part id|#line>", "Remove one instance of a part"),
    ("/clear", "", "Remove every part from the build"),
    ("/rename", "<name>", "Rename the build"),
    ("/build", "", "Show the build and its results"),
    ("/validate", "", "Check compatibility with the AI"),
    ("/benchmark", "[reset]", "Estimate performance with the AI"),
    ("/scan", "<image>", "Identify a part from a photo and add it"),
    ("/retry", "", "Retry after a camera error"),
    ("/close", "", "Close the scanner"),
    ("/save", "[name]", "Save a snapshot of the build"),
    ("/saved", "", "List saved builds"),
    ("/load", "<id>", "Replace the build with a saved one"),
    ("/delete", "<id>", "Delete a saved build"),
    ("/share", "", "Prepare the build for the forum"),
    ("/publish", "[description]", "Post the prepared build"),
    ("/discard", "", "Drop the prepared post"),
    ("/forum", "", "Show the community feed"),
    ("/like", "<post id>", "Like a forum post"),
    ("/help", "", "Show this help"),
    ("/quit", "", "Exit"),
];

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login(String),
    Guest,
    Logout,
    Go(ViewState),
    Catalog,
    Search(String),
    Category(CategoryFilter),
    Add(String),
    Remove(String),
    RemoveLine(LineId),
    Clear,
    Rename(String),
    Build,
    Validate,
    Benchmark,
    ResetBenchmark,
    Scan(PathBuf),
    Retry,
    Close,
    Save(Option<String>),
    Saved,
    Load(String),
    Delete(String),
    Share,
    Publish(String),
    Discard,
    Forum,
    Like(String),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Ok(Self::Quit);
        }
        let Some(body) = line.strip_prefix('/') else {
            return Err("Commands start with '/'. Type /help for the list.".to_string());
        };

        let (name, arg) = match body.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (body, ""),
        };

        let command = match name {
            "login" => Self::Login(required(arg, "/login <name>")?),
            "guest" => Self::Guest,
            "logout" => Self::Logout,
            "go" => Self::Go(required(arg, "/go <screen>")?.parse()?),
            "catalog" => Self::Catalog,
            "search" => Self::Search(arg.to_string()),
            "category" => Self::Category(required(arg, "/category <name>")?.parse()?),
            "add" => Self::Add(required(arg, "/add <part id>")?),
            "remove" => {
                let target = required(arg, "/remove <part id|#line>")?;
                match target.strip_prefix('#') {
                    Some(line) => Self::RemoveLine(LineId::new(
                        line.parse().map_err(|_| format!("Invalid line number: '{line}'"))?,
                    )),
                    None => Self::Remove(target),
                }
            }
            "clear" => Self::Clear,
            "rename" => Self::Rename(required(arg, "/rename <name>")?),
            "build" => Self::Build,
            "validate" => Self::Validate,
            "benchmark" | "stats" => match arg {
                "" => Self::Benchmark,
                "reset" => Self::ResetBenchmark,
                other => return Err(format!("Unknown benchmark option: '{other}'")),
            },
            "scan" => Self::Scan(PathBuf::from(required(arg, "/scan <image>")?)),
            "retry" => Self::Retry,
            "close" => Self::Close,
            "save" => Self::Save((!arg.is_empty()).then(|| arg.to_string())),
            "saved" => Self::Saved,
            "load" => Self::Load(required(arg, "/load <id>")?),
            "delete" => Self::Delete(required(arg, "/delete <id>")?),
            "share" => Self::Share,
            "publish" => Self::Publish(arg.to_string()),
            "discard" => Self::Discard,
            "forum" => Self::Forum,
            "like" => Self::Like(required(arg, "/like <post id>")?),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command: /{other}. Type /help for the list.")),
        };
        Ok(command)
    }
}

fn required(arg: &str, usage: &str) -> Result<String, String> {
    if arg.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(arg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigforge_core::component::ComponentCategory;

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            Command::parse("/login  alice ").unwrap(),
            Command::Login("alice".to_string())
        );
        assert_eq!(
            Command::parse("/go saved").unwrap(),
            Command::Go(ViewState::SavedBuilds)
        );
        assert_eq!(
            Command::parse("/category gpu").unwrap(),
            Command::Category(CategoryFilter::Only(ComponentCategory::Gpu))
        );
        assert_eq!(
            Command::parse("/remove #3").unwrap(),
            Command::RemoveLine(LineId::new(3))
        );
        assert_eq!(
            Command::parse("/remove cpu1").unwrap(),
            Command::Remove("cpu1".to_string())
        );
        assert_eq!(
            Command::parse("/save My Rig").unwrap(),
            Command::Save(Some("My Rig".to_string()))
        );
        assert_eq!(Command::parse("/save").unwrap(), Command::Save(None));
        assert_eq!(Command::parse("/search").unwrap(), Command::Search(String::new()));
        assert_eq!(Command::parse("/benchmark reset").unwrap(), Command::ResetBenchmark);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("/login").unwrap_err(), "Usage: /login <name>");
        assert!(Command::parse("/go nowhere").is_err());
        assert!(Command::parse("/remove #x").is_err());
        assert!(Command::parse("/frobnicate").unwrap_err().starts_with("Unknown command"));
        assert!(Command::parse("hello").is_err());
    }

    #[test]
    fn test_quit_without_slash() {
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("/quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_every_listed_command_parses_or_asks_for_arguments() {
        for (name, _, _) in COMMANDS {
            match Command::parse(name) {
                Ok(_) => {}
                Err(e) => assert!(e.starts_with("Usage:"), "{name}: {e}"),
            }
        }
    }
}
