//! Command parser - Finds the command token in prefix or mention form

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::entities::UserId;

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<@!?(\d+)>").expect("mention pattern is valid"));

/// How the bot was addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Prefix,
    Mention,
}

/// Command token and the text that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    pub args: &'a str,
    pub invocation: Invocation,
}

/// Parses message text addressed to the bot
#[derive(Debug, Clone)]
pub struct CommandParser {
    bot_id: UserId,
}

impl CommandParser {
    pub fn new(bot_id: UserId) -> Self {
        Self { bot_id }
    }

    /// Match `<@bot> <token> [args]` or `<prefix><token> [args]`.
    ///
    /// The mention form is tried first so a `<` prefix cannot shadow it.
    pub fn parse<'a>(&self, text: &'a str, prefix: char) -> Option<ParsedCommand<'a>> {
        if let Some(parsed) = self.parse_mention(text) {
            return Some(parsed);
        }

        let rest = text.strip_prefix(prefix)?;
        // The token must follow the prefix directly
        if rest.starts_with(char::is_whitespace) {
            return None;
        }
        split_command(rest, Invocation::Prefix)
    }

    fn parse_mention<'a>(&self, text: &'a str) -> Option<ParsedCommand<'a>> {
        let rest = self.strip_self_mention(text)?;
        // At least one space separates the mention from the token
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        split_command(rest.trim_start(), Invocation::Mention)
    }

    fn strip_self_mention<'a>(&self, text: &'a str) -> Option<&'a str> {
        let captures = MENTION.captures(text)?;
        let id: u64 = captures.get(1)?.as_str().parse().ok()?;
        if UserId(id) != self.bot_id {
            return None;
        }
        let end = captures.get(0)?.end();
        Some(&text[end..])
    }
}

fn split_command(text: &str, invocation: Invocation) -> Option<ParsedCommand<'_>> {
    let (name, args) = match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    };

    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        name,
        args,
        invocation,
    })
}
