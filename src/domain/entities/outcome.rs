use std::fmt;

/// Result of one pipeline run over an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Direct or system message; nothing was evaluated
    NotAGuildMessage,
    /// Author is muted; message was removed (when possible) and not processed
    Suppressed,
    /// Neither the prefix nor a mention of the bot started the message
    NoPrefixMatch,
    CommandSucceeded,
    CommandFailed(String),
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            DispatchOutcome::NotAGuildMessage => "not_a_guild_message",
            DispatchOutcome::Suppressed => "suppressed",
            DispatchOutcome::NoPrefixMatch => "no_prefix_match",
            DispatchOutcome::CommandSucceeded => "command_succeeded",
            DispatchOutcome::CommandFailed(_) => "command_failed",
        }
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchOutcome::CommandFailed(reason) => write!(f, "command_failed({})", reason),
            other => f.write_str(other.as_str()),
        }
    }
}
