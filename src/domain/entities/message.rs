use super::{ChannelId, GuildId, MessageId, User};

/// Kind of channel a message arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Text channel inside a guild
    GuildText,
    /// Guild channel that does not allow bulk message removal (threads, voice chat)
    GuildOther,
    /// One-to-one or group direct message
    Direct,
}

/// Channel an inbound message came from, with what the bot may do there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub kind: ChannelKind,
}

impl Channel {
    pub fn new(id: impl Into<ChannelId>, kind: ChannelKind) -> Self {
        Self { id: id.into(), kind }
    }

    pub fn supports_delete(&self) -> bool {
        self.kind == ChannelKind::GuildText
    }
}

/// Origin of a message event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Typed by a user
    User,
    /// Generated by the platform (joins, pins, boosts)
    System,
}

/// One message event delivered by the gateway
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: MessageId,
    pub channel: Channel,
    pub guild_id: Option<GuildId>,
    pub author: User,
    pub text: String,
    pub kind: MessageKind,
}

impl InboundMessage {
    pub fn new(
        id: impl Into<MessageId>,
        channel: Channel,
        author: User,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel,
            guild_id: None,
            author,
            text: text.into(),
            kind: MessageKind::User,
        }
    }

    pub fn in_guild(mut self, guild_id: impl Into<GuildId>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Guild the message belongs to, if it is a user message in a community channel
    pub fn community_guild(&self) -> Option<GuildId> {
        if self.kind != MessageKind::User || self.channel.kind == ChannelKind::Direct {
            return None;
        }
        self.guild_id
    }
}

/// Outgoing message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed {
        content: Option<String>,
        title: String,
        description: String,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn embed(title: impl Into<String>, description: impl Into<String>) -> Self {
        Reply::Embed {
            content: None,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Attach plain text shown above an embed; replaces the body of a text reply
    pub fn with_content(self, text: impl Into<String>) -> Self {
        match self {
            Reply::Text(_) => Reply::Text(text.into()),
            Reply::Embed { title, description, .. } => Reply::Embed {
                content: Some(text.into()),
                title,
                description,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(kind: ChannelKind) -> InboundMessage {
        InboundMessage::new(1, Channel::new(10, kind), User::new(5), "?wiki Cats")
    }

    #[test]
    fn guild_text_message_is_community() {
        let msg = message(ChannelKind::GuildText).in_guild(7);
        assert_eq!(msg.community_guild(), Some(GuildId(7)));
        assert!(msg.channel.supports_delete());
    }

    #[test]
    fn direct_and_system_messages_are_not_community() {
        let dm = message(ChannelKind::Direct);
        assert_eq!(dm.community_guild(), None);
        assert!(!dm.channel.supports_delete());

        let system = message(ChannelKind::GuildText)
            .in_guild(7)
            .with_kind(MessageKind::System);
        assert_eq!(system.community_guild(), None);
    }

    #[test]
    fn thread_messages_belong_to_guild_but_cannot_be_deleted() {
        let msg = message(ChannelKind::GuildOther).in_guild(7);
        assert_eq!(msg.community_guild(), Some(GuildId(7)));
        assert!(!msg.channel.supports_delete());
    }

    #[test]
    fn embed_keeps_title_when_content_added() {
        let reply = Reply::embed("Cats", "https://en.wikipedia.org/wiki/Cat").with_content("<@5>");
        assert_eq!(
            reply,
            Reply::Embed {
                content: Some("<@5>".to_string()),
                title: "Cats".to_string(),
                description: "https://en.wikipedia.org/wiki/Cat".to_string(),
            }
        );
    }
}
