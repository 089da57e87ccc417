//! Command text classification.

/// What a guest asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ListOpenChannels,
    JoinChannel { name: String },
    LeaveChannel { name: String },
    ShowHelp,
}

impl Intent {
    /// Classify command text. Every input maps to exactly one intent.
    ///
    /// Matching is case-sensitive and prefix based, checked in the order
    /// `list`, `join `, `leave `. The channel name is the rest of the text,
    /// untouched: no trimming, case folding or `#` stripping.
    ///
    /// ```
    /// use invitechan::core::intent::Intent;
    ///
    /// assert_eq!(Intent::parse("list"), Intent::ListOpenChannels);
    /// assert_eq!(
    ///     Intent::parse("join general"),
    ///     Intent::JoinChannel { name: "general".to_string() }
    /// );
    /// assert_eq!(Intent::parse("joingeneral"), Intent::ShowHelp);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.starts_with("list") {
            Intent::ListOpenChannels
        } else if let Some(name) = text.strip_prefix("join ") {
            Intent::JoinChannel {
                name: name.to_string(),
            }
        } else if let Some(name) = text.strip_prefix("leave ") {
            Intent::LeaveChannel {
                name: name.to_string(),
            }
        } else {
            Intent::ShowHelp
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::ListOpenChannels => "list",
            Intent::JoinChannel { .. } => "join",
            Intent::LeaveChannel { .. } => "leave",
            Intent::ShowHelp => "help",
        }
    }
}
