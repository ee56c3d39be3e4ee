#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Echo plain text back in uppercase
    Scream,
    /// Echo plain text back unchanged
    Whisper,
    /// Show the inline menu
    Menu,
}

impl Command {
    /// Matches the whole message text exactly: no arguments, no `@botname`, case-sensitive.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/scream" => Some(Command::Scream),
            "/whisper" => Some(Command::Whisper),
            "/menu" => Some(Command::Menu),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exact_match_only() {
        assert_eq!(Command::parse("/scream"), Some(Command::Scream));
        assert_eq!(Command::parse("/whisper"), Some(Command::Whisper));
        assert_eq!(Command::parse("/menu"), Some(Command::Menu));

        assert_eq!(Command::parse("/Menu"), None);
        assert_eq!(Command::parse("/menu now"), None);
        assert_eq!(Command::parse(" /menu"), None);
        assert_eq!(Command::parse("/scream@some_bot"), None);
        assert_eq!(Command::parse("/foo"), None);
        assert_eq!(Command::parse("/"), None);
    }
}
