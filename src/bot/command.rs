use std::str::FromStr;

/// Chat commands understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Play,
    Stop,
    Pause,
    Resume,
    List,
    Current,
    Volume,
    Storage,
    Help,
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::Start,
        Command::Play,
        Command::Stop,
        Command::Pause,
        Command::Resume,
        Command::List,
        Command::Current,
        Command::Volume,
        Command::Storage,
        Command::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Play => "play",
            Command::Stop => "stop",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::List => "list",
            Command::Current => "current",
            Command::Volume => "volume",
            Command::Storage => "storage",
            Command::Help => "help",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Command::Play => "/play [name]",
            Command::Volume => "/volume [0-100]",
            Command::Start => "/start",
            Command::Stop => "/stop",
            Command::Pause => "/pause",
            Command::Resume => "/resume",
            Command::List => "/list",
            Command::Current => "/current",
            Command::Storage => "/storage",
            Command::Help => "/help",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Start => "Start the bot",
            Command::Play => "Play a track, or resume the paused one",
            Command::Stop => "Stop playback",
            Command::Pause => "Pause the current track",
            Command::Resume => "Resume the paused track",
            Command::List => "List downloaded tracks",
            Command::Current => "Show the current track",
            Command::Volume => "Show or set the volume",
            Command::Storage => "Show storage usage",
            Command::Help => "Show this help",
        }
    }
}

/// Error for command tokens that name no known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Accepts `play`, `/play`, `/PLAY` and `/play@SomeBot`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let token = token.strip_prefix('/').unwrap_or(token);
        let token = token.split('@').next().unwrap_or_default();

        Command::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Split `/cmd rest of line` into the command token and a non-empty argument.
/// Returns `None` for text that is not a command.
pub fn split_command(text: &str) -> Option<(&str, Option<&str>)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    match text.split_once(char::is_whitespace) {
        Some((cmd, rest)) => {
            let rest = rest.trim();
            Some((cmd, (!rest.is_empty()).then_some(rest)))
        }
        None => Some((text, None)),
    }
}
