// src/input.rs

/// What a line typed into the terminal asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// `/attach <path>`: select a file for the next send.
    Attach(&'a str),
    /// `/quit`
    Quit,
    /// Anything else becomes the draft and is sent (Enter is the send key).
    Send(&'a str),
}

pub fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    if trimmed == "/quit" {
        return Command::Quit;
    }
    if let Some(path) = trimmed.strip_prefix("/attach ") {
        let path = path.trim();
        if !path.is_empty() {
            return Command::Attach(path);
        }
    }
    Command::Send(line)
}
