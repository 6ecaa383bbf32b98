// src/view.rs
use crate::state::SessionSnapshot;

pub const HEADER: &str = "OpenRouter AI Chatbot";
const THINKING: &str = "Thinking...";
const RULE_WIDTH: usize = 40;

/// Draws the whole chat pane from a snapshot.
///
/// The transcript is cut to `pane_height` lines from the bottom, so the most
/// recent entry is always on screen.
#[derive(Clone, Copy, Debug)]
pub struct ChatView {
    pane_height: usize,
}

impl ChatView {
    pub fn new(pane_height: usize) -> Self {
        Self { pane_height: pane_height.max(1) }
    }

    pub fn render(&self, snap: &SessionSnapshot) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut out = String::new();
        out.push_str(HEADER);
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');

        for line in self.visible_lines(snap) {
            out.push_str(&line);
            out.push('\n');
        }

        out.push_str(&rule);
        out.push('\n');
        if let Some(name) = &snap.pending_file {
            out.push_str(&format!("[file: {name}] "));
        }
        out.push_str(input_hint(snap));
        out.push(' ');
        out.push_str(if snap.busy { "[...]" } else { "[Send]" });
        out.push('\n');
        out
    }

    /// Transcript lines after auto-scroll.
    pub fn visible_lines(&self, snap: &SessionSnapshot) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        for msg in &snap.messages {
            let mut content = msg.content.lines();
            let first = content.next().unwrap_or_default();
            lines.push(format!("{}: {first}", msg.role.label()));
            lines.extend(content.map(|l| format!("  {l}")));
        }
        if snap.busy {
            lines.push(THINKING.to_string());
        }

        let skip = lines.len().saturating_sub(self.pane_height);
        lines.split_off(skip)
    }
}

fn input_hint(snap: &SessionSnapshot) -> &'static str {
    if snap.pending_file.is_some() {
        "Enter a question for the file..."
    } else {
        "Type a message..."
    }
}
