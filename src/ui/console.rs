//! Terminal front end: command parsing and text rendering of a [`Session`]

use crate::core::session::{Note, Session, ToggleControl};
use crate::core::risk_score::RiskScore;
use crate::models::types::Tone;
use crate::utils::constants::{MSG_HEURISTIC, MSG_NO_HITS};

/// A line of user input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    /// Set (`Some`) or flip (`None`) one indicator, by 1-based number or id
    Mark { target: String, checked: Option<bool> },
    Score,
    Reset,
    Lookup { username: String },
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "list" | "ls" => Command::List,
            "check" | "uncheck" | "toggle" if !rest.is_empty() => Command::Mark {
                target: rest.to_string(),
                checked: match verb.to_ascii_lowercase().as_str() {
                    "check" => Some(true),
                    "uncheck" => Some(false),
                    _ => None,
                },
            },
            "score" => Command::Score,
            "reset" => Command::Reset,
            // the input box may be left blank; the session reports it
            "lookup" => Command::Lookup {
                username: rest.to_string(),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Resolve "3" or "unknown_logins" to an indicator id
pub fn resolve_target<'a>(controls: &'a [ToggleControl], target: &str) -> Option<&'a str> {
    if let Ok(n) = target.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| controls.get(i)).map(|c| c.id.as_str());
    }
    controls
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(target))
        .map(|c| c.id.as_str())
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Ok => "[ok]",
        Tone::Warn => "[warn]",
        Tone::Bad => "[bad]",
    }
}

pub fn render_checklist(controls: &[ToggleControl]) -> String {
    let mut out = String::from("\nAccount compromise checklist\n");
    for (n, control) in controls.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. [{}] {}\n       {}\n",
            n + 1,
            if control.checked { "x" } else { " " },
            control.title,
            control.description
        ));
    }
    out
}

pub fn render_score(score: &RiskScore) -> String {
    let mut out = format!(
        "\n{} Risk: {} {} | Score: {}/100 | {}\n",
        score.level.emoji(),
        score.level.as_str(),
        tone_marker(score.tone()),
        score.score,
        MSG_HEURISTIC
    );

    out.push_str("\nWhy this score?\n");
    if score.matched.is_empty() {
        out.push_str(&format!("  • {}\n", MSG_NO_HITS));
    } else {
        for title in score.matched_titles() {
            out.push_str(&format!("  • {}\n", title));
        }
    }

    out.push_str("\nDo this next:\n");
    for (n, step) in score.advice.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", n + 1, step));
    }
    out
}

pub fn render_note(note: &Note) -> String {
    format!("{} {}", tone_marker(note.tone), note.text)
}

/// Lookup note plus the pretty-printed record, if any
pub fn render_lookup(session: &Session) -> String {
    let mut out = String::new();
    if let Some(note) = session.note() {
        out.push_str(&render_note(note));
        out.push('\n');
    }
    if let Some(pretty) = session.output_pretty() {
        out.push_str(&pretty);
        out.push('\n');
    }
    out
}

pub fn help_text() -> &'static str {
    "\nCommands:
  list                 show the checklist
  check <n|id>         mark an indicator
  uncheck <n|id>       clear an indicator
  toggle <n|id>        flip an indicator
  score                compute your risk score
  reset                clear everything
  lookup <username>    public profile lookup
  help                 this text
  quit                 leave\n"
}
