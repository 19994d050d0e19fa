//! The retro terminal page: a command table, a scrollback of styled
//! lines and a one-line prompt with history.

use std::sync::OnceLock;

use regex::Regex;

use crate::layout::Node;

pub const PROMPT: &str = "> ";

const BANNER: &str = "    ██████  ██▓ ██▓ ███▄ ▄███▓  ██████ ▓█████  ██ ▄█▀
    ▒██    ▒ ▓██▒▓██▒▓██▒▀█▀ ██▒▒██    ▒ ▓█   ▀  ██▄█▒
    ░ ▓██▄   ▒██▒▒██▒▓██    ▓██░░ ▓██▄   ▒███   ▓███▄░
      ▒   ██▒░██░░██░▒██    ▒██   ▒   ██▒▒▓█  ▄ ▓██ █▄
    ▒██████▒▒░██░░██░▒██▒   ░██▒▒██████▒▒░▒████▒▒██▒ █▄
    ▒ ▒▓▒ ▒ ░░▓  ░▓  ░ ▒░   ░  ░▒ ▒▓▒ ▒ ░░░ ▒░ ░▒ ▒▒ ▓▒
    ░ ░▒  ░ ░ ▒ ░ ▒ ░░  ░      ░░ ░▒  ░ ░ ░ ░  ░░ ░▒ ▒░
   ░  ░  ░   ▒ ░ ▒ ░░      ░   ░  ░  ░     ░   ░ ░░ ░
          ░   ░   ░         ░         ░     ░  ░░  ░";

const HINT: &str = "Type [[b;#00FF41;#222]help] for a list of available commands.";

/// Command name and its output in emphasis markup.
const COMMANDS: [(&str, &str); 4] = [
    (
        "help",
        "\nCurrent commands:\n\n[[b;#00FF41;#222]about] - :)\n[[b;#00FF41;#222]github] - My personal Github.\n\
         [[b;#00FF41;#222]projects] - My projects.\n[[b;#00FF41;#222]clear] - Clear the screen.\n",
    ),
    ("about", "\n[[b;#00FF41;#222]# Muhammed Ali Şimşek]\nElectrical-Electronics Engineering student.\n"),
    ("github", "\nhttps://github.com/siimsek\n"),
    (
        "projects",
        "\nMy projects:\n\n[[b;#00FF41;#222]Compline] - An online complier.\n           \
         Supports Python, C, C++, C#, Java, Swift, PHP, Rust and GO.\n\n\
         [[b;#00FF41;#222]Lightning Kernel] - Kernel for Xiaomi Redmi Note 8\n",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasis: bool,
}

pub type Line = Vec<Span>;

fn markup() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // [[style]text]; style is ignored beyond marking the run as emphasised.
    RE.get_or_init(|| Regex::new(r"\[\[[^\]]*\]([^\]]*)\]").expect("static pattern"))
}

/// Splits emphasis markup into lines of spans.
pub fn parse(text: &str) -> Vec<Line> {
    text.split('\n')
        .map(|raw| {
            let mut line = Vec::new();
            let mut last = 0;
            for caps in markup().captures_iter(raw) {
                let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else { continue };
                if whole.start() > last {
                    line.push(Span { text: raw[last..whole.start()].to_string(), emphasis: false });
                }
                line.push(Span { text: inner.as_str().to_string(), emphasis: true });
                last = whole.end();
            }
            if last < raw.len() {
                line.push(Span { text: raw[last..].to_string(), emphasis: false });
            }
            line
        })
        .collect()
}

pub fn plain(line: &Line) -> String {
    line.iter().map(|s| s.text.as_str()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Printed,
    Cleared,
    Unknown(String),
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct TerminalSession {
    pub scrollback: Vec<Line>,
    pub input: String,
    history: Vec<String>,
    /// Position while browsing history; `None` when editing fresh input.
    cursor: Option<usize>,
}

impl TerminalSession {
    pub fn new() -> Self {
        let mut s = Self::default();
        s.greet();
        s
    }

    fn greet(&mut self) {
        self.scrollback.extend(parse(BANNER));
        self.scrollback.extend(parse(HINT));
    }

    fn echo(&mut self, text: &str) {
        self.scrollback.extend(parse(text));
    }

    /// Runs one command line.
    pub fn run(&mut self, line: &str) -> Outcome {
        let mut echoed = vec![Span { text: PROMPT.to_string(), emphasis: true }];
        if !line.is_empty() {
            echoed.push(Span { text: line.to_string(), emphasis: false });
        }
        self.scrollback.push(echoed);

        let name = line.trim();
        if name.is_empty() {
            return Outcome::Empty;
        }
        if self.history.last().map(String::as_str) != Some(name) {
            self.history.push(name.to_string());
        }
        self.cursor = None;

        if name == "clear" {
            self.scrollback.clear();
            return Outcome::Cleared;
        }
        let command = name.split_whitespace().next().unwrap_or(name);
        match COMMANDS.iter().find(|(n, _)| *n == command) {
            Some((_, output)) => {
                self.echo(output);
                Outcome::Printed
            }
            None => {
                log::debug!("terminal: unknown command {command:?}");
                self.echo(&format!("command not found: {command}"));
                Outcome::Unknown(command.to_string())
            }
        }
    }

    /// Handles a `KeyboardEvent.key`. Returns true if the view changed.
    pub fn key(&mut self, key: &str) -> bool {
        match key {
            "Enter" => {
                let line = std::mem::take(&mut self.input);
                self.run(&line);
            }
            "Backspace" => {
                self.input.pop();
            }
            "ArrowUp" => {
                if self.history.is_empty() {
                    return false;
                }
                let at = match self.cursor {
                    Some(i) => i.saturating_sub(1),
                    None => self.history.len() - 1,
                };
                self.cursor = Some(at);
                self.input = self.history[at].clone();
            }
            "ArrowDown" => match self.cursor {
                Some(i) if i + 1 < self.history.len() => {
                    self.cursor = Some(i + 1);
                    self.input = self.history[i + 1].clone();
                }
                Some(_) => {
                    self.cursor = None;
                    self.input.clear();
                }
                None => return false,
            },
            k if k.chars().count() == 1 => self.input.push_str(k),
            _ => return false,
        }
        true
    }
}

fn line_node(line: &Line) -> Node {
    let spans = line.iter().map(|s| {
        let span = Node::new("span").text(s.text.as_str());
        if s.emphasis {
            span.class("em")
        } else {
            span
        }
    });
    Node::new("div").class("term-line").children(spans)
}

/// Scrollback followed by the live prompt.
pub fn view(session: &TerminalSession) -> Node {
    let prompt = Node::new("div").class("term-prompt").children([
        Node::new("span").class("em").text(PROMPT),
        Node::new("span").text(session.input.as_str()),
        Node::new("span").class("term-cursor").text("\u{2588}"),
    ]);
    Node::new("div").class("term-screen").children(session.scrollback.iter().map(line_node)).child(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_becomes_emphasised_spans() {
        let lines = parse("[[b;#00FF41;#222]about] - :)");
        assert_eq!(
            lines,
            vec![vec![
                Span { text: "about".into(), emphasis: true },
                Span { text: " - :)".into(), emphasis: false },
            ]]
        );
    }

    #[test]
    fn greeting_ends_with_the_hint() {
        let s = TerminalSession::new();
        let last = s.scrollback.last().unwrap();
        assert_eq!(plain(last), "Type help for a list of available commands.");
        assert!(last[1].emphasis);
    }

    #[test]
    fn known_commands_print() {
        let mut s = TerminalSession::new();
        assert_eq!(s.run("github"), Outcome::Printed);
        assert!(s.scrollback.iter().any(|l| plain(l) == "https://github.com/siimsek"));
        for name in ["help", "about", "projects"] {
            assert_eq!(s.run(name), Outcome::Printed);
        }
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut s = TerminalSession::new();
        assert_eq!(s.run("sudo rm"), Outcome::Unknown("sudo".into()));
        assert_eq!(plain(s.scrollback.last().unwrap()), "command not found: sudo");
    }

    #[test]
    fn clear_empties_the_scrollback() {
        let mut s = TerminalSession::new();
        s.run("help");
        assert_eq!(s.run("clear"), Outcome::Cleared);
        assert!(s.scrollback.is_empty());
    }

    #[test]
    fn typing_and_history() {
        let mut s = TerminalSession::new();
        for k in ["a", "b", "o", "u", "t", "Enter"] {
            assert!(s.key(k));
        }
        assert!(s.input.is_empty());
        for k in ["h", "e", "l", "x", "Backspace", "p", "Enter"] {
            s.key(k);
        }
        assert!(s.key("ArrowUp"));
        assert_eq!(s.input, "help");
        s.key("ArrowUp");
        assert_eq!(s.input, "about");
        s.key("ArrowDown");
        assert_eq!(s.input, "help");
        s.key("ArrowDown");
        assert_eq!(s.input, "");
        assert!(!s.key("Shift"));
    }

    #[test]
    fn blank_lines_only_echo_the_prompt() {
        let mut s = TerminalSession::new();
        let before = s.scrollback.len();
        assert_eq!(s.run("   "), Outcome::Empty);
        assert_eq!(s.scrollback.len(), before + 1);
    }

    #[test]
    fn view_ends_with_the_prompt() {
        let mut t = TerminalSession::new();
        for k in ["h", "i"] {
            t.key(k);
        }
        let screen = view(&t);
        assert_eq!(screen.children.len(), t.scrollback.len() + 1);
        let prompt = screen.children.last().unwrap();
        assert_eq!(prompt.class, Some("term-prompt"));
        assert_eq!(prompt.children[1].text.as_deref(), Some("hi"));
        assert!(!screen.find_class("em").is_empty());
    }
}
