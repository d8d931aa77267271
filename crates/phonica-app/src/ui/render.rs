use std::fmt::Write;

use phonica_types::SessionView;

/// ANSI styling, off when stdout is not a terminal
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn detect(force: Option<bool>) -> Self {
        Self {
            color: force.unwrap_or_else(|| atty::is(atty::Stream::Stdout)),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }
}

pub fn render(view: &SessionView, style: &Style) -> String {
    let mut out = String::new();

    if view.loading {
        let _ = writeln!(out, "{}", style.dim("Loading..."));
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "{}", style.red(error));
    }

    if let Some(result) = &view.result {
        let _ = writeln!(out, "{}", style.bold(&result.word));

        let phonetics = if result.phonetics.is_empty() {
            "—".to_string()
        } else {
            result.phonetics.join(", ")
        };
        let _ = writeln!(out, "Phonetics: {phonetics}");

        match result.audios.len() {
            0 => {}
            1 => {
                let _ = writeln!(out, "{}", style.dim("1 audio clip, :play to listen"));
            }
            n => {
                let _ = writeln!(out, "{}", style.dim(&format!("{n} audio clips, :play <n>")));
            }
        }

        for meaning in &result.meanings {
            let _ = writeln!(out, "  {}", style.bold(&meaning.part_of_speech));
            for (i, def) in meaning.definitions.iter().enumerate() {
                let _ = write!(out, "    {}. {}", i + 1, def.definition);
                if let Some(example) = &def.example {
                    let _ = write!(out, " — \"{example}\"");
                }
                out.push('\n');
            }
        }
    }

    if !view.suggestions.is_empty() {
        let _ = writeln!(out, "Suggestions:");
        for (i, word) in view.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, word);
        }
    }

    out
}

pub fn render_history(history: &[String], style: &Style) -> String {
    if history.is_empty() {
        return format!("{}\n", style.dim("No recent searches"));
    }

    let mut out = String::from("Recent searches:\n");
    for (i, word) in history.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, word);
    }
    out
}
