//! Boxed text panel used by every view.

/// A titled panel of text lines.
#[derive(Debug, Clone, Default)]
pub struct Card {
    title: Option<String>,
    lines: Vec<String>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            lines: Vec::new(),
        }
    }

    /// Append text; embedded newlines become separate lines.
    pub fn line(mut self, text: impl AsRef<str>) -> Self {
        self.push(text);
        self
    }

    pub fn push(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.extend(text.lines().map(str::to_string));
        }
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.title {
            Some(title) => out.push_str(&format!("╭─ {}\n", title)),
            None => out.push_str("╭─\n"),
        }
        for line in &self.lines {
            if line.is_empty() {
                out.push_str("│\n");
            } else {
                out.push_str("│ ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str("╰─\n");
        out
    }
}

/// At most `max` lines of `text`, with an ellipsis line when cut.
pub fn clamp_lines(text: &str, max: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= max {
        return lines.join("\n");
    }
    let mut kept = lines[..max].join("\n");
    kept.push_str(" …");
    kept
}

/// A horizontal bar `width` cells wide, filled to `count / total`.
pub fn bar(count: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        ((count as f64 / total as f64) * width as f64).round() as usize
    };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_render() {
        let card = Card::titled("Sources").line("one\ntwo").blank().line("three");
        assert_eq!(
            card.render(),
            "╭─ Sources\n│ one\n│ two\n│\n│ three\n╰─\n"
        );
    }

    #[test]
    fn test_clamp_lines() {
        assert_eq!(clamp_lines("a\nb", 3), "a\nb");
        assert_eq!(clamp_lines("a\nb\nc\nd", 3), "a\nb\nc …");
        assert_eq!(clamp_lines("", 1), "");
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(1, 2, 10), "█████░░░░░");
        assert_eq!(bar(0, 0, 4), "░░░░");
        assert_eq!(bar(3, 3, 4), "████");
    }
}
