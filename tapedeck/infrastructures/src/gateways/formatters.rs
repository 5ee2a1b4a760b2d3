use ::unicode_width::UnicodeWidthChar as _;
use ::unicode_width::UnicodeWidthStr as _;
use ::use_cases::gateways::TextFormatter;
use ::use_cases::models::descriptors::FormattedText;

/// Greedy word wrap by display width. Words wider than a line are split; a `max_len` of 0 leaves
/// lines as they are.
pub struct WrappingTextFormatter;

impl TextFormatter for WrappingTextFormatter {
    fn format(&self, text: &str, max_len: usize) -> FormattedText {
        let lines: Vec<String> = text
            .lines()
            .flat_map(|line| match max_len {
                0 => vec![line.trim_end().to_owned()],
                _ => wrap_line(line, max_len),
            })
            .collect();

        let short = lines.iter().find(|line| !line.trim().is_empty()).cloned().unwrap_or_default();

        FormattedText {
            full: lines.join("\n"),
            short,
        }
    }
}

fn wrap_line(line: &str, max_len: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let separator = usize::from(!current.is_empty());

        if current.width() + separator + word.width() <= max_len {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(::std::mem::take(&mut current));
        }

        if word.width() <= max_len {
            current.push_str(word);
            continue;
        }

        for ch in word.chars() {
            if current.width() + ch.width().unwrap_or(0) > max_len && !current.is_empty() {
                lines.push(::std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
