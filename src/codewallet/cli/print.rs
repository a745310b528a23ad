use chrono::{DateTime, Utc};
use codewallet::api::{CmdMessage, MessageLevel};
use codewallet::index::DisplayFragment;
use codewallet::preferences::Theme;
use codewallet::tags::TagSummary;
use colored::{ColoredString, Colorize};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_full_fragments(fragments: &[DisplayFragment]) {
    for (i, df) in fragments.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let f = &df.fragment;
        println!("{} {}", df.index.to_string().yellow(), f.title.bold());
        if !f.tags.is_empty() {
            let tags: Vec<String> = f.tags.iter().map(|t| format!("#{}", t)).collect();
            println!("{}", tags.join(" ").cyan());
        }
        println!(
            "{}",
            format!(
                "{} characters, {} lines, updated {}",
                f.char_count(),
                f.line_count(),
                format_time_ago(f.updated_at).trim_start()
            )
            .dimmed()
        );
        println!("--------------------------------");
        println!("{}", f.body);
    }
}

pub(super) fn print_fragments(fragments: &[DisplayFragment]) {
    if fragments.is_empty() {
        println!("No fragments found.");
        return;
    }

    for df in fragments {
        let f = &df.fragment;
        let idx_str = format!("{:>4}. ", df.index);

        let tags = if f.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", f.tags.join(", "))
        };
        let preview: String = f
            .body
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let line = format!("{}{} {}", f.title, tags, preview);

        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
        let shown = truncate_to_width(&line, available);
        let padding = available.saturating_sub(shown.width());

        println!(
            "{}{}{}{}",
            idx_str,
            shown,
            " ".repeat(padding),
            format_time_ago(f.created_at).dimmed()
        );
    }
}

pub(super) fn print_tags(tags: &[TagSummary]) {
    let name_width = tags.iter().map(|s| s.tag.name.width()).max().unwrap_or(0);
    for summary in tags {
        let name = &summary.tag.name;
        let pad = " ".repeat(name_width.saturating_sub(name.width()));
        println!(
            "{} {}{}  {}  {}",
            swatch(&summary.tag.color),
            name.bold(),
            pad,
            summary.tag.color.dimmed(),
            format!("{} fragment(s)", summary.usage).dimmed()
        );
    }
}

pub(super) fn print_theme(theme: Theme) {
    match theme {
        Theme::Dark => println!("Theme: {}", "dark".bold()),
        Theme::Light => println!("Theme: {}", "light".bold()),
    }
}

/// A colored block for a "#rrggbb" color; plain block if it does not parse.
fn swatch(color: &str) -> ColoredString {
    match parse_hex_color(color) {
        Some((r, g, b)) => "■".truecolor(r, g, b),
        None => "■".normal(),
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_wide_text() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        // wide chars count double
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#6c757d"), Some((0x6c, 0x75, 0x7d)));
        assert_eq!(parse_hex_color("6c757d"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Utc::now());
        assert_eq!(s.width(), TIME_WIDTH.max(s.trim_start().width()));
    }
}
