use chrono::{DateTime, Utc};
use colored::Colorize;
use droplinkapp::commands::stats::LinkStats;
use droplinkapp::commands::{CmdMessage, MessageLevel};
use droplinkapp::error::Result;
use droplinkapp::index::DisplayLink;
use droplinkapp::model::{Link, Settings};
use std::path::Path;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const URL_INDENT: &str = "      ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// Two lines per link: index, title and age, then the url and tags underneath.
pub(super) fn print_links(links: &[DisplayLink]) {
    if links.is_empty() {
        println!("No links found.");
        return;
    }

    for dl in links {
        let (title_line, detail_line) = link_lines(dl, Utc::now());
        println!("{}", title_line);
        println!("{}", detail_line);
    }
}

fn link_lines(dl: &DisplayLink, now: DateTime<Utc>) -> (String, String) {
    let idx_str = format!("{:>4}. ", dl.index);
    let time_ago = dl
        .link
        .created_at_parsed()
        .map(|at| format_time_ago(at, now))
        .unwrap_or_else(|| format!("{:>width$}", "", width = TIME_WIDTH));

    let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
    let title = truncate_to_width(&dl.link.title, available);
    let padding = available.saturating_sub(title.width());

    let title_line = format!(
        "{}{}{}{}",
        idx_str.yellow(),
        title.bold(),
        " ".repeat(padding),
        time_ago.dimmed()
    );

    let tags = format_tags(&dl.link.tags);
    let url_room = LINE_WIDTH
        .saturating_sub(URL_INDENT.width() + tags.width() + 1)
        .max(20);
    let url = truncate_to_width(&dl.link.url, url_room);
    let detail_line = if tags.is_empty() {
        format!("{}{}", URL_INDENT, url.cyan())
    } else {
        format!("{}{} {}", URL_INDENT, url.cyan(), tags.magenta())
    };

    (title_line, detail_line)
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Machine output: the plain link objects, same shape as an export.
pub(super) fn print_links_json(links: &[DisplayLink]) -> Result<()> {
    let plain: Vec<&Link> = links.iter().map(|dl| &dl.link).collect();
    println!("{}", serde_json::to_string_pretty(&plain)?);
    Ok(())
}

pub(super) fn print_stats(stats: &LinkStats) {
    println!("{:<14}{}", "Total links", stats.total.to_string().bold());
    println!("{:<14}{}", "Unique tags", stats.unique_tags.to_string().bold());
    let latest = stats.latest_added.as_deref().unwrap_or("-");
    println!("{:<14}{}", "Latest added", latest.dimmed());
}

pub(super) fn print_tags(tags: &[String]) {
    if tags.is_empty() {
        println!("No tags in use.");
        return;
    }
    for tag in tags {
        println!("{}", tag.magenta());
    }
}

pub(super) fn print_settings(settings: &Settings) {
    for (key, value) in settings.entries() {
        println!("{} = {}", key, value);
    }
}

pub(super) fn print_path(path: &Path) {
    println!("{}", path.display().to_string().dimmed());
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Singular units get an extra space so the "ago" column lines up.
    let time_str = ["second", "minute", "hour", "day", "week", "month", "year"]
        .iter()
        .fold(time_str, |s, unit| {
            s.replace(&format!("{} ago", unit), &format!("{}  ago", unit))
        });

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
