// src/commands.rs

use crate::db;
use crate::error::{MindtickError, Result};
use crate::filter;
use crate::models::{Range, Tag};
use crate::render::Renderer;
use crate::settings::Settings;
use chrono::Local;
use std::env;
use std::io::{self, Write};
use tracing::debug;

/// Handles `new`
pub fn handle_new() -> Result<()> {
    let cwd = env::current_dir()?;
    let path = db::create_in(&cwd)?;
    println!("✓ {} initialized", path.display());
    Ok(())
}

/// Handles `delete`
pub fn handle_delete(yes: bool) -> Result<()> {
    let path = db::locate()?;

    if !yes {
        print!("Delete {} and all of its messages? (y/N): ", path.display());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    db::remove(&path)?;
    println!("✓ {} deleted", path.display());
    Ok(())
}

/// Handles `view [FILTER]...`
pub fn handle_view(filters: &[String], renderer: &Renderer) -> Result<()> {
    let filter = filter::compose(filters)?;
    debug!(?filter, "filter composed");

    let path = db::locate()?;
    let conn = db::open_connection(&path)?;
    let entries = db::query_entries(&conn, &filter)?;

    if entries.is_empty() {
        println!("No messages found.");
        return Ok(());
    }
    for line in renderer.render(&entries) {
        println!("{}", line);
    }
    Ok(())
}

/// Builds the stored text from the words after the tag.
///
/// The first word must start with `prefix`; the prefix is stripped once and
/// the words are joined with single spaces.
pub fn message_text(words: &[String], prefix: char) -> Result<String> {
    let Some(first) = words.first() else {
        return Err(MindtickError::MalformedMessage(format!(
            "a message is required, e.g. `mindtick win {}shipped it`",
            prefix
        )));
    };
    let Some(stripped) = first.strip_prefix(prefix) else {
        return Err(MindtickError::MalformedMessage(format!(
            "messages must start with `{}`, e.g. `mindtick win {}{}`",
            prefix, prefix, first
        )));
    };

    let text = std::iter::once(stripped)
        .chain(words[1..].iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    if text.trim().is_empty() {
        return Err(MindtickError::MalformedMessage("message is empty".to_string()));
    }
    Ok(text)
}

/// Handles `win|note|fix|task|url|work -<message>`
pub fn handle_add(tag: Tag, words: &[String], settings: &Settings, renderer: &Renderer) -> Result<()> {
    let text = message_text(words, settings.message_prefix)?;

    let path = db::locate()?;
    let conn = db::open_connection(&path)?;
    let entry = db::insert_entry(&conn, tag, &text)?;

    println!("{}", renderer.entry_line(&entry, false));
    Ok(())
}

/// Handles `tags`
pub fn handle_tags(renderer: &Renderer) -> Result<()> {
    for tag in Tag::ALL {
        println!("{} {}", renderer.tag_glyph(tag, false), tag.key());
    }
    Ok(())
}

/// Handles `ranges`
pub fn handle_ranges() -> Result<()> {
    let now = Local::now();
    for range in Range::ALL {
        match range.cutoff(now) {
            Some(c) => println!("{:>10}  since {}", range.key(), c.format("%Y-%m-%d %H:%M")),
            None => println!("{:>10}", range.key()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn prefix_is_stripped_and_words_joined() {
        let text = message_text(&words(&["-deployed", "new", "feature"]), '-').unwrap();
        assert_eq!(text, "deployed new feature");
    }

    #[test]
    fn only_the_first_prefix_is_stripped() {
        let text = message_text(&words(&["--dry-run", "-works"]), '-').unwrap();
        assert_eq!(text, "-dry-run -works");
    }

    #[test]
    fn custom_prefix() {
        assert_eq!(message_text(&words(&["+done"]), '+').unwrap(), "done");
        assert!(matches!(
            message_text(&words(&["-done"]), '+'),
            Err(MindtickError::MalformedMessage(_))
        ));
    }

    #[test]
    fn missing_prefix_is_malformed() {
        assert!(matches!(
            message_text(&words(&["deployed", "it"]), '-'),
            Err(MindtickError::MalformedMessage(_))
        ));
    }

    #[test]
    fn empty_messages_are_malformed() {
        for ws in [vec![], words(&["-"]), words(&["-", " "])] {
            assert!(matches!(
                message_text(&ws, '-'),
                Err(MindtickError::MalformedMessage(_))
            ));
        }
    }
}
