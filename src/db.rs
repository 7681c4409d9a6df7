// src/db.rs

use crate::error::{MindtickError, Result};
use crate::filter::Filter;
use crate::models::{Entry, Tag};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OpenFlags, Row};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the store file, looked up from the working directory upwards.
pub const STORE_FILE_NAME: &str = "store.mindtick";

/// UTC, second precision. Lexicographic order equals chronological order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset-carrying layout written by earlier mindtick releases.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Walks from `start` up to the filesystem root and returns the first store found.
pub fn locate_from(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(STORE_FILE_NAME);
        debug!(path = %candidate.display(), "checking for store");
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(MindtickError::NotFound(STORE_FILE_NAME.to_string()))
}

/// Finds the store for the current working directory.
pub fn locate() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    locate_from(&cwd)
}

/// Opens an existing store. Never creates the file.
pub fn open_connection(path: &Path) -> Result<Connection> {
    if !path.is_file() {
        return Err(MindtickError::NotFound(STORE_FILE_NAME.to_string()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    create_schema(&conn)?;
    normalize_timestamps(&conn)?;
    Ok(conn)
}

/// Creates a fresh store in `dir` and registers it in `dir/.gitignore` if one exists.
pub fn create_in(dir: &Path) -> Result<PathBuf> {
    let db_path = dir.join(STORE_FILE_NAME);
    if db_path.exists() {
        return Err(MindtickError::AlreadyExists(STORE_FILE_NAME.to_string()));
    }

    let conn = Connection::open(&db_path)?;
    create_schema(&conn)?;
    info!(path = %db_path.display(), "store created");

    ignore_in_git(dir)?;
    Ok(db_path)
}

fn ignore_in_git(dir: &Path) -> Result<()> {
    let gitignore = dir.join(".gitignore");
    let content = match fs::read_to_string(&gitignore) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if content.lines().any(|l| l.trim() == STORE_FILE_NAME) {
        return Ok(());
    }

    let mut file = OpenOptions::new().append(true).open(&gitignore)?;
    if !content.is_empty() && !content.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{}", STORE_FILE_NAME)?;
    debug!(path = %gitignore.display(), "store added to .gitignore");
    Ok(())
}

/// Deletes the store file at `path`.
pub fn remove(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(MindtickError::NotFound(STORE_FILE_NAME.to_string()));
    }
    fs::remove_file(path)?;
    info!(path = %path.display(), "store deleted");
    Ok(())
}

/// Creates the `messages` table if it is missing.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp DATETIME,
            msg TEXT,
            msgtype INT
        )",
        [],
    )?;
    Ok(())
}

/// Appends an entry stamped with the current time.
pub fn insert_entry(conn: &Connection, tag: Tag, text: &str) -> Result<Entry> {
    insert_entry_at(conn, tag, text, Local::now())
}

/// Appends an entry with an explicit timestamp, truncated to whole seconds.
pub fn insert_entry_at(
    conn: &Connection,
    tag: Tag,
    text: &str,
    timestamp: DateTime<Local>,
) -> Result<Entry> {
    let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
    conn.execute(
        "INSERT INTO messages (timestamp, msg, msgtype) VALUES (?1, ?2, ?3)",
        params![format_timestamp(timestamp), text, tag.code()],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, tag = tag.key(), "entry recorded");

    Ok(Entry {
        id,
        timestamp,
        tag,
        text: text.to_string(),
    })
}

/// Returns every entry matching `filter`, oldest first.
/// The range cutoff is computed from the clock on every call.
pub fn query_entries(conn: &Connection, filter: &Filter) -> Result<Vec<Entry>> {
    let cutoff = filter.range.cutoff(Local::now());
    fetch_entries(conn, filter.tag, cutoff)
}

/// Single predicate for all filter combinations; `None` disables that constraint.
pub fn fetch_entries(
    conn: &Connection,
    tag: Option<Tag>,
    cutoff: Option<DateTime<Local>>,
) -> Result<Vec<Entry>> {
    let tag_code = tag.map(Tag::code);
    let cutoff = cutoff.map(format_timestamp);
    debug!(?tag_code, ?cutoff, "querying messages");

    let mut stmt = conn.prepare(
        "SELECT id, timestamp, msg, msgtype FROM messages
         WHERE (?1 IS NULL OR msgtype = ?1)
           AND (?2 IS NULL OR timestamp >= ?2)
         ORDER BY timestamp ASC, id ASC",
    )?;
    let entries = stmt
        .query_map(params![tag_code, cutoff], row_to_entry)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(count = entries.len(), "messages fetched");
    Ok(entries)
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let raw_ts: String = row.get(1)?;
    let timestamp = parse_timestamp(&raw_ts).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
    })?;
    let code: i64 = row.get(3)?;
    let tag = Tag::from_code(code).ok_or(rusqlite::Error::IntegralValueOutOfRange(3, code))?;

    Ok(Entry {
        id: row.get(0)?,
        timestamp,
        tag,
        text: row.get(2)?,
    })
}

fn format_timestamp(ts: DateTime<Local>) -> String {
    ts.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts the canonical layout as well as RFC 3339 and the legacy offset layout.
fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Local>, chrono::ParseError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Ok(Utc.from_utc_datetime(&naive).with_timezone(&Local));
    }
    let dt = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, LEGACY_TIMESTAMP_FORMAT))?;
    let dt = dt.with_timezone(&Local);
    Ok(dt.with_nanosecond(0).unwrap_or(dt))
}

/// Rewrites timestamps stored in any other layout to canonical UTC text so
/// that `ORDER BY timestamp` and the range cutoff compare correctly.
/// Rows that cannot be parsed are left untouched.
pub fn normalize_timestamps(conn: &Connection) -> Result<usize> {
    let mut stmt = conn.prepare("SELECT id, timestamp FROM messages")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    drop(stmt);

    let tx = conn.unchecked_transaction()?;
    let mut rewritten = 0;
    for (id, raw) in rows {
        let Some(raw) = raw else { continue };
        let Ok(ts) = parse_timestamp(&raw) else {
            debug!(id, raw = %raw, "unparseable timestamp left as is");
            continue;
        };
        let canonical = format_timestamp(ts);
        if canonical != raw {
            tx.execute(
                "UPDATE messages SET timestamp = ?1 WHERE id = ?2",
                params![canonical, id],
            )?;
            rewritten += 1;
        }
    }
    tx.commit()?;

    if rewritten > 0 {
        info!(rewritten, "legacy timestamps normalized");
    }
    Ok(rewritten)
}
