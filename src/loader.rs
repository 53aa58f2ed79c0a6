//! Catalog source readers.
//!
//! A catalog comes either from a CSV file with a header row (`title`,
//! `genres`, optionally `movieId`; other columns are ignored) or from a
//! table in a SQLite database. Both return rows in source order.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::error::CatalogError;
use crate::models::RawMovie;

/// Plain SQL identifier: letters, digits and underscores, not starting with a digit.
static TABLE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Columns that may carry the catalog's own integer id, in order of preference.
const ID_COLUMNS: [&str; 2] = ["movieId", "movie_id"];

/// Source format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Sqlite,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "db" | "sqlite" | "sqlite3" => Some(SourceFormat::Sqlite),
            _ => None,
        }
    }
}

/// Read a catalog source, dispatching on its extension.
/// `table` is only used for SQLite sources.
pub fn load_catalog(path: &Path, table: &str) -> Result<Vec<RawMovie>, CatalogError> {
    match SourceFormat::detect(path) {
        Some(SourceFormat::Csv) => load_csv(path),
        Some(SourceFormat::Sqlite) => load_sqlite(path, table),
        None => Err(CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Read rows from a CSV file with a header.
pub fn load_csv(path: &Path) -> Result<Vec<RawMovie>, CatalogError> {
    let csv_err = |source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader.headers().map_err(csv_err)?;
    if !headers.iter().any(|h| h == "title") {
        return Err(CatalogError::MissingColumn {
            path: path.to_path_buf(),
            column: "title".to_string(),
        });
    }

    reader
        .deserialize::<RawMovie>()
        .map(|row| row.map_err(csv_err))
        .collect()
}

/// Read `title` and `genres` from `table`, in rowid order.
pub fn load_sqlite(path: &Path, table: &str) -> Result<Vec<RawMovie>, CatalogError> {
    if !TABLE_NAME.is_match(table) {
        return Err(CatalogError::InvalidTable {
            name: table.to_string(),
        });
    }
    let sqlite_err = |source| CatalogError::Sqlite {
        path: path.to_path_buf(),
        source,
    };

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(sqlite_err)?;

    let columns = table_columns(&conn, table).map_err(sqlite_err)?;
    if !columns.iter().any(|c| c == "title") {
        return Err(CatalogError::MissingColumn {
            path: path.to_path_buf(),
            column: "title".to_string(),
        });
    }
    let id_column = ID_COLUMNS
        .into_iter()
        .find(|name| columns.iter().any(|c| c.as_str() == *name));
    let genres_expr = if columns.iter().any(|c| c == "genres") {
        "genres"
    } else {
        "NULL"
    };

    let sql = format!(
        "SELECT {}, title, {} FROM \"{}\" ORDER BY rowid",
        id_column.map_or("NULL".to_string(), |c| format!("\"{}\"", c)),
        genres_expr,
        table
    );

    let mut stmt = conn.prepare(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(RawMovie {
                movie_id: integer_id(row.get(0)?),
                title: row.get(1)?,
                genres: row.get(2)?,
            })
        })
        .map_err(sqlite_err)?;

    let movies = rows
        .map(|r| r.map_err(sqlite_err))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(movies)
}

/// Keep integer ids only; text, real or blob ids are treated as absent.
fn integer_id(value: Value) -> Option<i64> {
    match value {
        Value::Integer(id) => Some(id),
        _ => None,
    }
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}
