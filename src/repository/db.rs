//! Database Connection and Setup
//!
//! Opens the SQLite file backing the item collection and creates its schema.

use rusqlite::Connection;
use std::path::Path;

/// Open (or create) the database at `db_path` and run migrations
pub fn open_database(db_path: &Path) -> Result<Connection, String> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }

    let conn = Connection::open(db_path)
        .map_err(|e| format!("Failed to open db {}: {}", db_path.display(), e))?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// In-memory database, used by tests
pub fn open_in_memory() -> Result<Connection, String> {
    let conn = Connection::open_in_memory().map_err(|e| format!("Failed to open db: {}", e))?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    // One row per document; priority_rank and name are copies of document
    // fields kept for ordering
    conn.execute(
        "CREATE TABLE IF NOT EXISTS shopping_items (
            id TEXT PRIMARY KEY,
            priority_rank INTEGER NOT NULL,
            name TEXT NOT NULL,
            document TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    if !column_exists(conn, "shopping_items", "updated_at") {
        conn.execute(
            "ALTER TABLE shopping_items ADD COLUMN updated_at INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| format!("Failed to add updated_at: {}", e))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_shopping_items_order ON shopping_items(priority_rank, name)",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
