//! Categories

use crate::errors::{from_rusqlite, Result};
use crate::live::LiveQuery;
use crate::store::{Collection, LocalStore};
use gametalk_core::catalogue::default_categories;
use gametalk_core::log_op_end;
use gametalk_core::log_op_start;
use gametalk_core::model::Category;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::time::Instant;

const CATEGORY_COLUMNS: &str = "id, name, description, icon, topics_count";

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon: row.get(3)?,
        topics_count: row.get(4)?,
    })
}

/// All categories, name ascending
pub fn list(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC, id ASC"
        ))
        .map_err(from_rusqlite)?;
    let categories = stmt
        .query_map([], category_from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(categories)
}

pub fn find_by_id(conn: &Connection, category_id: i64) -> Result<Option<Category>> {
    conn.query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
        [category_id],
        category_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
        .map_err(from_rusqlite)
}

/// Insert, or overwrite the row holding the same id
pub fn upsert(conn: &Connection, category: &Category) -> Result<()> {
    conn.execute(
        "INSERT INTO categories (id, name, description, icon, topics_count)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            icon = excluded.icon,
            topics_count = excluded.topics_count",
        params![
            category.id,
            category.name,
            category.description,
            category.icon,
            category.topics_count,
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

impl LocalStore {
    /// Live view of all categories, name ascending
    pub fn observe_categories(&self) -> LiveQuery<Category> {
        LiveQuery::new(self, Collection::Categories, "observe_categories", list)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.with_conn("list_categories", |conn| list(conn))
    }

    pub fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        self.with_conn("get_category", |conn| find_by_id(conn, category_id))
    }

    pub fn insert_category(&self, category: &Category) -> Result<()> {
        self.with_conn("insert_category", |conn| upsert(conn, category))?;
        self.notify(Collection::Categories);
        Ok(())
    }

    /// Bulk insert-or-replace in one transaction
    pub fn insert_categories(&self, categories: &[Category]) -> Result<()> {
        self.with_conn("insert_categories", |conn| {
            let tx = conn.transaction().map_err(from_rusqlite)?;
            for category in categories {
                upsert(&tx, category)?;
            }
            tx.commit().map_err(from_rusqlite)
        })?;
        self.notify(Collection::Categories);
        Ok(())
    }

    /// Delete a category together with its topics. Returns whether it existed.
    pub fn delete_category(&self, category_id: i64) -> Result<bool> {
        let deleted = self.with_conn("delete_category", |conn| {
            conn.execute("DELETE FROM categories WHERE id = ?1", [category_id])
                .map_err(from_rusqlite)
        })?;
        if deleted > 0 {
            self.notify(Collection::Categories);
            self.notify(Collection::Topics);
        }
        Ok(deleted > 0)
    }

    /// Returns the number of categories removed
    pub fn delete_all_categories(&self) -> Result<usize> {
        let deleted = self.with_conn("delete_all_categories", |conn| {
            conn.execute("DELETE FROM categories", [])
                .map_err(from_rusqlite)
        })?;
        if deleted > 0 {
            self.notify(Collection::Categories);
            self.notify(Collection::Topics);
        }
        Ok(deleted)
    }

    pub fn count_categories(&self) -> Result<i64> {
        self.with_conn("count_categories", |conn| count(conn))
    }

    /// Seed the default catalogue when, and only when, there are no
    /// categories. Returns whether this call seeded.
    ///
    /// The emptiness check and the inserts share one IMMEDIATE transaction,
    /// so concurrent callers on any connection to the same file seed at most
    /// once between them.
    pub fn seed_default_categories(&self) -> Result<bool> {
        let op = "seed_default_categories";
        let start = Instant::now();
        log_op_start!(op);

        let seeded = self.with_conn(op, |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(from_rusqlite)?;
            if count(&tx)? > 0 {
                return Ok(false);
            }
            for category in default_categories() {
                upsert(&tx, &category)?;
            }
            tx.commit().map_err(from_rusqlite)?;
            Ok(true)
        })?;

        if seeded {
            self.notify(Collection::Categories);
        }
        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            seeded = seeded
        );
        Ok(seeded)
    }
}
