//! Topics
//!
//! Lists are ordered by `last_activity` descending, except the per-author
//! list which follows `created_at` descending. Ties break on id descending
//! so snapshots are stable.

use crate::errors::{from_rusqlite, Result};
use crate::live::LiveQuery;
use crate::repo::{categories, users};
use crate::store::{Collection, LocalStore};
use gametalk_core::errors::ForumError;
use gametalk_core::model::Topic;
use gametalk_core::{log_op_end, log_op_start};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::time::Instant;

const TOPIC_COLUMNS: &str = "id, category_id, user_id, title, description, created_at, \
                             replies_count, views_count, last_activity";

fn topic_from_row(row: &Row<'_>) -> rusqlite::Result<Topic> {
    Ok(Topic {
        id: row.get(0)?,
        category_id: row.get(1)?,
        user_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
        replies_count: row.get(6)?,
        views_count: row.get(7)?,
        last_activity: row.get(8)?,
    })
}

fn query_topics<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Topic>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let topics = stmt
        .query_map(params, topic_from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(topics)
}

pub fn list(conn: &Connection) -> Result<Vec<Topic>> {
    query_topics(
        conn,
        &format!("SELECT {TOPIC_COLUMNS} FROM topics ORDER BY last_activity DESC, id DESC"),
        params![],
    )
}

pub fn list_by_category(conn: &Connection, category_id: i64) -> Result<Vec<Topic>> {
    query_topics(
        conn,
        &format!(
            "SELECT {TOPIC_COLUMNS} FROM topics WHERE category_id = ?1 \
             ORDER BY last_activity DESC, id DESC"
        ),
        [category_id],
    )
}

pub fn list_by_user(conn: &Connection, user_id: i64) -> Result<Vec<Topic>> {
    query_topics(
        conn,
        &format!(
            "SELECT {TOPIC_COLUMNS} FROM topics WHERE user_id = ?1 \
             ORDER BY created_at DESC, id DESC"
        ),
        [user_id],
    )
}

pub fn find_by_id(conn: &Connection, topic_id: i64) -> Result<Option<Topic>> {
    conn.query_row(
        &format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE id = ?1"),
        [topic_id],
        topic_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

/// Insert, or overwrite the row holding the same id
pub fn upsert(conn: &Connection, topic: &Topic) -> Result<()> {
    conn.execute(
        "INSERT INTO topics (id, category_id, user_id, title, description, created_at,
                             replies_count, views_count, last_activity)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET
            category_id = excluded.category_id,
            user_id = excluded.user_id,
            title = excluded.title,
            description = excluded.description,
            created_at = excluded.created_at,
            replies_count = excluded.replies_count,
            views_count = excluded.views_count,
            last_activity = excluded.last_activity",
        params![
            topic.id,
            topic.category_id,
            topic.user_id,
            topic.title,
            topic.description,
            topic.created_at,
            topic.replies_count,
            topic.views_count,
            topic.last_activity,
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

/// Insert a locally authored topic and let SQLite assign its id
fn insert_new(conn: &Connection, topic: &Topic) -> Result<i64> {
    if categories::find_by_id(conn, topic.category_id)?.is_none() {
        return Err(ForumError::CategoryNotFound {
            category_id: topic.category_id,
        }
        .into());
    }
    if users::find_by_id(conn, topic.user_id)?.is_none() {
        return Err(ForumError::UserNotFound {
            user_id: topic.user_id,
        }
        .into());
    }

    conn.execute(
        "INSERT INTO topics (category_id, user_id, title, description, created_at,
                             replies_count, views_count, last_activity)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            topic.category_id,
            topic.user_id,
            topic.title,
            topic.description,
            topic.created_at,
            topic.replies_count,
            topic.views_count,
            topic.last_activity,
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(conn.last_insert_rowid())
}

impl LocalStore {
    /// Live view of every topic, most recent activity first
    pub fn observe_topics(&self) -> LiveQuery<Topic> {
        LiveQuery::new(self, Collection::Topics, "observe_topics", list)
    }

    pub fn observe_topics_by_category(&self, category_id: i64) -> LiveQuery<Topic> {
        LiveQuery::new(
            self,
            Collection::Topics,
            "observe_topics_by_category",
            move |conn| list_by_category(conn, category_id),
        )
    }

    /// Live view of one author's topics, newest first
    pub fn observe_topics_by_user(&self, user_id: i64) -> LiveQuery<Topic> {
        LiveQuery::new(
            self,
            Collection::Topics,
            "observe_topics_by_user",
            move |conn| list_by_user(conn, user_id),
        )
    }

    /// One-shot snapshot in `observe_topics` order
    pub fn list_topics(&self) -> Result<Vec<Topic>> {
        self.with_conn("list_topics", |conn| list(conn))
    }

    pub fn get_topic(&self, topic_id: i64) -> Result<Option<Topic>> {
        self.with_conn("get_topic", |conn| find_by_id(conn, topic_id))
    }

    /// Insert a topic, replacing any row with the same id, and return its id
    ///
    /// A topic with id 0 is locally authored: the store assigns the id and
    /// requires its category and author to exist.
    ///
    /// # Errors
    ///
    /// `CategoryNotFound` / `UserNotFound` for a locally authored topic with
    /// a missing parent.
    pub fn insert_topic(&self, topic: &Topic) -> Result<i64> {
        let id = self.with_conn("insert_topic", |conn| {
            if topic.id == 0 {
                insert_new(conn, topic)
            } else {
                upsert(conn, topic).map(|()| topic.id)
            }
        })?;
        self.notify(Collection::Topics);
        Ok(id)
    }

    /// Overwrite every column of an existing topic
    ///
    /// # Errors
    ///
    /// `TopicNotFound` when no row has `topic.id`.
    pub fn update_topic(&self, topic: &Topic) -> Result<()> {
        self.with_conn("update_topic", |conn| {
            let changed = conn
                .execute(
                    "UPDATE topics SET category_id = ?2, user_id = ?3, title = ?4,
                        description = ?5, created_at = ?6, replies_count = ?7,
                        views_count = ?8, last_activity = ?9
                     WHERE id = ?1",
                    params![
                        topic.id,
                        topic.category_id,
                        topic.user_id,
                        topic.title,
                        topic.description,
                        topic.created_at,
                        topic.replies_count,
                        topic.views_count,
                        topic.last_activity,
                    ],
                )
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ForumError::TopicNotFound { topic_id: topic.id }.into());
            }
            Ok(())
        })?;
        self.notify(Collection::Topics);
        Ok(())
    }

    /// Returns whether the topic existed
    pub fn delete_topic(&self, topic_id: i64) -> Result<bool> {
        let deleted = self.with_conn("delete_topic", |conn| {
            conn.execute("DELETE FROM topics WHERE id = ?1", [topic_id])
                .map_err(from_rusqlite)
        })?;
        if deleted > 0 {
            self.notify(Collection::Topics);
        }
        Ok(deleted > 0)
    }

    pub fn count_topics_by_category(&self, category_id: i64) -> Result<i64> {
        self.with_conn("count_topics_by_category", |conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM topics WHERE category_id = ?1",
                [category_id],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)
        })
    }

    /// Replace the whole topic collection with `topics` and return the
    /// collection as stored, in list order
    ///
    /// Clear, bulk insert and read-back commit as one transaction: no reader
    /// on any connection observes the collection empty in between, and on
    /// failure the previous rows stay. Repeated ids in `topics` collapse to
    /// the last occurrence.
    pub fn replace_topics(&self, topics: &[Topic]) -> Result<Vec<Topic>> {
        let op = "replace_topics";
        let start = Instant::now();
        log_op_start!(op, item_count = topics.len() as u64);

        let stored = self.with_conn(op, |conn| {
            let tx = conn.transaction().map_err(from_rusqlite)?;
            tx.execute("DELETE FROM topics", []).map_err(from_rusqlite)?;
            for topic in topics {
                upsert(&tx, topic)?;
            }
            let stored = list(&tx)?;
            tx.commit().map_err(from_rusqlite)?;
            Ok(stored)
        })?;

        self.notify(Collection::Topics);
        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            item_count = stored.len() as u64
        );
        Ok(stored)
    }

    /// Count one view: `views_count + 1` and `last_activity = now`, applied
    /// as a single UPDATE so concurrent views never lose an increment.
    /// Returns the updated row.
    ///
    /// # Errors
    ///
    /// `TopicNotFound` when no row has `topic_id`.
    pub fn record_topic_view(&self, topic_id: i64, now: i64) -> Result<Topic> {
        let topic = self.with_conn("record_topic_view", |conn| {
            let changed = conn
                .execute(
                    "UPDATE topics SET views_count = views_count + 1, last_activity = ?2
                     WHERE id = ?1",
                    params![topic_id, now],
                )
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ForumError::TopicNotFound { topic_id }.into());
            }
            find_by_id(conn, topic_id)?.ok_or_else(|| ForumError::TopicNotFound { topic_id }.into())
        })?;
        self.notify(Collection::Topics);
        Ok(topic)
    }
}
