use friendlychat_core::{now_millis, Message, PushIdGenerator};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::{Mutex, PoisonError};

/// Whether a `set` wrote a new key or replaced an existing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Created,
    Replaced,
}

/// Messages persisted in SQLite, keyed by push id.
pub struct MessageStore {
    pool: SqlitePool,
    ids: Mutex<PushIdGenerator>,
}

impl MessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ids: Mutex::new(PushIdGenerator::new()),
        }
    }

    fn next_key(&self) -> String {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        ids.next_id(now_millis())
    }

    /// Stores the message under a fresh key and returns it with the key as id.
    /// An id already present on the input is discarded.
    pub async fn push(&self, message: Message) -> Result<Message, sqlx::Error> {
        let message = message.with_id(self.next_key());
        sqlx::query(
            "INSERT INTO messages (message_id, text, name, photo_url, image_url) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id())
        .bind(message.text())
        .bind(message.name())
        .bind(message.photo_url())
        .bind(message.image_url())
        .execute(&self.pool)
        .await?;
        Ok(message)
    }

    /// Writes the message under `key`, creating or replacing it. The stored id is always `key`.
    ///
    /// Each statement commits on its own: a read followed by a write inside one
    /// deferred transaction fails with SQLITE_BUSY when two writers overlap.
    pub async fn set(&self, key: &str, message: Message) -> Result<(Message, SetOutcome), sqlx::Error> {
        let message = message.with_id(key);

        let inserted = sqlx::query(
            r#"INSERT INTO messages (message_id, text, name, photo_url, image_url) VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(message_id) DO NOTHING"#,
        )
        .bind(key)
        .bind(message.text())
        .bind(message.name())
        .bind(message.photo_url())
        .bind(message.image_url())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 1 {
            return Ok((message, SetOutcome::Created));
        }

        sqlx::query(
            "UPDATE messages SET text = ?, name = ?, photo_url = ?, image_url = ? WHERE message_id = ?",
        )
        .bind(message.text())
        .bind(message.name())
        .bind(message.photo_url())
        .bind(message.image_url())
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok((message, SetOutcome::Replaced))
    }

    pub async fn get(&self, key: &str) -> Result<Option<Message>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT message_id, text, name, photo_url, image_url FROM messages WHERE message_id = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(message_from_row).transpose()
    }

    /// Messages in push order. With `limit`, only the newest `limit`, still oldest first.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<Message>, sqlx::Error> {
        let rows = match limit {
            Some(limit) => {
                sqlx::query(
                    r#"SELECT message_id, text, name, photo_url, image_url FROM (
                           SELECT * FROM messages ORDER BY message_id DESC LIMIT ?
                       ) ORDER BY message_id ASC"#,
                )
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT message_id, text, name, photo_url, image_url FROM messages ORDER BY message_id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(message_from_row).collect()
    }
}

fn message_from_row(row: &SqliteRow) -> Result<Message, sqlx::Error> {
    let key: String = row.try_get("message_id")?;
    let message = Message::new(
        row.try_get("text")?,
        row.try_get::<String, _>("name")?,
        row.try_get("photo_url")?,
        row.try_get("image_url")?,
    );
    Ok(message.with_id(key))
}
