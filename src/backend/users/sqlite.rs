/**
 * SQLite User Store
 *
 * Persists users in a single `users` table through a sqlx pool. The table is
 * created on connect. Ids are stored as hyphenated UUID text; `seq` keeps
 * creation order for listing.
 */

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::backend::users::store::{NewUser, StoreError, UserChanges, UserStore};
use crate::shared::User;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        seq       INTEGER PRIMARY KEY AUTOINCREMENT,
        id        TEXT NOT NULL UNIQUE,
        username  TEXT NOT NULL UNIQUE,
        password  TEXT NOT NULL,
        firstname TEXT NOT NULL,
        lastname  TEXT NOT NULL
    )
"#;

/// Row as read from the `users` table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password: String,
    firstname: String,
    lastname: String,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|_| StoreError::CorruptRecord(row.id.clone()))?;
        Ok(User {
            id,
            username: row.username,
            password: row.password,
            firstname: row.firstname,
            lastname: row.lastname,
        })
    }
}

/// User store backed by SQLite
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

/// Open a pool for `database_url`, creating the database file if needed
///
/// In-memory databases (`sqlite::memory:`) live only as long as their
/// connection, so they get a single connection that is never recycled.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    Ok(pool_options.connect_with(options).await?)
}

impl SqliteUserStore {
    /// Connect to `database_url` and make sure the schema exists
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = connect_pool(database_url).await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

/// Map an insert/update failure, recognising unique-constraint violations
fn map_write_error(err: sqlx::Error, username: Option<&str>) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateUsername(username.unwrap_or_default().to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, firstname, lastname FROM users ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, firstname, lastname FROM users WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, firstname, lastname FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password, firstname, lastname)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, username, password, firstname, lastname
            "#,
        )
        .bind(id.to_string())
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(&user.username)))?;

        User::try_from(row)
    }

    async fn edit(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username  = COALESCE(?1, username),
                firstname = COALESCE(?2, firstname),
                lastname  = COALESCE(?3, lastname)
            WHERE id = ?4
            RETURNING id, username, password, firstname, lastname
            "#,
        )
        .bind(changes.username.as_deref())
        .bind(changes.firstname.as_deref())
        .bind(changes.lastname.as_deref())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, changes.username.as_deref()))?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
