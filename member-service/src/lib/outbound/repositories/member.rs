use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Row;
use sqlx::Transaction;
use uuid::Uuid;

use crate::domain::member::models::Member;
use crate::domain::member::models::MemberId;
use crate::domain::member::models::Username;
use crate::domain::member::photos::Photo;
use crate::domain::member::photos::PhotoGallery;
use crate::domain::member::photos::PhotoId;
use crate::member::errors::MemberError;
use crate::member::ports::MemberRepository;

/// Postgres-backed member persistence.
///
/// A member row carries a `version` column; `update` matches on the loaded
/// version and bumps it, so a save racing another writer of the same member
/// fails with `Conflict` instead of interleaving. Photos are saved whole with
/// their member, preserving gallery order through a `position` column.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_photos(&self, member_id: Uuid) -> Result<Vec<Photo>, MemberError> {
        let rows = sqlx::query(
            r#"
            SELECT id, url, external_id, is_main
            FROM photos
            WHERE member_id = $1
            ORDER BY position
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(|row| photo_from_row(&row)).collect()
    }

    async fn hydrate(&self, row: PgRow) -> Result<Member, MemberError> {
        let id: Uuid = row.try_get("id").map_err(database_error)?;
        let username: String = row.try_get("username").map_err(database_error)?;
        let password_hash: Vec<u8> = row.try_get("password_hash").map_err(database_error)?;
        let password_salt: Vec<u8> = row.try_get("password_salt").map_err(database_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(database_error)?;
        let version: i64 = row.try_get("version").map_err(database_error)?;

        let photos = self.fetch_photos(id).await?;

        Ok(Member {
            id: MemberId(id),
            username: Username::new(username)?,
            password_hash,
            password_salt,
            photos: PhotoGallery::from_photos(photos),
            created_at,
            version,
        })
    }
}

const SELECT_MEMBER: &str = r#"
    SELECT id, username, password_hash, password_salt, created_at, version
    FROM members
"#;

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn create(&self, member: Member) -> Result<Member, MemberError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO members (id, username, password_hash, password_salt, created_at, version)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(member.id.0)
        .bind(member.username.as_str())
        .bind(member.password_hash.as_slice())
        .bind(member.password_salt.as_slice())
        .bind(member.created_at)
        .bind(member.version)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("members_username_key")
                {
                    return MemberError::UsernameTaken(member.username.as_str().to_string());
                }
            }
            database_error(e)
        })?;

        insert_photos(&mut tx, &member).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(member)
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, MemberError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_MEMBER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Member>, MemberError> {
        let row = sqlx::query(&format!("{} WHERE username = $1", SELECT_MEMBER))
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Member>, MemberError> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC", SELECT_MEMBER))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        let mut members = Vec::with_capacity(rows.len());
        for row in rows {
            members.push(self.hydrate(row).await?);
        }

        Ok(members)
    }

    async fn update(&self, member: Member) -> Result<Member, MemberError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE members
            SET username = $2, password_hash = $3, password_salt = $4, version = $5
            WHERE id = $1 AND version = $6
            "#,
        )
        .bind(member.id.0)
        .bind(member.username.as_str())
        .bind(member.password_hash.as_slice())
        .bind(member.password_salt.as_slice())
        .bind(member.version + 1)
        .bind(member.version)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        // Members are never deleted, so a missed match means the row moved on
        // since this member was loaded
        if result.rows_affected() == 0 {
            return Err(MemberError::Conflict(member.id.to_string()));
        }

        sqlx::query("DELETE FROM photos WHERE member_id = $1")
            .bind(member.id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        insert_photos(&mut tx, &member).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(Member {
            version: member.version + 1,
            ..member
        })
    }
}

async fn insert_photos(
    tx: &mut Transaction<'_, Postgres>,
    member: &Member,
) -> Result<(), MemberError> {
    for (position, photo) in member.photos.photos().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO photos (id, member_id, url, external_id, is_main, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(photo.id.0)
        .bind(member.id.0)
        .bind(photo.url.as_str())
        .bind(photo.external_id.as_deref())
        .bind(photo.is_main)
        .bind(position as i32)
        .execute(&mut **tx)
        .await
        .map_err(database_error)?;
    }

    Ok(())
}

fn photo_from_row(row: &PgRow) -> Result<Photo, MemberError> {
    Ok(Photo {
        id: PhotoId(row.try_get("id").map_err(database_error)?),
        url: row.try_get("url").map_err(database_error)?,
        external_id: row.try_get("external_id").map_err(database_error)?,
        is_main: row.try_get("is_main").map_err(database_error)?,
    })
}

fn database_error(e: sqlx::Error) -> MemberError {
    MemberError::Database(e.to_string())
}
