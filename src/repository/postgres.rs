use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    member::Member, member_email::MemberEmail, member_name::MemberName,
    member_phone_number::MemberPhoneNumber,
};
use crate::repository::{MemberRepository, RepositoryError};

const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresMemberRepository {
    db_pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    #[tracing::instrument(name = "Select a member by id", skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query(
            r#"
            SELECT id, name, email, phone_number, active, created_at, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .try_map(member_from_row)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(member)
    }

    #[tracing::instrument(name = "Select a member by email", skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query(
            r#"
            SELECT id, name, email, phone_number, active, created_at, updated_at
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .try_map(member_from_row)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(member)
    }

    #[tracing::instrument(name = "Select all members ordered by name", skip(self))]
    async fn find_all_sorted_by_name(&self) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query(
            r#"
            SELECT id, name, email, phone_number, active, created_at, updated_at
            FROM members
            ORDER BY name ASC
            "#,
        )
        .try_map(member_from_row)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(members)
    }

    #[tracing::instrument(
        name = "Insert a new member into the database",
        skip(self, member),
        fields(member_id = %member.id)
    )]
    async fn insert(&self, member: &Member) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO members (id, name, email, phone_number, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(member.id)
        .bind(member.name.as_ref())
        .bind(member.email.as_ref())
        .bind(member.phone_number.as_ref())
        .bind(member.active)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.db_pool)
        .await
        .map_err(|err| map_write_error(err, member))?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Update a member in the database",
        skip(self, member),
        fields(member_id = %member.id)
    )]
    async fn update(&self, member: &Member) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET name = $2, email = $3, phone_number = $4, active = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(member.id)
        .bind(member.name.as_ref())
        .bind(member.email.as_ref())
        .bind(member.phone_number.as_ref())
        .bind(member.active)
        .bind(member.updated_at)
        .execute(&self.db_pool)
        .await
        .map_err(|err| map_write_error(err, member))?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Delete a member from the database", skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Check if a member email exists", skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.db_pool)
                .await?;

        Ok(exists)
    }
}

fn member_from_row(row: PgRow) -> Result<Member, sqlx::Error> {
    // Rows are written from validated members, a failure here means the table was edited by hand
    let decode_error = |err: String| sqlx::Error::Decode(err.into());

    Ok(Member {
        id: row.try_get("id")?,
        name: MemberName::parse(row.try_get("name")?).map_err(decode_error)?,
        email: MemberEmail::parse(row.try_get("email")?).map_err(decode_error)?,
        phone_number: MemberPhoneNumber::parse(row.try_get("phone_number")?)
            .map_err(decode_error)?,
        active: row.try_get("active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// The unique index on `email` is the final arbiter for concurrent writers.
fn map_write_error(err: sqlx::Error, member: &Member) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return RepositoryError::DuplicateEmail(String::from(member.email.as_ref()));
        }
    }

    RepositoryError::Database(err)
}
