//! Admin credential repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::auth::models::{AdminCredentials, AdminUser, AdminUserUuid, NewAdminUser};

const FIND_ADMIN_BY_EMAIL_SQL: &str = include_str!("sql/find_admin_by_email.sql");
const FIND_ADMIN_BY_UUID_SQL: &str = include_str!("sql/find_admin_by_uuid.sql");
const CREATE_ADMIN_SQL: &str = include_str!("sql/create_admin.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAdminUsersRepository {
    pool: PgPool,
}

impl PgAdminUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminCredentials>, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(FIND_ADMIN_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_admin_by_uuid(
        &self,
        admin: AdminUserUuid,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(FIND_ADMIN_BY_UUID_SQL)
            .bind(admin.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map(|record| record.map(|credentials| credentials.admin))
    }

    pub(crate) async fn create_admin(
        &self,
        admin: &NewAdminUser,
    ) -> Result<AdminUser, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(CREATE_ADMIN_SQL)
            .bind(admin.uuid.into_uuid())
            .bind(&admin.email)
            .bind(&admin.password_hash)
            .fetch_one(&self.pool)
            .await
            .map(|credentials| credentials.admin)
    }
}

impl<'r> FromRow<'r, PgRow> for AdminCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            admin: AdminUser {
                uuid: AdminUserUuid::from_uuid(row.try_get("uuid")?),
                email: row.try_get("email")?,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            },
            password_hash: row.try_get("password_hash")?,
        })
    }
}
