//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, ExperienceAward, NewUser, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ExperienceAwardRow, NewUserRow, UserRow, collect_rows};
use super::pool::{DbPool, PoolError};
use super::schema::{experience_awards, users};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from(row).map_err(UserPersistenceError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            email: user.email.as_str(),
            name: user.name.as_str(),
            nickname: user.nickname.as_str(),
            student_no: user.student_no.as_str(),
            department: user.department.as_str(),
            created_at,
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, EMAIL_UNIQUE_CONSTRAINT) {
                    UserPersistenceError::duplicate_email(user.email.as_str())
                } else {
                    map_diesel_error(err)
                }
            })?;
        to_user(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn list_awards(
        &self,
        beneficiary_id: UserId,
    ) -> Result<Vec<ExperienceAward>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ExperienceAwardRow> = experience_awards::table
            .filter(experience_awards::beneficiary_id.eq(beneficiary_id.get()))
            .order_by(experience_awards::id)
            .select(ExperienceAwardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows).map_err(UserPersistenceError::query)
    }
}
