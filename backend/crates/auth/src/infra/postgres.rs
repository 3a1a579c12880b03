//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::entity::{
    auth::Auth, auth_session::AuthSession, user::User, user_profile::UserProfile,
};
use crate::domain::repository::{
    AuthRepository, AuthSessionRepository, AuthUnitOfWork, UserProfileRepository,
    UserRepository,
};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_status::UserStatus, website::Website,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The unique index on `user_name_canonical` backs up the existence check
/// done before insert, which two concurrent registrations can both pass.
fn user_insert_error(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::UserNameTaken,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Inserts shared by the repositories and the account unit of work
// ============================================================================

async fn insert_user<'e, E: PgExecutor<'e>>(executor: E, user: &User) -> AuthResult<()> {
    sqlx::query(
        r#"
        INSERT INTO users (
            user_id,
            user_name,
            user_name_canonical,
            email,
            user_status,
            last_login_at,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(user.user_id.as_uuid())
    .bind(user.user_name.original())
    .bind(user.user_name.canonical())
    .bind(user.email.as_ref().map(|e| e.as_str()))
    .bind(user.user_status.id())
    .bind(user.last_login_at)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(executor)
    .await
    .map_err(user_insert_error)?;

    Ok(())
}

async fn insert_auth<'e, E: PgExecutor<'e>>(executor: E, auth: &Auth) -> AuthResult<()> {
    sqlx::query(
        r#"
        INSERT INTO auth_credentials (
            user_id,
            password_hash,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(auth.user_id.as_uuid())
    .bind(auth.password_hash.as_phc_string())
    .bind(auth.created_at)
    .bind(auth.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

async fn insert_profile<'e, E: PgExecutor<'e>>(
    executor: E,
    profile: &UserProfile,
) -> AuthResult<()> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (
            user_id,
            website,
            picture,
            created_at
        ) VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(profile.user_id.as_uuid())
    .bind(profile.website.as_ref().map(|w| w.as_str()))
    .bind(&profile.picture)
    .bind(profile.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        insert_user(&self.pool, user).await
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                user_status,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                user_status,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                user_status = $3,
                last_login_at = $4,
                updated_at = $5
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_ref().map(|e| e.as_str()))
        .bind(user.user_status.id())
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Auth Repository Implementation
// ============================================================================

impl AuthRepository for PgAuthRepository {
    async fn create(&self, auth: &Auth) -> AuthResult<()> {
        insert_auth(&self.pool, auth).await
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>> {
        let row = sqlx::query_as::<_, AuthRow>(
            r#"
            SELECT
                user_id,
                password_hash,
                created_at,
                updated_at
            FROM auth_credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AuthRow::into_auth).transpose()
    }
}

// ============================================================================
// User Profile Repository Implementation
// ============================================================================

impl UserProfileRepository for PgAuthRepository {
    async fn create(&self, profile: &UserProfile) -> AuthResult<()> {
        insert_profile(&self.pool, profile).await
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT
                user_id,
                website,
                picture,
                created_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserProfileRow::into_profile))
    }
}

// ============================================================================
// Account Unit of Work
// ============================================================================

impl AuthUnitOfWork for PgAuthRepository {
    async fn create_account(
        &self,
        user: &User,
        auth: &Auth,
        profile: &UserProfile,
    ) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        insert_user(&mut *tx, user).await?;
        insert_auth(&mut *tx, auth).await?;
        insert_profile(&mut *tx, profile).await?;

        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Expired rows are still returned so the caller can delete them.
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    email: Option<String>,
    user_status: i16,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        // Unknown status codes fail closed
        let user_status = UserStatus::from_id(self.user_status).unwrap_or(UserStatus::Disabled);

        User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(&self.user_name),
            email: self.email.map(Email::from_db),
            user_status,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthRow {
    user_id: Uuid,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AuthRow {
    fn into_auth(self) -> AuthResult<Auth> {
        let password_hash = UserPassword::from_db(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {e}")))?;

        Ok(Auth {
            user_id: UserId::from_uuid(self.user_id),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserProfileRow {
    user_id: Uuid,
    website: Option<String>,
    picture: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserProfileRow {
    fn into_profile(self) -> UserProfile {
        UserProfile {
            user_id: UserId::from_uuid(self.user_id),
            website: self.website.map(Website::from_db),
            picture: self.picture,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: self.session_id,
            user_id: UserId::from_uuid(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
