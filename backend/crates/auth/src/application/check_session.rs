//! Check Session Use Case
//!
//! Resolves the session cookie to the member behind it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// The authenticated member making a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub user_name: UserName,
}

pub struct CheckSessionUseCase<S, U>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
    U: UserRepository,
{
    session_repo: Arc<S>,
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<S, U> CheckSessionUseCase<S, U>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
    U: UserRepository,
{
    pub fn new(session_repo: Arc<S>, user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            user_repo,
            config,
        }
    }

    /// `Ok(None)` for forged, unknown or expired tokens and for disabled
    /// accounts. Only storage failures are errors.
    pub async fn execute(&self, session_token: &str) -> AuthResult<Option<CurrentUser>> {
        let Some(session_id) = session_token::parse(&self.config.session_secret, session_token)
        else {
            return Ok(None);
        };

        let Some(mut session) = self.session_repo.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Ok(None);
        }

        let Some(user) = self.user_repo.find_by_id(&session.user_id).await? else {
            return Ok(None);
        };

        if !user.is_active() {
            return Ok(None);
        }

        // Update last activity (fire and forget)
        session.touch();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(Some(CurrentUser {
            user_id: user.user_id,
            user_name: user.user_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{auth_session::AuthSession, user::User};
    use crate::domain::value_object::user_status::UserStatus;
    use crate::infra::memory::MemoryAuthRepository;

    struct Fixture {
        repo: MemoryAuthRepository,
        config: Arc<AuthConfig>,
        user: User,
    }

    impl Fixture {
        async fn new() -> Self {
            let repo = MemoryAuthRepository::new();
            let user = User::new(UserName::new("leifos").unwrap(), None);
            UserRepository::create(&repo, &user).await.unwrap();
            Self {
                repo,
                config: Arc::new(AuthConfig::development()),
                user,
            }
        }

        async fn session(&self, ttl: chrono::Duration) -> (AuthSession, String) {
            let session = AuthSession::new(self.user.user_id, ttl);
            AuthSessionRepository::create(&self.repo, &session)
                .await
                .unwrap();
            let token = session_token::issue(&self.config.session_secret, session.session_id);
            (session, token)
        }

        fn use_case(&self) -> CheckSessionUseCase<MemoryAuthRepository, MemoryAuthRepository> {
            let repo = Arc::new(self.repo.clone());
            CheckSessionUseCase::new(repo.clone(), repo, self.config.clone())
        }
    }

    #[tokio::test]
    async fn test_live_session_resolves_user() {
        let fx = Fixture::new().await;
        let (_, token) = fx.session(chrono::Duration::hours(1)).await;

        let current = fx.use_case().execute(&token).await.unwrap().unwrap();
        assert_eq!(current.user_id, fx.user.user_id);
        assert_eq!(current.user_name.original(), "leifos");
    }

    #[tokio::test]
    async fn test_garbage_tokens_are_anonymous() {
        let fx = Fixture::new().await;
        let use_case = fx.use_case();

        assert_eq!(use_case.execute("").await.unwrap(), None);
        assert_eq!(use_case.execute("abc.def").await.unwrap(), None);

        // Well-signed but no such session
        let token = session_token::issue(&fx.config.session_secret, uuid::Uuid::new_v4());
        assert_eq!(use_case.execute(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let fx = Fixture::new().await;
        let (session, token) = fx.session(chrono::Duration::seconds(-5)).await;

        assert_eq!(fx.use_case().execute(&token).await.unwrap(), None);
        assert!(
            AuthSessionRepository::find_by_id(&fx.repo, session.session_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_disabled_user_is_anonymous() {
        let mut fx = Fixture::new().await;
        let (_, token) = fx.session(chrono::Duration::hours(1)).await;

        fx.user.set_status(UserStatus::Disabled);
        UserRepository::update(&fx.repo, &fx.user).await.unwrap();

        assert_eq!(fx.use_case().execute(&token).await.unwrap(), None);
    }
}
