//! Register Use Case
//!
//! Creates a user, their password credentials and their profile.
//! Input arrives already validated by the registration forms.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth::Auth, user::User, user_profile::UserProfile};
use crate::domain::repository::{AuthUnitOfWork, PictureStore, PictureUpload};
use crate::domain::value_object::{
    email::Email,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    website::Website,
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub user_name: UserName,
    pub email: Option<Email>,
    pub password: RawPassword,
    pub website: Option<Website>,
    pub picture: Option<PictureUpload>,
}

#[derive(Debug, Clone)]
pub struct RegisterOutput {
    pub user_id: UserId,
    pub user_name: UserName,
    /// Stored picture path relative to the media root
    pub picture: Option<String>,
}

pub struct RegisterUseCase<S, M>
where
    S: AuthUnitOfWork,
    M: PictureStore,
{
    store: Arc<S>,
    pictures: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<S, M> RegisterUseCase<S, M>
where
    S: AuthUnitOfWork,
    M: PictureStore,
{
    pub fn new(store: Arc<S>, pictures: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            pictures,
            config,
        }
    }

    /// The picture is stored first; the user, credentials and profile are
    /// then written in one unit of work. A failed write removes the picture.
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        if self.store.exists_by_user_name(&input.user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password_hash = UserPassword::from_raw(&input.password, self.config.pepper())?;
        drop(input.password);

        let picture = match input.picture {
            Some(upload) => Some(self.pictures.save(upload).await?),
            None => None,
        };

        let user = User::new(input.user_name, input.email);
        let auth = Auth::new(user.user_id, password_hash);
        let profile = UserProfile::new(user.user_id, input.website, picture.clone());

        if let Err(err) = self.store.create_account(&user, &auth, &profile).await {
            if let Some(path) = &picture {
                self.discard_picture(path).await;
            }
            return Err(err);
        }

        tracing::info!(
            user_id = %user.user_id,
            has_picture = picture.is_some(),
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
            user_name: user.user_name,
            picture,
        })
    }

    async fn discard_picture(&self, path: &str) {
        if let Err(err) = self.pictures.delete(path).await {
            tracing::warn!(error = %err, picture = %path, "Failed to remove orphaned picture");
        }
    }
}
