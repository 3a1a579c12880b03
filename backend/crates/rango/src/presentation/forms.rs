//! Submitted Forms
//!
//! Raw field values as posted, kept as strings so a rejected form can be
//! shown again exactly as typed. `clean` runs every field check and
//! either yields validated values or the per-field messages.

use auth::domain::PictureUpload;
use auth::models::{Email, RawPassword, UserName, Website};
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use kernel::form::{FieldErrors, collect};
use serde::Deserialize;

use crate::application::AddPageInput;
use crate::domain::value_objects::{CategoryName, PageTitle, PageUrl};
use crate::error::RangoError;

// ============================================================================
// Category / Page
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn clean(&self) -> Result<CategoryName, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = collect(
            &mut errors,
            "name",
            CategoryName::new(&self.name).map_err(|e| e.to_string()),
        );

        match name {
            Some(name) => errors.into_result(name),
            None => Err(errors),
        }
    }
}

/// A posted `views` value is not a field of this form and is ignored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageForm {
    pub title: String,
    pub url: String,
}

impl PageForm {
    pub fn clean(&self) -> Result<AddPageInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = collect(
            &mut errors,
            "title",
            PageTitle::new(&self.title).map_err(|e| e.to_string()),
        );
        let url = collect(
            &mut errors,
            "url",
            PageUrl::new(&self.url).map_err(|e| e.to_string()),
        );

        match (title, url) {
            (Some(title), Some(url)) => errors.into_result(AddPageInput { title, url }),
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for UserForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Debug output is safe: `RawPassword` redacts itself
#[derive(Debug)]
pub struct CleanUser {
    pub user_name: UserName,
    pub email: Option<Email>,
    pub password: RawPassword,
}

impl UserForm {
    pub fn clean(&self) -> Result<CleanUser, FieldErrors> {
        let mut errors = FieldErrors::new();
        let user_name = collect(
            &mut errors,
            "username",
            UserName::new(&self.username).map_err(|e| e.to_string()),
        );
        let email = collect(
            &mut errors,
            "email",
            Email::optional(&self.email).map_err(|e| e.to_string()),
        );
        let password = collect(
            &mut errors,
            "password",
            RawPassword::new(self.password.clone()).map_err(|e| e.to_string()),
        );

        match (user_name, email, password) {
            (Some(user_name), Some(email), Some(password)) => errors.into_result(CleanUser {
                user_name,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserProfileForm {
    pub website: String,
}

impl UserProfileForm {
    pub fn clean(&self) -> Result<Option<Website>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let website = collect(
            &mut errors,
            "website",
            Website::optional(&self.website).map_err(|e| e.to_string()),
        );

        match website {
            Some(website) => errors.into_result(website),
            None => Err(errors),
        }
    }
}

/// Both registration forms plus the optional picture.
///
/// Accepts `multipart/form-data` (needed for the picture) as well as a
/// plain urlencoded body.
#[derive(Debug, Default)]
pub struct RegistrationSubmission {
    pub user: UserForm,
    pub profile: UserProfileForm,
    pub picture: Option<PictureUpload>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RegistrationFields {
    username: String,
    email: String,
    password: String,
    website: String,
}

impl From<RegistrationFields> for RegistrationSubmission {
    fn from(fields: RegistrationFields) -> Self {
        Self {
            user: UserForm {
                username: fields.username,
                email: fields.email,
                password: fields.password,
            },
            profile: UserProfileForm {
                website: fields.website,
            },
            picture: None,
        }
    }
}

impl RegistrationSubmission {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, RangoError> {
        let mut fields = RegistrationFields::default();
        let mut picture = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| RangoError::MalformedForm(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "picture" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| RangoError::MalformedForm(e.body_text()))?;
                // Browsers send an empty part when no file was chosen
                if !bytes.is_empty() {
                    picture = Some(PictureUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let slot = match name.as_str() {
                "username" => &mut fields.username,
                "email" => &mut fields.email,
                "password" => &mut fields.password,
                "website" => &mut fields.website,
                _ => continue,
            };
            *slot = field
                .text()
                .await
                .map_err(|e| RangoError::MalformedForm(e.body_text()))?;
        }

        Ok(Self {
            picture,
            ..Self::from(fields)
        })
    }
}

impl<S> FromRequest<S> for RegistrationSubmission
where
    S: Send + Sync,
{
    type Rejection = RangoError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| RangoError::MalformedForm(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else {
            let Form(fields) = Form::<RegistrationFields>::from_request(req, state)
                .await
                .map_err(|e| RangoError::MalformedForm(e.body_text()))?;
            Ok(fields.into())
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Missing fields arrive as empty strings; nothing is validated here
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
