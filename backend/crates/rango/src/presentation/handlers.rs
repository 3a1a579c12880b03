//! HTTP Handlers
//!
//! One handler per page. Each reads the request, calls at most one or two
//! use cases and ends in a rendered page or a redirect.

use std::sync::Arc;

use auth::application::{RegisterInput, RegisterUseCase, SignInInput, SignInUseCase, SignOutUseCase};
use auth::{AuthConfig, AuthError, AuthStore, FsPictureStore, Viewer};
use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use kernel::form::FieldErrors;
use maud::Markup;

use crate::application::{
    AddCategoryUseCase, AddPageUseCase, IndexUseCase, RangoConfig, ShowCategoryUseCase,
};
use crate::domain::repository::RangoStore;
use crate::error::{RangoError, RangoResult};
use crate::presentation::forms::{
    CategoryForm, LoginForm, PageForm, RegistrationSubmission, UserForm, UserProfileForm,
};
use crate::presentation::paths;
use crate::presentation::views::{self, RegisterView};

/// Shared state for rango handlers
#[derive(Clone)]
pub struct RangoAppState<R, A>
where
    R: RangoStore,
    A: AuthStore,
{
    pub store: Arc<R>,
    pub auth_repo: Arc<A>,
    pub pictures: Arc<FsPictureStore>,
    pub config: Arc<RangoConfig>,
    pub auth_config: Arc<AuthConfig>,
}

impl<R, A> RangoAppState<R, A>
where
    R: RangoStore,
    A: AuthStore,
{
    /// Pictures are stored under `config.media_root`
    pub fn new(store: R, auth_repo: A, config: RangoConfig, auth_config: AuthConfig) -> Self {
        let pictures = FsPictureStore::new(&config.media_root);
        Self {
            store: Arc::new(store),
            auth_repo: Arc::new(auth_repo),
            pictures: Arc::new(pictures),
            config: Arc::new(config),
            auth_config: Arc::new(auth_config),
        }
    }
}

fn render(markup: Markup) -> Response {
    Html(markup.into_string()).into_response()
}

// ============================================================================
// Browsing
// ============================================================================

/// GET /rango/
pub async fn index<R, A>(
    State(state): State<RangoAppState<R, A>>,
    viewer: Viewer,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let use_case = IndexUseCase::new(state.store.clone(), state.store.clone(), state.config.clone());
    let listing = use_case.execute().await?;

    Ok(render(views::index(&state.config, &listing, &viewer)))
}

/// GET /rango/category/{slug}/
pub async fn show_category<R, A>(
    State(state): State<RangoAppState<R, A>>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let use_case = ShowCategoryUseCase::new(state.store.clone(), state.store.clone());
    let lookup = use_case.execute(&slug).await?;

    Ok(render(views::category(&lookup, &viewer)))
}

/// GET /rango/about/
pub async fn about(viewer: Viewer) -> Response {
    render(views::about(&viewer))
}

// ============================================================================
// Add Category (login required)
// ============================================================================

/// GET /rango/add_category/
pub async fn add_category_form(viewer: Viewer) -> Response {
    render(views::add_category(
        &CategoryForm::default(),
        &FieldErrors::new(),
        &viewer,
    ))
}

/// POST /rango/add_category/
pub async fn add_category<R, A>(
    State(state): State<RangoAppState<R, A>>,
    viewer: Viewer,
    Form(form): Form<CategoryForm>,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let name = match form.clean() {
        Ok(name) => name,
        Err(errors) => {
            tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Category form rejected");
            return Ok(render(views::add_category(&form, &errors, &viewer)));
        }
    };

    match AddCategoryUseCase::new(state.store.clone()).execute(name).await {
        Ok(_) => Ok(Redirect::to(paths::INDEX).into_response()),
        Err(err @ RangoError::CategoryExists) => {
            let mut errors = FieldErrors::new();
            errors.add("name", err.to_string());
            Ok(render(views::add_category(&form, &errors, &viewer)))
        }
        Err(err) => Err(err),
    }
}

// ============================================================================
// Add Page (login required)
// ============================================================================

/// GET /rango/category/{slug}/add_page/
pub async fn add_page_form<R, A>(
    State(state): State<RangoAppState<R, A>>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let use_case = AddPageUseCase::new(state.store.clone(), state.store.clone());
    let Some(category) = use_case.find_category(&slug).await? else {
        return Ok(Redirect::to(paths::INDEX).into_response());
    };

    Ok(render(views::add_page(
        &category,
        &PageForm::default(),
        &FieldErrors::new(),
        &viewer,
    )))
}

/// POST /rango/category/{slug}/add_page/
pub async fn add_page<R, A>(
    State(state): State<RangoAppState<R, A>>,
    viewer: Viewer,
    Path(slug): Path<String>,
    Form(form): Form<PageForm>,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let use_case = AddPageUseCase::new(state.store.clone(), state.store.clone());
    let Some(category) = use_case.find_category(&slug).await? else {
        return Ok(Redirect::to(paths::INDEX).into_response());
    };

    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Page form rejected");
            return Ok(render(views::add_page(&category, &form, &errors, &viewer)));
        }
    };

    use_case.execute(&category, input).await?;

    Ok(Redirect::to(&paths::category(category.slug.as_str())).into_response())
}

// ============================================================================
// Registration
// ============================================================================

/// GET /rango/register/
pub async fn register_form(viewer: Viewer) -> Response {
    render(views::register(
        &RegisterView {
            registered: false,
            user: &UserForm::default(),
            profile: &UserProfileForm::default(),
            errors: &FieldErrors::new(),
        },
        &viewer,
    ))
}

/// POST /rango/register/
pub async fn register<R, A>(
    State(state): State<RangoAppState<R, A>>,
    viewer: Viewer,
    submission: RegistrationSubmission,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let RegistrationSubmission {
        user,
        profile,
        picture,
    } = submission;

    // Both forms are checked before anything is stored
    let mut errors = FieldErrors::new();
    let clean_user = user.clean().map_err(|e| merge(&mut errors, e)).ok();
    let website = profile.clean().map_err(|e| merge(&mut errors, e)).ok();

    let registered = match (clean_user, website) {
        (Some(clean_user), Some(website)) => {
            let use_case = RegisterUseCase::new(
                state.auth_repo.clone(),
                state.pictures.clone(),
                state.auth_config.clone(),
            );
            let input = RegisterInput {
                user_name: clean_user.user_name,
                email: clean_user.email,
                password: clean_user.password,
                website,
                picture,
            };
            match use_case.execute(input).await {
                Ok(_) => true,
                Err(err @ AuthError::UserNameTaken) => {
                    errors.add("username", err.to_string());
                    false
                }
                Err(err) => return Err(err.into()),
            }
        }
        _ => false,
    };

    if !registered {
        tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Registration rejected");
    }

    Ok(render(views::register(
        &RegisterView {
            registered,
            user: &user,
            profile: &profile,
            errors: &errors,
        },
        &viewer,
    )))
}

fn merge(into: &mut FieldErrors, from: FieldErrors) {
    for field in from.fields() {
        for message in from.get(field) {
            into.add(field, message.clone());
        }
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

/// GET /rango/login/
pub async fn login_form(viewer: Viewer) -> Response {
    render(views::login(&viewer))
}

/// POST /rango/login/
///
/// Rejected logins answer with a short plain-text message.
pub async fn login<R, A>(
    State(state): State<RangoAppState<R, A>>,
    Form(form): Form<LoginForm>,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let use_case = SignInUseCase::new(
        state.auth_repo.clone(),
        state.auth_repo.clone(),
        state.auth_repo.clone(),
        state.auth_config.clone(),
    );

    let input = SignInInput {
        user_name: form.username,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => {
            let cookie = state
                .auth_config
                .cookie_spec()
                .issue(&output.session_token);
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to(paths::INDEX)).into_response())
        }
        Err(err @ (AuthError::InvalidCredentials | AuthError::AccountDisabled)) => {
            tracing::warn!(reason = %err, "Login rejected");
            Ok((StatusCode::OK, err.to_string()).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /rango/logout/
pub async fn logout<R, A>(
    State(state): State<RangoAppState<R, A>>,
    headers: HeaderMap,
) -> RangoResult<Response>
where
    R: RangoStore,
    A: AuthStore,
{
    let cookie_spec = state.auth_config.cookie_spec();

    if let Some(token) = cookie_spec.read(&headers) {
        let use_case = SignOutUseCase::new(state.auth_repo.clone(), state.auth_config.clone());
        // The cookie is cleared whatever happens to the stored session
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Failed to delete session on logout");
        }
    }

    Ok((
        [(header::SET_COOKIE, cookie_spec.clear())],
        Redirect::to(paths::INDEX),
    )
        .into_response())
}

// ============================================================================
// Restricted (login required)
// ============================================================================

/// GET /rango/restricted/
pub async fn restricted(viewer: Viewer) -> Response {
    render(views::restricted(&viewer))
}
