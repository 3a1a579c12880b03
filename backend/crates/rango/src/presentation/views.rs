//! HTML Templates
//!
//! Every page shares [`base`]: the title, the navigation for the current
//! visitor and a content block. All interpolated values are escaped by
//! `maud`.

use auth::Viewer;
use kernel::form::FieldErrors;
use maud::{DOCTYPE, Markup, html};

use crate::application::{CategoryLookup, IndexOutput, RangoConfig};
use crate::domain::entities::{Category, Page};
use crate::presentation::forms::{CategoryForm, PageForm, UserForm, UserProfileForm};
use crate::presentation::paths;

fn base(title: &str, viewer: &Viewer, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Rango - " (title) }
            }
            body {
                div {
                    @if let Some(user) = viewer.user() {
                        "Rango says: hey there " (user.user_name.original()) "!"
                    } @else {
                        "Rango says: hey there partner!"
                    }
                }
                div { (content) }
                hr;
                ul {
                    @if viewer.is_authenticated() {
                        li { a href=(paths::RESTRICTED) { "Restricted Page" } }
                        li { a href=(paths::ADD_CATEGORY) { "Add a New Category" } }
                        li { a href=(paths::LOGOUT) { "Logout" } }
                    } @else {
                        li { a href=(paths::REGISTER) { "Sign Up" } }
                        li { a href=(paths::LOGIN) { "Login" } }
                    }
                    li { a href=(paths::ABOUT) { "About" } }
                    li { a href=(paths::INDEX) { "Index" } }
                }
            }
        }
    }
}

fn field_errors(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @let messages = errors.get(field);
        @if !messages.is_empty() {
            ul class="errorlist" {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}

fn page_list(pages: &[Page]) -> Markup {
    html! {
        ul {
            @for page in pages {
                li { a href=(page.url.as_str()) { (page.title.as_str()) } }
            }
        }
    }
}

pub fn index(config: &RangoConfig, listing: &IndexOutput, viewer: &Viewer) -> Markup {
    let content = html! {
        h1 { "Rango says..." }
        div { strong { (config.bold_message) } }
        div {
            h2 { "Most Liked Categories" }
            @if listing.categories.is_empty() {
                strong { "There are no categories present." }
            } @else {
                ul {
                    @for category in &listing.categories {
                        li { a href=(paths::category(category.slug.as_str())) { (category.name.as_str()) } }
                    }
                }
            }
        }
        div {
            h2 { "Most Viewed Pages" }
            @if listing.pages.is_empty() {
                strong { "There are no pages present." }
            } @else {
                (page_list(&listing.pages))
            }
        }
    };
    base("Homepage", viewer, content)
}

pub fn category(lookup: &CategoryLookup, viewer: &Viewer) -> Markup {
    let (title, content) = match lookup {
        CategoryLookup::Found { category, pages } => (
            category.name.as_str(),
            html! {
                h1 { (category.name.as_str()) }
                @if pages.is_empty() {
                    strong { "No pages currently in category." }
                } @else {
                    (page_list(pages))
                }
                @if viewer.is_authenticated() {
                    a href=(paths::add_page(category.slug.as_str())) { "Add a Page" }
                }
            },
        ),
        CategoryLookup::NotFound => (
            "Unknown Category",
            html! { "The specified category does not exist!" },
        ),
    };
    base(title, viewer, content)
}

pub fn about(viewer: &Viewer) -> Markup {
    let content = html! {
        h1 { "Rango says here is the about page." }
        p { "This tutorial has been put together by Leif Azzopardi and David Maxwell." }
    };
    base("About", viewer, content)
}

pub fn add_category(form: &CategoryForm, errors: &FieldErrors, viewer: &Viewer) -> Markup {
    let content = html! {
        h1 { "Add a Category" }
        form id="category_form" method="post" action=(paths::ADD_CATEGORY) {
            (field_errors(errors, "name"))
            label for="id_name" { "Please enter the category name." }
            input type="text" id="id_name" name="name" maxlength="128" value=(form.name);
            input type="submit" name="submit" value="Create Category";
        }
    };
    base("Add a Category", viewer, content)
}

pub fn add_page(
    category: &Category,
    form: &PageForm,
    errors: &FieldErrors,
    viewer: &Viewer,
) -> Markup {
    let action = paths::add_page(category.slug.as_str());
    let content = html! {
        h1 { "Add a Page to " (category.name.as_str()) }
        form id="page_form" method="post" action=(action) {
            (field_errors(errors, "title"))
            label for="id_title" { "Please enter the title of the page." }
            input type="text" id="id_title" name="title" maxlength="128" value=(form.title);
            (field_errors(errors, "url"))
            label for="id_url" { "Please enter the URL of the page." }
            input type="text" id="id_url" name="url" maxlength="200" value=(form.url);
            input type="submit" name="submit" value="Add Page";
        }
    };
    base("Add a Page", viewer, content)
}

/// Registration form state for one request
pub struct RegisterView<'a> {
    pub registered: bool,
    pub user: &'a UserForm,
    pub profile: &'a UserProfileForm,
    pub errors: &'a FieldErrors,
}

pub fn register(state: &RegisterView<'_>, viewer: &Viewer) -> Markup {
    let content = html! {
        h1 { "Register for Rango" }
        @if state.registered {
            "Rango says: " strong { "thank you for registering!" }
            a href=(paths::INDEX) { "Return to the homepage." }
        } @else {
            "Rango says: " strong { "register here!" }
            form id="user_form" method="post" action=(paths::REGISTER) enctype="multipart/form-data" {
                (field_errors(state.errors, "username"))
                label for="id_username" { "Username:" }
                input type="text" id="id_username" name="username" maxlength="150" value=(state.user.username);
                (field_errors(state.errors, "email"))
                label for="id_email" { "Email address:" }
                input type="email" id="id_email" name="email" value=(state.user.email);
                (field_errors(state.errors, "password"))
                label for="id_password" { "Password:" }
                input type="password" id="id_password" name="password";
                (field_errors(state.errors, "website"))
                label for="id_website" { "Website:" }
                input type="text" id="id_website" name="website" maxlength="200" value=(state.profile.website);
                label for="id_picture" { "Picture:" }
                input type="file" id="id_picture" name="picture" accept="image/*";
                input type="submit" name="submit" value="Register";
            }
        }
    };
    base("Register", viewer, content)
}

pub fn login(viewer: &Viewer) -> Markup {
    let content = html! {
        h1 { "Login to Rango" }
        form id="login_form" method="post" action=(paths::LOGIN) {
            label for="id_username" { "Username:" }
            input type="text" id="id_username" name="username" size="50";
            label for="id_password" { "Password:" }
            input type="password" id="id_password" name="password" size="50";
            input type="submit" value="submit";
        }
    };
    base("Login", viewer, content)
}

pub fn restricted(viewer: &Viewer) -> Markup {
    let content = html! {
        h1 { "Rango says..." }
        div { "Since you're logged in, you can see this text!" }
    };
    base("Restricted Page", viewer, content)
}
