//! URL paths of the site, in one place so links and redirects agree with
//! the router.

pub const INDEX: &str = "/rango/";
pub const ABOUT: &str = "/rango/about/";
pub const ADD_CATEGORY: &str = "/rango/add_category/";
pub const REGISTER: &str = "/rango/register/";
pub const LOGIN: &str = "/rango/login/";
pub const RESTRICTED: &str = "/rango/restricted/";
pub const LOGOUT: &str = "/rango/logout/";

/// Router pattern for [`category`]
pub const CATEGORY_ROUTE: &str = "/rango/category/{slug}/";
/// Router pattern for [`add_page`]
pub const ADD_PAGE_ROUTE: &str = "/rango/category/{slug}/add_page/";

pub fn category(slug: &str) -> String {
    format!("/rango/category/{slug}/")
}

pub fn add_page(slug: &str) -> String {
    format!("/rango/category/{slug}/add_page/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_paths_match_routes() {
        assert_eq!(category("python"), CATEGORY_ROUTE.replace("{slug}", "python"));
        assert_eq!(add_page("python"), ADD_PAGE_ROUTE.replace("{slug}", "python"));
    }
}
