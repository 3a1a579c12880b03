//! Application Configuration

use std::path::PathBuf;

/// Shown in bold on the index page
pub const DEFAULT_BOLD_MESSAGE: &str = "Crunchy, creamy, cookie, candy, cupcake!";

/// How many categories and pages the index lists
pub const DEFAULT_LISTING_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct RangoConfig {
    pub bold_message: String,
    pub listing_limit: usize,
    /// Directory uploaded pictures are written under
    pub media_root: PathBuf,
    /// URL prefix the media root is served from
    pub media_url: String,
}

impl Default for RangoConfig {
    fn default() -> Self {
        Self {
            bold_message: DEFAULT_BOLD_MESSAGE.to_string(),
            listing_limit: DEFAULT_LISTING_LIMIT,
            media_root: PathBuf::from("media"),
            media_url: "/media/".to_string(),
        }
    }
}
