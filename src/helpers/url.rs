//! URL helper functions

use crate::config::SiteConfig;

/// Join the root path prefix with a site-relative path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/2017/04/13/hello/") // -> "/blog/2017/04/13/hello/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// absolute_url(&config, "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn absolute_url(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/blog/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/hello/"), "/blog/hello/");
        assert_eq!(url_for(&config, "hello/"), "/blog/hello/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_url_for_bare_root() {
        let config = SiteConfig::default();
        assert_eq!(url_for(&config, "/hello"), "/hello");
    }

    #[test]
    fn test_absolute_url() {
        let config = test_config();
        assert_eq!(
            absolute_url(&config, "/about/"),
            "https://example.com/blog/about/"
        );
    }
}
