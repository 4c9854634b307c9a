//! Configuration module

mod site;

pub use site::FrontPageConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
