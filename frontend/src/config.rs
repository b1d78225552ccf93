use shared::SiteConfig;

/// Site configuration compiled into the binary.
const SITE_CONFIG: &str = include_str!("../site.toml");

/// Parse the embedded config, falling back to built-in defaults so a bad
/// edit never leaves the page without its scripts.
pub fn load_site_config() -> SiteConfig {
    match SiteConfig::from_toml_str(SITE_CONFIG) {
        Ok(config) => config,
        Err(error) => {
            zoon::eprintln!("🚨 {error}; using built-in defaults");
            SiteConfig::default()
        }
    }
}
