//! Frontend configuration

/// Where the app finds its backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base of the API, without trailing slash (`https://host/api`)
    pub api_url: String,
    /// Full URL of the specialties list
    pub coffee_specialties_url: String,
}

impl AppConfig {
    /// Configuration for a page served from `origin`
    ///
    /// `api_url` replaces the default `<origin>/api`.
    pub fn for_origin(origin: &str, api_url: Option<&str>) -> Self {
        let api_url = api_url
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("{}/api", origin.trim_end_matches('/')))
            .trim_end_matches('/')
            .to_string();

        Self {
            coffee_specialties_url: format!("{api_url}/coffee-specialties"),
            api_url,
        }
    }

    /// Configuration for the current page, honouring `COFFEE_API_URL` at build time
    pub fn load() -> Self {
        let origin = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default();

        Self::for_origin(&origin, option_env!("COFFEE_API_URL"))
    }
}
