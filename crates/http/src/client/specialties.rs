//! Coffee specialties client

use super::{ClientError, CoffeeClient};
use reqwest::Method;

/// Fetches the list of coffee specialties
#[derive(Debug, Clone)]
pub struct CoffeeSpecialtiesService {
    client: CoffeeClient,
    url: String,
}

impl CoffeeSpecialtiesService {
    /// `url` is absolute and may live outside the client's base URL
    pub fn new(client: CoffeeClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the specialties, in server order
    pub async fn get_coffee_specialties(&self) -> Result<Vec<String>, ClientError> {
        let request = self.client.request_url(Method::GET, &self.url);
        self.client.execute(request).await
    }
}

/// Comma-joined display form of a specialty list
pub fn display_specialties(specialties: &[String]) -> String {
    specialties.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_spaces() {
        let specialties = vec!["Espresso".to_string(), "Latte".to_string()];
        assert_eq!(display_specialties(&specialties), "Espresso,Latte");
    }

    #[test]
    fn empty_list_displays_nothing() {
        assert_eq!(display_specialties(&[]), "");
    }
}
