use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a sending or receiving country.
///
/// Country identifiers are free-form (the payment form uses short names
/// such as "USA", "UK" or "Singapore"). Surrounding whitespace is trimmed
/// on construction; comparison against a [`CorridorPolicy`] is
/// case-insensitive.
///
/// # Examples
///
/// ```
/// use route_optimizer::core::country::CountryCode;
///
/// let usa = CountryCode::new(" USA ");
/// assert_eq!(usa.as_str(), "USA");
/// assert!(usa.matches("usa"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self(code.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive comparison against a raw identifier.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Countries offered by the client payment form.
pub const DASHBOARD_COUNTRIES: [&str; 5] = ["USA", "India", "Germany", "UK", "Singapore"];

/// Which countries a request may name.
///
/// The optimization flow itself places no restriction on countries beyond
/// being non-empty, so [`CorridorPolicy::Open`] is the default. Deployments
/// that want to reject anything outside the supported corridors opt into
/// [`CorridorPolicy::Supported`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorridorPolicy {
    /// Any non-empty country is accepted.
    #[default]
    Open,
    /// Only the listed countries are accepted.
    Supported(Vec<CountryCode>),
}

impl CorridorPolicy {
    /// Restrict requests to the countries the payment form offers.
    pub fn dashboard() -> Self {
        Self::Supported(DASHBOARD_COUNTRIES.iter().map(|c| CountryCode::new(*c)).collect())
    }

    pub fn allows(&self, country: &CountryCode) -> bool {
        match self {
            CorridorPolicy::Open => true,
            CorridorPolicy::Supported(list) => list.iter().any(|c| c.matches(country.as_str())),
        }
    }
}

/// An origin → destination country pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    pub origin: CountryCode,
    pub destination: CountryCode,
}

impl Corridor {
    pub fn new(origin: CountryCode, destination: CountryCode) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_trims_whitespace() {
        let c = CountryCode::new("  Germany\t");
        assert_eq!(c.as_str(), "Germany");
        assert!(!c.is_empty());
    }

    #[test]
    fn test_blank_country_is_empty() {
        assert!(CountryCode::new("   ").is_empty());
    }

    #[test]
    fn test_open_policy_allows_anything() {
        assert!(CorridorPolicy::Open.allows(&CountryCode::new("Atlantis")));
    }

    #[test]
    fn test_dashboard_policy() {
        let policy = CorridorPolicy::dashboard();
        assert!(policy.allows(&CountryCode::new("usa")));
        assert!(policy.allows(&CountryCode::new("Singapore")));
        assert!(!policy.allows(&CountryCode::new("Brazil")));
    }

    #[test]
    fn test_corridor_display() {
        let corridor = Corridor::new(CountryCode::new("UK"), CountryCode::new("India"));
        assert_eq!(format!("{}", corridor), "UK → India");
    }
}
