use crate::core::country::{Corridor, CorridorPolicy, CountryCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Input rejected before any cost is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("{field} country must not be empty")]
    EmptyCountry { field: &'static str },
    #[error("{field} country '{country}' is not a supported corridor endpoint")]
    UnsupportedCountry {
        field: &'static str,
        country: String,
    },
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },
    #[error("amount '{raw}' is not a valid decimal number")]
    MalformedAmount { raw: String },
    #[error("query must not be empty")]
    EmptyQuery,
}

/// Parse a user-supplied amount string into USD.
///
/// Accepts plain decimals and underscore or comma digit grouping
/// ("50000", "50_000", "50,000.25").
pub fn parse_amount(raw: &str) -> Result<Decimal, InvalidInputError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();
    Decimal::from_str(&cleaned).map_err(|_| InvalidInputError::MalformedAmount {
        raw: raw.to_string(),
    })
}

/// A validated request to price a transfer across all routes.
///
/// Requests are immutable once created and are discarded after the
/// optimization completes. Nothing is cached between requests.
///
/// # Examples
///
/// ```
/// use route_optimizer::core::country::CorridorPolicy;
/// use route_optimizer::core::request::OptimizationRequest;
/// use rust_decimal_macros::dec;
///
/// let request = OptimizationRequest::new("USA", "Germany", dec!(50_000), &CorridorPolicy::Open)
///     .unwrap();
/// assert_eq!(request.amount_usd(), dec!(50_000));
///
/// assert!(OptimizationRequest::new("USA", "", dec!(10), &CorridorPolicy::Open).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Correlation id carried through logs.
    id: Uuid,
    corridor: Corridor,
    /// Strictly positive.
    amount_usd: Decimal,
    received_at: DateTime<Utc>,
}

impl OptimizationRequest {
    /// Validate raw input into a request.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        amount_usd: Decimal,
        policy: &CorridorPolicy,
    ) -> Result<Self, InvalidInputError> {
        let origin = CountryCode::new(origin);
        let destination = CountryCode::new(destination);

        check_country("origin", &origin, policy)?;
        check_country("destination", &destination, policy)?;
        if amount_usd <= Decimal::ZERO {
            return Err(InvalidInputError::NonPositiveAmount { amount: amount_usd });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            corridor: Corridor::new(origin, destination),
            amount_usd,
            received_at: Utc::now(),
        })
    }

    /// Re-check the corridor against a (possibly stricter) policy.
    pub fn check_policy(&self, policy: &CorridorPolicy) -> Result<(), InvalidInputError> {
        check_country("origin", &self.corridor.origin, policy)?;
        check_country("destination", &self.corridor.destination, policy)
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    pub fn origin(&self) -> &CountryCode {
        &self.corridor.origin
    }

    pub fn destination(&self) -> &CountryCode {
        &self.corridor.destination
    }

    pub fn amount_usd(&self) -> Decimal {
        self.amount_usd
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

fn check_country(
    field: &'static str,
    country: &CountryCode,
    policy: &CorridorPolicy,
) -> Result<(), InvalidInputError> {
    if country.is_empty() {
        return Err(InvalidInputError::EmptyCountry { field });
    }
    if !policy.allows(country) {
        return Err(InvalidInputError::UnsupportedCountry {
            field,
            country: country.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_request() {
        let req = OptimizationRequest::new("USA", "Germany", dec!(50000), &CorridorPolicy::Open)
            .unwrap();
        assert_eq!(req.origin().as_str(), "USA");
        assert_eq!(req.destination().as_str(), "Germany");
        assert_eq!(req.amount_usd(), dec!(50000));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = OptimizationRequest::new("USA", "UK", Decimal::ZERO, &CorridorPolicy::Open)
            .unwrap_err();
        assert_eq!(err, InvalidInputError::NonPositiveAmount { amount: Decimal::ZERO });
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = OptimizationRequest::new("USA", "UK", dec!(-5), &CorridorPolicy::Open)
            .unwrap_err();
        assert!(matches!(err, InvalidInputError::NonPositiveAmount { .. }));
    }

    #[test]
    fn test_empty_countries_rejected() {
        let err = OptimizationRequest::new("", "UK", dec!(5), &CorridorPolicy::Open).unwrap_err();
        assert_eq!(err, InvalidInputError::EmptyCountry { field: "origin" });

        let err = OptimizationRequest::new("UK", "  ", dec!(5), &CorridorPolicy::Open)
            .unwrap_err();
        assert_eq!(err, InvalidInputError::EmptyCountry { field: "destination" });
    }

    #[test]
    fn test_supported_policy_rejects_unknown_country() {
        let err = OptimizationRequest::new("USA", "Brazil", dec!(5), &CorridorPolicy::dashboard())
            .unwrap_err();
        assert!(matches!(
            err,
            InvalidInputError::UnsupportedCountry { field: "destination", .. }
        ));
    }

    #[test]
    fn test_check_policy_after_construction() {
        let req = OptimizationRequest::new("Brazil", "USA", dec!(5), &CorridorPolicy::Open)
            .unwrap();
        assert!(req.check_policy(&CorridorPolicy::Open).is_ok());
        assert!(req.check_policy(&CorridorPolicy::dashboard()).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50000").unwrap(), dec!(50000));
        assert_eq!(parse_amount("50_000").unwrap(), dec!(50000));
        assert_eq!(parse_amount(" 1,250.50 ").unwrap(), dec!(1250.50));
        assert!(parse_amount("ten dollars").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_rejection_messages() {
        let err = OptimizationRequest::new(" ", "UK", dec!(5), &CorridorPolicy::Open).unwrap_err();
        assert_eq!(err.to_string(), "origin country must not be empty");

        let err = OptimizationRequest::new("USA", "UK", dec!(-2.5), &CorridorPolicy::Open)
            .unwrap_err();
        assert_eq!(err.to_string(), "amount must be positive, got -2.5");
    }
}
