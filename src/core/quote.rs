use crate::core::country::Corridor;
use crate::core::route::Route;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One priced route, as presented to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuote {
    pub route: Route,
    /// Route name as returned by the model.
    pub name: String,
    /// Non-negative, two fraction digits.
    pub cost_usd: Decimal,
    pub eta_label: String,
    pub description: String,
    /// `None` for SWIFT, always `Some` and non-negative otherwise.
    pub savings_percent_vs_swift: Option<Decimal>,
}

/// Exactly three route quotes for one request.
///
/// There is no partial form of this type: either all three quotes were
/// produced and validated, or the optimization failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub request_id: Uuid,
    pub corridor: Corridor,
    pub amount_usd: Decimal,
    pub swift: RouteQuote,
    pub stablecoin: RouteQuote,
    pub local_rail: RouteQuote,
}

impl OptimizationResult {
    pub fn quote(&self, route: Route) -> &RouteQuote {
        match route {
            Route::Swift => &self.swift,
            Route::Stablecoin => &self.stablecoin,
            Route::LocalRail => &self.local_rail,
        }
    }

    /// Quotes in presentation order (baseline first).
    pub fn quotes(&self) -> [&RouteQuote; 3] {
        [&self.swift, &self.stablecoin, &self.local_rail]
    }

    /// The cheapest route. Ties go to the earlier route in [`Route::ALL`].
    pub fn cheapest(&self) -> &RouteQuote {
        let mut best = &self.swift;
        for quote in [&self.stablecoin, &self.local_rail] {
            if quote.cost_usd < best.cost_usd {
                best = quote;
            }
        }
        best
    }
}

impl std::fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Route Options ===")?;
        writeln!(f, "Corridor:   {}", self.corridor)?;
        writeln!(f, "Amount:     {:.2} USD", self.amount_usd)?;
        let cheapest = self.cheapest().route;

        for quote in self.quotes() {
            let marker = if quote.route == cheapest { " (optimal)" } else { "" };
            writeln!(f, "\n--- {}{} ---", quote.name, marker)?;
            writeln!(f, "  Cost:    {:.2} USD", quote.cost_usd)?;
            writeln!(f, "  Time:    {}", quote.eta_label)?;
            if let Some(savings) = quote.savings_percent_vs_swift {
                writeln!(f, "  Savings: {}% vs SWIFT", savings)?;
            }
            writeln!(f, "  {}", quote.description)?;
        }
        Ok(())
    }
}
