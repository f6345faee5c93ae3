use crate::core::request::OptimizationRequest;
use crate::core::route::Route;
use crate::generation::GenerationRequest;
use crate::optimization::fees::FeeEstimate;
use crate::optimization::savings::RouteSavings;
use crate::prompt::{schema_of, ROUTE_OPTIMIZATION_PROMPT};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

/// One route in the model's answer.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptionPayload {
    /// The name of the payment route (e.g., SWIFT, Stablecoin, Local Rail).
    pub name: String,
    /// The estimated cost of the transfer in USD.
    #[schemars(with = "f64")]
    pub cost: Decimal,
    /// The estimated transfer time (e.g., "2-5 business days", "3-10 seconds").
    pub time: String,
    /// A brief description of the route and its benefits or drawbacks.
    pub description: String,
    /// The percentage saved compared to the SWIFT route, if applicable.
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub savings_percentage: Option<Decimal>,
}

/// The model's answer to a route optimization prompt.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptionsPayload {
    pub swift: RouteOptionPayload,
    pub stablecoin: RouteOptionPayload,
    pub local_rail: RouteOptionPayload,
}

impl RouteOptionsPayload {
    pub fn option(&self, route: Route) -> &RouteOptionPayload {
        match route {
            Route::Swift => &self.swift,
            Route::Stablecoin => &self.stablecoin,
            Route::LocalRail => &self.local_rail,
        }
    }
}

/// Every figure the route prompt is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePromptInput {
    pub from_country: String,
    pub to_country: String,
    pub amount: Decimal,
    pub estimate: FeeEstimate,
    pub savings: RouteSavings,
}

impl RoutePromptInput {
    pub fn new(
        request: &OptimizationRequest,
        estimate: FeeEstimate,
        savings: RouteSavings,
    ) -> Self {
        Self {
            from_country: request.origin().to_string(),
            to_country: request.destination().to_string(),
            amount: request.amount_usd(),
            estimate,
            savings,
        }
    }

    /// Structured form, attached to the generation request.
    ///
    /// Figures travel as decimal strings so no amount loses cents to `f64`.
    pub fn to_json(&self) -> Value {
        json!({
            "fromCountry": self.from_country,
            "toCountry": self.to_country,
            "amount": self.amount.to_string(),
            "swiftCost": self.estimate.swift.to_string(),
            "stablecoinCost": self.estimate.stablecoin.to_string(),
            "localRailCost": self.estimate.local_rail.to_string(),
            "stablecoinSavings": self.savings.stablecoin.to_string(),
            "localRailSavings": self.savings.local_rail.to_string(),
            "swiftTime": Route::Swift.eta_label(),
            "stablecoinTime": Route::Stablecoin.eta_label(),
            "localRailTime": Route::LocalRail.eta_label(),
        })
    }
}

/// Builds route optimization prompts. Never calls the model itself.
pub struct PromptFormatter;

impl PromptFormatter {
    /// Output contract for route optimization answers.
    pub fn route_output_schema() -> Value {
        schema_of::<RouteOptionsPayload>()
    }

    pub fn render_route_prompt(input: &RoutePromptInput, schema: &Value) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(
            "You are an expert financial advisor specializing in international cross-border payments.\n",
        );
        out.push_str(&format!(
            "A client wants to send {} USD from {} to {}.\n",
            input.amount, input.from_country, input.to_country
        ));
        out.push_str(
            "Present three payment route options: SWIFT, Stablecoin, and Local Rail. For each \
             option give the estimated cost, the estimated time and a short description. For \
             Stablecoin and Local Rail also give the percentage saved compared to SWIFT.\n\n",
        );
        out.push_str("Use exactly these calculated values:\n");

        for route in Route::ALL {
            out.push_str(&format!("{}:\n", route.display_name()));
            out.push_str(&format!("  Cost: {:.2} USD\n", input.estimate.cost(route)));
            out.push_str(&format!("  Time: \"{}\"\n", route.eta_label()));
            let savings = match route {
                Route::Swift => None,
                Route::Stablecoin => Some(input.savings.stablecoin),
                Route::LocalRail => Some(input.savings.local_rail),
            };
            if let Some(pct) = savings {
                out.push_str(&format!("  Savings vs SWIFT: {:.2}%\n", pct));
            }
            out.push('\n');
        }

        out.push_str("Respond with JSON matching this schema:\n");
        out.push_str(&schema.to_string());
        out.push('\n');
        out
    }

    pub fn route_request(input: &RoutePromptInput) -> GenerationRequest {
        let output_schema = Self::route_output_schema();
        GenerationRequest {
            prompt_name: ROUTE_OPTIMIZATION_PROMPT.to_string(),
            system: None,
            prompt: Self::render_route_prompt(input, &output_schema),
            input: input.to_json(),
            output_schema,
        }
    }
}
