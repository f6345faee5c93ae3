//! Price a handful of corridors end to end with the offline generator.
//!
//! Shows the local estimate table, then the full optimization result for
//! each corridor, then how a model answer with wrong figures is rejected.

use route_optimizer::core::country::Corridor;
use route_optimizer::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  route-optimizer: Corridor Quote Example   ║");
    println!("╚════════════════════════════════════════════╝\n");

    // --- Scenario 1: Local estimate only ---
    println!("━━━ Scenario 1: Local Estimate ━━━\n");

    let corridor = Corridor::new(CountryCode::new("USA"), CountryCode::new("Germany"));
    let figures = RouteEstimate::for_amount(dec!(50_000)).unwrap();
    print!("{}", figures.report(&corridor, dec!(50_000)));

    // --- Scenario 2: Full optimization, offline ---
    println!("\n━━━ Scenario 2: Offline Optimization ━━━\n");

    let optimizer = RouteOptimizer::new(
        Arc::new(OfflineGenerator::new()),
        OptimizerConfig::default().with_corridor_policy(CorridorPolicy::dashboard()),
    );

    for (from, to, amount) in [
        ("USA", "India", dec!(10_000)),
        ("UK", "Singapore", dec!(250_000)),
        ("Germany", "USA", dec!(750)),
    ] {
        match optimizer.optimize_route(from, to, amount).await {
            Ok(result) => println!("{}", result),
            Err(e) => println!("{} → {}: {}", from, to, e),
        }
    }

    // --- Scenario 3: Unsupported corridor ---
    println!("━━━ Scenario 3: Unsupported Corridor ━━━\n");

    match optimizer.optimize_route("USA", "Atlantis", dec!(1_000)).await {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Rejected: {}\n", e.user_message()),
    }

    // --- Scenario 4: Model answer with a wrong cost ---
    println!("━━━ Scenario 4: Rejected Model Answer ━━━\n");

    let generator = CannedGenerator::new().with_value(json!({
        "swift": {"name": "SWIFT", "cost": 530, "time": "2-5 business days",
                  "description": "Correspondent banking."},
        "stablecoin": {"name": "Stablecoin", "cost": 5, "time": "3-10 seconds",
                       "description": "On-chain.", "savingsPercentage": 99},
        "localRail": {"name": "Local Rail", "cost": 260, "time": "1-2 hours",
                      "description": "Domestic rails.", "savingsPercentage": 50.94}
    }));
    let strict = RouteOptimizer::with_defaults(Arc::new(generator));
    match strict.optimize_route("USA", "Germany", dec!(50_000)).await {
        Ok(_) => println!("unexpected success"),
        Err(e) => {
            println!("Internal:  {}", e);
            println!("Shown:     {}", e.user_message());
        }
    }
}
