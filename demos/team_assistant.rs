//! Ask the team and client assistants a few questions offline.

use route_optimizer::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  route-optimizer: Assistant Example        ║");
    println!("╚════════════════════════════════════════════╝\n");

    let generator: Arc<dyn StructuredGenerator> = Arc::new(OfflineGenerator::new());

    println!("━━━ Team Assistant ━━━\n");
    let team = TeamAssistant::new(Arc::clone(&generator), Toolbox::sample());
    for question in [
        "Which tasks are still pending?",
        "How are client metrics looking?",
        "What is our quarterly revenue?",
        "Where should we go for lunch?",
    ] {
        println!("Q: {}", question);
        match team.ask(question).await {
            Ok(reply) => {
                if let Some(tool) = &reply.tool {
                    println!("   [{}]", tool);
                }
                println!("A: {}\n", reply.answer);
            }
            Err(e) => println!("A: {}\n", e.user_message()),
        }
    }

    println!("━━━ Client Assistant ━━━\n");
    let client = ClientAssistant::new(generator);
    for question in ["Why is stablecoin cheaper than SWIFT?", "   "] {
        println!("Q: {:?}", question);
        match client.ask(question).await {
            Ok(answer) => println!("A: {}\n", answer),
            Err(e) => println!("A: {}\n", e.user_message()),
        }
    }
}
