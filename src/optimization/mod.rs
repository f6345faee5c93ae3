pub mod fees;
pub mod orchestrator;
pub mod response;
pub mod savings;
