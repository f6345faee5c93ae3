//! In-memory business data behind the team assistant's tools.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFeedback {
    pub client_id: String,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPerformanceMetrics {
    pub total_clients: u64,
    pub total_volume_processed: u64,
    pub average_savings: f64,
    pub latest_client_feedback: Vec<ClientFeedback>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueFigures {
    pub total_fees_collected: u64,
    pub projected_revenue: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenuePeriod {
    Daily,
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

/// A tool the team assistant may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    PendingTasks,
    ClientPerformanceMetrics,
    RevenueFigures,
}

impl Tool {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "getPendingTasks" => Some(Tool::PendingTasks),
            "getClientPerformanceMetrics" => Some(Tool::ClientPerformanceMetrics),
            "getRevenueFigures" => Some(Tool::RevenueFigures),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::PendingTasks => "getPendingTasks",
            Tool::ClientPerformanceMetrics => "getClientPerformanceMetrics",
            Tool::RevenueFigures => "getRevenueFigures",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingTasksArgs {
    assigned_to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RevenueArgs {
    period: Option<RevenuePeriod>,
}

/// Read-only mock data for the team assistant.
#[derive(Debug, Clone)]
pub struct Toolbox {
    tasks: Vec<Task>,
    feedback: Vec<ClientFeedback>,
}

impl Default for Toolbox {
    fn default() -> Self {
        Self::sample()
    }
}

impl Toolbox {
    pub fn new(tasks: Vec<Task>, feedback: Vec<ClientFeedback>) -> Self {
        Self { tasks, feedback }
    }

    /// The demo data set.
    pub fn sample() -> Self {
        let task = |id: &str, title: &str, status: TaskStatus, due: &str| Task {
            task_id: id.to_string(),
            title: title.to_string(),
            status,
            due_date: due.to_string(),
        };
        let feedback = |id: &str, rating: u8, comment: &str| ClientFeedback {
            client_id: id.to_string(),
            rating,
            comment: comment.to_string(),
        };

        Self::new(
            vec![
                task("1", "Integrate Solana mainnet", TaskStatus::Pending, "Tomorrow"),
                task("2", "Client KYC verification for Acme Corp", TaskStatus::Completed, "Yesterday"),
                task("3", "Update stablecoin rates API", TaskStatus::Pending, "Friday"),
                task("4", "Review Q1 financial report", TaskStatus::Pending, "End of week"),
                task("5", "Onboard new client Global Logistics", TaskStatus::Completed, "Last week"),
            ],
            vec![
                feedback("client1", 5, "Excellent service, very fast transfers!"),
                feedback("client2", 4, "Good savings, but customer support can be slow sometimes."),
                feedback("client3", 5, "FLUX is a game-changer for international payments."),
            ],
        )
    }

    /// Pending tasks, narrowed to those whose title mentions `assigned_to`
    /// or whose id equals it.
    pub fn pending_tasks(&self, assigned_to: Option<&str>) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .filter(|t| match assigned_to {
                Some(who) => t.title.contains(who) || t.task_id == who,
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Aggregate metrics. A specific client id currently yields the aggregate too.
    pub fn client_performance_metrics(&self, _client_id: Option<&str>) -> ClientPerformanceMetrics {
        ClientPerformanceMetrics {
            total_clients: 1_200,
            total_volume_processed: 1_200_000_000,
            average_savings: 32.0,
            latest_client_feedback: self.feedback.iter().take(3).cloned().collect(),
        }
    }

    pub fn revenue_figures(&self, period: RevenuePeriod) -> RevenueFigures {
        let (total_fees_collected, projected_revenue) = match period {
            RevenuePeriod::Daily => (15_000, 17_000),
            RevenuePeriod::Monthly => (450_000, 500_000),
            RevenuePeriod::Quarterly => (1_350_000, 1_500_000),
            RevenuePeriod::Annually => (5_400_000, 6_000_000),
        };
        RevenueFigures {
            total_fees_collected,
            projected_revenue,
        }
    }

    /// Run a tool with JSON arguments and return its JSON result.
    ///
    /// Missing or null arguments mean "no filter"; arguments of the wrong
    /// type are an error.
    pub fn invoke(&self, tool: Tool, arguments: &Value) -> Result<Value, serde_json::Error> {
        let args = if arguments.is_null() {
            Value::Object(Default::default())
        } else {
            arguments.clone()
        };
        match tool {
            Tool::PendingTasks => {
                let args: PendingTasksArgs = serde_json::from_value(args)?;
                serde_json::to_value(self.pending_tasks(args.assigned_to.as_deref()))
            }
            Tool::ClientPerformanceMetrics => {
                let client_id = args.get("clientId").and_then(Value::as_str);
                serde_json::to_value(self.client_performance_metrics(client_id))
            }
            Tool::RevenueFigures => {
                let args: RevenueArgs = serde_json::from_value(args)?;
                serde_json::to_value(self.revenue_figures(args.period.unwrap_or_default()))
            }
        }
    }
}
