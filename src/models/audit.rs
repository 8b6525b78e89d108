//! Audit records for discount rule applications.
//!
//! Every rule returns an [`AuditStep`] describing what it looked at and what
//! it changed. Applying a sequence of rules collects the steps into an
//! [`AuditTrace`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in the audit trace recording a rule decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use discount_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "seasonal_discount".to_string(),
///     rule_name: "Seasonal Discount".to_string(),
///     applied: false,
///     input: serde_json::json!({ "season": "spring" }),
///     output: serde_json::json!({ "total_price": "200" }),
///     reasoning: "Season 'spring' is not 'holiday'".to_string(),
/// };
/// assert!(!step.applied);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Whether the rule changed the cart.
    pub applied: bool,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a sequence of rule applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Unique identifier for this run.
    pub trace_id: Uuid,
    /// When the rules were applied.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that applied the rules.
    pub engine_version: String,
    /// The cart's recorded total before the first rule.
    pub total_before: Decimal,
    /// The cart's recorded total after the last rule.
    pub total_after: Decimal,
    /// The sequence of rule steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// Number of steps that changed the cart.
    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|step| step.applied).count()
    }
}
