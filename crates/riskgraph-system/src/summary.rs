//! Serializable overview of a system model

use chrono::{DateTime, Utc};
use riskgraph_core::risk::RiskVector;
use serde::{Deserialize, Serialize};

/// Labels, timestamps, validity flags, entity counts and the aggregated risk
/// of a system model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSummary {
    pub system_label: Option<String>,
    pub system_comment: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub domain_version: Option<String>,
    pub domain_label: Option<String>,
    pub is_valid: bool,
    pub risks_valid: bool,
    pub risk_calculation_mode: Option<String>,
    pub has_risk: Option<String>,
    pub assets: usize,
    pub misbehaviour_sets: usize,
    pub threats: usize,
    pub control_strategies: usize,
    pub control_sets: usize,
    pub risk_vector: Option<RiskVector>,
    pub overall_risk_level: Option<String>,
}

impl std::fmt::Display for SystemSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn shown<T: std::fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map_or_else(|| "None".to_string(), T::to_string)
        }

        writeln!(f, "System label:          {}", shown(&self.system_label))?;
        writeln!(f, "System comment:        {}", shown(&self.system_comment))?;
        writeln!(f, "Created:               {}", shown(&self.created))?;
        writeln!(f, "Modified:              {}", shown(&self.modified))?;
        writeln!(f)?;
        writeln!(f, "Domain model:          {}", shown(&self.domain_version))?;
        writeln!(f, "Domain label:          {}", shown(&self.domain_label))?;
        writeln!(f)?;
        writeln!(f, "Is valid:              {}", self.is_valid)?;
        writeln!(f, "Assets:                {}", self.assets)?;
        writeln!(f, "Misbehaviour sets:     {}", self.misbehaviour_sets)?;
        writeln!(f, "Threats:               {}", self.threats)?;
        writeln!(f, "Control strategies:    {}", self.control_strategies)?;
        writeln!(f, "Control sets:          {}", self.control_sets)?;
        writeln!(f)?;
        writeln!(f, "Risks valid:           {}", self.risks_valid)?;
        writeln!(f, "Risk calculation mode: {}", shown(&self.risk_calculation_mode))?;
        writeln!(f, "Has risk:              {}", shown(&self.has_risk))?;
        writeln!(f, "Risk vector:           {}", shown(&self.risk_vector))?;
        write!(f, "Overall risk level:    {}", shown(&self.overall_risk_level))
    }
}
