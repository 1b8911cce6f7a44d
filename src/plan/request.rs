//! Plan requests
//!
//! The invocation envelope `{ "plan": [...], "continueOnFail": bool }` and the
//! boundary that always turns it into a well-formed result sequence.

use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlanError;
use crate::plan::executor::execute;
use crate::plan::{Step, StepResult};

/// A plan submitted for execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub plan: Value,
    #[serde(
        rename = "continueOnFail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub continue_on_fail: Option<bool>,
}

impl PlanRequest {
    /// Build a request from typed steps
    pub fn from_steps(steps: &[Step], continue_on_fail: bool) -> Result<Self, PlanError> {
        let plan = serde_json::to_value(steps).map_err(|e| PlanError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            plan,
            continue_on_fail: Some(continue_on_fail),
        })
    }

    /// Parse a request document.
    ///
    /// Accepts the full envelope or, for convenience, a bare array of steps.
    pub fn parse(raw: &str) -> Result<Self, PlanError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| PlanError::InvalidRequest(e.to_string()))?;

        match value {
            Value::Array(_) => Ok(Self {
                plan: value,
                continue_on_fail: None,
            }),
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|e| PlanError::InvalidRequest(e.to_string()))
            }
            _ => Err(PlanError::InvalidRequest(
                "expected an object with a `plan` field".into(),
            )),
        }
    }

    /// Steps of the plan, empty when `plan` is not an array
    pub fn entries(&self) -> &[Value] {
        self.plan.as_array().map(Vec::as_slice).unwrap_or_default()
    }

    /// Effective policy: the request's flag, else `default`
    pub fn continue_on_fail_or(&self, default: bool) -> bool {
        self.continue_on_fail.unwrap_or(default)
    }
}

/// Runs a request, converting a plan-level failure into a one-element result
pub async fn run_request(request: &PlanRequest, continue_on_fail: bool) -> Vec<StepResult> {
    match execute(&request.plan, continue_on_fail).await {
        Ok(results) => results,
        Err(e) => failed_request(e),
    }
}

/// Parses and runs a raw request document; never fails
pub async fn run_request_json(raw: &str) -> Vec<StepResult> {
    match PlanRequest::parse(raw) {
        Ok(request) => {
            let continue_on_fail = request.continue_on_fail_or(false);
            run_request(&request, continue_on_fail).await
        }
        Err(e) => failed_request(e),
    }
}

fn failed_request(e: PlanError) -> Vec<StepResult> {
    error!("Plan execution error: {}", e);
    vec![StepResult::failure(0, format!("execution error: {}", e))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_envelope_and_bare_array() {
        let request = PlanRequest::parse(r#"{"plan": [], "continueOnFail": true}"#).unwrap();
        assert_eq!(request.continue_on_fail, Some(true));
        assert!(request.entries().is_empty());

        let request = PlanRequest::parse(r#"[{"kind": "mkdir", "path": "/a"}]"#).unwrap();
        assert_eq!(request.continue_on_fail, None);
        assert_eq!(request.entries().len(), 1);
        assert!(!request.continue_on_fail_or(false));
    }

    #[test]
    fn rejects_scalars_and_garbage() {
        assert!(PlanRequest::parse("42").is_err());
        assert!(PlanRequest::parse("{not json").is_err());
        assert!(PlanRequest::parse(r#"{"continueOnFail": true}"#).is_err());
    }

    #[test]
    fn typed_steps_round_into_envelope() {
        let steps = vec![Step::Mkdir(crate::plan::MkdirStep {
            path: "/a".into(),
            recursive: true,
        })];
        let request = PlanRequest::from_steps(&steps, false).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "plan": [{"kind": "mkdir", "path": "/a", "recursive": true}],
                "continueOnFail": false
            })
        );
    }
}
