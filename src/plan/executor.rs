//! Plan executor
//!
//! Runs plan steps strictly in order, one at a time, and applies the
//! continue-on-failure policy.

use std::any::Any;
use std::future::Future;

use log::{error, info, warn};
use serde_json::Value;

use crate::error::{PlanError, StepError};
use crate::plan::{Step, StepResult};
use crate::storage::{handle_copy, handle_delete, handle_mkdir, handle_move};

/// Executes a raw JSON plan.
///
/// Fails with `PlanError::InvalidPlan` only when `plan` is not an array; every
/// per-step problem becomes a failed `StepResult` at that step's index.
pub async fn execute(plan: &Value, continue_on_fail: bool) -> Result<Vec<StepResult>, PlanError> {
    let entries = plan
        .as_array()
        .ok_or_else(|| PlanError::InvalidPlan(json_type_name(plan).to_string()))?;

    Ok(run_all(entries.iter().map(Step::decode), continue_on_fail).await)
}

/// Executes already-decoded steps with the same policy as `execute`
pub async fn execute_steps(steps: &[Step], continue_on_fail: bool) -> Vec<StepResult> {
    run_all(steps.iter().cloned().map(Ok), continue_on_fail).await
}

async fn run_all<I>(steps: I, continue_on_fail: bool) -> Vec<StepResult>
where
    I: IntoIterator<Item = Result<Step, StepError>>,
{
    let steps = steps.into_iter();
    let mut results = Vec::with_capacity(steps.size_hint().0);
    info!("Running plan (continue on fail: {})", continue_on_fail);

    for (index, decoded) in steps.enumerate() {
        let result = match decoded {
            Ok(step) => run_step(index, step).await,
            Err(e) => {
                warn!("Rejected step #{}: {}", index + 1, e);
                StepResult::failure(index, e.to_string())
            }
        };

        let failed = !result.ok;
        results.push(result);

        if failed && !continue_on_fail {
            warn!("Stopping plan after failed step #{}", index + 1);
            break;
        }
    }

    let succeeded = results.iter().filter(|r| r.ok).count();
    info!(
        "Plan finished: {}/{} attempted steps succeeded",
        succeeded,
        results.len()
    );
    results
}

/// Runs one step inside its own task so a panicking handler is reported as a
/// failed result instead of tearing down the plan.
pub async fn run_step(index: usize, step: Step) -> StepResult {
    let kind = step.kind();
    guarded(index, kind, dispatch(index, step)).await
}

async fn guarded<F>(index: usize, kind: &str, work: F) -> StepResult
where
    F: Future<Output = StepResult> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(result) => result,
        Err(e) => {
            let detail = if e.is_panic() {
                panic_message(e.into_panic())
            } else {
                e.to_string()
            };
            error!("Step #{} ({}) aborted: {}", index + 1, kind, detail);
            StepResult::failure(index, StepError::Unexpected(detail).to_string())
        }
    }
}

async fn dispatch(index: usize, step: Step) -> StepResult {
    match step {
        Step::Mkdir(s) => handle_mkdir(index, s).await,
        Step::Copy(s) => handle_copy(index, s).await,
        Step::Move(s) => handle_move(index, s).await,
        Step::Delete(s) => handle_delete(index, s).await,
    }
}

fn panic_message(payload: Box<dyn Any + Send + 'static>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_readable() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new(String::from("bang"))), "bang");
        assert_eq!(panic_message(Box::new(42u8)), "handler panicked");
    }

    async fn exploding_handler(_index: usize) -> StepResult {
        panic!("disk on fire")
    }

    #[tokio::test]
    async fn panicking_handler_becomes_failed_result() {
        let result = guarded(3, "copy", exploding_handler(3)).await;
        assert_eq!(result.index, 3);
        assert!(!result.ok);
        assert_eq!(result.message, "unexpected error: disk on fire");

        let result = guarded(4, "mkdir", async { StepResult::success(4, "mkdir OK: /a") }).await;
        assert!(result.ok);
        assert_eq!(result.message, "mkdir OK: /a");
    }

    #[tokio::test]
    async fn non_array_plan_is_rejected() {
        let err = execute(&serde_json::json!({"kind": "mkdir"}), false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "plan must be an array, got an object");
    }
}
