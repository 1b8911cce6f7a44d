//! Plain-text rendering of plans and results for terminal output.

use serde_json::Value;

use crate::plan::{Step, StepResult};

/// One numbered line per plan entry, `#1 [mkdir] /tmp/a (recursive)`
pub fn render_plan(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match Step::decode(entry) {
            Ok(step) => format!("#{} {}", i + 1, step),
            Err(e) => format!("#{} [invalid] {}", i + 1, e),
        })
        .collect()
}

/// `OK  #1 message` or `ERR #2 message`, numbered from 1
pub fn render_result(result: &StepResult) -> String {
    let status = if result.ok { "OK " } else { "ERR" };
    format!("{} #{} {}", status, result.index + 1, result.message)
}
