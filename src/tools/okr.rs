//! OKR guidelines lookup.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::Result;

use super::{Tool, ToolContext};

/// The company's guidelines for writing Objectives and Key Results.
pub const OKR_GUIDELINES: &str = "\
# OKR Guidelines (Practical AI Corp)

1. **Objective**: What do you want to achieve? (Qualitative, Inspirational, Time-bound)
2. **Key Results**: How will we know we've achieved it? (Quantitative, Measurable, 3-5 per Objective)

**Best Practices:**
- KRs should be outcomes, not tasks.
- Avoid binary KRs (Done/Not Done) where possible.
- Stretch goals are encouraged (expect 70% completion).

**Format Example:**
**Objective:** Improve the reliability of the payment processing system.
**KR 1:** Reduce 5xx error rate from 1% to 0.1%.
**KR 2:** Increase unit test coverage from 60% to 85%.
";

/// Returns [`OKR_GUIDELINES`]. Takes no arguments.
///
/// # Example
/// ```rust
/// use reactlab::tools::{Tool, ToolContext};
/// use reactlab::tools::okr::OkrGuidelinesTool;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let text = OkrGuidelinesTool.execute(json!({}), &ToolContext::new()).await.unwrap();
/// assert!(text.contains("Key Results"));
/// # });
/// ```
pub struct OkrGuidelinesTool;

#[async_trait]
impl Tool for OkrGuidelinesTool {
    fn name(&self) -> &str {
        "get_okr_guidelines"
    }

    fn description(&self) -> &str {
        "Get the official guidelines for writing OKRs."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _args: Value, _ctx: &ToolContext) -> Result<String> {
        Ok(OKR_GUIDELINES.to_string())
    }
}
