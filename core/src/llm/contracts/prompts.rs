//! Analyze and fix prompts
//!
//! Both builders are pure: same input, same prompt.

/// Closing line of the analyze prompt
pub const ANALYZE_OUTPUT_INSTRUCTION: &str =
    "Return ONLY this JSON array, with no extra commentary or text.";

/// Closing line of the fix prompt
pub const FIX_OUTPUT_INSTRUCTION: &str = "Return ONLY the corrected Solidity code.";

const AUDIT_SCHEMA: &str = r#"[
  {
    "section": "Audit Report",
    "details": "A detailed audit report of the smart contract, covering security, performance, and any other relevant aspects."
  },
  {
    "section": "Metric Scores",
    "details": [
      { "metric": "Security", "score": 0-10 },
      { "metric": "Performance", "score": 0-10 },
      { "metric": "Other Key Areas", "score": 0-10 },
      { "metric": "Gas Efficiency", "score": 0-10 },
      { "metric": "Code Quality", "score": 0-10 },
      { "metric": "Documentation", "score": 0-10 }
    ]
  },
  {
    "section": "Suggestions for Improvement",
    "details": "Suggestions for improving the smart contract in terms of security, performance, and any other identified weaknesses."
  }
]"#;

/// Build the audit prompt
///
/// Asks for the three-section JSON array described by `AuditResult`.
pub fn analyze_prompt(contract: &str) -> String {
    format!(
        "Your role and goal is to be an AI Smart Contract Auditor.
Your job is to perform an audit on the given smart contract.

Here is the smart contract:
{contract}

Please provide the results in the following array JSON format for easy front-end display:

{schema}

{instruction}
",
        schema = AUDIT_SCHEMA,
        instruction = ANALYZE_OUTPUT_INSTRUCTION,
    )
}

/// Build the fix prompt
pub fn fix_prompt(contract: &str, suggestions: &str) -> String {
    format!(
        "Here is the smart contract with the following issues: {suggestions}.
Please provide a fixed version of the contract:

{contract}

{instruction}",
        instruction = FIX_OUTPUT_INSTRUCTION,
    )
}
