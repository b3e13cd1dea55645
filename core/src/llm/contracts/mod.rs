//! Prompt contracts
//!
//! Defines the fixed contract between the model and the auditor.
//! Contract text is interpolated verbatim, never escaped.

mod prompts;

// Public exports
pub use prompts::{analyze_prompt, fix_prompt, ANALYZE_OUTPUT_INSTRUCTION, FIX_OUTPUT_INSTRUCTION};
