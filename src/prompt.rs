//! Prompt assembly for the intent-to-command request.

use crate::context::Context;

/// Builds the generation prompt from the intent and directory context.
///
/// Deterministic template substitution. The intent is embedded verbatim;
/// nothing is escaped or validated here. The rule block pushes the model
/// toward exactly one bare shell command, and the sanitizer plus safety
/// filter deal with whatever comes back anyway.
pub fn build_prompt(intent: &str, context: &Context) -> String {
    let file_list = context.file_names.join("\n");
    format!(
        r#"You are a CLI assistant. Turn the user's intent into a single shell command.

Current directory: {}
Files:
{}

User intent: "{}"

STRICT RULES:
- Output ONLY the command itself, nothing else
- NO markdown, NO backticks, NO code blocks
- NO explanations, NO comments, NO alternatives
- ONE single line command only
- Do NOT wrap the command in quotes or backticks"#,
        context.working_directory, file_list, intent
    )
}
