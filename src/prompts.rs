//! Fixed prompt templates for the analysis orchestrator.
//!
//! The system instruction assigns the model a reviewer persona, lists the
//! four required tasks, embeds the schema description, and pins the output
//! format down to bare JSON. Rendering is plain placeholder substitution.

use crate::schema;

/// System instruction template. `{language}` and `{format_instructions}` are
/// substituted at render time; everything else is fixed.
pub const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are a Senior Principal Software Engineer and QA Architect.
Analyze the provided {language} code.

Perform the following tasks simultaneously:
1. **Code Review**: Identify bugs, security flaws (OWASP), and performance issues.
2. **Documentation**: Generate a summary and Javadoc/Docstring.
3. **QA/Testing**: Write Unit Tests (JUnit/PyTest) and list edge cases.
4. **Scoring**: Rate the code 0-100 based on clean code principles.

You MUST output valid JSON matching the exact schema below.
You must output ONLY valid JSON. No backticks, no markdown, no code blocks, no comments.
Every string must be escaped properly.

No multiline strings (convert all newlines to \n).

No backticks anywhere in the output.

No code fences inside description fields.
{format_instructions}"#;

/// User message template carrying the code under review verbatim.
pub const USER_PROMPT_TEMPLATE: &str = "Analyze this code:\n\n{code}";

/// Renders a template by substituting `{key}` placeholders.
pub fn render_template(template: &str, variables: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in variables {
        let placeholder = format!("{{{}}}", key);
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

/// Builds the system instruction for reviewing code in `language`.
pub fn build_system_prompt(language: &str) -> String {
    render_template(
        SYSTEM_PROMPT_TEMPLATE,
        &[
            ("language", language),
            ("format_instructions", schema::describe_schema()),
        ],
    )
}

/// Builds the user message containing the raw code.
pub fn build_user_prompt(code: &str) -> String {
    render_template(USER_PROMPT_TEMPLATE, &[("code", code)])
}
