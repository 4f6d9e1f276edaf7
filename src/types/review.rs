use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Incoming analysis request as submitted by client tools (IDE plugins, CI).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisRequest {
    pub filename: String,
    /// Source code to analyze. Must be non-empty after trimming; enforced at
    /// the HTTP boundary, not by the orchestrator.
    pub content: String,
    pub language: String,
}

// ============================================================================
// Analysis response schema
//
// These types are the single canonical definition of the model's output
// contract: serde validates incoming JSON against them, and the JsonSchema
// derive turns the doc comments into the per-field descriptions embedded in
// the prompt's format instructions.
// ============================================================================

/// Category of a review issue
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum IssueType {
    Bug,
    Security,
    Performance,
    Style,
}

/// Severity level of a review issue
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A single issue found during code review
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ReviewIssue {
    /// Category: Bug, Security, Performance, Style
    pub r#type: IssueType,
    /// Line number where the issue occurs
    pub line: u32,
    pub description: String,
    pub suggestion: String,
    /// Severity level: LOW, MEDIUM, HIGH
    pub severity: Severity,
}

/// Generated documentation for the analyzed code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct Documentation {
    /// High-level summary of the code
    pub summary: String,
    /// Javadoc/Docstring for the functions
    pub function_docs: String,
    /// Technical notes on patterns used
    pub developer_notes: String,
}

/// Generated test material for the analyzed code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct TestCases {
    /// Actual code for unit tests (JUnit/PyTest)
    pub unit_tests: String,
    /// List of edge cases to test
    pub edge_cases: Vec<String>,
    /// Risk analysis for QA
    pub risk_assessment: String,
}

/// Quality rating of the analyzed code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct QualityScore {
    /// Textual rating of cyclomatic complexity
    pub cyclomatic_complexity: String,
    pub maintainability_index: i64,
    pub security_risk: String,
    /// Overall score 0-100
    pub final_score: i64,
}

/// Complete analysis result returned to the caller. Produced fresh per
/// request by parsing the model's output; never mutated after construction.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct AnalysisResponse {
    pub review: Vec<ReviewIssue>,
    pub documentation: Documentation,
    pub test_cases: TestCases,
    pub quality_score: QualityScore,
}
