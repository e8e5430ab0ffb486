// Prompt text for resume / job description compatibility scoring.
// Inputs are embedded verbatim; identical inputs always render the same prompt.

/// Required reply schema shown to the model.
pub const MATCH_SCHEMA_BLOCK: &str = r#"```json
{
    "score": <number between 0-100 representing overall compatibility>,
    "strengths": [
        "<specific skill or qualification from the resume that matches the job>",
        "<another strength, be specific and reference actual content>"
    ],
    "gaps": [
        "<specific skill or qualification missing from the resume but required in the job>",
        "<another gap, be specific and actionable>"
    ],
    "actions": [
        "<specific, actionable recommendation to improve alignment>",
        "<another recommendation with concrete steps>"
    ],
    "summary": "<motivational insight that acknowledges strengths while encouraging growth in a supportive tone>"
}
```"#;

/// Per-field cardinality guidance appended after the schema.
pub const MATCH_FIELD_RULES: &str = "\
Ensure your response is valid JSON and follows this exact structure.
For strengths: Focus on 3-5 specific qualifications that align well with the job requirements.
For gaps: Identify 2-4 key missing qualifications or experience areas.
For actions: Provide 3-5 specific, actionable recommendations the candidate can take to improve their alignment.
For summary: Write an encouraging 2-3 sentence summary that reflects empathy and clarity.
For score: Use a whole number from 0 to 100.";

/// Renders the compatibility prompt. No placeholder substitution is done on the
/// inputs, so text that looks like a template marker is preserved as-is.
pub fn build_match_prompt(resume: &str, job_description: &str) -> String {
    format!(
        "You are an expert career coach and talent assessor. \
Compare the resume and job description below.\n\
\n\
Resume:\n\
{resume}\n\
\n\
Job Description:\n\
{job_description}\n\
\n\
Provide a comprehensive analysis in the following JSON format:\n\
\n\
{MATCH_SCHEMA_BLOCK}\n\
\n\
{MATCH_FIELD_RULES}\n"
    )
}
