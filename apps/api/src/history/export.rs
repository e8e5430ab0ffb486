//! Markdown report for a stored match.

use std::fmt::{self, Write};

use crate::matching::models::MatchDetails;

/// Renders a shareable Markdown report of one match result.
pub fn render_markdown(
    job_description: &str,
    details: &MatchDetails,
) -> Result<String, fmt::Error> {
    let mut md = String::new();

    writeln!(md, "# Job Match Report\n")?;
    writeln!(md, "## Compatibility Score\n\n{}\n", details.score)?;
    writeln!(md, "## Job Description\n\n```\n{job_description}\n```\n")?;

    writeln!(md, "## Strengths\n")?;
    for strength in &details.strengths {
        writeln!(md, "* {strength}")?;
    }

    writeln!(md, "\n## Gaps\n")?;
    for gap in &details.gaps {
        writeln!(md, "* {gap}")?;
    }

    writeln!(md, "\n## Recommended Actions\n")?;
    for (index, action) in details.actions.iter().enumerate() {
        writeln!(md, "{}. {action}", index + 1)?;
    }

    writeln!(md, "\n## Summary\n\n> {}", details.summary)?;
    Ok(md)
}
