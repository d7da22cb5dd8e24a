//! Fixed prompt bodies for tools that bypass the template store

use super::template::{CONTENT_PLACEHOLDER, render_content};

const KEYWORDS: &str = r#"Analyze the following content and extract the most relevant keywords.
Focus on:
- Industry-specific terminology
- Technical concepts
- Marketable terms
- Domain-specific vocabulary
- Trending topics mentioned

Return ONLY a JSON object with the following structure:
{
    "primary_keywords": ["keyword1", "keyword2", "keyword3"],
    "secondary_keywords": ["keyword4", "keyword5", "keyword6"],
    "technical_terms": ["term1", "term2", "term3"],
    "marketable_concepts": ["concept1", "concept2", "concept3"]
}

Content to analyze:
{content}
"#;

const THEMES: &str = r#"Analyze the following content and identify the main themes and topics.
Consider:
- Overall subject matter
- Recurring ideas
- Implied perspectives or worldviews
- Business domains represented
- Philosophical or theoretical frameworks

Return ONLY a JSON object with the following structure:
{
    "primary_theme": "The main overarching theme",
    "secondary_themes": ["theme1", "theme2", "theme3"],
    "business_domains": ["domain1", "domain2"],
    "philosophical_frameworks": ["framework1", "framework2"],
    "summary": "A brief 1-2 sentence summary of the content's thematic elements"
}

Content to analyze:
{content}
"#;

const PROCESSES: &str = r#"Analyze the following content and identify any processes, workflows, or step-by-step instructions.
Focus on:
- Sequential steps or procedures
- Workflows or business processes
- Methodologies described
- Decision trees or branching logic
- Requirements or prerequisites

Return ONLY a JSON object with the following structure:
{
    "identified_processes": [
        {
            "name": "Name of process 1",
            "steps": ["step 1", "step 2", "step 3"],
            "is_complete": true,
            "prerequisites": ["prerequisite 1", "prerequisite 2"],
            "estimated_complexity": "low/medium/high"
        }
    ],
    "workflows": [
        {
            "name": "Name of workflow 1",
            "description": "Brief description",
            "steps": ["step 1", "step 2", "step 3"]
        }
    ],
    "decision_points": [
        {
            "decision": "Decision to make",
            "options": ["option 1", "option 2"],
            "considerations": ["consideration 1", "consideration 2"]
        }
    ]
}

If no clear processes are identified, return an empty array for each category.

Content to analyze:
{content}
"#;

/// Prompts compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlinePrompt {
    Keywords,
    Themes,
    Processes,
}

impl InlinePrompt {
    pub fn body(&self) -> &'static str {
        match self {
            InlinePrompt::Keywords => KEYWORDS,
            InlinePrompt::Themes => THEMES,
            InlinePrompt::Processes => PROCESSES,
        }
    }

    pub fn render(&self, content: &str) -> String {
        render_content(self.body(), content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_body_has_one_placeholder() {
        for prompt in [
            InlinePrompt::Keywords,
            InlinePrompt::Themes,
            InlinePrompt::Processes,
        ] {
            assert_eq!(prompt.body().matches(CONTENT_PLACEHOLDER).count(), 1);
        }
    }

    #[test]
    fn test_render_substitutes_content() {
        let rendered = InlinePrompt::Keywords.render("Rust async runtimes");
        assert!(rendered.ends_with("Rust async runtimes\n"));
        assert!(rendered.contains("\"primary_keywords\""));
        assert!(!rendered.contains(CONTENT_PLACEHOLDER));
    }
}
