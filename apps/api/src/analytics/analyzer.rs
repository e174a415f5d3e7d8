//! Resume Analyzer: pure keyword comparison between resume text and a job's
//! requirement list. No model call; deterministic and fully testable.
//!
//! Algorithm:
//! 1. Tokenize both sides: lowercase, runs of non-alphanumerics become separators.
//! 2. A requirement is matched when any one of its tokens occurs in the resume.
//! 3. score = round(matched / total × 100), 0 when the job lists no requirements.
//! 4. Each missing requirement gets learning resources keyed by its first token.

use std::collections::HashSet;

use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillSuggestion {
    pub skill: String,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeAnalysis {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub score: u32, // 0 – 100
    pub suggestions: Vec<SkillSuggestion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Static learning resources
// ────────────────────────────────────────────────────────────────────────────

const SKILL_RESOURCES: &[(&str, &[Resource])] = &[
    (
        "javascript",
        &[
            Resource {
                title: "MDN JavaScript Guide",
                url: "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide",
            },
            Resource {
                title: "FreeCodeCamp JS",
                url: "https://www.freecodecamp.org/learn/javascript-algorithms-and-data-structures/",
            },
        ],
    ),
    (
        "react",
        &[
            Resource {
                title: "React Official Docs",
                url: "https://react.dev/learn",
            },
            Resource {
                title: "Scrimba React Course",
                url: "https://scrimba.com/learn/learnreact",
            },
        ],
    ),
    (
        "node",
        &[Resource {
            title: "Node.js Guide",
            url: "https://nodejs.org/en/learn",
        }],
    ),
    (
        "python",
        &[Resource {
            title: "Python Official Tutorial",
            url: "https://docs.python.org/3/tutorial/",
        }],
    ),
];

pub fn resources_for(key: &str) -> Vec<Resource> {
    SKILL_RESOURCES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, resources)| resources.to_vec())
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Lowercases and splits on anything that is not an ASCII letter or digit.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

pub fn analyze_resume(resume_text: &str, requirements: &[String]) -> ResumeAnalysis {
    let resume_tokens: HashSet<String> = tokenize(resume_text).into_iter().collect();

    let (matched, missing): (Vec<String>, Vec<String>) = requirements
        .iter()
        .cloned()
        .partition(|req| tokenize(req).iter().any(|t| resume_tokens.contains(t)));

    let score = if requirements.is_empty() {
        0
    } else {
        (matched.len() as f64 / requirements.len() as f64 * 100.0).round() as u32
    };

    let suggestions = missing
        .iter()
        .map(|skill| {
            let key = tokenize(skill)
                .into_iter()
                .next()
                .unwrap_or_else(|| skill.to_lowercase());
            SkillSuggestion {
                skill: skill.clone(),
                resources: resources_for(&key),
            }
        })
        .collect();

    ResumeAnalysis {
        matched,
        missing,
        score,
        suggestions,
    }
}
