//! Placeholder note content used when note generation fails.
//!
//! One fixed template per source type, with the note title substituted into
//! the summary. No I/O, no clock: the same title always yields the same
//! content.

use studyhub_core::{
    Definition, Importance, KeyPoint, NoteContent, NoteSection, Quote, SourceType, Timestamp,
};

fn key_point(
    n: usize,
    text: &str,
    importance: Importance,
    timestamp: Option<&str>,
    page_reference: Option<&str>,
) -> KeyPoint {
    KeyPoint {
        id: format!("kp-{}", n),
        text: text.to_string(),
        importance,
        timestamp: timestamp.map(str::to_string),
        page_reference: page_reference.map(str::to_string),
    }
}

fn definition(term: &str, definition: &str) -> Definition {
    Definition {
        term: term.to_string(),
        definition: definition.to_string(),
    }
}

fn section(id: &str, title: &str, content: &str, timestamp: Option<&str>) -> NoteSection {
    NoteSection {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        timestamp: timestamp.map(str::to_string),
        subsections: Vec::new(),
    }
}

fn quote(n: usize, text: &str, source: &str, page_reference: &str) -> Quote {
    Quote {
        id: format!("quote-{}", n),
        text: text.to_string(),
        source: source.to_string(),
        timestamp: None,
        page_reference: Some(page_reference.to_string()),
    }
}

/// Placeholder content for `source_type`, templated with `title`.
pub fn placeholder_notes(source_type: SourceType, title: &str) -> NoteContent {
    match source_type {
        SourceType::Video => video_notes(title),
        SourceType::Article => article_notes(title),
        SourceType::Document => document_notes(title),
    }
}

fn video_notes(title: &str) -> NoteContent {
    let mut fundamentals = section(
        "sec-2",
        "Fundamental Concepts",
        "The core concepts build on each other, starting with the basic principles and moving toward how they relate in practice.",
        Some("2:15"),
    );
    fundamentals.subsections = vec![
        section(
            "sec-2-1",
            "Basic Principles",
            "The foundational rules that everything else in the topic relies on.",
            Some("3:00"),
        ),
        section(
            "sec-2-2",
            "Key Relationships",
            "How the individual concepts connect and influence one another.",
            Some("5:30"),
        ),
    ];

    NoteContent {
        summary: format!(
            "Comprehensive overview of {} covering fundamental concepts, practical applications, and key insights. The video provides structured learning with clear explanations and real-world examples.",
            title
        ),
        key_points: vec![
            key_point(1, "Introduction to core concepts and foundational principles", Importance::High, Some("2:15"), None),
            key_point(2, "Practical applications and real-world use cases", Importance::High, Some("8:30"), None),
            key_point(3, "Advanced techniques and optimization strategies", Importance::Medium, Some("15:45"), None),
            key_point(4, "Common pitfalls and how to avoid them", Importance::Medium, Some("22:10"), None),
        ],
        definitions: vec![
            definition("Key Concept", "A fundamental idea that underpins the rest of the material."),
            definition("Implementation", "The practical application of a concept to solve a concrete problem."),
        ],
        timestamps: Some(
            [
                ("0:00", "Introduction and overview"),
                ("2:15", "Core concepts explanation"),
                ("8:30", "Practical applications"),
                ("15:45", "Advanced techniques"),
                ("22:10", "Common mistakes"),
                ("28:00", "Summary and conclusion"),
            ]
            .iter()
            .map(|(time, description)| Timestamp {
                time: time.to_string(),
                description: description.to_string(),
            })
            .collect(),
        ),
        quotes: None,
        sections: vec![
            section(
                "sec-1",
                "Introduction",
                "The video opens with an overview of the topic and what the viewer will learn.",
                Some("0:00"),
            ),
            fundamentals,
            section(
                "sec-3",
                "Practical Applications",
                "Worked examples show how the concepts are applied to real problems.",
                Some("8:30"),
            ),
            section(
                "sec-4",
                "Advanced Topics",
                "Techniques for going further once the fundamentals are in place.",
                Some("15:45"),
            ),
        ],
    }
}

fn article_notes(title: &str) -> NoteContent {
    NoteContent {
        summary: format!(
            "Detailed analysis of {} with key insights, supporting evidence, and practical implications. The article provides comprehensive coverage of the topic with well-researched content.",
            title
        ),
        key_points: vec![
            key_point(1, "Main thesis and central argument of the article", Importance::High, None, Some("Page 1")),
            key_point(2, "Supporting evidence and research findings", Importance::High, None, Some("Page 2-3")),
            key_point(3, "Practical implications and applications", Importance::Medium, None, Some("Page 4")),
            key_point(4, "Future research directions and open questions", Importance::Low, None, Some("Page 5")),
        ],
        definitions: vec![
            definition("Technical Term", "A domain-specific term introduced and used throughout the article."),
            definition("Methodology", "The approach the author uses to gather and analyse evidence."),
        ],
        timestamps: None,
        quotes: Some(vec![
            quote(
                1,
                "The evidence consistently points toward a clearer understanding of the underlying principles.",
                "Author Name",
                "Page 2",
            ),
            quote(
                2,
                "Applying these insights in practice requires careful attention to context.",
                "Author Name",
                "Page 4",
            ),
        ]),
        sections: vec![
            section("sec-1", "Introduction", "Background and the question the article sets out to answer.", None),
            section("sec-2", "Literature Review", "Prior work the article builds on and where it departs from it.", None),
            section("sec-3", "Methodology", "How the evidence was gathered and evaluated.", None),
            section("sec-4", "Results and Discussion", "What the evidence shows and how it should be interpreted.", None),
            section("sec-5", "Conclusion", "The main takeaways and their implications.", None),
        ],
    }
}

fn document_notes(title: &str) -> NoteContent {
    NoteContent {
        summary: format!(
            "Comprehensive analysis of {} with detailed examination of key concepts, methodologies, and findings. The document provides in-depth coverage with supporting data and references.",
            title
        ),
        key_points: vec![
            key_point(1, "Research objectives and scope of the document", Importance::High, None, Some("Page 1-2")),
            key_point(2, "Methodology and data collection approach", Importance::High, None, Some("Page 3-5")),
            key_point(3, "Key findings and statistical results", Importance::High, None, Some("Page 6-8")),
            key_point(4, "Conclusions and recommendations", Importance::Medium, None, Some("Page 9-10")),
        ],
        definitions: vec![
            definition("Research Variable", "A measurable characteristic that the study observes or manipulates."),
            definition("Statistical Significance", "The likelihood that a result is not due to chance alone."),
        ],
        timestamps: None,
        quotes: Some(vec![quote(
            1,
            "The results demonstrate a significant relationship between the studied variables.",
            "Research Team",
            "Page 7",
        )]),
        sections: vec![
            section("sec-1", "Abstract", "A condensed summary of the document's purpose and findings.", None),
            section("sec-2", "Introduction", "Context and motivation for the work.", None),
            section("sec-3", "Methodology", "Study design, data sources and analysis methods.", None),
            section("sec-4", "Results", "The measured outcomes with supporting data.", None),
            section("sec-5", "Discussion", "Interpretation of the results and their limitations.", None),
            section("sec-6", "Conclusion", "Final conclusions and suggested next steps.", None),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyhub_core::defaults::NOTE_SECTION_DEPTH;

    #[test]
    fn test_summary_contains_title() {
        for source in [SourceType::Video, SourceType::Article, SourceType::Document] {
            let notes = placeholder_notes(source, "Graph Theory Basics");
            assert!(notes.summary.contains("Graph Theory Basics"));
            assert!(!notes.key_points.is_empty());
        }
    }

    #[test]
    fn test_video_carries_timestamps_not_quotes() {
        let notes = placeholder_notes(SourceType::Video, "x");
        assert_eq!(notes.timestamps.as_ref().map(Vec::len), Some(6));
        assert!(notes.quotes.is_none());
        assert!(notes.key_points.iter().all(|kp| kp.timestamp.is_some()));
    }

    #[test]
    fn test_article_and_document_carry_quotes() {
        let article = placeholder_notes(SourceType::Article, "x");
        assert_eq!(article.quotes.as_ref().map(Vec::len), Some(2));
        assert!(article.timestamps.is_none());

        let document = placeholder_notes(SourceType::Document, "x");
        assert_eq!(document.quotes.as_ref().map(Vec::len), Some(1));
        assert_eq!(document.sections.len(), 6);
    }

    #[test]
    fn test_sections_within_depth() {
        let notes = placeholder_notes(SourceType::Video, "x");
        assert!(notes.sections.iter().all(|s| s.depth() <= NOTE_SECTION_DEPTH));
        assert_eq!(notes.sections[1].subsections.len(), 2);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            placeholder_notes(SourceType::Article, "Same"),
            placeholder_notes(SourceType::Article, "Same")
        );
    }
}
