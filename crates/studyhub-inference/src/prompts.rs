//! Prompt templates for the generation adapters.
//!
//! Every builder is a pure function of its arguments, so the same topic
//! always produces the same prompt.

use studyhub_core::{NoteRequest, QuizLevel, SearchTopic, SourceType};

/// System instruction shared by all generation prompts.
pub const JSON_ONLY_SYSTEM: &str = "You are an expert educator who writes study material. \
Respond with valid JSON only, no prose and no Markdown fences.";

/// Upper bound on source text embedded in an article prompt.
pub const MAX_SOURCE_CHARS: usize = 12_000;

/// Build the quiz prompt.
pub fn quiz_prompt(topic: &SearchTopic, level: QuizLevel, question_count: usize) -> String {
    format!(
        r#"Write a {level} level multiple-choice quiz about "{topic}".

Return a JSON object of this exact shape:
{{"questions": [{{"question": "...", "options": ["...", "...", "...", "..."], "correctAnswer": 0, "explanation": "..."}}]}}

Rules:
- Exactly {count} questions.
- Every question has exactly 4 distinct, non-empty options.
- "correctAnswer" is the 0-based index of the correct option (0 to 3).
- "explanation" says in one or two sentences why the answer is correct."#,
        level = level.as_str(),
        topic = topic,
        count = question_count,
    )
}

/// Build the flashcard prompt.
pub fn flashcard_prompt(topic: &SearchTopic, card_count: usize) -> String {
    format!(
        r#"Write study flashcards about "{topic}".

Return a JSON object of this exact shape:
{{"flashcards": [{{"front": "...", "back": "...", "difficulty": "easy"}}]}}

Rules:
- Exactly {count} flashcards.
- "front" is a question or term, "back" is a concise answer.
- "difficulty" is one of "easy", "medium" or "hard"; mix all three."#,
        topic = topic,
        count = card_count,
    )
}

/// Build the note prompt for one source.
pub fn note_prompt(request: &NoteRequest) -> String {
    let (source_line, extra_fields) = match request.source_type {
        SourceType::Video => (
            format!(
                "the video \"{}\"{}",
                request.title,
                url_suffix(request.source_url.as_deref())
            ),
            r#", "timestamps": [{"time": "mm:ss", "description": "..."}]"#,
        ),
        SourceType::Article => (
            format!(
                "the article \"{}\"{}",
                request.title,
                url_suffix(request.source_url.as_deref())
            ),
            r#", "quotes": [{"text": "...", "source": "...", "pageReference": "..."}]"#,
        ),
        SourceType::Document => (
            format!(
                "the PDF document \"{}\"{}",
                request.title,
                url_suffix(request.source_url.as_deref())
            ),
            r#", "quotes": [{"text": "...", "source": "...", "pageReference": "Page N"}]"#,
        ),
    };

    let mut prompt = format!(
        r#"Write structured study notes for {source_line}.

Return a JSON object of this exact shape:
{{"summary": "...", "keyPoints": [{{"text": "...", "importance": "high"}}], "definitions": [{{"term": "...", "definition": "..."}}], "sections": [{{"title": "...", "content": "...", "subsections": [{{"title": "...", "content": "..."}}]}}]{extra_fields}}}

Rules:
- "summary" is two or three sentences.
- At least three key points; "importance" is "high", "medium" or "low".
- Sections nest at most one level of subsections."#
    );

    if let Some(content) = request.content.as_deref() {
        let excerpt: String = content.chars().take(MAX_SOURCE_CHARS).collect();
        prompt.push_str("\n\nSource text:\n");
        prompt.push_str(&excerpt);
    }

    prompt
}

fn url_suffix(url: Option<&str>) -> String {
    url.map(|u| format!(" ({})", u)).unwrap_or_default()
}
