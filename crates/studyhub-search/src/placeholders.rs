//! Deterministic placeholder content used when a provider fails.
//!
//! Every function here is pure: the same topic always yields the same
//! records, each templated with the topic verbatim, in the same shape the
//! live adapters produce.

use chrono::NaiveDate;

use studyhub_core::{
    ArticleResult, Difficulty, Flashcard, PaperResult, Question, Quiz, SearchTopic, VideoResult,
};
use studyhub_inference::quiz_title;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Lower-case ASCII slug of the topic, used for stable placeholder ids.
pub fn topic_slug(topic: &SearchTopic) -> String {
    let mut slug = String::with_capacity(topic.as_str().len());
    for ch in topic.as_str().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "topic".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn placeholder_videos(topic: &SearchTopic) -> Vec<VideoResult> {
    vec![
        VideoResult {
            id: "yt-1".to_string(),
            title: format!("Complete Guide to {} - Beginner to Advanced", topic),
            channel_name: "EduTech Academy".to_string(),
            duration: "24:15".to_string(),
            view_count_label: "1.2M views".to_string(),
            published_at: date(2024, 1, 15),
            thumbnail_url: "https://img.youtube.com/vi/ukzFI9rgwfU/maxresdefault.jpg".to_string(),
            watch_url: "https://www.youtube.com/watch?v=ukzFI9rgwfU".to_string(),
            description: format!("Comprehensive tutorial covering all aspects of {}.", topic),
        },
        VideoResult {
            id: "yt-2".to_string(),
            title: format!("{} Explained in 10 Minutes", topic),
            channel_name: "Quick Learning".to_string(),
            duration: "10:32".to_string(),
            view_count_label: "850.0K views".to_string(),
            published_at: date(2024, 1, 10),
            thumbnail_url: "https://img.youtube.com/vi/LlKAna21fLE/maxresdefault.jpg".to_string(),
            watch_url: "https://www.youtube.com/watch?v=LlKAna21fLE".to_string(),
            description: format!("Quick overview of {} fundamentals.", topic),
        },
    ]
}

pub fn placeholder_articles(topic: &SearchTopic) -> Vec<ArticleResult> {
    vec![
        ArticleResult {
            id: "art-1".to_string(),
            title: format!("Understanding {}: A Comprehensive Analysis", topic),
            source: "TechCrunch".to_string(),
            author: "Dr. Sarah Johnson".to_string(),
            published_at: Some(date(2024, 1, 20)),
            url: "https://techcrunch.com/example-article".to_string(),
            summary: format!(
                "This article provides an in-depth analysis of {} and its implications for modern technology.",
                topic
            ),
            read_time_label: "8 min read".to_string(),
        },
        ArticleResult {
            id: "art-2".to_string(),
            title: format!("The Future of {}: Trends and Predictions", topic),
            source: "MIT Technology Review".to_string(),
            author: "Prof. Michael Chen".to_string(),
            published_at: Some(date(2024, 1, 18)),
            url: "https://technologyreview.com/example-article".to_string(),
            summary: format!(
                "Exploring emerging trends and future developments in {}.",
                topic
            ),
            read_time_label: "12 min read".to_string(),
        },
    ]
}

pub fn placeholder_papers(topic: &SearchTopic) -> Vec<PaperResult> {
    vec![PaperResult {
        id: "paper-1".to_string(),
        title: format!("Advanced Techniques in {}: A Systematic Review", topic),
        authors: vec![
            "Dr. Alice Smith".to_string(),
            "Prof. Bob Wilson".to_string(),
            "Dr. Carol Davis".to_string(),
        ],
        journal: "Nature Technology".to_string(),
        published_at: Some(date(2024, 1, 25)),
        doi: "10.1038/example.2024.001".to_string(),
        url: "https://doi.org/10.1038/example.2024.001".to_string(),
        abstract_text: format!(
            "This systematic review examines recent advances in {} methodologies.",
            topic
        ),
        key_findings: vec![
            format!("New {} techniques show 40% improvement in efficiency", topic),
            "Cross-domain applications demonstrate significant potential".to_string(),
            "Future research directions identified in three key areas".to_string(),
        ],
    }]
}

/// (question, options, correct index, explanation); `{}` is the topic.
const QUIZ_TEMPLATES: [(&str, [&str; 4], usize, &str); 8] = [
    (
        "What is the primary purpose of {}?",
        [
            "To solve complex problems",
            "To improve understanding of a system",
            "To reduce costs",
            "All of the above",
        ],
        3,
        "{} serves several purposes at once, so every listed option applies.",
    ),
    (
        "Which of the following is a key characteristic of {}?",
        ["Scalability", "Randomness", "Opacity", "Irrelevance"],
        0,
        "Scalability is one of the most important characteristics of {}.",
    ),
    (
        "What is usually the best first step when learning {}?",
        [
            "Memorising advanced edge cases",
            "Understanding the core definitions",
            "Skipping straight to exams",
            "Avoiding worked examples",
        ],
        1,
        "Core definitions give the vocabulary everything else in {} builds on.",
    ),
    (
        "Which resource helps most when practising {}?",
        [
            "Worked examples and exercises",
            "Reading the index only",
            "Watching without taking notes",
            "Ignoring feedback",
        ],
        0,
        "Active practice with feedback is the fastest way to build skill in {}.",
    ),
    (
        "How do experts typically approach a new problem in {}?",
        [
            "Guess and move on",
            "Break it into smaller known sub-problems",
            "Wait for the answer to appear",
            "Use the longest method available",
        ],
        1,
        "Decomposition turns an unfamiliar {} problem into familiar pieces.",
    ),
    (
        "Which statement about {} is most accurate?",
        [
            "It has no practical applications",
            "It never changes",
            "It connects to many related fields",
            "It can be mastered in a day",
        ],
        2,
        "{} draws on and feeds into a range of neighbouring subjects.",
    ),
    (
        "What is a common misconception about {}?",
        [
            "That it requires practice",
            "That it builds on fundamentals",
            "That it has real-world uses",
            "That it is only theoretical",
        ],
        3,
        "{} is widely applied in practice, not just in theory.",
    ),
    (
        "How can you check your understanding of {}?",
        [
            "Explain it to someone else",
            "Re-read the same page repeatedly",
            "Highlight every sentence",
            "Avoid testing yourself",
        ],
        0,
        "Teaching a concept exposes gaps in your understanding of {}.",
    ),
];

/// (front, back, difficulty); `{}` is the topic.
const FLASHCARD_TEMPLATES: [(&str, &str, Difficulty); 8] = [
    (
        "What is {}?",
        "{} is a body of ideas and techniques built on a small set of core concepts.",
        Difficulty::Easy,
    ),
    (
        "Key benefits of {}",
        "{} improves efficiency, scalability and clarity when applied well.",
        Difficulty::Medium,
    ),
    (
        "Advanced {} techniques",
        "Advanced {} work combines optimisation, abstraction and careful analysis.",
        Difficulty::Hard,
    ),
    (
        "Core vocabulary of {}",
        "Learning the basic terms of {} makes every later topic easier to follow.",
        Difficulty::Easy,
    ),
    (
        "Where is {} used?",
        "{} appears in research, industry and everyday problem solving.",
        Difficulty::Easy,
    ),
    (
        "Common mistakes in {}",
        "Skipping fundamentals and not practising are the usual pitfalls in {}.",
        Difficulty::Medium,
    ),
    (
        "How does {} relate to other fields?",
        "{} shares methods and ideas with several neighbouring disciplines.",
        Difficulty::Medium,
    ),
    (
        "Open problems in {}",
        "{} still has unanswered questions that drive current research.",
        Difficulty::Hard,
    ),
];

fn fill(template: &str, topic: &SearchTopic) -> String {
    template.replace("{}", topic.as_str())
}

/// Placeholder quiz with exactly `question_count` questions.
pub fn placeholder_quiz(topic: &SearchTopic, question_count: usize) -> Quiz {
    let questions = (0..question_count.max(1))
        .map(|i| {
            let (text, options, correct, explanation) = QUIZ_TEMPLATES[i % QUIZ_TEMPLATES.len()];
            Question {
                id: format!("q{}", i + 1),
                text: fill(text, topic),
                options: options.map(str::to_string),
                correct_answer_index: correct,
                explanation: fill(explanation, topic),
            }
        })
        .collect();

    Quiz {
        id: format!("quiz-{}", topic_slug(topic)),
        title: quiz_title(topic),
        questions,
        completed: false,
        score: None,
    }
}

/// Placeholder deck with exactly `card_count` cards.
pub fn placeholder_flashcards(topic: &SearchTopic, card_count: usize) -> Vec<Flashcard> {
    (0..card_count)
        .map(|i| {
            let (front, back, difficulty) = FLASHCARD_TEMPLATES[i % FLASHCARD_TEMPLATES.len()];
            Flashcard {
                id: format!("fc-{}", i + 1),
                front: fill(front, topic),
                back: fill(back, topic),
                difficulty,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> SearchTopic {
        SearchTopic::parse("Linear Algebra").unwrap()
    }

    #[test]
    fn test_topic_slug() {
        assert_eq!(topic_slug(&topic()), "linear-algebra");
        assert_eq!(topic_slug(&SearchTopic::parse("C++ / Rust!").unwrap()), "c-rust");
        assert_eq!(topic_slug(&SearchTopic::parse("日本").unwrap()), "topic");
    }

    #[test]
    fn test_quiz_shape() {
        let quiz = placeholder_quiz(&topic(), 8);
        assert_eq!(quiz.questions.len(), 8);
        assert!(quiz.title.contains("Linear Algebra"));
        for q in &quiz.questions {
            assert!(q.correct_answer_index < 4);
            assert!(q.text.contains("Linear Algebra"));
        }
    }

    #[test]
    fn test_quiz_cycles_templates_beyond_eight() {
        let quiz = placeholder_quiz(&topic(), 10);
        assert_eq!(quiz.questions.len(), 10);
        assert_eq!(quiz.questions[9].id, "q10");
        assert_eq!(quiz.questions[8].text, quiz.questions[0].text);
    }

    #[test]
    fn test_flashcards_mention_topic_on_both_sides() {
        let cards = placeholder_flashcards(&topic(), 8);
        assert_eq!(cards.len(), 8);
        for card in &cards {
            assert!(card.front.contains("Linear Algebra"), "{}", card.front);
            assert!(card.back.contains("Linear Algebra"), "{}", card.back);
        }
    }

    #[test]
    fn test_placeholders_are_deterministic() {
        assert_eq!(placeholder_quiz(&topic(), 8), placeholder_quiz(&topic(), 8));
        assert_eq!(placeholder_videos(&topic()), placeholder_videos(&topic()));
        assert_eq!(placeholder_papers(&topic()), placeholder_papers(&topic()));
    }

    #[test]
    fn test_search_placeholders_mention_topic() {
        assert!(placeholder_videos(&topic())
            .iter()
            .all(|v| v.title.contains("Linear Algebra")));
        assert!(placeholder_articles(&topic())
            .iter()
            .all(|a| a.title.contains("Linear Algebra")));
        assert!(placeholder_papers(&topic())[0]
            .key_findings[0]
            .contains("Linear Algebra"));
    }
}
