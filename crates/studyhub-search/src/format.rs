//! Label formatting shared by the provider adapters.

use std::sync::OnceLock;

use regex::Regex;
use studyhub_core::defaults;

/// Format a raw view count: `1_234_567 -> "1.2M views"`, `4_500 -> "4.5K views"`.
///
/// The unit is picked after rounding to tenths, so `999_999` is `"1.0M views"`.
pub fn view_count_label(views: u64) -> String {
    if views < 1_000 {
        return format!("{} views", views);
    }
    let k_tenths = views / 100 + u64::from(views % 100 >= 50);
    if k_tenths < 10_000 {
        return format!("{}.{}K views", k_tenths / 10, k_tenths % 10);
    }
    let m_tenths = views / 100_000 + u64::from(views % 100_000 >= 50_000);
    format!("{}.{}M views", m_tenths / 10, m_tenths % 10)
}

fn iso_duration_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").ok()
    })
    .as_ref()
}

/// Convert an ISO-8601 duration (`PT1H2M3S`) to a clock label (`1:02:03`).
///
/// Durations under an hour render as `m:ss`. Returns `None` for anything
/// that is not a day/time duration.
pub fn format_iso_duration(iso: &str) -> Option<String> {
    let caps = iso_duration_regex()?.captures(iso.trim())?;
    // Upstream numbers are unbounded; an overflowing duration is malformed.
    let part = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let hours = part(1)?.checked_mul(24)?.checked_add(part(2)?)?;
    let minutes = part(3)?;
    let seconds = part(4)?;

    Some(if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    })
}

/// Estimated reading time for `text`, never less than one minute.
pub fn read_time_label(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(defaults::WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

fn sentence_end_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+(?:\s+|$)").ok()).as_ref()
}

/// Split `text` into at most `limit` trimmed sentences.
pub fn leading_sentences(text: &str, limit: usize) -> Vec<String> {
    let Some(re) = sentence_end_regex() else {
        return vec![text.trim().to_string()];
    };

    let mut sentences = Vec::new();
    let mut start = 0;
    for m in re.find_iter(text) {
        let sentence = text[start..m.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = m.end();
        if sentences.len() == limit {
            return sentences;
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() && sentences.len() < limit {
        sentences.push(rest.to_string());
    }
    sentences
}
