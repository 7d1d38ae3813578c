//! Point extraction — turning raw completion text into exactly three
//! strategy strings.
//!
//! The model is asked for a numbered list, but its output format is not
//! contractually guaranteed, so extraction degrades through decreasingly
//! structured assumptions: numbered list → bulleted list → plain lines →
//! equal word thirds. Each strategy is a pure function that either produces
//! all three points or defers to the next one; the final word-chunking
//! split is total, so extraction never fails and never panics.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Exactly three strategy points, in the order they appeared in the text.
pub type StrategyPoints = [String; 3];

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static NUMBERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[1-3][.)]\s*").unwrap());
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*•]\s*").unwrap());
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(point|strategy|summary)").unwrap());

/// Extraction strategies in priority order. First to produce all three
/// points wins; [`equal_thirds`] backstops anything that falls through.
const STRATEGIES: &[(&str, fn(&str) -> Option<StrategyPoints>)] = &[
    ("numbered", numbered_points),
    ("bulleted", bulleted_points),
    ("lines", line_points),
];

/// Extract exactly three strategy points from raw completion text.
///
/// Fenced code blocks are stripped first so formatting artifacts are never
/// mistaken for content. Arbitrary prose (or an empty string) falls through
/// to the equal-thirds splitter, which always yields three strings — though
/// for inputs under three words some of them are empty.
pub fn extract_three_points(raw: &str) -> StrategyPoints {
    let cleaned = strip_code_fences(raw);

    for (name, strategy) in STRATEGIES {
        if let Some(points) = strategy(&cleaned) {
            debug!("extracted points via {name} strategy");
            return points;
        }
    }

    debug!("no structured points found, splitting into word thirds");
    equal_thirds(&cleaned)
}

/// Remove every fenced code block, then trim surrounding whitespace.
/// An unterminated fence is left in place.
fn strip_code_fences(text: &str) -> String {
    FENCED_BLOCK.replace_all(text, "").trim().to_string()
}

/// Items introduced by a digit 1–3 followed by `.` or `)` at the start of a
/// line. Each item captures everything up to the next marker or the end of
/// the text, so multi-line items stay attached to their marker.
fn numbered_points(text: &str) -> Option<StrategyPoints> {
    first_three(marker_items(text, &NUMBERED_MARKER))
}

/// Items introduced by `-`, `*`, or `•` at the start of a line.
fn bulleted_points(text: &str) -> Option<StrategyPoints> {
    first_three(marker_items(text, &BULLET_MARKER))
}

/// Non-empty trimmed lines, skipping header/label noise such as
/// "Point 1:", "Strategy:", or "Summary".
fn line_points(text: &str) -> Option<StrategyPoints> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !HEADER_LINE.is_match(line))
        .map(str::to_string)
        .collect();
    first_three(lines)
}

/// Slice the text between list markers: each item runs from the end of its
/// marker to the start of the next marker, or to the end of the text.
fn marker_items(text: &str, marker: &Regex) -> Vec<String> {
    let spans: Vec<(usize, usize)> = marker.find_iter(text).map(|m| (m.start(), m.end())).collect();

    spans
        .iter()
        .enumerate()
        .map(|(i, &(_, content_start))| {
            let content_end = spans.get(i + 1).map_or(text.len(), |&(next_start, _)| next_start);
            text.get(content_start..content_end)
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .collect()
}

/// Keep the first three non-empty items, or defer to the next strategy.
fn first_three(mut items: Vec<String>) -> Option<StrategyPoints> {
    items.retain(|item| !item.is_empty());
    if items.len() < 3 {
        return None;
    }
    items.truncate(3);
    items.try_into().ok()
}

/// Total fallback: three contiguous word chunks of size `ceil(n / 3)`.
///
/// Chunks may not align with sentence boundaries, and inputs under three
/// words leave trailing chunks empty — accepted degradation for text the
/// structured strategies could not handle.
fn equal_thirds(text: &str) -> StrategyPoints {
    let words: Vec<&str> = text.split_whitespace().collect();
    let chunk = words.len().div_ceil(3);

    let join = |start: usize, end: usize| -> String {
        let end = end.min(words.len());
        if start >= end {
            String::new()
        } else {
            words[start..end].join(" ")
        }
    };

    [
        join(0, chunk),
        join(chunk, chunk * 2),
        join(chunk * 2, words.len()),
    ]
}
