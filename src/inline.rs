use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Run, RunStyle};

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

/// A marker-delimited match over the original text. Offsets are byte
/// positions in that text; `inner` excludes the markers.
struct Candidate<'a> {
    start: usize,
    end: usize,
    inner: &'a str,
    style: RunStyle,
}

/// Split a text block into styled and unstyled runs.
pub fn resolve(text: &str) -> Vec<Run> {
    // Each family scans the original text, not the residue of earlier
    // families, so a bold span's inner asterisks also surface as italic
    // candidates. The overlap filter below is what reconciles them.
    let mut candidates = Vec::new();
    scan(&BOLD, RunStyle::Bold, text, &mut candidates);
    scan(&ITALIC, RunStyle::Italic, text, &mut candidates);
    scan(&CODE, RunStyle::Code, text, &mut candidates);

    // Stable sort: equal starts keep the bold, italic, code scan order.
    candidates.sort_by_key(|c| c.start);

    let mut accepted: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let overlaps = accepted
            .iter()
            .any(|a| candidate.start < a.end && candidate.end > a.start);
        if !overlaps {
            accepted.push(candidate);
        }
    }

    let mut runs = Vec::new();
    let mut cursor = 0;
    for candidate in &accepted {
        if candidate.start > cursor {
            runs.push(Run {
                text: text[cursor..candidate.start].to_string(),
                style: None,
            });
        }
        runs.push(Run {
            text: candidate.inner.to_string(),
            style: Some(candidate.style),
        });
        cursor = candidate.end;
    }
    if cursor < text.len() {
        runs.push(Run {
            text: text[cursor..].to_string(),
            style: None,
        });
    }

    if runs.is_empty() {
        runs.push(Run {
            text: text.to_string(),
            style: None,
        });
    }

    runs
}

fn scan<'a>(re: &Regex, style: RunStyle, text: &'a str, out: &mut Vec<Candidate<'a>>) {
    for caps in re.captures_iter(text) {
        let m = caps.get(0).unwrap();
        out.push(Candidate {
            start: m.start(),
            end: m.end(),
            inner: caps.get(1).unwrap().as_str(),
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, style: Option<RunStyle>) -> Run {
        Run {
            text: text.to_string(),
            style,
        }
    }

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(resolve("just words"), vec![run("just words", None)]);
    }

    #[test]
    fn empty_string_is_one_empty_run() {
        assert_eq!(resolve(""), vec![run("", None)]);
    }

    #[test]
    fn bold_with_surrounding_text() {
        assert_eq!(
            resolve("say **hi** now"),
            vec![
                run("say ", None),
                run("hi", Some(RunStyle::Bold)),
                run(" now", None),
            ]
        );
    }

    #[test]
    fn italic_and_code() {
        assert_eq!(
            resolve("*em* and `x + 1`"),
            vec![
                run("em", Some(RunStyle::Italic)),
                run(" and ", None),
                run("x + 1", Some(RunStyle::Code)),
            ]
        );
    }

    #[test]
    fn bold_suppresses_inner_italic() {
        // The italic candidates from the inner asterisks overlap the bold
        // span, which was registered first, so only bold survives.
        assert_eq!(
            resolve("**a*b*c**"),
            vec![run("a*b*c", Some(RunStyle::Bold))]
        );
    }

    #[test]
    fn bold_wins_equal_start_tie() {
        assert_eq!(resolve("**x**"), vec![run("x", Some(RunStyle::Bold))]);
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(resolve("a ** b"), vec![run("a ** b", None)]);
        assert_eq!(resolve("`open"), vec![run("`open", None)]);
    }

    #[test]
    fn trailing_marker_kept_as_suffix() {
        assert_eq!(
            resolve("*a*b*"),
            vec![run("a", Some(RunStyle::Italic)), run("b*", None)]
        );
    }

    #[test]
    fn spans_are_non_greedy() {
        assert_eq!(
            resolve("`a` and `b`"),
            vec![
                run("a", Some(RunStyle::Code)),
                run(" and ", None),
                run("b", Some(RunStyle::Code)),
            ]
        );
    }

    #[test]
    fn concatenation_reproduces_unstyled_input() {
        // With no accepted spans the runs concatenate back byte-for-byte.
        for input in ["", "plain", "a ** b", "dangling `tick", "1 * 2 = 2"] {
            let joined: String = resolve(input).into_iter().map(|r| r.text).collect();
            assert_eq!(joined, input);
        }
    }

    #[test]
    fn unicode_text_around_spans() {
        assert_eq!(
            resolve("múa **rối** nước"),
            vec![
                run("múa ", None),
                run("rối", Some(RunStyle::Bold)),
                run(" nước", None),
            ]
        );
    }
}
