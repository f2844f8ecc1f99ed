//! Splitting inline text into typed runs.
//!
//! The splitter is a fixed chain of passes. Each pass only rewrites runs
//! that are still [`InlineKind::Text`]; runs a previous pass already typed
//! are carried through untouched, so the chain is idempotent on them.

use crate::block::{InlineKind, InlineRun};
use crate::error::{Error, Result};
use crate::extract::{extract_images, extract_links};

/// Paired delimiters in the order their passes run.
const DELIMITERS: [(&str, InlineKind); 3] = [
    ("**", InlineKind::Bold),
    ("_", InlineKind::Italic),
    ("`", InlineKind::Code),
];

/// Tokenize a span of text into inline runs.
pub fn text_to_runs(text: &str) -> Result<Vec<InlineRun>> {
    split_runs(vec![InlineRun::text(text)])
}

/// Run the full splitting chain over `runs`.
pub fn split_runs(runs: Vec<InlineRun>) -> Result<Vec<InlineRun>> {
    let mut runs = runs;
    for (delimiter, kind) in DELIMITERS {
        runs = split_delimiter(runs, delimiter, kind)?;
    }
    runs = split_images(runs);
    runs = split_links(runs);
    Ok(runs)
}

fn split_delimiter(
    runs: Vec<InlineRun>,
    delimiter: &'static str,
    kind: InlineKind,
) -> Result<Vec<InlineRun>> {
    let mut out = Vec::with_capacity(runs.len());

    for run in runs {
        if !run.is_text() || !run.text.contains(delimiter) {
            out.push(run);
            continue;
        }

        let parts: Vec<&str> = run.text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::MalformedMarkup {
                delimiter,
                text: run.text.clone(),
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            // Leading/trailing delimiters leave empty parts behind
            if part.is_empty() {
                continue;
            }
            let part_kind = if i % 2 == 1 { kind } else { InlineKind::Text };
            out.push(InlineRun::new(part, part_kind));
        }
    }

    Ok(out)
}

fn split_images(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    split_matches(runs, extract_images, |alt, url| {
        (format!("![{alt}]({url})"), InlineRun::image(alt, url))
    })
}

fn split_links(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    split_matches(runs, extract_links, |text, url| {
        (format!("[{text}]({url})"), InlineRun::link(text, url))
    })
}

/// Shared body of the image and link passes: cut each text run at every
/// extracted match, in source order.
fn split_matches<E, M>(runs: Vec<InlineRun>, extract: E, make: M) -> Vec<InlineRun>
where
    E: Fn(&str) -> Vec<(String, String)>,
    M: Fn(&str, &str) -> (String, InlineRun),
{
    let mut out = Vec::with_capacity(runs.len());

    for run in runs {
        if !run.is_text() {
            out.push(run);
            continue;
        }

        let matches = extract(run.text.as_str());
        if matches.is_empty() {
            out.push(run);
            continue;
        }

        let mut rest = run.text.as_str();
        for (text, url) in &matches {
            let (literal, matched) = make(text.as_str(), url.as_str());
            let Some((before, after)) = rest.split_once(literal.as_str()) else {
                continue;
            };
            if !before.is_empty() {
                out.push(InlineRun::text(before));
            }
            out.push(matched);
            rest = after;
        }
        if !rest.is_empty() {
            out.push(InlineRun::text(rest));
        }
    }

    out
}
