//! Split a markdown body into sections at its ATX headers.
//!
//! Lines inside fenced code blocks are never treated as headers. Text
//! before the first header is dropped, and a header followed directly by
//! another header only contributes to the header path of what follows.

use crate::section::{HeaderLevel, Section};

const FENCES: [&str; 2] = ["```", "~~~"];

/// Split `content` into an ordered sequence of sections.
///
/// Each section carries every header still open at that point, shallowest
/// first. A new header closes all open headers at its own depth or deeper.
pub fn split_markdown_by_headers(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut open: Vec<(HeaderLevel, String)> = Vec::new();
    let mut lines: Vec<&str> = Vec::new();
    let mut fence: Option<&str> = None;

    for line in content.lines().map(str::trim) {
        if let Some(marker) = fence {
            if line.starts_with(marker) {
                fence = None;
            }
            lines.push(line);
            continue;
        }

        if let Some(marker) = FENCES.iter().find(|m| line.starts_with(**m)) {
            fence = Some(*marker);
            lines.push(line);
            continue;
        }

        if let Some((level, text)) = parse_header(line) {
            flush(&open, &mut lines, &mut sections);
            open.retain(|(l, _)| *l < level);
            open.push((level, text.to_string()));
            continue;
        }

        if !open.is_empty() {
            lines.push(line);
        }
    }
    flush(&open, &mut lines, &mut sections);

    tracing::debug!(sections = sections.len(), "split markdown by headers");
    sections
}

fn flush(open: &[(HeaderLevel, String)], lines: &mut Vec<&str>, sections: &mut Vec<Section>) {
    let content = lines.join("\n");
    lines.clear();

    let content = content.trim();
    if open.is_empty() || content.is_empty() {
        return;
    }
    sections.push(Section::new(open.to_vec(), content));
}

/// Recognise `#`..`######` followed by a space (or nothing) as a header.
fn parse_header(line: &str) -> Option<(HeaderLevel, &str)> {
    let markers = line.bytes().take_while(|b| *b == b'#').count();
    let level = HeaderLevel::from_marker_count(markers)?;
    let rest = &line[markers..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((level, rest.trim()))
}
