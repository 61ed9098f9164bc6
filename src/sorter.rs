use std::collections::BTreeMap;

use crate::document::{LineEnding, Section, Setting};

/// Reorder one section.
///
/// Data settings are ordered by their trimmed data line. For every sorted
/// key the first setting carrying that key is emitted, so duplicates repeat
/// the first occurrence. Only the first comment-only setting survives; it
/// moves to the end of the section.
pub fn sort_section(section: &[Setting], header: Option<&str>) -> Section {
    let mut keys: Vec<&str> = section
        .iter()
        .map(Setting::sort_key)
        .filter(|key| !key.is_empty())
        .collect();
    keys.sort_unstable();

    let ending_comments = section.iter().find(|s| s.sort_key().is_empty());

    let mut sorted = Vec::with_capacity(keys.len() + 2);
    if let Some(header) = header {
        sorted.push(Setting::with_data(format!("[{header}]")));
    }
    for key in keys {
        if let Some(setting) = section.iter().find(|s| s.sort_key() == key) {
            sorted.push(setting.clone());
        }
    }
    if let Some(ending) = ending_comments {
        sorted.push(ending.clone());
    }
    sorted
}

/// Order all sections: the unlisted one first, then named sections by header.
pub fn sort_sections(named: &BTreeMap<String, Section>, unlisted: &[Setting]) -> Vec<Section> {
    let mut sections = Vec::with_capacity(named.len() + 1);
    if !unlisted.is_empty() {
        sections.push(sort_section(unlisted, None));
    }
    // BTreeMap iteration is already in header order
    for (header, section) in named {
        sections.push(sort_section(section, Some(header)));
    }
    sections
}

/// Serialize sections, separating them with one blank line.
pub fn render(sections: &[Section], line_ending: LineEnding) -> String {
    let mut lines: Vec<&str> = vec![];
    for section in sections {
        for setting in section {
            lines.extend(setting.comments.iter().map(String::as_str));
            if !setting.data.is_empty() {
                lines.push(&setting.data);
            }
        }
        lines.push("");
    }
    lines.join(line_ending.as_str())
}

/// Produce the final sorted text for parsed content.
pub fn sort_text(
    named: &BTreeMap<String, Section>,
    unlisted: &[Setting],
    line_ending: LineEnding,
) -> String {
    render(&sort_sections(named, unlisted), line_ending)
}
