use std::collections::BTreeMap;

use crate::document::{Section, Setting};

/// Sections recovered from one file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedIni {
    pub sections: BTreeMap<String, Section>,
    pub unlisted: Section,
}

/// Classification of one physical line
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    Header(&'a str),
    Comment,
    Data,
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
        // Both ends matched, so the line has at least two ASCII bytes
        LineKind::Header(trimmed[1..trimmed.len() - 1].trim())
    } else if trimmed.starts_with(';') {
        LineKind::Comment
    } else {
        LineKind::Data
    }
}

/// Scanning state threaded through a single pass over the lines.
///
/// `current` is `None` while still in the unlisted section. `pending`
/// collects comments until a data line closes it.
#[derive(Default)]
struct ScanState {
    parsed: ParsedIni,
    current: Option<String>,
    pending: Setting,
}

impl ScanState {
    fn current_section(&mut self) -> &mut Section {
        match &self.current {
            Some(name) => self.parsed.sections.entry(name.clone()).or_default(),
            None => &mut self.parsed.unlisted,
        }
    }

    /// Hand the accumulator to the current section and start a new one
    fn flush(&mut self) {
        let setting = std::mem::take(&mut self.pending);
        self.current_section().push(setting);
    }

    fn enter_section(&mut self, name: &str) {
        // Comments collected so far stay with the section being left
        self.flush();
        self.parsed.sections.entry(name.to_string()).or_default();
        self.current = Some(name.to_string());
    }

    fn add_comment(&mut self, line: &str) {
        self.pending.comments.push(line.to_string());
    }

    fn add_data(&mut self, line: &str) {
        self.pending.data = line.to_string();
        self.flush();
    }

    fn finish(mut self) -> ParsedIni {
        self.flush();

        let mut parsed = self.parsed;
        parsed.unlisted.retain(|s| !s.is_empty());
        for section in parsed.sections.values_mut() {
            section.retain(|s| !s.is_empty());
        }
        parsed
    }
}

/// Group the lines of `text` into sections of settings.
///
/// Blank lines are dropped. Comment and data lines keep their untrimmed
/// text; header lines only mark section boundaries.
pub fn parse(text: &str) -> ParsedIni {
    let mut state = ScanState::default();

    for line in text.lines() {
        match classify(line) {
            LineKind::Blank => {}
            LineKind::Header(name) => state.enter_section(name),
            LineKind::Comment => state.add_comment(line),
            LineKind::Data => state.add_data(line),
        }
    }

    state.finish()
}
