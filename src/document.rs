use std::collections::BTreeMap;

/// Line terminator used when joining the sorted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One logical entry: leading comment lines plus at most one data line.
///
/// Both comments and data keep the raw, untrimmed text of the source line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Setting {
    pub comments: Vec<String>,
    pub data: String,
}

impl Setting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a data-only setting
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            comments: vec![],
            data: data.into(),
        }
    }

    /// A setting with neither comments nor data is parser padding
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.data.is_empty()
    }

    /// Key used for ordering: the trimmed data line. Comment-only settings
    /// have an empty key.
    pub fn sort_key(&self) -> &str {
        self.data.trim()
    }
}

/// Ordered list of settings belonging to one header (or to no header)
pub type Section = Vec<Setting>;

/// State of one file as it moves through the pipeline
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub original: String,
    pub line_ending: LineEnding,
    /// Named sections, iterated in lexicographic header order
    pub sections: BTreeMap<String, Section>,
    /// Settings that appear before the first header
    pub unlisted: Section,
    pub sorted: String,
}

impl Document {
    pub fn new(original: String, line_ending: LineEnding) -> Self {
        Self {
            original,
            line_ending,
            ..Self::default()
        }
    }

    /// True once sorting produced exactly the input text
    pub fn is_unchanged(&self) -> bool {
        self.original == self.sorted
    }
}
