/// Parser options for controlling error handling during import.
///
/// These options trade strict schema conformance for compatibility with
/// documents that contain elements outside the PAGE-XML element set.
///
/// # Example
///
/// ```
/// use pagexml::parser_config::ParserOptions;
///
/// // Strict mode - unknown elements abort the import (default)
/// let strict = ParserOptions::strict();
/// assert!(strict.strict);
///
/// // Relaxed mode - unknown elements are dropped with their subtree
/// let relaxed = ParserOptions::relaxed().with_encoding("iso-8859-1");
/// assert!(!relaxed.strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Fail on the first structural problem (true) or skip it (false)
    ///
    /// In strict mode, unknown tags, unexpected siblings of `Page` and
    /// malformed metadata timestamps are errors. In relaxed mode the offending
    /// subtree is dropped (or the field defaulted) and import continues.
    pub strict: bool,

    /// Maximum element nesting depth below `PcGts`
    ///
    /// Guards the recursive tree construction against stack exhaustion.
    pub max_depth: usize,

    /// Character encoding label of the input (e.g. `"utf-8"`, `"windows-1252"`)
    ///
    /// `None` means UTF-8 unless a byte order mark says otherwise.
    pub encoding: Option<String>,
}

impl Default for ParserOptions {
    /// Default configuration: strict mode
    fn default() -> Self {
        Self::strict()
    }
}

impl ParserOptions {
    /// Strict mode: fail on any unknown element
    pub fn strict() -> Self {
        Self {
            strict: true,
            max_depth: 256,
            encoding: None,
        }
    }

    /// Relaxed mode: drop unknown elements and continue
    pub fn relaxed() -> Self {
        Self {
            strict: false,
            ..Self::strict()
        }
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the input encoding label.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }
}
