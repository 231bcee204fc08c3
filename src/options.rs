//! Configuration options for TOML encoding.
//!
//! [`EncodeOptions`] controls the layout of the text produced by
//! [`encode_with_options`](crate::encode_with_options) and
//! [`to_string_with_options`](crate::to_string_with_options). None of the
//! options change what the output parses back to.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::{encode_with_options, parse, EncodeOptions};
//!
//! let doc = parse("b = 1\na = [1, 2]").unwrap();
//!
//! let options = EncodeOptions::new().with_sort_keys(false).with_array_spacing(true);
//! let text = encode_with_options(&doc, &options).unwrap();
//! assert_eq!(text, "b = 1\na = [ 1, 2 ]");
//! ```

/// Configuration options for TOML encoding.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::EncodeOptions;
///
/// // Default: sorted keys, no indentation
/// let options = EncodeOptions::new();
/// assert!(options.sort_keys);
///
/// // Indented tables with a trailing newline
/// let options = EncodeOptions::pretty();
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Emit keys in sorted order rather than insertion order.
    pub sort_keys: bool,
    /// Spaces per table nesting level, applied to headers and key lines.
    pub indent: usize,
    /// Pad inline arrays: `[ 1, 2 ]` instead of `[1, 2]`.
    pub array_spacing: bool,
    /// End the output with a newline.
    pub trailing_newline: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            sort_keys: true,
            indent: 0,
            array_spacing: false,
            trailing_newline: false,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (sorted keys, no indentation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for hand-read files: nested tables indented by two spaces and
    /// a trailing newline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::EncodeOptions;
    ///
    /// let options = EncodeOptions::pretty();
    /// assert!(options.trailing_newline);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        EncodeOptions {
            indent: 2,
            trailing_newline: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Sets the indentation size (number of spaces per nesting level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::EncodeOptions;
    ///
    /// let options = EncodeOptions::new().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_array_spacing(mut self, array_spacing: bool) -> Self {
        self.array_spacing = array_spacing;
        self
    }

    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }
}
