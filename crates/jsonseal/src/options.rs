//! Configuration for a [`StreamingCompleter`](crate::StreamingCompleter).

/// Options controlling which top-level keys are surfaced as sections.
///
/// # Examples
///
/// ```rust
/// use jsonseal::{CompleterOptions, StreamingCompleter};
///
/// let completer = StreamingCompleter::new(CompleterOptions {
///     allowed_sections: Some(vec!["response".into(), "action_json".into()]),
///     ..Default::default()
/// });
/// # let _ = completer;
/// ```
///
/// # Default
///
/// No allow-list (every top-level key is a section), `permissive` off.
#[derive(Debug, Clone, Default)]
pub struct CompleterOptions {
    /// Top-level keys to surface as sections, in no particular order (output
    /// order always follows the source document).
    ///
    /// `None` accepts any key. When a list is present and [`permissive`] is
    /// off, keys outside the list are filtered out of
    /// [`completed_sections`](crate::StreamingCompleter::completed_sections);
    /// this also suppresses partially-streamed key names until they match.
    /// The degraded catch-all section produced when extraction cannot parse
    /// the snapshot is never filtered.
    ///
    /// [`permissive`]: CompleterOptions::permissive
    pub allowed_sections: Option<Vec<String>>,

    /// Bypass allow-list filtering entirely and surface every top-level key.
    ///
    /// # Default
    ///
    /// `false`
    pub permissive: bool,
}
