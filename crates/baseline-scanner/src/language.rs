//! Supported document languages.

use std::fmt;

/// The grammar a document is scanned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageKind {
    Html,
    Css,
    Scss,
    Less,
}

impl LanguageKind {
    /// Maps an editor language id (`html`, `css`, `scss`, `less`).
    pub fn from_id(id: &str) -> Option<LanguageKind> {
        match id.to_ascii_lowercase().as_str() {
            "html" => Some(LanguageKind::Html),
            "css" => Some(LanguageKind::Css),
            "scss" => Some(LanguageKind::Scss),
            "less" => Some(LanguageKind::Less),
            _ => None,
        }
    }

    /// Maps a file extension, without the leading dot.
    pub fn from_extension(ext: &str) -> Option<LanguageKind> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(LanguageKind::Html),
            "css" => Some(LanguageKind::Css),
            "scss" => Some(LanguageKind::Scss),
            "less" => Some(LanguageKind::Less),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageKind::Html => "html",
            LanguageKind::Css => "css",
            LanguageKind::Scss => "scss",
            LanguageKind::Less => "less",
        }
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(LanguageKind::from_id("HTML"), Some(LanguageKind::Html));
        assert_eq!(LanguageKind::from_id("scss"), Some(LanguageKind::Scss));
        assert_eq!(LanguageKind::from_id("typescript"), None);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageKind::from_extension("htm"), Some(LanguageKind::Html));
        assert_eq!(LanguageKind::from_extension("LESS"), Some(LanguageKind::Less));
        assert_eq!(LanguageKind::from_extension("svelte"), None);
    }
}
