use regex::Regex;
use std::sync::OnceLock;

/// Matches a fenced code block with an optional literal `mermaid` tag.
/// Any other language tag does not match; callers then fall back to the
/// raw text.
fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"```(?:mermaid)?\n([\s\S]*?)\n```").expect("fence pattern is valid")
    })
}

/// Extract diagram syntax from raw model output.
///
/// If the output contains a fenced code block tagged `mermaid` (or
/// untagged), returns the block's interior with no fence markers.
/// Otherwise returns the raw content unchanged.
#[must_use]
pub fn extract_diagram_syntax(raw: &str) -> String {
    fence_pattern()
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| raw.to_string(), |block| block.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::extract_diagram_syntax;

    #[test]
    fn unwraps_mermaid_tagged_fence() {
        let raw = "Here you go:\n```mermaid\nflowchart TD\n  A --> B\n```\nLet me know!";
        assert_eq!(extract_diagram_syntax(raw), "flowchart TD\n  A --> B");
    }

    #[test]
    fn unwraps_untagged_fence() {
        let raw = "```\nsequenceDiagram\n  A->>B: hi\n```";
        assert_eq!(extract_diagram_syntax(raw), "sequenceDiagram\n  A->>B: hi");
    }

    #[test]
    fn falls_back_to_raw_content_without_fence() {
        let raw = "flowchart TD\n  A --> B";
        assert_eq!(extract_diagram_syntax(raw), raw);
    }

    #[test]
    fn other_language_tags_do_not_match() {
        let raw = "```json\n{\"nodes\": []}\n```";
        assert_eq!(extract_diagram_syntax(raw), raw);
    }

    #[test]
    fn uses_first_fence_when_several_are_present() {
        let raw = "```mermaid\nfirst\n```\ntext\n```mermaid\nsecond\n```";
        assert_eq!(extract_diagram_syntax(raw), "first");
    }

    #[test]
    fn keeps_interior_whitespace_intact() {
        let raw = "```mermaid\n  graph LR\n    A --> B\n```";
        assert_eq!(extract_diagram_syntax(raw), "  graph LR\n    A --> B");
    }
}
