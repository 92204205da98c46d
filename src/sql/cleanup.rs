const FENCE: &str = "```";

/// Trims the completion and, when it opens with a code fence, drops the first
/// and last lines (the fence markers and any language tag).
pub fn strip_code_fence(content: &str) -> String {
    let trimmed = content.trim();

    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.split('\n').collect();
    if lines.len() <= 2 {
        return String::new();
    }

    lines[1..lines.len() - 1].join("\n").trim().to_string()
}
