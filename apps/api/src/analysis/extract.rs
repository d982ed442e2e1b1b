/// Best-effort isolation of a JSON object inside a model completion.
///
/// Stage 1 strips markdown code fences: the content of the first
/// ```` ```json ````-tagged block wins, else the first fenced block of any
/// kind, else the whole text. Stage 2 slices from the first `{` to the last
/// `}` inclusive. The fence strip must run first: fences often wrap prose
/// alongside the JSON, and a global brace search would slice across it.
///
/// When no `{` is present the (fence-stripped) text is returned unchanged and
/// the caller's JSON parse fails, triggering the degraded-result path.
pub fn extract_json(text: &str) -> &str {
    let inner = fenced_block(text, "```json")
        .or_else(|| fenced_block(text, "```"))
        .unwrap_or(text);

    match (inner.find('{'), inner.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &inner[start..=end],
        _ => inner,
    }
}

/// Content of the first block opened by `marker`, up to the closing fence or
/// the end of the text when the model forgot to close it.
fn fenced_block<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(marker)?;
    let content = rest.split_once("```").map(|(inner, _)| inner).unwrap_or(rest);
    Some(content.trim())
}
