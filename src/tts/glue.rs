//! Block text gluing and rate encoding

/// Milliseconds of requested pause represented by one comma
const MS_PER_COMMA: f64 = 300.0;

/// Number of commas that approximate a pause, or `None` when disabled
pub fn pause_commas(pause_ms: u32) -> Option<usize> {
    if pause_ms == 0 {
        return None;
    }
    let commas = (f64::from(pause_ms) / MS_PER_COMMA).round_ties_even() as usize;
    Some(commas.max(1))
}

/// Separator placed between sentences of one block
pub fn pause_separator(pause_ms: u32) -> String {
    match pause_commas(pause_ms) {
        Some(n) => format!(" {} ", ",".repeat(n)),
        None => " ".to_string(),
    }
}

/// Join a block's sentences into one synthesis request text
pub fn glue_sentences(sentences: &[String], pause_ms: u32) -> String {
    let separator = pause_separator(pause_ms);
    sentences
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with(['.', '!', '?']) {
                s.to_string()
            } else {
                format!("{}.", s)
            }
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Encode a percent delta the way the synthesizer expects: `+N%`, `-N%`, `+0%`
pub fn format_rate(rate: i32) -> String {
    if rate < 0 {
        format!("{}%", rate)
    } else {
        format!("+{}%", rate)
    }
}
