/// One `<disease-name> <marker-pattern>` line from a marker catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerLine<'a> {
    /// 1-based line number in the source text
    pub line_num: usize,
    pub name: &'a str,
    pub pattern: &'a str,
}

/// Parse marker catalog text.
///
/// Each line holds a disease name and a marker pattern separated by
/// whitespace. Any line that does not split into exactly two tokens is
/// skipped, which covers blank lines and prose comments. There is no comment
/// syntax beyond that: `#X ACGT` is a marker named `#X`.
pub fn parse_marker_text(text: &str) -> Vec<MarkerLine<'_>> {
    let mut markers = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(name), Some(pattern), None) => markers.push(MarkerLine {
                line_num: i + 1,
                name,
                pattern,
            }),
            (None, _, _) => {}
            _ => {
                tracing::debug!("Skipping malformed marker line {}: '{}'", i + 1, line);
            }
        }
    }

    markers
}
