//! Extracting directive lines from script blocks.

/// Split script block text into trimmed, non-empty lines.
///
/// Lines of all blocks are concatenated in order.
///
/// # Example
///
/// ```
/// use shorthand_core::directive::source_lines;
///
/// let blocks = ["\n  #a should hide self on click\n\n", "#b should show #a on click"];
/// assert_eq!(
///     source_lines(blocks),
///     vec!["#a should hide self on click", "#b should show #a on click"],
/// );
/// ```
pub fn source_lines<I, S>(blocks: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    blocks
        .into_iter()
        .flat_map(|block| {
            block
                .as_ref()
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_lines_trimmed() {
        let lines = source_lines(["#a should hide self on click\r\n#b should show #a on click\r\n"]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "#a should hide self on click");
    }

    #[test]
    fn test_no_blocks() {
        assert!(source_lines(Vec::<String>::new()).is_empty());
    }
}
