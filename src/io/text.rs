//! Sample parsing and output rendering for string generation

/// Split a sample string into its symbol sequence
///
/// Symbols are Unicode scalar values, so multi-byte characters count as
/// single symbols.
pub fn parse_sample(sample: &str) -> Vec<char> {
    sample.chars().collect()
}

/// Render a generated symbol sequence back into a string
pub fn render_sequence(symbols: &[char]) -> String {
    symbols.iter().collect()
}
