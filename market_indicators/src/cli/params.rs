/// Trims and uppercases a ticker typed on the command line.
///
/// Returns `None` for a blank ticker.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim();
    (!ticker.is_empty()).then(|| ticker.to_uppercase())
}
