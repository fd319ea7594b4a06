//! Display labels for translation keys

/// Maps a translation key to its display label. Unknown keys are returned as-is.
pub fn loc(key: &str) -> &str {
    match key {
        "_abbreviation" => "Abbreviation",
        "_name" => "Name",
        "_symbol" => "Symbol",
        "_isBase" => "Base Currency",
        "_currency" => "Currency",
        "_rate" => "Rate",
        _ => key,
    }
}
