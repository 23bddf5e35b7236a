//! Turns operator text into the ordered command batch sent to the engine.

/// One trimmed, non-empty engine instruction.
pub type Command = String;

/// Ordered commands derived from a single execution request.
pub type CommandBatch = Vec<Command>;

/// Splits `text` on line breaks (CR, LF, CRLF) and commas, trimming every
/// piece and dropping the ones left empty. Relative order is preserved.
pub fn split_commands(text: &str) -> CommandBatch {
    text.split(['\r', '\n', ','])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
