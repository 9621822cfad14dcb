// File: src/core/converter.rs
use crate::core::table::TransliterationTable;
use tracing::trace;

/// Transliterates a Latin phonetic spelling with `table`.
///
/// Greedy longest match: at each position, keys of length `table.max_match()`
/// down to 1 are tried and the first hit is emitted. A character no key
/// starts with is copied unchanged. Lengths are counted in chars.
pub fn transliterate(input: &str, table: &TransliterationTable) -> String {
    // Byte offset of every char boundary, including the end of the string.
    let bounds: Vec<usize> = input
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(input.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let mut result = String::with_capacity(input.len());
    let mut cursor = 0;

    while cursor < char_count {
        let longest = table.max_match().min(char_count - cursor);
        let hit = (1..=longest).rev().find_map(|len| {
            let key = &input[bounds[cursor]..bounds[cursor + len]];
            table.get(key).map(|out| (len, out))
        });

        match hit {
            Some((len, out)) => {
                result.push_str(out);
                cursor += len;
            }
            None => {
                result.push_str(&input[bounds[cursor]..bounds[cursor + 1]]);
                cursor += 1;
            }
        }
    }

    trace!(table = table.name(), input, output = %result, "transliterated");
    result
}
