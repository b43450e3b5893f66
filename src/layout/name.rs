use alloc::string::String;
use encoding_rs::WINDOWS_1252;

/// Maximum length of an object name within a directory
pub const FILE_NAME_LEN: usize = 10;

/// Decodes a space or NUL padded name field into a string.
///
/// Bytes outside ASCII are mapped through Windows-1252, which agrees with the
/// Acorn character set for every printable character used in names.
pub fn decode_padded_name(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|&b| b == 0 || b == b'\r')
        .unwrap_or(bytes.len());
    let (name, _) = WINDOWS_1252.decode_without_bom_handling(&bytes[..end]);
    String::from(name.trim_matches(|c: char| c == ' ' || c == '\0'))
}

/// Compares two names the way the fileserver does, ignoring ASCII case
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
