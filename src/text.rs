pub(crate) fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    if char_count(value) <= width {
        return value.to_string();
    }

    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut truncated: String = value.chars().take(width - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Text after the last `/` or `\` of a path as typed on the command line.
pub(crate) fn file_basename(path: &str) -> &str {
    match path.rfind(|ch: char| ch == '/' || ch == '\\') {
        Some(separator) => &path[separator + 1..],
        None => path,
    }
}

pub(crate) fn printable_ascii(byte: u8) -> char {
    if (32..127).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::{file_basename, printable_ascii, truncate_to_width};

    #[test]
    fn truncate_adds_ellipsis_for_long_values() {
        assert_eq!(truncate_to_width("abcdefgh", 6), "abc...");
        assert_eq!(truncate_to_width("abc", 6), "abc");
    }

    #[test]
    fn basename_strips_both_separator_styles() {
        assert_eq!(file_basename("/tmp/dump/a.bin"), "a.bin");
        assert_eq!(file_basename(r"C:\images\disk.img"), "disk.img");
        assert_eq!(file_basename("plain.bin"), "plain.bin");
        assert_eq!(file_basename("trailing/"), "");
    }

    #[test]
    fn non_printable_bytes_become_dots() {
        assert_eq!(printable_ascii(b'A'), 'A');
        assert_eq!(printable_ascii(b' '), ' ');
        assert_eq!(printable_ascii(b'~'), '~');
        assert_eq!(printable_ascii(0x1f), '.');
        assert_eq!(printable_ascii(0x7f), '.');
        assert_eq!(printable_ascii(0xff), '.');
    }
}
