use chrono::NaiveDateTime;

/// Timestamp prefix of a migration name, `YYYY-MM-DD-HH-mm-ss`.
pub const NAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
const NAME_TIMESTAMP_LEN: usize = 19;

/// Strips the `YYYY-MM-DD-HH-mm-ss-` prefix when present.
pub fn short_name(name: &str) -> &str {
    let Some(prefix) = name.get(..NAME_TIMESTAMP_LEN) else {
        return name;
    };
    if NaiveDateTime::parse_from_str(prefix, NAME_TIMESTAMP_FORMAT).is_err() {
        return name;
    }
    match name[NAME_TIMESTAMP_LEN..].strip_prefix('-') {
        Some(slug) if !slug.is_empty() => slug,
        _ => name,
    }
}

/// Right-pads `s` with dots to `width` characters. Longer input is truncated.
pub fn pad_dots(s: &str, width: usize) -> String {
    let mut padded: String = s.chars().take(width).collect();
    let len = padded.chars().count();
    padded.extend(std::iter::repeat_n('.', width - len));
    padded
}
