// src/colors.rs

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const BLACK: &str = "\x1b[30m";
pub const WHITE: &str = "\x1b[37m";
pub const BLUE: &str = "\x1b[34m";
pub const BRIGHT_BLACK: &str = "\x1b[90m";
pub const BRIGHT_PURPLE: &str = "\x1b[95m";

pub const BLACK_BG: &str = "\x1b[40m";
pub const CYAN_BG: &str = "\x1b[46m";
pub const BRIGHT_GREEN_BG: &str = "\x1b[102m";
pub const BRIGHT_YELLOW_BG: &str = "\x1b[103m";
pub const BRIGHT_PURPLE_BG: &str = "\x1b[105m";
pub const BRIGHT_WHITE_BG: &str = "\x1b[107m";

/// Wraps `text` in the given escape codes followed by a reset.
/// With `enabled == false` the text is returned untouched.
pub fn paint(text: &str, codes: &[&str], enabled: bool) -> String {
    if !enabled || codes.is_empty() {
        return text.to_string();
    }
    format!("{}{}{}", codes.concat(), text, RESET)
}
