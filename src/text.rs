//! Color codes in user text.

const SECTION_SIGN: char = '§';

/// Translate `&x` color/format codes (`0-9`, `a-f`, `k-o`, `r`) into the
/// section-sign form the game renders.
pub fn add_colors(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&'
            && let Some(&code) = chars.peek()
            && is_color_code(code)
        {
            output.push(SECTION_SIGN);
            output.push(code.to_ascii_lowercase());
            chars.next();
        } else {
            output.push(c);
        }
    }
    output
}

fn is_color_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}

/// Colorize `input`, prefixing `default_color` when the text doesn't open
/// with a color code of its own. Empty text stays empty.
pub fn colorize_with_default(input: &str, default_color: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if input.starts_with('&') || input.starts_with(SECTION_SIGN) {
        add_colors(input)
    } else {
        add_colors(&format!("{default_color}{input}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_codes() {
        assert_eq!(add_colors("&aGreen &LBold"), "§aGreen §lBold");
    }

    #[test]
    fn leaves_other_ampersands() {
        assert_eq!(add_colors("Tom & Jerry &"), "Tom & Jerry &");
        assert_eq!(add_colors("&zoo"), "&zoo");
    }

    #[test]
    fn default_color_prefix() {
        assert_eq!(colorize_with_default("Shop", "&f"), "§fShop");
        assert_eq!(colorize_with_default("&cShop", "&f"), "§cShop");
        assert_eq!(colorize_with_default("", "&f"), "");
    }
}
