//! String shortening for addresses, symbols and choice labels.

/// Maximum display length for a shortened string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenLimit {
    /// Explicit character limit.
    Chars(usize),
    /// Token symbols (6 chars).
    Symbol,
    /// Token or space names (64 chars).
    Name,
    /// Proposal choice labels (12 chars).
    Choice,
}

impl ShortenLimit {
    pub fn max_chars(self) -> usize {
        match self {
            ShortenLimit::Chars(n) => n,
            ShortenLimit::Symbol => 6,
            ShortenLimit::Name => 64,
            ShortenLimit::Choice => 12,
        }
    }
}

/// `0x1234...abcd` style abbreviation: first 6 and last 4 characters.
pub fn shorten_address(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Truncate `value` to `limit` characters, or abbreviate it as an address
/// when no (or a zero) limit is given.
pub fn shorten(value: &str, limit: Option<ShortenLimit>) -> String {
    if value.is_empty() {
        return String::new();
    }
    match limit.map(ShortenLimit::max_chars) {
        Some(max) if max > 0 => {
            if value.chars().count() > max {
                let cut: String = value.chars().take(max).collect();
                format!("{}...", cut.trim())
            } else {
                value.to_string()
            }
        }
        _ => shorten_address(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

    #[test]
    fn test_shorten_address() {
        assert_eq!(shorten_address(ADDR), "0xdAC1...1ec7");
        assert_eq!(shorten_address("abc"), "abc...abc");
        assert_eq!(shorten_address(""), "...");
    }

    #[test]
    fn test_shorten_with_limits() {
        assert_eq!(shorten("WRAPPEDETH", Some(ShortenLimit::Symbol)), "WRAPPE...");
        assert_eq!(shorten("ETH", Some(ShortenLimit::Symbol)), "ETH");
        assert_eq!(shorten("For the motion", Some(ShortenLimit::Choice)), "For the moti...");
        assert_eq!(shorten("Yes and no", Some(ShortenLimit::Chars(4))), "Yes...");
    }

    #[test]
    fn test_shorten_trims_before_ellipsis() {
        assert_eq!(shorten("ab   cdef", Some(ShortenLimit::Chars(5))), "ab...");
    }

    #[test]
    fn test_shorten_falls_back_to_address() {
        assert_eq!(shorten(ADDR, None), "0xdAC1...1ec7");
        assert_eq!(shorten(ADDR, Some(ShortenLimit::Chars(0))), "0xdAC1...1ec7");
        assert_eq!(shorten("", Some(ShortenLimit::Name)), "");
    }
}
