//! Time-of-day greeting shown above the dashboard.

/// Name used when the signed-in user has none.
pub const FALLBACK_NAME: &str = "User";

/// Greeting for a local hour (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Full header line, e.g. "Good morning, Jane".
pub fn greeting_line(hour: u32, name: Option<&str>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or(FALLBACK_NAME);
    format!("{}, {}", greeting(hour), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }

    #[test]
    fn test_greeting_line_falls_back_to_user() {
        assert_eq!(greeting_line(9, Some("Jane")), "Good morning, Jane");
        assert_eq!(greeting_line(20, None), "Good evening, User");
        assert_eq!(greeting_line(14, Some("")), "Good afternoon, User");
    }
}
