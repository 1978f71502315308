//! Utility functions for common operations.

use crate::error::SonarrError;

/// Checks if a Sonarr response has one of the expected statuses, and if not,
/// returns a detailed error.
///
/// This helper extracts both the status code and response body for better
/// error messages. An empty `expected` list accepts any 2xx status.
pub async fn check_response_status(
    response: reqwest::Response,
    expected: &[u16],
) -> Result<reqwest::Response, SonarrError> {
    let status = response.status();
    let accepted = if expected.is_empty() {
        status.is_success()
    } else {
        expected.contains(&status.as_u16())
    };

    if !accepted {
        let body = response.text().await.unwrap_or_default();
        return Err(SonarrError::Api {
            status: status.as_u16(),
            body: truncate(&body, 500),
        });
    }
    Ok(response)
}

/// Shortens text to at most `max_chars` characters, marking the cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// English ordinal suffix for a day of the month ("st", "nd", "rd", "th").
pub fn ordinal_suffix(day: u32) -> &'static str {
    if day == 0 {
        return "";
    }
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
