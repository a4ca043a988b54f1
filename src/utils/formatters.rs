// Formatting utilities

/// Shown in the preview when the welcome message field is empty
pub const SAMPLE_WELCOME: &str = "Welcome {user} to {server}!";

/// Render a welcome message with placeholder names filled in.
/// Only the first `{user}` and `{server}` are substituted.
pub fn welcome_preview(message: &str) -> String {
    let template = if message.is_empty() {
        SAMPLE_WELCOME
    } else {
        message
    };

    template
        .replacen("{user}", "ExampleUser", 1)
        .replacen("{server}", "ExampleServer", 1)
}

/// Truncate string to max length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
