// src/utils/html.rs

/// Clean admin- or AI-supplied text with the ammonia whitelist sanitizer.
///
/// Safe inline markup (<b>, <i>, <sub>, ...) survives, scripts and event
/// handler attributes are stripped. Plain text is returned with HTML
/// entities escaped, which is what the quiz front-end renders.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// `clean_html` for optional fields.
pub fn clean_optional(input: Option<String>) -> Option<String> {
    input.map(|s| clean_html(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_keeps_text() {
        let cleaned = clean_html("Capital of Nepal?<script>alert(1)</script>");
        assert_eq!(cleaned, "Capital of Nepal?");
    }

    #[test]
    fn keeps_devanagari_untouched() {
        assert_eq!(clean_html("नेपालको राजधानी"), "नेपालको राजधानी");
    }
}
