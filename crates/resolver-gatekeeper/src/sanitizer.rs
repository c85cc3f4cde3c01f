//! Removal of markup and script fragments from user text

use regex::Regex;
use std::sync::OnceLock;

/// Compiled once on first use.
static PATTERNS: OnceLock<DangerousPatternSet> = OnceLock::new();

/// Patterns stripped from every stored string.
#[derive(Debug)]
struct DangerousPatternSet {
    /// `<script ...> ... </script>`, shortest span, across lines
    script_block: Regex,
    /// `<iframe ...> ... </iframe>`, shortest span, across lines
    iframe_block: Regex,
    /// `javascript:` scheme prefix
    javascript_scheme: Regex,
    /// `onclick=`, `onload =`, ...; the handler name is ASCII word characters only
    event_handler: Regex,
}

impl DangerousPatternSet {
    fn new() -> Self {
        Self {
            script_block: Regex::new(r"(?is)<script\b.*?</script>")
                .expect("script_block regex must compile"),
            iframe_block: Regex::new(r"(?is)<iframe\b.*?</iframe>")
                .expect("iframe_block regex must compile"),
            javascript_scheme: Regex::new(r"(?i)javascript:")
                .expect("javascript_scheme regex must compile"),
            event_handler: Regex::new(r"(?i-u:on\w+)\s*=")
                .expect("event_handler regex must compile"),
        }
    }

    fn strip_once(&self, input: &str) -> String {
        let text = self.script_block.replace_all(input, "");
        let text = self.iframe_block.replace_all(&text, "");
        let text = self.javascript_scheme.replace_all(&text, "");
        let text = self.event_handler.replace_all(&text, "");
        text.trim().to_string()
    }
}

fn patterns() -> &'static DangerousPatternSet {
    PATTERNS.get_or_init(DangerousPatternSet::new)
}

/// Strip script and iframe blocks, `javascript:` prefixes and event handler
/// assignments, then trim.
///
/// Removal repeats until nothing changes, so fragments that only form a
/// pattern after an inner removal are caught too and the function is
/// idempotent.
///
/// # Examples
///
/// ```
/// use resolver_gatekeeper::sanitize_input;
///
/// assert_eq!(sanitize_input(r#"Hello<script>alert("xss")</script>World"#), "HelloWorld");
/// assert_eq!(sanitize_input("Hello World! This is a test."), "Hello World! This is a test.");
/// ```
pub fn sanitize_input(input: &str) -> String {
    let patterns = patterns();
    let mut current = patterns.strip_once(input);

    loop {
        let next = patterns.strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
