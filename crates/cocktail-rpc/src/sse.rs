/// One line of a `text/event-stream` body, as far as the client cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// `data:` line; payload with surrounding whitespace removed.
    Data(&'a str),
    /// `: ping` keep-alive comment.
    Ping,
    Other,
}

impl<'a> SseLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(payload) = line.strip_prefix("data:") {
            SseLine::Data(payload.trim())
        } else if line.starts_with(": ping") {
            SseLine::Ping
        } else {
            SseLine::Other
        }
    }
}
