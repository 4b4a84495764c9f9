//! Embedded HTML for the info page

/// What the page reports about the running device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub board: String,
    pub firmware: String,
}

impl DeviceInfo {
    pub fn new(board: impl Into<String>, firmware: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            firmware: firmware.into(),
        }
    }
}

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Device Info</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        html { font-family: Helvetica, Arial, sans-serif; display: inline-block; margin: 0px auto; text-align: center; }
        body { background-color: #F2F2F2; }
        h1 { color: #0F3376; }
        .info { font-size: 1.5rem; color: #333; }
    </style>
</head>
<body>
    <h1>Device Info</h1>
"#;

const TAIL: &str = r#"</body>
</html>
"#;

/// Build the page once; the result is served verbatim to every client.
pub fn render(info: &DeviceInfo) -> String {
    format!(
        "{HEAD}    <p class=\"info\"><strong>Board:</strong> {}</p>\n    <p class=\"info\"><strong>Firmware:</strong> {}</p>\n{TAIL}",
        escape(&info.board),
        escape(&info.firmware),
    )
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
