/// First line of every generated artifact.
pub const AUTOGEN_DISCLAIMER: &str = "// This file is autogenerated. Do not modify.";

/// Quotes `text` as a JSON string literal, used in error messages and in emitted
/// string literals (C++ and TypeScript accept the same escapes for our inputs).
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Converts a snake_case command name to PascalCase.
/// Only the first letter of each `_`-separated word is touched, so
/// `add_user` becomes `AddUser` and `queryTrain` becomes `QueryTrain`.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Converts a name to lowerCamelCase (`add_user` → `addUser`).
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Upper-cases only the first character (`stopoverTimes` → `StopoverTimes`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Accumulates the lines of one generated artifact.
///
/// Indentation is tracked here and nowhere else: emitters push unindented
/// fragments and open/close blocks, and `finish` joins everything once.
/// Trailing whitespace is trimmed so blank lines stay empty.
#[derive(Debug, Default)]
pub struct SourceBuilder {
    lines: Vec<String>,
    level: usize,
}

impl SourceBuilder {
    const INDENT: &'static str = "  ";

    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `text` at the current level. Multi-line text is indented line by line.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        for part in text.as_ref().split('\n') {
            let indented = format!("{}{}", Self::INDENT.repeat(self.level), part);
            self.lines.push(indented.trim_end().to_string());
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Pushes `text` and indents the following lines.
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text).indent()
    }

    /// Dedents and pushes `text`.
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.dedent().line(text)
    }

    /// Joins the accumulated lines; the result always ends with one newline.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
