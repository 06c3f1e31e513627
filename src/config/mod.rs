mod defaults;
mod io;
mod types;
mod validation;

pub use defaults::*;
pub use io::*;
pub use types::*;
pub use validation::*;

impl OpenClawConfig {
    /// Render the document as pretty JSON (2-space indent) with a single
    /// trailing newline.
    pub fn to_json(&self) -> String {
        // String-keyed maps and integer numbers only, so this cannot fail.
        let mut json = serde_json::to_string_pretty(self).unwrap_or_default();
        json.push('\n');
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_has_two_space_indent_and_trailing_newline() {
        let json = OpenClawConfig::default().to_json();
        assert!(json.starts_with("{\n  \"agents\""));
        assert!(json.ends_with("}\n"));
        assert!(!json.ends_with("\n\n"));
    }
}
