//! Turns the compiler's `index.d.ts` into a publishable `<name>.d.ts`.
//!
//! The compiler declares the package as an internal module
//! (`declare module pkg { ... }`) followed by `export = pkg;`. The published
//! file declares an ambient external module instead (`declare module "pkg"`),
//! which makes the export assignment redundant.

use tracing::warn;

/// Which of the two edits actually found their target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub header_rewritten: bool,
    pub export_removed: bool,
}

impl RewriteReport {
    pub fn is_complete(&self) -> bool {
        self.header_rewritten && self.export_removed
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Byte offset of the first `needle` not followed by an identifier character.
fn find_token(haystack: &str, needle: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = haystack[offset..].find(needle) {
        let start = offset + found;
        let end = start + needle.len();
        match haystack[end..].chars().next() {
            Some(c) if is_identifier_char(c) => offset = end,
            _ => return Some(start),
        }
    }
    None
}

/// Rewrite the first internal module header and drop the first export
/// assignment. Text the edits don't touch is returned unchanged.
pub fn rewrite_declaration(text: &str, name: &str) -> (String, RewriteReport) {
    let mut report = RewriteReport::default();
    let mut output = text.to_string();

    let header = format!("declare module {}", name);
    if let Some(start) = find_token(&output, &header) {
        output.replace_range(
            start..start + header.len(),
            &format!("declare module \"{}\"", name),
        );
        report.header_rewritten = true;
    } else {
        warn!("No '{}' header found in declaration output", header);
    }

    let export = format!("export = {};", name);
    if let Some(start) = output.find(&export) {
        let mut end = start + export.len();
        if output[end..].starts_with("\r\n") {
            end += 2;
        } else if output[end..].starts_with('\n') {
            end += 1;
        }
        output.replace_range(start..end, "");
        report.export_removed = true;
    } else {
        warn!("No '{}' assignment found in declaration output", export);
    }

    (output, report)
}
