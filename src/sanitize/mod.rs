//! Sanitization of raw value text into single-line display text.
//!
//! Every value rendered by the rolling window passes through exactly one
//! [`SanitizePolicy`]. The policies are mutually exclusive rendering
//! philosophies observed across this component's evolution:
//!
//! - [`SpaceCollapse`] (default): line breaks become spaces so multi-line
//!   payloads stay visible on one display line; remaining control characters
//!   become U+FFFD. Favors single-line readability.
//! - [`LiteralEscape`]: control characters are spelled out as C-style literal
//!   escapes (`\n`, `\t`, `\uXXXX`). Favors legibility of raw bytes.
//! - [`ControlGlyph`]: C0 controls are substituted with their Unicode Control
//!   Picture glyphs (U+2400 block).
//!
//! Which policy is "correct" is a product decision, so the choice stays
//! selectable per deployment (see [`PolicyKind`]) rather than hardcoded.
//!
//! Contract shared by all policies: never fails on well-formed input, and the
//! output contains no character that visually spans multiple lines in the
//! viewport. Policies operate per `char`; combining sequences are not
//! special-cased.

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;

/// The Unicode replacement character used for un-displayable controls.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Returns true for characters sanitized away by the canonical policy:
/// C0 controls below U+0020, DEL, and the C1 range U+0080..=U+009F.
fn is_control(c: char) -> bool {
    c < '\u{0020}' || c == '\u{007F}' || ('\u{0080}'..='\u{009F}').contains(&c)
}

/// A swappable strategy converting raw text into single-line display text.
pub trait SanitizePolicy {
    /// Short stable name of the policy, as used in config and CLI.
    fn name(&self) -> &'static str;

    /// Sanitize `raw` into `out`, appending to whatever is already there.
    fn sanitize_into(&self, raw: &str, out: &mut String);

    /// Sanitize `raw` into a fresh string.
    fn sanitize(&self, raw: &str) -> String {
        // Headroom for the occasional control-character expansion.
        let mut out = String::with_capacity(raw.len() + raw.len() / 16);
        self.sanitize_into(raw, &mut out);
        out
    }
}

/// Canonical policy: collapse line breaks to spaces, replace other controls
/// with U+FFFD, keep horizontal tabs.
///
/// Idempotent: the output contains no line-breaking or control characters,
/// so sanitizing it again yields the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceCollapse;

impl SanitizePolicy for SpaceCollapse {
    fn name(&self) -> &'static str {
        "collapse"
    }

    fn sanitize_into(&self, raw: &str, out: &mut String) {
        for c in raw.chars() {
            match c {
                // Assumed always paired with a following line feed.
                '\r' => {}
                '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}' => out.push(' '),
                '\t' => out.push('\t'),
                c if is_control(c) => out.push(REPLACEMENT),
                c => out.push(c),
            }
        }
    }
}

/// Earlier policy: represent text the way it would appear in a C-style
/// string literal.
///
/// Backslash and double quote are escaped too, so the escapes themselves
/// remain unambiguous.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralEscape;

impl SanitizePolicy for LiteralEscape {
    fn name(&self) -> &'static str {
        "escape"
    }

    fn sanitize_into(&self, raw: &str, out: &mut String) {
        use std::fmt::Write as _;

        for c in raw.chars() {
            match c {
                '\\' => out.push_str(r"\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str(r"\n"),
                '\r' => out.push_str(r"\r"),
                '\u{0085}' => out.push_str(r"\x0085"),
                '\u{2028}' => out.push_str(r"\x2028"),
                '\u{2029}' => out.push_str(r"\x2029"),
                '\0' => out.push_str(r"\0"),
                '\u{0007}' => out.push_str(r"\a"),
                '\u{0008}' => out.push_str(r"\b"),
                '\u{000C}' => out.push_str(r"\f"),
                '\t' => out.push_str(r"\t"),
                '\u{000B}' => out.push_str(r"\v"),
                c if c < '\u{0020}' => {
                    // Infallible: writing into a String cannot error.
                    let _ = write!(out, "\\u{:04X}", c as u32);
                }
                c => out.push(c),
            }
        }
    }
}

/// Symbolic policy: substitute C0 controls with their Unicode Control
/// Picture glyphs (U+2400 block), DEL with U+2421.
///
/// Line separators outside the C0 range have no picture glyph and fall back
/// to U+FFFD, as does the C1 range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlGlyph;

impl SanitizePolicy for ControlGlyph {
    fn name(&self) -> &'static str {
        "glyph"
    }

    fn sanitize_into(&self, raw: &str, out: &mut String) {
        for c in raw.chars() {
            match c {
                c if c < '\u{0020}' => {
                    out.push(char::from_u32(0x2400 + c as u32).unwrap_or(REPLACEMENT));
                }
                '\u{007F}' => out.push('\u{2421}'),
                c if is_control(c) || matches!(c, '\u{2028}' | '\u{2029}') => {
                    out.push(REPLACEMENT);
                }
                c => out.push(c),
            }
        }
    }
}

/// Selectable sanitize policy, one per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    /// Collapse line breaks to spaces (canonical default).
    #[default]
    SpaceCollapse,
    /// C-style literal escaping.
    LiteralEscape,
    /// Unicode control-picture substitution.
    ControlGlyph,
}

impl PolicyKind {
    /// All policy names accepted by config and CLI, in display order.
    pub const NAMES: [&'static str; 3] = ["collapse", "escape", "glyph"];

    /// Parse a policy name as used in config and CLI.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "collapse" => Some(Self::SpaceCollapse),
            "escape" => Some(Self::LiteralEscape),
            "glyph" => Some(Self::ControlGlyph),
            _ => None,
        }
    }

    /// Stable name of this policy.
    pub fn name(self) -> &'static str {
        match self {
            Self::SpaceCollapse => "collapse",
            Self::LiteralEscape => "escape",
            Self::ControlGlyph => "glyph",
        }
    }

    /// Instantiate the policy behind a trait object for injection into the
    /// ingestion scheduler.
    pub fn build(self) -> Box<dyn SanitizePolicy + Send + Sync> {
        match self {
            Self::SpaceCollapse => Box::new(SpaceCollapse),
            Self::LiteralEscape => Box::new(LiteralEscape),
            Self::ControlGlyph => Box::new(ControlGlyph),
        }
    }
}
