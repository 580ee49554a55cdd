//! Unicode icons for CLI output.

use std::env;

/// Status icons
pub struct Icons;

impl Icons {
    pub const CHECK: &'static str = "✓";
    pub const CROSS: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const BULLET: &'static str = "•";
    pub const RULE: &'static str = "─";

    /// Fallback ASCII versions
    pub const CHECK_ASCII: &'static str = "[ok]";
    pub const CROSS_ASCII: &'static str = "[err]";
    pub const WARNING_ASCII: &'static str = "[warn]";
    pub const BULLET_ASCII: &'static str = "*";
    pub const RULE_ASCII: &'static str = "-";
}

/// Icon context that handles unicode support detection
#[derive(Debug, Clone, Copy)]
pub struct IconContext {
    unicode: bool,
}

impl IconContext {
    pub fn new() -> Self {
        Self {
            unicode: detect_unicode_support(),
        }
    }

    pub fn ascii() -> Self {
        Self { unicode: false }
    }

    pub fn check(&self) -> &'static str {
        if self.unicode { Icons::CHECK } else { Icons::CHECK_ASCII }
    }

    pub fn cross(&self) -> &'static str {
        if self.unicode { Icons::CROSS } else { Icons::CROSS_ASCII }
    }

    pub fn warning(&self) -> &'static str {
        if self.unicode { Icons::WARNING } else { Icons::WARNING_ASCII }
    }

    pub fn bullet(&self) -> &'static str {
        if self.unicode { Icons::BULLET } else { Icons::BULLET_ASCII }
    }

    /// Horizontal rule of `width` cells.
    pub fn rule(&self, width: usize) -> String {
        let unit = if self.unicode { Icons::RULE } else { Icons::RULE_ASCII };
        unit.repeat(width)
    }

    /// Check or cross for a boolean outcome.
    pub fn mark(&self, ok: bool) -> &'static str {
        if ok { self.check() } else { self.cross() }
    }
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_unicode_support() -> bool {
    env::var("TERM")
        .map(|t| !t.contains("linux"))
        .unwrap_or(true)
        && env::var("LANG")
            .map(|l| l.to_uppercase().contains("UTF"))
            .unwrap_or(true)
}
