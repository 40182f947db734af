//! `DialectConfig`: the set of boolean flags that govern both the
//! tokenizer and the printer, so that (for example) the printer's
//! decision to quote a number-shaped symbol depends on exactly the same
//! numeric syntaxes the tokenizer would recognize.
//!
//! Defaults match the conservative baseline: only line comments are on
//! out of the box, everything else opt-in.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectConfig {
    pub enable_line_comment: bool,
    pub enable_block_comment: bool,
    pub enable_escape: bool,
    pub enable_quote: bool,
    pub enable_func_ref: bool,
    pub enable_bin: bool,
    pub enable_oct: bool,
    pub enable_hex: bool,
    pub enable_radix: bool,
    pub enable_frac: bool,
    pub enable_complex: bool,
    pub enable_array: bool,
    pub enable_char: bool,
    pub ignore_case: bool,
}

impl Default for DialectConfig {
    fn default() -> Self {
        DialectConfig {
            enable_line_comment: true,
            enable_block_comment: false,
            enable_escape: false,
            enable_quote: false,
            enable_func_ref: false,
            enable_bin: false,
            enable_oct: false,
            enable_hex: false,
            enable_radix: false,
            enable_frac: false,
            enable_complex: false,
            enable_array: false,
            enable_char: false,
            ignore_case: false,
        }
    }
}

impl DialectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional syntax turned on; useful for tests and for readers
    /// of dialects (EDIF, KiCAD) that use most of the extended grammar.
    pub fn permissive() -> Self {
        DialectConfig {
            enable_line_comment: true,
            enable_block_comment: true,
            enable_escape: true,
            enable_quote: true,
            enable_func_ref: true,
            enable_bin: true,
            enable_oct: true,
            enable_hex: true,
            enable_radix: true,
            enable_frac: true,
            enable_complex: true,
            enable_array: true,
            enable_char: true,
            ignore_case: false,
        }
    }

    pub fn with_line_comment(mut self, v: bool) -> Self {
        self.enable_line_comment = v;
        self
    }
    pub fn with_block_comment(mut self, v: bool) -> Self {
        self.enable_block_comment = v;
        self
    }
    pub fn with_escape(mut self, v: bool) -> Self {
        self.enable_escape = v;
        self
    }
    pub fn with_quote(mut self, v: bool) -> Self {
        self.enable_quote = v;
        self
    }
    pub fn with_func_ref(mut self, v: bool) -> Self {
        self.enable_func_ref = v;
        self
    }
    pub fn with_bin(mut self, v: bool) -> Self {
        self.enable_bin = v;
        self
    }
    pub fn with_oct(mut self, v: bool) -> Self {
        self.enable_oct = v;
        self
    }
    pub fn with_hex(mut self, v: bool) -> Self {
        self.enable_hex = v;
        self
    }
    pub fn with_radix(mut self, v: bool) -> Self {
        self.enable_radix = v;
        self
    }
    pub fn with_frac(mut self, v: bool) -> Self {
        self.enable_frac = v;
        self
    }
    pub fn with_complex(mut self, v: bool) -> Self {
        self.enable_complex = v;
        self
    }
    pub fn with_array(mut self, v: bool) -> Self {
        self.enable_array = v;
        self
    }
    pub fn with_char(mut self, v: bool) -> Self {
        self.enable_char = v;
        self
    }
    pub fn with_ignore_case(mut self, v: bool) -> Self {
        self.ignore_case = v;
        self
    }

    /// Any numeric syntax beyond plain decimal int/float that is
    /// currently recognized — the printer needs this to decide whether a
    /// symbol's rendered text would be mistaken for a number.
    pub fn any_extended_numeric_syntax(&self) -> bool {
        self.enable_bin || self.enable_oct || self.enable_hex || self.enable_radix || self.enable_frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_only_line_comments() {
        let d = DialectConfig::default();
        assert!(d.enable_line_comment);
        assert!(!d.enable_hex);
        assert!(!d.enable_quote);
    }

    #[test]
    fn permissive_enables_everything() {
        let d = DialectConfig::permissive();
        assert!(d.enable_hex && d.enable_complex && d.enable_array && d.enable_char);
    }

    #[test]
    fn builder_methods_are_chainable() {
        let d = DialectConfig::new().with_hex(true).with_frac(true);
        assert!(d.enable_hex);
        assert!(d.enable_frac);
        assert!(!d.enable_oct);
    }
}
