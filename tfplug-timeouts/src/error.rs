//! Error types for tfplug-timeouts

/// Error returned when a timeout string does not follow the duration grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    /// Empty input, a lone sign, a group without digits, or a value that
    /// overflows 64-bit nanoseconds
    #[error("time: invalid duration {}", quote(.input))]
    Invalid { input: String },

    #[error("time: missing unit in duration {}", quote(.input))]
    MissingUnit { input: String },

    #[error("time: unknown unit {} in duration {}", quote(.unit), quote(.input))]
    UnknownUnit { unit: String, input: String },
}

/// Double-quote `s`, escaping `"` and `\`. Control characters and every byte
/// of a non-ASCII character are written as `\xNN`.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c.is_ascii() && c >= ' ' {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        } else {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("\\x{:02x}", byte));
            }
        }
    }
    out.push('"');
    out
}

impl ParseDurationError {
    pub(crate) fn invalid(input: &str) -> Self {
        Self::Invalid {
            input: input.to_string(),
        }
    }

    /// The string that failed to parse
    pub fn input(&self) -> &str {
        match self {
            Self::Invalid { input } | Self::MissingUnit { input } | Self::UnknownUnit { input, .. } => {
                input
            }
        }
    }
}
