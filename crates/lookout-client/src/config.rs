//! DNS escalation ladder configuration.

/// Domain suffixes whose empty answers are worth re-asking for
pub const DEFAULT_ESCALATION_SUFFIXES: &[&str] = &[
    ".tr", ".com.tr", ".net.tr", ".org.tr", ".web.tr", ".gen.tr", ".av.tr",
];

/// Extra DoH parameters for each rung after the base query.
///
/// The first rung disables DNSSEC checking and asks for DNSSEC records; the
/// second additionally sends an EDNS client-subnet hint.
pub const LADDER: &[&[(&str, &str)]] = &[
    &[("cd", "true"), ("do", "true")],
    &[
        ("cd", "true"),
        ("do", "true"),
        ("edns_client_subnet", "0.0.0.0/0"),
    ],
];

/// When to climb the escalation ladder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationConfig {
    /// Lowercase suffixes, each starting with a dot
    pub suffixes: Vec<String>,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ESCALATION_SUFFIXES.iter().copied())
    }
}

impl EscalationConfig {
    /// Create a configuration from a suffix set
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| {
                    let s = s.as_ref().trim().to_ascii_lowercase();
                    if s.starts_with('.') {
                        s
                    } else {
                        format!(".{s}")
                    }
                })
                .collect(),
        }
    }

    /// Never escalate
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            suffixes: Vec::new(),
        }
    }

    /// Whether `domain` is in the escalation set
    #[must_use]
    pub fn applies_to(&self, domain: &str) -> bool {
        let domain = domain.trim_end_matches('.').to_ascii_lowercase();
        self.suffixes.iter().any(|suffix| domain.ends_with(suffix.as_str()))
    }
}
