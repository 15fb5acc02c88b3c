//! Display records: the values behind stat tiles, score cards and activity rows.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::percent::Percent;

/// Visual tone of a tile or row, rendered as a CSS modifier class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Teal,
}

impl Tone {
    /// CSS class for this tone.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Blue => "tone-blue",
            Self::Green => "tone-green",
            Self::Purple => "tone-purple",
            Self::Orange => "tone-orange",
            Self::Red => "tone-red",
            Self::Teal => "tone-teal",
        }
    }
}

/// Icon hint for a record. Templates map the name to a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Users,
    Document,
    Briefcase,
    Article,
    Chart,
    Linkedin,
    Check,
    Clock,
}

impl Icon {
    /// Stable icon name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Document => "document",
            Self::Briefcase => "briefcase",
            Self::Article => "article",
            Self::Chart => "chart",
            Self::Linkedin => "linkedin",
            Self::Check => "check",
            Self::Clock => "clock",
        }
    }
}

/// The value shown by a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayValue {
    /// A counter, rendered with thousands separators.
    Count(u64),
    /// Free text such as "Success".
    Text(String),
    /// A percentage score.
    Score(Percent),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => f.write_str(&group_thousands(*n)),
            Self::Text(text) => f.write_str(text),
            Self::Score(percent) => write!(f, "{percent}"),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One rendered tile, card or list row.
///
/// Plain immutable value with structural equality. Providers build fresh
/// records per request; views never reorder them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub label: String,
    pub value: DisplayValue,
    pub tone: Tone,
    pub icon: Option<Icon>,
    /// Secondary line, e.g. an order number or e-mail address.
    pub detail: Option<String>,
    /// Relative time label such as "2 days ago".
    pub when: Option<String>,
}

impl DisplayRecord {
    /// A stat tile with a counter.
    #[must_use]
    pub fn stat(label: impl Into<String>, count: u64, tone: Tone, icon: Icon) -> Self {
        Self {
            label: label.into(),
            value: DisplayValue::Count(count),
            tone,
            icon: Some(icon),
            detail: None,
            when: None,
        }
    }

    /// A score card. The raw score is clamped into `0..=100`.
    #[must_use]
    pub fn score(label: impl Into<String>, raw: i64, tone: Tone, icon: Icon) -> Self {
        Self {
            label: label.into(),
            value: DisplayValue::Score(Percent::clamped(raw)),
            tone,
            icon: Some(icon),
            detail: None,
            when: None,
        }
    }

    /// An activity row: what happened, when, and the outcome.
    #[must_use]
    pub fn activity(
        action: impl Into<String>,
        when: impl Into<String>,
        result: DisplayValue,
        tone: Tone,
    ) -> Self {
        Self {
            label: action.into(),
            value: result,
            tone,
            icon: None,
            detail: None,
            when: Some(when.into()),
        }
    }

    /// Attach a secondary line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The percentage, when the value is a score.
    #[must_use]
    pub const fn percent(&self) -> Option<Percent> {
        match self.value {
            DisplayValue::Score(percent) => Some(percent),
            DisplayValue::Count(_) | DisplayValue::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_grouping() {
        assert_eq!(DisplayValue::Count(0).to_string(), "0");
        assert_eq!(DisplayValue::Count(156).to_string(), "156");
        assert_eq!(DisplayValue::Count(1247).to_string(), "1,247");
        assert_eq!(DisplayValue::Count(10_234).to_string(), "10,234");
        assert_eq!(DisplayValue::Count(1_000_000).to_string(), "1,000,000");
    }

    #[test]
    fn test_score_record_clamps() {
        let over = DisplayRecord::score("ATS Score", 145, Tone::Blue, Icon::Chart);
        let under = DisplayRecord::score("ATS Score", -10, Tone::Blue, Icon::Chart);
        assert_eq!(over.percent(), Some(Percent::FULL));
        assert_eq!(under.percent(), Some(Percent::ZERO));
        assert_eq!(over.value.to_string(), "100%");
    }

    #[test]
    fn test_activity_record() {
        let row = DisplayRecord::activity(
            "Profile Updated",
            "2 weeks ago",
            DisplayValue::Text("Success".into()),
            Tone::Purple,
        );
        assert_eq!(row.when.as_deref(), Some("2 weeks ago"));
        assert_eq!(row.value.to_string(), "Success");
        assert_eq!(row.percent(), None);
    }

    #[test]
    fn test_structural_equality() {
        let a = DisplayRecord::stat("Total Users", 1247, Tone::Blue, Icon::Users);
        let b = DisplayRecord::stat("Total Users", 1247, Tone::Blue, Icon::Users);
        assert_eq!(a, b);
        assert_ne!(a, b.with_detail("x"));
    }
}
