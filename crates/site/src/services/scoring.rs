//! Free-tier scores for the ATS checker and LinkedIn review.
//!
//! Scores are derived from a SHA-256 of the input so the same file name or
//! profile URL always gets the same result. They are a teaser for the paid
//! analysis, not an assessment.

use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::LazyLock;

use easemyform_core::Percent;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Upload extensions the ATS checker accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Free ATS scores fall in this range.
pub const ATS_FREE_RANGE: RangeInclusive<u8> = 20..=59;

/// Free LinkedIn scores fall in this range.
pub const LINKEDIN_FREE_RANGE: RangeInclusive<u8> = 30..=65;

/// Below this a LinkedIn section "Needs improvement".
const LINKEDIN_GOOD_THRESHOLD: u8 = 60;

static LINKEDIN_PROFILE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/in/[a-zA-Z0-9-]+/?$").expect("Invalid regex")
});

/// Whether `filename` has an accepted extension (case-insensitive).
#[must_use]
pub fn is_allowed_upload(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Reduce an uploaded filename to a safe basename.
///
/// Drops any directory components (either separator) and every character
/// outside `[A-Za-z0-9._-]`. Leading dots are removed so the result is never
/// hidden or a relative path.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .replace(' ', "_");

    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

/// Free ATS score for a sanitized filename.
#[must_use]
pub fn ats_score(filename: &str) -> Percent {
    let digest = Sha256::digest(filename.as_bytes());
    let byte = digest.first().copied().unwrap_or_default();
    Percent::clamped(i64::from(scale(byte, &ATS_FREE_RANGE)))
}

/// Whether `url` looks like a public LinkedIn profile.
#[must_use]
pub fn is_linkedin_profile_url(url: &str) -> bool {
    LINKEDIN_PROFILE_URL.is_match(url)
}

/// Free LinkedIn review scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedinScores {
    pub overall: Percent,
    pub heading: Percent,
    pub profile_photo: Percent,
    pub banner: Percent,
    pub skills: Percent,
    pub experience: Percent,
    pub connections: Percent,
    pub education: Percent,
}

impl LinkedinScores {
    /// Sections shown with basic feedback in the free tier.
    #[must_use]
    pub fn basic_feedback(&self) -> [(&'static str, &'static str); 3] {
        [
            ("Headline", feedback(self.heading)),
            ("Profile photo", feedback(self.profile_photo)),
            ("Banner", feedback(self.banner)),
        ]
    }

    /// All section scores with their labels.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, Percent); 7] {
        [
            ("Headline", self.heading),
            ("Profile photo", self.profile_photo),
            ("Banner", self.banner),
            ("Skills", self.skills),
            ("Experience", self.experience),
            ("Connections", self.connections),
            ("Education", self.education),
        ]
    }
}

/// Free LinkedIn scores for a (trimmed) profile URL.
#[must_use]
pub fn linkedin_scores(url: &str) -> LinkedinScores {
    let digest = Sha256::digest(url.as_bytes());
    let at = |i: usize| {
        let byte = digest.get(i).copied().unwrap_or_default();
        Percent::clamped(i64::from(scale(byte, &LINKEDIN_FREE_RANGE)))
    };

    LinkedinScores {
        overall: at(0),
        heading: at(1),
        profile_photo: at(2),
        banner: at(3),
        skills: at(4),
        experience: at(5),
        connections: at(6),
        education: at(7),
    }
}

/// Recommendations shown to free-tier reviewers.
pub const LINKEDIN_FREE_RECOMMENDATIONS: &[&str] = &[
    "Upgrade to premium for detailed recommendations",
    "Get personalized improvement suggestions",
    "Access industry-specific optimization tips",
];

/// Analysis the paid ATS check adds.
pub const ATS_PREMIUM_FEATURES: &[&str] = &[
    "Keyword optimization suggestions",
    "Formatting improvements",
    "Section-wise analysis",
    "Industry-specific recommendations",
    "ATS compatibility score breakdown",
];

const fn feedback(score: Percent) -> &'static str {
    if score.value() < LINKEDIN_GOOD_THRESHOLD {
        "Needs improvement"
    } else {
        "Good"
    }
}

/// Map a byte onto `range`.
fn scale(byte: u8, range: &RangeInclusive<u8>) -> u8 {
    let span = range.end() - range.start() + 1;
    range.start() + byte % span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_uploads() {
        assert!(is_allowed_upload("resume.pdf"));
        assert!(is_allowed_upload("Resume.DOCX"));
        assert!(is_allowed_upload("cv.final.doc"));
        assert!(!is_allowed_upload("resume.txt"));
        assert!(!is_allowed_upload("pdf"));
        assert!(!is_allowed_upload(""));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(sanitize_filename("C:\\Users\\me\\My CV.pdf"), "My_CV.pdf");
        assert_eq!(sanitize_filename("résumé (1).docx"), "rsum_1.docx");
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
    }

    #[test]
    fn test_ats_score_is_deterministic_and_in_range() {
        for name in ["a.pdf", "resume.docx", "John_Doe_CV.pdf", "x.doc"] {
            let score = ats_score(name);
            assert_eq!(score, ats_score(name));
            assert!(ATS_FREE_RANGE.contains(&score.value()), "{name}: {score}");
        }
    }

    #[test]
    fn test_linkedin_url_validation() {
        assert!(is_linkedin_profile_url("https://www.linkedin.com/in/asha-rao"));
        assert!(is_linkedin_profile_url("http://linkedin.com/in/asha123/"));
        assert!(!is_linkedin_profile_url("https://linkedin.com/company/acme"));
        assert!(!is_linkedin_profile_url("https://evil.com/in/asha"));
        assert!(!is_linkedin_profile_url("https://www.linkedin.com/in/asha?x=1"));
        assert!(!is_linkedin_profile_url(""));
    }

    #[test]
    fn test_linkedin_scores_in_range() {
        let scores = linkedin_scores("https://www.linkedin.com/in/asha-rao");
        assert_eq!(scores, linkedin_scores("https://www.linkedin.com/in/asha-rao"));
        assert!(LINKEDIN_FREE_RANGE.contains(&scores.overall.value()));
        for (_, score) in scores.sections() {
            assert!(LINKEDIN_FREE_RANGE.contains(&score.value()));
        }
    }

    #[test]
    fn test_feedback_threshold() {
        assert_eq!(feedback(Percent::clamped(59)), "Needs improvement");
        assert_eq!(feedback(Percent::clamped(60)), "Good");
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(scale(0, &ATS_FREE_RANGE), 20);
        assert_eq!(scale(39, &ATS_FREE_RANGE), 59);
        assert_eq!(scale(40, &ATS_FREE_RANGE), 20);
        assert_eq!(scale(255, &LINKEDIN_FREE_RANGE), 30 + 255 % 36);
    }
}
