//! Score-driven recommendation cards for the user dashboard.

use easemyform_core::{Percent, Price};

use super::catalog;

/// ATS scores below this surface the premium ATS check.
pub const ATS_UPSELL_BELOW: u8 = 60;

/// LinkedIn scores below this surface the optimization service.
pub const LINKEDIN_UPSELL_BELOW: u8 = 80;

/// One recommendation card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub body: String,
    pub cta: String,
    pub href: &'static str,
    /// Present when the card sells something.
    pub price: Option<Price>,
}

/// Build the recommendation cards for a pair of scores.
///
/// Low scores get a priced call to action; healthy ones a free follow-up.
#[must_use]
pub fn for_scores(ats: Percent, linkedin: Percent) -> Vec<Recommendation> {
    vec![ats_card(ats), linkedin_card(linkedin)]
}

fn ats_card(score: Percent) -> Recommendation {
    if score.value() < ATS_UPSELL_BELOW {
        let price = catalog::ATS_PREMIUM.price();
        Recommendation {
            title: "Improve Your ATS Score".to_string(),
            body: format!(
                "Your current ATS score is {score}. Consider upgrading to our premium ATS checker for detailed insights."
            ),
            cta: format!("Upgrade Now - {price}"),
            href: catalog::ATS_PREMIUM.purchase_url,
            price: Some(price),
        }
    } else {
        Recommendation {
            title: "Keep Your Resume Sharp".to_string(),
            body: format!(
                "Your ATS score is {score}. Recheck after every major edit to stay ahead."
            ),
            cta: "Recheck Resume".to_string(),
            href: "/ats-checker",
            price: None,
        }
    }
}

fn linkedin_card(score: Percent) -> Recommendation {
    if score.value() < LINKEDIN_UPSELL_BELOW {
        let price = catalog::LINKEDIN_OPTIMIZATION.price();
        Recommendation {
            title: "LinkedIn Profile Optimization".to_string(),
            body: format!(
                "Your LinkedIn score is {score}. Our optimization service can help you reach {LINKEDIN_UPSELL_BELOW}%+."
            ),
            cta: format!("Get Optimized - {price}"),
            href: "/linkedin-optimization",
            price: Some(price),
        }
    } else {
        Recommendation {
            title: "Great LinkedIn Profile".to_string(),
            body: format!(
                "Your LinkedIn score is {score}. Keep engaging with your network."
            ),
            cta: "Review Again".to_string(),
            href: "/linkedin-review",
            price: None,
        }
    }
}
