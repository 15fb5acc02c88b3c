//! Services, plans and templates shown on the marketing pages.

use easemyform_core::Price;

/// A purchasable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub name: &'static str,
    /// Whole rupees.
    pub rupees: i64,
    pub purchase_url: &'static str,
}

impl Service {
    #[must_use]
    pub fn price(&self) -> Price {
        Price::inr(self.rupees)
    }
}

/// Premium ATS analysis.
pub const ATS_PREMIUM: Service = Service {
    name: "ATS Premium",
    rupees: 99,
    purchase_url: "https://rzp.io/rzp/qIH8G2w",
};

/// Done-for-you LinkedIn profile optimization.
pub const LINKEDIN_OPTIMIZATION: Service = Service {
    name: "LinkedIn Optimization",
    rupees: 1499,
    purchase_url: "https://rzp.io/l/aDrhVPnV",
};

/// Upgrade link offered after a free LinkedIn review.
pub const LINKEDIN_REVIEW_UPGRADE_URL: &str = "https://rzp.io/rzp/Ue72aJ1V";

/// A column on the pricing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: &'static str,
    /// Rendered price, e.g. "₹99", "Free" or "On request".
    pub price_label: String,
    pub summary: &'static str,
    pub features: &'static [&'static str],
    pub cta: &'static str,
    pub href: &'static str,
    pub highlighted: bool,
}

/// Pricing page plans, cheapest first.
#[must_use]
pub fn pricing_plans() -> Vec<Plan> {
    vec![
        Plan {
            name: "Free ATS Check",
            price_label: "Free".to_string(),
            summary: "See how applicant tracking systems read your resume.",
            features: &[
                "Instant ATS score",
                "PDF, DOC and DOCX uploads",
                "Overview of premium insights",
            ],
            cta: "Check Now",
            href: "/ats-checker",
            highlighted: false,
        },
        Plan {
            name: ATS_PREMIUM.name,
            price_label: ATS_PREMIUM.price().to_string(),
            summary: "A detailed, section-by-section ATS report.",
            features: &[
                "Keyword optimization suggestions",
                "Formatting improvements",
                "Section-wise analysis",
                "Industry-specific recommendations",
            ],
            cta: "Upgrade Now",
            href: ATS_PREMIUM.purchase_url,
            highlighted: true,
        },
        Plan {
            name: LINKEDIN_OPTIMIZATION.name,
            price_label: LINKEDIN_OPTIMIZATION.price().to_string(),
            summary: "Our experts rework your profile end to end.",
            features: &[
                "Headline and About rewrite",
                "Experience and skills enhancement",
                "Network expansion with domain HRs",
                "Delivered within 24-48 hours",
            ],
            cta: "Get Optimized",
            href: "/linkedin-optimization",
            highlighted: false,
        },
        Plan {
            name: "Resume Writing",
            price_label: "On request".to_string(),
            summary: "A professionally written resume tailored to your target role.",
            features: &[
                "One-on-one consultation",
                "ATS-friendly formatting",
                "Two revision rounds",
            ],
            cta: "Contact Us",
            href: "/contact",
            highlighted: false,
        },
    ]
}

/// An entry in the resume template gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeTemplate {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

/// The template gallery.
pub const RESUME_TEMPLATES: &[ResumeTemplate] = &[
    ResumeTemplate {
        name: "Professional",
        category: "Corporate",
        description: "Clean single-column layout that every ATS parses reliably.",
    },
    ResumeTemplate {
        name: "Modern",
        category: "Technology",
        description: "Skills-forward layout for engineers and product roles.",
    },
    ResumeTemplate {
        name: "Executive",
        category: "Leadership",
        description: "Highlights impact and leadership for senior positions.",
    },
    ResumeTemplate {
        name: "Fresher",
        category: "Entry level",
        description: "Puts education, projects and internships first.",
    },
    ResumeTemplate {
        name: "Creative",
        category: "Design",
        description: "Room for a portfolio link without breaking ATS parsing.",
    },
    ResumeTemplate {
        name: "Academic",
        category: "Research",
        description: "Publications, grants and teaching laid out clearly.",
    },
];

/// How the LinkedIn optimization service works.
pub const OPTIMIZATION_PROCESS: &[&str] = &[
    "Share your LinkedIn credentials securely",
    "Our experts log in and optimize your profile",
    "We connect you with relevant HR professionals in your domain",
    "Get a completely optimized profile within 24-48 hours",
];

/// What the LinkedIn optimization service covers.
pub const OPTIMIZATION_FEATURES: &[&str] = &[
    "Professional headline optimization",
    "About section rewriting",
    "Experience section enhancement",
    "Skills and endorsements optimization",
    "Network expansion with domain HRs",
    "Profile photo and banner suggestions",
];

pub const OPTIMIZATION_SECURITY_NOTE: &str = "We use secure, encrypted methods to access your profile and never store your credentials permanently.";

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_service_prices() {
        assert_eq!(ATS_PREMIUM.price().to_string(), "₹99");
        assert_eq!(LINKEDIN_OPTIMIZATION.price().to_string(), "₹1499");
    }

    #[test]
    fn test_pricing_plans() {
        let plans = pricing_plans();
        let labels: Vec<_> = plans.iter().map(|p| p.price_label.as_str()).collect();
        assert_eq!(labels, ["Free", "₹99", "₹1499", "On request"]);
        assert_eq!(plans.iter().filter(|p| p.highlighted).count(), 1);
    }
}
