//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use easemyform_core::Icon;
use tracing::instrument;

use crate::filters;
use crate::services::catalog;
use crate::state::AppState;

/// A service card in the overview grid.
#[derive(Clone)]
pub struct ServiceCard {
    pub title: &'static str,
    pub body: &'static str,
    pub href: &'static str,
    pub cta: &'static str,
    pub icon: Icon,
    pub price: Option<String>,
}

fn service_cards() -> Vec<ServiceCard> {
    vec![
        ServiceCard {
            title: "Free ATS Check",
            body: "Upload your resume and see how applicant tracking systems score it.",
            href: "/ats-checker",
            cta: "Check My Resume",
            icon: Icon::Chart,
            price: None,
        },
        ServiceCard {
            title: "LinkedIn Review",
            body: "Get an instant score for your headline, photo, banner and more.",
            href: "/linkedin-review",
            cta: "Review My Profile",
            icon: Icon::Linkedin,
            price: None,
        },
        ServiceCard {
            title: "LinkedIn Optimization",
            body: "Our experts rework your profile and connect you with HRs in your domain.",
            href: "/linkedin-optimization",
            cta: "Learn More",
            icon: Icon::Linkedin,
            price: Some(catalog::LINKEDIN_OPTIMIZATION.price().to_string()),
        },
        ServiceCard {
            title: "Resume Templates",
            body: "ATS-friendly layouts for every stage of your career.",
            href: "/resume-templates",
            cta: "Browse Templates",
            icon: Icon::Document,
            price: None,
        },
    ]
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub services: Vec<ServiceCard>,
}

/// Display the home page.
#[instrument]
pub async fn home() -> impl IntoResponse {
    HomeTemplate {
        services: service_cards(),
    }
}

pub fn view() -> MethodRouter<AppState> {
    get(home)
}
