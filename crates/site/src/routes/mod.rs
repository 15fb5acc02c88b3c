//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /pricing                - Plans
//! GET  /resume-templates       - Template gallery
//! GET  /privacy-policy         - Privacy policy (markdown content)
//! GET  /contact                - Contact form
//! POST /contact                - Submit contact form
//! GET  /ats-checker            - ATS checker            (user slice)
//! POST /ats-checker            - Upload a resume        (user slice)
//! GET  /linkedin-optimization  - Optimization service
//! GET  /linkedin-review        - LinkedIn review        (user slice)
//! POST /linkedin-review        - Review a profile URL   (user slice)
//! GET  /login                  - Login form             (setters)
//! POST /login                  - Request a login code   (setters)
//! POST /login/verify           - Verify the login code  (setters)
//! POST /logout                 - Log out                (setters)
//! GET  /admin                  - Admin dashboard        (admin flag)
//! GET  /dashboard              - User dashboard         (user slice)
//! ```
//!
//! Nothing is gated at the router. Gated pages check their guard themselves
//! against the session slice their table entry declares.

pub mod admin;
pub mod ats;
pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod gated;
pub mod home;
pub mod linkedin;
pub mod not_found;
pub mod pages;

use axum::{
    Router,
    routing::{MethodRouter, post},
};

use crate::config::SiteConfig;
use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// The part of session state a page receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSlice {
    /// Nothing.
    None,
    /// The identity, read-only.
    User,
    /// The admin capability, read-only.
    AdminFlag,
    /// Write access to identity and admin flag.
    Setters,
}

/// One page in the route table.
pub struct RouteEntry {
    pub path: &'static str,
    pub title: &'static str,
    pub session: SessionSlice,
    view: fn() -> MethodRouter<AppState>,
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("title", &self.title)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Every page the site serves.
pub static ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: "/",
        title: "Home",
        session: SessionSlice::None,
        view: home::view,
    },
    RouteEntry {
        path: "/pricing",
        title: "Pricing",
        session: SessionSlice::None,
        view: pages::pricing_view,
    },
    RouteEntry {
        path: "/resume-templates",
        title: "Resume Templates",
        session: SessionSlice::None,
        view: pages::resume_templates_view,
    },
    RouteEntry {
        path: "/privacy-policy",
        title: "Privacy Policy",
        session: SessionSlice::None,
        view: pages::privacy_policy_view,
    },
    RouteEntry {
        path: "/contact",
        title: "Contact",
        session: SessionSlice::None,
        view: contact::view,
    },
    RouteEntry {
        path: "/ats-checker",
        title: "ATS Checker",
        session: SessionSlice::User,
        view: ats::view,
    },
    RouteEntry {
        path: "/linkedin-optimization",
        title: "LinkedIn Optimization",
        session: SessionSlice::None,
        view: pages::linkedin_optimization_view,
    },
    RouteEntry {
        path: "/linkedin-review",
        title: "LinkedIn Review",
        session: SessionSlice::User,
        view: linkedin::view,
    },
    RouteEntry {
        path: "/login",
        title: "Login",
        session: SessionSlice::Setters,
        view: auth::view,
    },
    RouteEntry {
        path: "/admin",
        title: "Admin Dashboard",
        session: SessionSlice::AdminFlag,
        view: admin::view,
    },
    RouteEntry {
        path: "/dashboard",
        title: "Dashboard",
        session: SessionSlice::User,
        view: dashboard::view,
    },
];

/// The route table.
#[must_use]
pub fn table() -> &'static [RouteEntry] {
    ROUTES
}

/// Find the entry for an exact path.
#[must_use]
pub fn lookup(path: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|entry| entry.path == path)
}

/// Build the page router from the route table.
///
/// Entries holding the session setters, plus the verify and logout actions,
/// share one sub-router so they can be rate limited together.
pub fn routes(config: &SiteConfig) -> Router<AppState> {
    let mut pages = Router::new();
    let mut session_mutating = Router::new()
        .route("/login/verify", post(auth::verify))
        .route("/logout", post(auth::logout));

    for entry in ROUTES {
        if entry.session == SessionSlice::Setters {
            session_mutating = session_mutating.route(entry.path, (entry.view)());
        } else {
            pages = pages.route(entry.path, (entry.view)());
        }
    }

    if config.rate_limit_enabled {
        match auth_rate_limiter(config.trust_proxy_headers) {
            Some(limiter) => session_mutating = session_mutating.layer(limiter),
            None => tracing::warn!("Rate limiter configuration rejected; login routes unlimited"),
        }
    }

    pages.merge(session_mutating)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_table_covers_every_page_once() {
        let paths: Vec<_> = table().iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            [
                "/",
                "/pricing",
                "/resume-templates",
                "/privacy-policy",
                "/contact",
                "/ats-checker",
                "/linkedin-optimization",
                "/linkedin-review",
                "/login",
                "/admin",
                "/dashboard",
            ]
        );
        let unique: HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn test_least_privilege_injection() {
        let with_session: Vec<_> = table()
            .iter()
            .filter(|e| e.session != SessionSlice::None)
            .map(|e| (e.path, e.session))
            .collect();
        assert_eq!(
            with_session,
            [
                ("/ats-checker", SessionSlice::User),
                ("/linkedin-review", SessionSlice::User),
                ("/login", SessionSlice::Setters),
                ("/admin", SessionSlice::AdminFlag),
                ("/dashboard", SessionSlice::User),
            ]
        );
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("/admin").map(|e| e.title), Some("Admin Dashboard"));
        assert!(lookup("/nope").is_none());
        assert!(lookup("/dashboard/").is_none());
    }
}
