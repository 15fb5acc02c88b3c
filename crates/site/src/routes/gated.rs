//! Resolving and rendering gated views.

use std::future::Future;
use std::time::Duration;

use askama::Template;
use axum::{http::StatusCode, response::Html};
use easemyform_core::{DataUnavailable, Denial, GatedView, Guard};

use crate::error::AppError;
use crate::filters;

/// Check `guard`, then load the view's data under `deadline`.
///
/// The guard runs first. On denial `load` is never called. A load that
/// misses the deadline is dropped, which cancels it, and the view is
/// [`GatedView::Loading`]. Otherwise the grant and the load result are ready.
pub async fn resolve<G, T, F, Fut>(
    guard: G,
    deadline: Duration,
    load: F,
) -> GatedView<(G::Grant, Result<T, DataUnavailable>)>
where
    G: Guard,
    G::Grant: Copy,
    F: FnOnce(G::Grant) -> Fut,
    Fut: Future<Output = Result<T, DataUnavailable>>,
{
    let grant = match guard.check() {
        Ok(grant) => grant,
        Err(denial) => return GatedView::Unauthorized(denial),
    };

    match tokio::time::timeout(deadline, load(grant)).await {
        Ok(result) => {
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Dashboard data unavailable");
            }
            GatedView::Ready((grant, result))
        }
        Err(_) => {
            tracing::warn!(?deadline, "Dashboard data timed out");
            GatedView::Loading
        }
    }
}

/// Denial surface. Shows nothing from the protected page.
#[derive(Template)]
#[template(path = "gated/denied.html")]
pub struct DeniedTemplate {
    pub title: &'static str,
    pub message: &'static str,
    pub login_link: Option<&'static str>,
}

impl From<Denial> for DeniedTemplate {
    fn from(denial: Denial) -> Self {
        Self {
            title: denial.title(),
            message: denial.message(),
            login_link: denial.login_link(),
        }
    }
}

/// Shown while data is slow; refreshes itself.
#[derive(Template)]
#[template(path = "gated/loading.html")]
pub struct LoadingTemplate {
    pub refresh_to: &'static str,
}

const fn denial_status(denial: Denial) -> StatusCode {
    match denial {
        Denial::LoginRequired => StatusCode::UNAUTHORIZED,
        Denial::AccessDenied => StatusCode::FORBIDDEN,
    }
}

/// Render a gated view to a status and HTML body.
///
/// `path` is where the loading page refreshes to.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render_view<T: Template>(
    view: GatedView<T>,
    path: &'static str,
) -> Result<(StatusCode, String), askama::Error> {
    match view {
        GatedView::Unauthorized(denial) => Ok((
            denial_status(denial),
            DeniedTemplate::from(denial).render()?,
        )),
        GatedView::Loading => Ok((
            StatusCode::OK,
            LoadingTemplate { refresh_to: path }.render()?,
        )),
        GatedView::Ready(page) => Ok((StatusCode::OK, page.render()?)),
    }
}

/// Render a gated view as a handler response.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn respond<T: Template>(
    view: GatedView<T>,
    path: &'static str,
) -> Result<(StatusCode, Html<String>), AppError> {
    let (status, body) = render_view(view, path)?;
    Ok((status, Html(body)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use easemyform_core::{Identity, RequireAdmin, RequireUser};

    use super::*;

    #[tokio::test]
    async fn test_denied_guard_never_loads() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let view = resolve(RequireUser(None), Duration::from_secs(1), move |_| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, DataUnavailable>(())
        })
        .await;

        assert_eq!(view.denial(), Some(Denial::LoginRequired));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_passing_guard_loads_once() {
        let calls = AtomicUsize::new(0);
        let asha = Identity::new("Asha");
        let view = resolve(RequireUser(Some(&asha)), Duration::from_secs(1), |user| {
            calls.fetch_add(1, Ordering::SeqCst);
            let name = user.name.clone();
            async move { Ok::<_, DataUnavailable>(name) }
        })
        .await;

        let GatedView::Ready((user, Ok(name))) = view else {
            panic!("expected ready view");
        };
        assert_eq!(user.name, "Asha");
        assert_eq!(name, "Asha");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_load_is_loading() {
        let view = resolve(RequireAdmin(true), Duration::from_millis(10), |()| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, DataUnavailable>(())
        })
        .await;
        assert_eq!(view, GatedView::Loading);
    }

    #[tokio::test]
    async fn test_unavailable_data_is_still_ready() {
        let view = resolve(RequireAdmin(true), Duration::from_secs(1), |()| async {
            Err::<(), _>(DataUnavailable::new("backend down"))
        })
        .await;
        assert!(matches!(view, GatedView::Ready(((), Err(_)))));
    }

    #[test]
    fn test_render_denials() {
        let (status, body) =
            render_view::<LoadingTemplate>(GatedView::Unauthorized(Denial::LoginRequired), "/x")
                .unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Please Login"));
        assert!(body.contains("Login Now"));

        let (status, body) =
            render_view::<LoadingTemplate>(GatedView::Unauthorized(Denial::AccessDenied), "/x")
                .unwrap();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("Access Denied"));
        assert!(!body.contains("Login Now"));
    }

    #[test]
    fn test_render_loading_refreshes_to_path() {
        let (status, body) =
            render_view::<LoadingTemplate>(GatedView::Loading, "/dashboard").unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("url=/dashboard"));
    }
}
