use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::models::AppState;
use crate::templates::NoticeView;

#[derive(Default)]
pub struct TemplateGlobals {
    pub api_hostname: String,
    pub base_url: String,
    pub notice: Option<NoticeView>,
}

pub fn build_template_globals(state: &AppState) -> TemplateGlobals {
    let notice = {
        let mut console = state.console.lock().unwrap();
        console.notifier.current_at(Instant::now()).map(|n| NoticeView {
            message: n.message.clone(),
            severity: n.severity.as_str(),
        })
    };
    TemplateGlobals {
        api_hostname: crate::utils::hostname_from_url(&state.api_base_url),
        base_url: state.public_base_url.clone(),
        notice,
    }
}

pub fn plain_html<S: AsRef<str>>(s: S) -> Response {
    Html(format!("<!DOCTYPE html><html><body><p>{}</p></body></html>", s.as_ref())).into_response()
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
