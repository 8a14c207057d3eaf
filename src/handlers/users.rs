use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::config;
use crate::console::ViewState;
use crate::models::{AppState, Role, RoleFilter, UserRecord, UserRow};
use crate::services::{commit_role_change, ensure_loaded, load_directory};
use crate::templates::{ConfirmRoleTemplate, UsersPageTemplate};

use super::helpers::{build_template_globals, plain_html, render_template};

pub async fn root_get() -> Redirect {
    Redirect::to("/users")
}

#[derive(Deserialize)]
pub struct UsersQuery {
    pub search: Option<String>,
    pub role: Option<String>,
    pub page: Option<usize>,
}

pub async fn users_list(State(state): State<AppState>, Query(query): Query<UsersQuery>) -> Response {
    ensure_loaded(&state).await;

    struct PageData {
        rows: Vec<UserRow>,
        search_text: String,
        role_filter: RoleFilter,
        page: usize,
        page_count: usize,
        total: usize,
        loading: bool,
        refreshing: bool,
        last_refreshed: Option<String>,
    }

    let data = {
        let console = state.console.lock().unwrap();
        let mut view = ViewState::new(config::DEFAULT_PAGE_SIZE);
        if let Some(search) = &query.search {
            view.set_search_text(search.clone());
        }
        view.set_role_filter(RoleFilter::parse(query.role.as_deref().unwrap_or("")));
        // page last: the setters above reset it
        view.set_page(query.page.unwrap_or(1));

        let page_view = view.visible(console.fetch.users());
        let rows = page_view
            .rows
            .iter()
            .map(|rec| UserRow::from_record(rec, console.workflow.protected_username()))
            .collect();
        PageData {
            rows,
            search_text: view.search_text().to_string(),
            role_filter: view.role_filter(),
            page: page_view.page,
            page_count: page_view.page_count,
            total: page_view.total,
            loading: console.fetch.is_loading(),
            refreshing: console.fetch.is_refreshing(),
            last_refreshed: console
                .fetch
                .last_refreshed()
                .map(|ts| ts.format("%H:%M:%S UTC").to_string()),
        }
    };

    let mut query_suffix = String::new();
    if !data.search_text.trim().is_empty() {
        query_suffix.push_str(&format!("&search={}", urlencoding::encode(&data.search_text)));
    }
    if data.role_filter != RoleFilter::All {
        query_suffix.push_str(&format!("&role={}", data.role_filter.as_str()));
    }

    let globals = build_template_globals(&state);
    render_template(UsersPageTemplate {
        api_hostname: globals.api_hostname,
        base_url: globals.base_url,
        notice: globals.notice,
        prev_page: (data.page > 1).then(|| data.page - 1),
        next_page: (data.page < data.page_count).then(|| data.page + 1),
        rows: data.rows,
        search_text: data.search_text,
        role_filter: data.role_filter.as_str().to_string(),
        page: data.page,
        page_count: data.page_count,
        total: data.total,
        query_suffix,
        loading: data.loading,
        refreshing: data.refreshing,
        last_refreshed: data.last_refreshed,
    })
}

pub async fn users_refresh(State(state): State<AppState>) -> Redirect {
    load_directory(&state, crate::console::LoadMode::Refresh).await;
    Redirect::to("/users")
}

fn find_user(users: &[UserRecord], username: &str) -> Option<UserRecord> {
    users.iter().find(|u| u.username.eq_ignore_ascii_case(username)).cloned()
}

pub async fn role_change_get(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    ensure_loaded(&state).await;

    let template_data = {
        let mut console = state.console.lock().unwrap();
        let rec = match find_user(console.fetch.users(), &username) {
            Some(rec) => rec,
            None => return plain_html("User not found"),
        };
        let already_open = console
            .workflow
            .draft()
            .map(|d| d.username.eq_ignore_ascii_case(&rec.username))
            .unwrap_or(false);
        if !already_open && !console.workflow.open(&rec) {
            // protected account or another draft in flight; guarded no-op
            return Redirect::to("/users").into_response();
        }
        (rec.username.clone(), rec.display_name(), rec.role().as_str().to_string())
    };

    let (username, display_name, current_role) = template_data;
    let globals = build_template_globals(&state);
    render_template(ConfirmRoleTemplate {
        api_hostname: globals.api_hostname,
        base_url: globals.base_url,
        notice: globals.notice,
        username,
        display_name,
        current_role,
        roles: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
    })
}

#[derive(Deserialize)]
pub struct RoleForm {
    pub role: String,
}

pub async fn role_change_post(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Form(form): Form<RoleForm>,
) -> Response {
    ensure_loaded(&state).await;

    let proposed = match Role::parse(&form.role) {
        Some(role) => role,
        None => return plain_html("Invalid role"),
    };

    {
        let mut console = state.console.lock().unwrap();
        let draft_matches = console
            .workflow
            .draft()
            .map(|d| d.username.eq_ignore_ascii_case(&username))
            .unwrap_or(false);
        if !draft_matches {
            // direct POST or the draft was lost; reopen through the guard
            let rec = match find_user(console.fetch.users(), &username) {
                Some(rec) => rec,
                None => return plain_html("User not found"),
            };
            if !console.workflow.open(&rec) {
                return Redirect::to("/users").into_response();
            }
        }
        console.workflow.propose(proposed);
        if !console.workflow.can_confirm() {
            // proposed == current: confirm is not reachable, back to the dialog
            return Redirect::to(&format!("/users/{}/role", username)).into_response();
        }
    }

    commit_role_change(&state).await;
    Redirect::to("/users").into_response()
}

pub async fn role_change_cancel(State(state): State<AppState>, Path(_username): Path<String>) -> Redirect {
    state.console.lock().unwrap().workflow.cancel();
    Redirect::to("/users")
}

/// Outbound handoff: profile pages live outside this console.
pub async fn profile_redirect(State(state): State<AppState>, Path(username): Path<String>) -> Redirect {
    let target = format!("{}/{}", state.profile_base_url, urlencoding::encode(&username));
    Redirect::to(&target)
}

pub async fn notice_dismiss(State(state): State<AppState>) -> Redirect {
    state.console.lock().unwrap().notifier.dismiss();
    Redirect::to("/users")
}
