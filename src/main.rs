use dux::{api, config, console, handlers, models};

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use indicatif::ProgressBar;
use std::net::SocketAddr;
use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use terminal_size::{terminal_size, Width};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use config::{DEFAULT_HOST, DEFAULT_PORT};
use console::{CommitOutcome, Console, LoadMode, ViewState};
use models::{AppState, Role, RoleFilter, UserRow};

// Embed the default stylesheet in the binary
const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

fn notification_ttl() -> Duration {
    Duration::from_secs(config::NOTIFICATION_TTL_SECS)
}

async fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);

    let client = reqwest::Client::builder()
        .user_agent(format!("Dux/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client");

    AppState {
        console: Arc::new(Mutex::new(Console::new(
            config::get_protected_username(),
            notification_ttl(),
        ))),
        api_base_url: config::get_api_base_url(),
        api_token: config::get_api_token(),
        public_base_url: config::get_public_base_url(),
        profile_base_url: config::get_profile_base_url(),
        client,
        custom_css: None,
    }
}

fn build_app(state: AppState) -> Router {
    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    Router::new()
        .route("/", get(handlers::users::root_get))
        .route("/users", get(handlers::users::users_list))
        .route("/users/refresh", post(handlers::users::users_refresh))
        .route(
            "/users/:username/role",
            get(handlers::users::role_change_get).post(handlers::users::role_change_post),
        )
        .route("/users/:username/role/cancel", post(handlers::users::role_change_cancel))
        .route("/users/:username/profile", get(handlers::users::profile_redirect))
        .route("/notice/dismiss", post(handlers::users::notice_dismiss))
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(axum::http::header::CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ))
                .service(ServeDir::new("static")),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = build_app(state);
    tracing::info!(%addr, "Starting Dux server");
    println!(
        "{} {}",
        yansi::Paint::new("Console running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop any process using this port, or start with a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w - 4);
    }
    table
}

fn print_user_table(rows: &[UserRow]) {
    if rows.is_empty() {
        println!("(no users match)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Username", "Name", "Email", "Role"]);
    for row in rows {
        let username = if row.protected {
            format!("{} (protected)", row.username)
        } else {
            row.username.clone()
        };
        table.add_row(vec![&username, &row.display_name, &row.email, &row.role_label]);
    }
    println!("\n{table}\n");
}

fn print_user_detail(row: &UserRow) {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["id", row.id.as_str()]);
    table.add_row(vec!["username", row.username.as_str()]);
    table.add_row(vec!["name", row.display_name.as_str()]);
    table.add_row(vec!["email", row.email.as_str()]);
    table.add_row(vec!["role", row.role_label.as_str()]);
    table.add_row(vec!["protected", if row.protected { "yes" } else { "no" }]);
    println!("\n{table}\n");
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_notice(notice: &console::Notice) {
    let painted = match notice.severity {
        console::Severity::Success => yansi::Paint::new(&notice.message).green().to_string(),
        console::Severity::Error => yansi::Paint::new(&notice.message).red().to_string(),
        console::Severity::Info => yansi::Paint::new(&notice.message).cyan().to_string(),
    };
    println!("{}", painted);
}

/// Fetch the whole directory into a fresh console for a CLI invocation.
/// Exits with an error when the very first load fails — the CLI has no
/// stale table to fall back on.
async fn cli_load_console(client: &reqwest::Client) -> Console {
    let mut console = Console::new(config::get_protected_username(), notification_ttl());
    let ticket = console.fetch.begin(LoadMode::Initial);
    let pb = spinner("Loading users...");
    let outcome = api::load_users(client, &config::get_api_base_url(), &config::get_api_token()).await;
    console.fetch.complete(ticket, outcome, &mut console.notifier);
    pb.finish_and_clear();
    if !console.fetch.has_loaded() {
        if let Some(notice) = console.notifier.current() {
            eprintln!("{}", yansi::Paint::new(&notice.message).red());
        }
        process::exit(1);
    }
    console
}

#[derive(Parser)]
#[command(
    name = "dux",
    author,
    version,
    about = "Dux user-directory console",
    long_about = r#"Dux — browse and manage the accounts of a remote user directory.

This tool surfaces a small set of commands to run the web console, validate
configuration, and list/search/update users through the directory API. Use
the `--env-file` option or environment variables to provide API credentials.

Examples:
  1) Build & run (dev):
      cargo run -- serve --host 127.0.0.1 --port 8080
  2) Browse users:
      dux users list --search ali --role admin --page 1
  3) Change a role (with confirmation):
      dux users set-role bob editor
"#,
    after_help = "Use `dux <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web console
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration (env vars / API credentials)
    #[command(
        about = "Validate configuration and ensure API connectivity.",
        long_about = "Validate the environment variables required by Dux, then validate the configured credentials by attempting to fetch the user collection from the remote directory."
    )]
    CheckConfig { env_file: Option<String> },
    /// Browse and manage directory users
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List users (filter and paginate locally)
    #[command(
        about = "List users",
        long_about = "Fetch the full user collection and filter/paginate it locally. `--search` matches username, email and full name case-insensitively; `--role` narrows to one role. Use `--page` and `--per-page` for pagination."
    )]
    List {
        /// Case-insensitive text filter (username, email, full name)
        #[arg(long)]
        search: Option<String>,
        /// Role filter: all, user, editor or admin
        #[arg(long)]
        role: Option<String>,
        /// Page number to display (1-indexed)
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,
        /// Number of users per page
        #[arg(long, default_value_t = config::DEFAULT_PAGE_SIZE)]
        per_page: usize,
    },
    /// Show one user's details
    #[command(about = "Show a user", long_about = "Show the directory record for one username as a field/value table.")]
    Show { username: String },
    /// Change a user's access role
    #[command(
        about = "Change a user's role",
        long_about = "Change the access role of a user through the guarded workflow: the protected account is refused, no-op changes are skipped, and the change is confirmed before it is sent. After a successful update the collection is re-fetched so the printed row reflects the remote state."
    )]
    SetRole {
        username: String,
        /// New role: user, editor or admin
        role: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

fn read_confirmation(prompt: &str) -> bool {
    use std::io::Write;
    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::client::set_silent(true);
    }

    // Dispatch CLI commands. If no command provided, serve the web console by default
    if cli.command.is_none() {
        let state = build_state_from_env(None).await;
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    }
    match cli.command.unwrap() {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            let state = build_state_from_env(env_file.as_deref()).await;
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file } => {
            config::load_env_file(env_file.as_deref());
            if std::env::var("DIRECTORY_API_BASE_URL").map(|v| v.trim().is_empty()).unwrap_or(true) {
                eprintln!("{}", yansi::Paint::new("DIRECTORY_API_BASE_URL is not configured").red());
                process::exit(1);
            }
            let client = reqwest::Client::builder()
                .user_agent(format!("Dux/{}", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client");
            match api::load_users(&client, &config::get_api_base_url(), &config::get_api_token()).await {
                Ok(users) => {
                    println!(
                        "{}",
                        yansi::Paint::new(format!("Configuration looks valid ({} users returned)", users.len())).green()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Users { sub } => {
            config::load_env_file(None);
            let client = reqwest::Client::builder()
                .user_agent(format!("Dux/{}", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client");
            match sub {
                UserCommands::List {
                    search,
                    role,
                    page,
                    per_page,
                } => {
                    let console = cli_load_console(&client).await;
                    let mut view = ViewState::new(per_page.max(1));
                    view.set_search_text(search.unwrap_or_default());
                    view.set_role_filter(RoleFilter::parse(role.as_deref().unwrap_or("")));
                    view.set_page(page);
                    let page_view = view.visible(console.fetch.users());
                    let rows: Vec<UserRow> = page_view
                        .rows
                        .iter()
                        .map(|rec| UserRow::from_record(rec, console.workflow.protected_username()))
                        .collect();
                    let (current_page, total_pages, total) = (page_view.page, page_view.page_count, page_view.total);
                    print_user_table(&rows);
                    if total_pages > 1 {
                        println!(
                            "{}",
                            yansi::Paint::new(format!(
                                "Page {} of {} | Showing {} of {} matching users",
                                current_page,
                                total_pages,
                                rows.len(),
                                total
                            ))
                            .cyan()
                        );
                        if current_page > 1 {
                            println!(
                                "{} {}",
                                yansi::Paint::new("←").bold(),
                                yansi::Paint::new(format!(
                                    "Previous page: dux users list --page {} --per-page {}",
                                    current_page - 1,
                                    per_page
                                ))
                                .dim()
                            );
                        }
                        if current_page < total_pages {
                            println!(
                                "{} {}",
                                yansi::Paint::new("→").bold(),
                                yansi::Paint::new(format!(
                                    "Next page: dux users list --page {} --per-page {}",
                                    current_page + 1,
                                    per_page
                                ))
                                .dim()
                            );
                        }
                        println!();
                    }
                }
                UserCommands::Show { username } => {
                    let console = cli_load_console(&client).await;
                    let rec = console
                        .fetch
                        .users()
                        .iter()
                        .find(|u| u.username.eq_ignore_ascii_case(&username));
                    match rec {
                        Some(rec) => {
                            let row = UserRow::from_record(rec, console.workflow.protected_username());
                            print_user_detail(&row);
                        }
                        None => {
                            eprintln!(
                                "{} '{}' {}",
                                yansi::Paint::new("User").red(),
                                username,
                                yansi::Paint::new("not found").red()
                            );
                            process::exit(1);
                        }
                    }
                }
                UserCommands::SetRole { username, role, yes } => {
                    let new_role = match Role::parse(&role) {
                        Some(r) => r,
                        None => {
                            eprintln!(
                                "{} '{}' (expected user, editor or admin)",
                                yansi::Paint::new("Invalid role").red(),
                                role
                            );
                            process::exit(1);
                        }
                    };
                    let mut console = cli_load_console(&client).await;
                    let rec = console
                        .fetch
                        .users()
                        .iter()
                        .find(|u| u.username.eq_ignore_ascii_case(&username))
                        .cloned();
                    let rec = match rec {
                        Some(rec) => rec,
                        None => {
                            eprintln!(
                                "{} '{}' {}",
                                yansi::Paint::new("User").red(),
                                username,
                                yansi::Paint::new("not found").red()
                            );
                            process::exit(1);
                        }
                    };
                    if !console.workflow.open(&rec) {
                        eprintln!(
                            "{}",
                            yansi::Paint::new(format!("'{}' is protected; role changes are disabled", rec.username))
                                .yellow()
                        );
                        process::exit(1);
                    }
                    console.workflow.propose(new_role);
                    if !console.workflow.can_confirm() {
                        println!(
                            "{}",
                            yansi::Paint::new(format!("'{}' already has role {}; nothing to do", rec.username, new_role))
                                .dim()
                        );
                        console.workflow.cancel();
                        return;
                    }
                    if !yes {
                        let prompt = format!(
                            "Change role of '{}' from {} to {}?",
                            rec.username,
                            rec.role(),
                            new_role
                        );
                        if !read_confirmation(&prompt) {
                            console.workflow.cancel();
                            println!("{}", yansi::Paint::new("Cancelled").dim());
                            return;
                        }
                    }
                    let request = match console.workflow.begin_commit() {
                        Some(req) => req,
                        None => return,
                    };
                    let pb = spinner("Updating role...");
                    let result = api::update_user_role(
                        &client,
                        &config::get_api_base_url(),
                        &config::get_api_token(),
                        &request.user_id,
                        request.role,
                    )
                    .await;
                    let outcome = console.workflow.complete_commit(result, &mut console.notifier);
                    pb.finish_and_clear();
                    if let Some(notice) = console.notifier.current() {
                        print_notice(notice);
                    }
                    match outcome {
                        CommitOutcome::Saved => {
                            // Re-fetch rather than patch: the printed row must
                            // reflect the remote source of truth.
                            let ticket = console.fetch.begin(LoadMode::Refresh);
                            let pb = spinner("Refreshing...");
                            let outcome =
                                api::load_users(&client, &config::get_api_base_url(), &config::get_api_token()).await;
                            console.fetch.complete(ticket, outcome, &mut console.notifier);
                            pb.finish_and_clear();
                            if let Some(rec) = console
                                .fetch
                                .users()
                                .iter()
                                .find(|u| u.username.eq_ignore_ascii_case(&username))
                            {
                                let row = UserRow::from_record(rec, console.workflow.protected_username());
                                print_user_detail(&row);
                            }
                        }
                        CommitOutcome::Failed => process::exit(1),
                        CommitOutcome::NotCommitting => {}
                    }
                }
            }
        }
    }
}
