// Guild Dashboard - console host
// Reads one UI event per line from stdin and feeds it to the controller

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guild_dashboard::{ConfigField, Dashboard, DashboardSettings, HttpTransport, Page};

type Host = Dashboard<HttpTransport>;

const HELP: &str = "\
Events:
  nav <page>            overview | general | welcome | moderation | tickets | roles
  select <guild id>     pick a guild from the directory (empty clears)
  manual <guild id>     type a guild id by hand
  set <field> <value>   edit a form field (prefix, timezone, welcomeChannel, ...)
  save                  save the form
  reload                reload the guild list
  login                 show the Discord login URL
  preview               preview the welcome message
  show                  print the page, form and status
  quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "guild_dashboard=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = DashboardSettings::from_env()?;
    let transport = Arc::new(HttpTransport::new(&settings)?);
    info!("Starting dashboard against {}", transport.api_base());

    let dashboard = Dashboard::new(transport, &settings);

    spawn_event(&dashboard, |d| async move { d.init().await });
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down...");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_event(&dashboard, line.trim()).await {
                    break;
                }
            }
        }
    }

    info!("Goodbye!");
    Ok(())
}

/// Run a network-bound event in the background and print its outcome
fn spawn_event<F, Fut>(dashboard: &Host, event: F)
where
    F: FnOnce(Host) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let dashboard = dashboard.clone();
    tokio::spawn(async move {
        event(dashboard.clone()).await;
        print_status(&dashboard).await;
    });
}

/// Handle one input line; `false` ends the session
async fn handle_event(dashboard: &Host, line: &str) -> bool {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim().to_string();

    match command {
        "" => {}
        "quit" | "exit" => return false,
        "help" => println!("{}", HELP),
        "show" => print_all(dashboard).await,
        "nav" => match rest.parse::<Page>() {
            Ok(page) => {
                dashboard.navigate(page).await;
                print_page(dashboard).await;
            }
            Err(e) => warn!("{}", e),
        },
        "select" => spawn_event(dashboard, move |d| async move { d.select_guild(&rest).await }),
        "manual" => spawn_event(dashboard, move |d| async move {
            d.enter_manual_guild(&rest).await
        }),
        "set" => {
            let (key, value) = rest.split_once(' ').unwrap_or((rest.as_str(), ""));
            match key.parse::<ConfigField>() {
                Ok(field) => dashboard.edit(field, value).await,
                Err(e) => warn!("{}", e),
            }
        }
        "save" => spawn_event(dashboard, |d| async move { d.save().await }),
        "reload" => spawn_event(dashboard, |d| async move { d.reload_guilds().await }),
        "login" => println!("Open {} in your browser to sign in.", dashboard.login_url()),
        "preview" => println!("Preview:\n\n{}", dashboard.welcome_preview().await),
        other => println!("Unknown event '{}'. Type 'help'.", other),
    }

    true
}

async fn print_status(dashboard: &Host) {
    println!("{}", dashboard.snapshot().await.status.current());
}

async fn print_page(dashboard: &Host) {
    let state = dashboard.snapshot().await;
    let tabs: Vec<String> = state
        .navigator
        .controls()
        .iter()
        .map(|c| {
            if c.active {
                format!("[{}]", c.page.display_name())
            } else {
                c.page.display_name().to_string()
            }
        })
        .collect();
    println!(
        "== {} (#{}) ==  {}",
        state.navigator.title(),
        state.navigator.current().panel_id(),
        tabs.join(" | ")
    );
}

async fn print_all(dashboard: &Host) {
    print_page(dashboard).await;

    let state = dashboard.snapshot().await;
    println!("Servers:");
    for option in state.directory.options() {
        let marker = if option.value == state.directory.selected() { "*" } else { " " };
        println!(" {} {:<22} {}", marker, option.value, option.label);
    }
    println!("Manual guild id: {}", state.manual_guild);
    for field in ConfigField::ALL {
        println!("  {:<18} {}", field.key(), state.form.get(field));
    }
    println!("{}", state.status.current());
}
