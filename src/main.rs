//! ptdash — a terminal dashboard for PT-site and subscription statistics.
//!
//! One invocation is one stateless render pass; the host scheduler (cron,
//! a status-bar widget runner) re-invokes it on its own timer. Errors
//! during rendering become widget states, not process failures.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use ptdash::app::App;
use ptdash::services::renderer::push_refresh_footer;
use ptdash::services::settings_engine::SettingsEngineTrait;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    let mut app = match App::new(None, None) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("ptdash: startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match arg_refs.as_slice() {
        [] => {
            let widget = app.render_dashboard().await;
            print!("{}", widget.render_ansi());
            ExitCode::SUCCESS
        }
        ["preview"] => {
            let refresh_minutes = app.settings_engine.get_settings().refresh_minutes;
            let mut widget = app.render_dashboard().await;
            push_refresh_footer(&mut widget, refresh_minutes);
            print!("{}", widget.render_ansi());
            ExitCode::SUCCESS
        }
        ["login", username, password] => match app.login(username, password).await {
            Ok(()) => {
                println!("登录成功");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("ptdash: login failed: {}", e);
                ExitCode::FAILURE
            }
        },
        ["logout"] => match app.logout() {
            Ok(()) => {
                println!("账号缓存已清除");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("ptdash: logout failed: {}", e);
                ExitCode::FAILURE
            }
        },
        ["config", "show"] => {
            match serde_json::to_string_pretty(app.settings_engine.get_settings()) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("ptdash: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        ["config", option @ ("bonus" | "seeds"), state @ ("on" | "off")] => {
            match app.set_display_option(option, *state == "on") {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("ptdash: config failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            eprintln!("usage: ptdash [preview | login <user> <pass> | logout | config show | config bonus|seeds on|off]");
            ExitCode::FAILURE
        }
    }
}
