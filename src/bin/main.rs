//! folio-relay - newsletter sign-up relay
//!
//!   folio-relay serve               → listen for POST {email}, forward as repository-dispatch
//!   folio-relay dispatch <email>    → forward one address and exit
//!
//! Configuration (env, `.env` honored, flags override):
//!   GITHUB_TOKEN                    bearer credential (required)
//!   FOLIO_RELAY_OWNER / _REPO       dispatch target
//!   FOLIO_RELAY_API_BASE            API root (default https://api.github.com)
//!   FOLIO_RELAY_PORT                listen port (default 8787)

use folio::logging::init_logging;
use folio::{create_router, install_signal_handlers, Dispatcher, RelayConfig};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use tracing::{debug, info};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("folio-relay {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("serve") | None => cmd_serve(&opts),
        Some("dispatch") => cmd_dispatch(&opts),
        Some(cmd) => Err(format!("Unknown command: {}", cmd)),
    };

    match result {
        Ok(output) => println!("{}", format_json(&output, opts.pretty)),
        Err(e) => {
            eprintln!("{}", format_json(&json!({"error": e}), opts.pretty));
            std::process::exit(1);
        }
    }
}

fn format_json(value: &Value, pretty: bool) -> String {
    let rendered = if pretty || std::io::stdout().is_terminal() {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    email: Option<String>,
    port: Option<u16>,
    owner: Option<String>,
    repo: Option<String>,
    api_base: Option<String>,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        load_dotenv();

        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            let mut value = || {
                i += 1;
                args.get(i).cloned()
            };
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--pretty" => opts.pretty = true,
                "--port" | "-p" => opts.port = value().and_then(|p| p.parse().ok()),
                "--owner" => opts.owner = value(),
                "--repo" => opts.repo = value(),
                "--api-base" => opts.api_base = value(),
                _ => positional.push(arg.clone()),
            }
            i += 1;
        }

        let mut positional = positional.into_iter();
        opts.command = positional.next();
        opts.email = positional.next();
        opts
    }

    fn relay_config(&self) -> Result<RelayConfig, String> {
        let mut config = RelayConfig::from_env();
        if let Some(port) = self.port { config = config.with_port(port); }
        if let Some(owner) = &self.owner { config = config.with_owner(owner); }
        if let Some(repo) = &self.repo { config = config.with_repo(repo); }
        if let Some(base) = &self.api_base { config = config.with_api_base(base); }
        if config.token.is_empty() {
            return Err(format!("{} is not set", folio::relay::config::vars::TOKEN));
        }
        Ok(config)
    }
}

/// Load `.env` if present. Existing variables win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else { return };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"');
            if !value.is_empty() && env::var(key.trim()).is_err() {
                env::set_var(key.trim(), value);
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"folio-relay - Newsletter sign-up relay

USAGE:
    folio-relay [command] [email] [options]

COMMANDS:
    serve                   Start HTTP server (default)
    dispatch <email>        Forward one address and exit

OPTIONS:
    --port, -p <port>       Server port (default: 8787, env: FOLIO_RELAY_PORT)
    --owner <owner>         Repository owner (env: FOLIO_RELAY_OWNER)
    --repo <repo>           Repository name (env: FOLIO_RELAY_REPO)
    --api-base <url>        API root (env: FOLIO_RELAY_API_BASE)
    --pretty                Pretty-print JSON
    --version, -V           Print version

ENDPOINTS:
    POST /                  {{"email": "..."}} → 200 Subscribed | 400 | 500
    GET  /health            {{status, service}}

EXAMPLES:
    GITHUB_TOKEN=ghp_... folio-relay serve --port 9000
    folio-relay dispatch ada@example.com
"#
    );
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))
}

fn cmd_dispatch(opts: &ParsedArgs) -> Result<Value, String> {
    let email = opts.email.as_deref().ok_or("Email required: folio-relay dispatch <email>")?;
    let config = opts.relay_config()?;
    let dispatcher = Dispatcher::new(config).map_err(|e| format!("Client setup failed: {}", e))?;

    runtime()?.block_on(dispatcher.dispatch(email)).map_err(|e| e.to_string())?;
    Ok(json!({"status": "dispatched", "email": email}))
}

fn cmd_serve(opts: &ParsedArgs) -> Result<Value, String> {
    let config = opts.relay_config()?;
    let port = config.port;
    debug!(?config, "relay configuration");
    let dispatcher = Dispatcher::new(config).map_err(|e| format!("Client setup failed: {}", e))?;

    runtime()?.block_on(async {
        let shutdown = install_signal_handlers();
        let router = create_router(dispatcher);
        let addr = format!("0.0.0.0:{}", port);

        info!("folio-relay listening on http://{}", addr);
        info!("  POST /        - Forward sign-up");
        info!("  GET  /health  - Health check");

        let listener = tokio::net::TcpListener::bind(&addr).await
            .map_err(|e| format!("Failed to bind: {}", e))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await
            .map_err(|e| format!("Server error: {}", e))?;

        info!("Shutdown signal received, server stopped");
        Ok::<(), String>(())
    })?;

    Ok(json!({"status": "stopped"}))
}
