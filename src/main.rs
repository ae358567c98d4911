//! # Requill Main Entry Point
//!
//! Composes a request from the last-sent state or an imported file,
//! prints the equivalent curl command, and optionally exports or sends
//! it.

use anyhow::Result;
use requill::cmd_args::CommandLineArgs;
use requill::config;
use requill::persist::{self, FileStore, RequestStore};
use requill::spec::curl::to_curl;
use requill::spec::model::RequestDraft;
use requill::transport::TransportService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let args = CommandLineArgs::parse();
    let store = FileStore::new(config::get_state_path());

    // Defaults, then the last-sent snapshot when requested, then an
    // imported file, in increasing precedence
    let mut draft = RequestDraft::new();
    if args.last() {
        match store.load() {
            Some(last) => {
                tracing::debug!("restored last request from {}", store.path().display());
                draft.apply(&last);
            }
            None => tracing::debug!("no last request at {}", store.path().display()),
        }
    }
    if let Some(path) = args.import() {
        let bytes = std::fs::read(path)?;
        let imported = persist::import_bytes(&bytes)?;
        draft.apply(&imported);
        tracing::debug!("imported request from {}", path.display());
    }

    let spec = draft.spec();
    println!("{}", to_curl(&spec));

    if let Some(path) = args.export() {
        std::fs::write(path, persist::export_bytes(&spec))?;
        println!("\nexported request to {}", path.display());
    }

    if args.send() {
        // Snapshot before sending so the next session starts from here
        store.save(&spec);

        let transport = TransportService::new()?;
        let response = transport.send(&spec).await?;

        println!();
        println!(
            "{} {} ({} ms, {} bytes)",
            response.status, response.status_text, response.duration_ms, response.size_bytes
        );
        if args.verbose() {
            for header in &response.headers {
                println!("{}: {}", header.name, header.value);
            }
            println!();
        }
        if response.body_is_binary {
            println!("(binary body, {} bytes, base64-encoded)", response.size_bytes);
            println!("{}", response.body);
        } else {
            println!("{}", response.body);
        }
    }

    Ok(())
}

fn init_tracing_subscriber() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_env(format!(
                "{}_LOG_LEVEL",
                env!("CARGO_PKG_NAME").to_uppercase()
            ))
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("tokio=warn".parse().unwrap()),
        )
        .init();
}
