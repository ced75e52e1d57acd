use anyhow::Context;
use std::io::{self, BufRead, Write};
use tourbook_web::{state, AppState, PageEvent, ViewUpdate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourbook_web=debug,tourbook_cart=debug".into()),
        )
        // stdout carries view updates
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = tourbook_store::app_config::Config::load().context("Failed to load config")?;
    let store = state::open_store(&config.storage).context("Failed to open session store")?;
    tracing::info!(
        "Starting Tourbook with {} cart item(s), service fee {}",
        config.cart.items.len(),
        config.fees.service_fee
    );

    let mut app = AppState::from_config(&config, store);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &app.init())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read page event")?;
        if line.trim().is_empty() {
            continue;
        }

        match PageEvent::from_line(&line) {
            Ok(event) => {
                tracing::debug!("Page event: {:?}", event);
                emit(&mut out, &app.dispatch(event))?;
            }
            Err(e) => tracing::warn!("Skipping input line: {}", e),
        }
    }

    Ok(())
}

fn emit(out: &mut impl Write, updates: &[ViewUpdate]) -> anyhow::Result<()> {
    for update in updates {
        writeln!(out, "{}", update.to_json()?)?;
    }
    out.flush()?;
    Ok(())
}
