//! Registers a singleton greeter behind a trait and resolves it twice.
//!
//! Run with `RUST_LOG=wiring=debug cargo run --example greet` to see the
//! resolution events.

use std::convert::Infallible;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wiring::{ContainerExt, DiResult, LoggingObserver, WireContainer};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct Ferris;

impl Greeter for Ferris {
    fn greet(&self) -> String {
        "Hello from the container!".to_string()
    }
}

struct Silent;

impl Greeter for Silent {
    fn greet(&self) -> String {
        String::new()
    }
}

fn run() -> DiResult<()> {
    let mut container = WireContainer::new();
    container.add_observer(Arc::new(LoggingObserver::with_label("demo")));

    container.try_singleton(|| Ok::<_, Infallible>(Arc::new(Ferris) as Arc<dyn Greeter>))?;

    let mut first: Arc<dyn Greeter> = Arc::new(Silent);
    container.resolve(&mut first)?;
    let mut second: Arc<dyn Greeter> = Arc::new(Silent);
    container.resolve(&mut second)?;

    println!("{}", first.greet());
    println!("{}", second.greet());
    tracing::info!(shared = Arc::ptr_eq(&first, &second), "resolved greeter twice");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "wiring failed");
            ExitCode::FAILURE
        }
    }
}
