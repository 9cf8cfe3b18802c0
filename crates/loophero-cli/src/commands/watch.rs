use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use loophero_core::alerts::{JsonLinesSink, PoolSource};
use loophero_core::storage::messages_path;
use loophero_core::{AlertDispatcher, Event, FileSettingsStore, ObservedEvent, ScrollObserver};

#[derive(Args)]
pub struct WatchArgs {
    /// Read events from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
    /// Seed for alert message selection
    #[arg(long)]
    seed: Option<u64>,
    /// Alert messages TOML file (defaults to messages.toml in the data dir)
    #[arg(long)]
    messages: Option<PathBuf>,
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

fn pool_source(messages: Option<PathBuf>) -> Result<PoolSource, Box<dyn std::error::Error>> {
    if let Some(path) = messages {
        return Ok(PoolSource::File(path));
    }
    let default_path = messages_path()?;
    Ok(if default_path.exists() {
        PoolSource::File(default_path)
    } else {
        PoolSource::Builtin
    })
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let settings = Arc::new(FileSettingsStore::open()?);
    let mut dispatcher = AlertDispatcher::new(JsonLinesSink::new(io::stdout()))
        .with_pool_source(pool_source(args.messages)?);
    if let Some(seed) = args.seed {
        dispatcher = dispatcher.with_seed(seed);
    }

    let (mut observer, started) = ScrollObserver::start(settings, dispatcher);
    print_event(&started)?;

    let fed = feed(reader, &mut observer);

    let (stats, stopped) = observer.stop();
    print_event(&stopped)?;
    eprintln!("{}", serde_json::to_string_pretty(&stats)?);
    fed
}

/// Pump raw lines into the observer. Lines that are not UTF-8 JSON events
/// are logged and skipped; only a failing reader or stdout ends the feed.
fn feed(
    mut reader: Box<dyn BufRead>,
    observer: &mut ScrollObserver,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        line_no += 1;
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let event: ObservedEvent = match serde_json::from_slice(&buf) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping malformed event");
                continue;
            }
        };
        for produced in observer.handle_event(event) {
            print_event(&produced)?;
        }
    }
}
