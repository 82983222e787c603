//! Folder watcher that formats documents after they change.
//!
//! Bursts of events are drained into one batch per debounce window, and each
//! touched path is formatted once. Writes made by the formatter raise another
//! event; the follow-up pass finds the text unchanged and writes nothing.

use clap::Args;
use log::{debug, error, info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use timeblock_core::{DocumentFormatter, FormatOutcome, FsDocumentStore};

#[derive(Args)]
pub struct WatchArgs {
    /// Notes root to watch recursively
    pub root: PathBuf,
    /// Settings JSON file
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Quiet period before a batch of changes is formatted
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = super::load_settings(args.settings.as_deref())?;
    let root = args.root.canonicalize()?;
    let formatter = DocumentFormatter::new(FsDocumentStore::new(&root), settings, &root);

    let (tx, rx) = mpsc::channel::<PathBuf>();
    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) if is_content_event(&event.kind) => forward_paths(&tx, event.paths),
            Ok(_) => {}
            Err(err) => warn!("event=watch_event module=cli status=error error={err}"),
        },
        notify::Config::default(),
    )?;
    watcher.watch(&root, RecursiveMode::Recursive)?;
    info!(
        "event=watch_start module=cli status=ok root={} debounce_ms={}",
        root.display(),
        args.debounce_ms
    );
    eprintln!("watching {} (ctrl-c to stop)", root.display());

    let debounce = Duration::from_millis(args.debounce_ms);
    while let Some(batch) = next_batch(&rx, debounce) {
        debug!("event=watch_batch module=cli status=ok paths={}", batch.len());
        for path in batch {
            if !path.is_file() {
                continue;
            }
            match formatter.handle_file_change(&path) {
                Ok(FormatOutcome::Rewritten { changed_lines }) => {
                    println!("formatted {} ({changed_lines} lines)", path.display());
                }
                Ok(_) => {}
                Err(err) => error!(
                    "event=watch_format module=cli status=error path={} error={err}",
                    path.display()
                ),
            }
        }
    }

    info!("event=watch_stop module=cli status=ok");
    Ok(())
}

/// Sends changed paths to the batching loop; stops at the first failure
/// because a closed receiver means the loop has already exited.
fn forward_paths(tx: &Sender<PathBuf>, paths: Vec<PathBuf>) {
    for path in paths {
        if let Err(err) = tx.send(path) {
            debug!(
                "event=watch_event module=cli status=skip reason=receiver_closed path={}",
                err.0.display()
            );
            return;
        }
    }
}

fn is_content_event(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

/// Blocks for the first path, then collects more until `debounce` passes
/// without a new one. Returns `None` once the sender is gone.
fn next_batch(rx: &Receiver<PathBuf>, debounce: Duration) -> Option<BTreeSet<PathBuf>> {
    let first = rx.recv().ok()?;
    let mut batch = BTreeSet::from([first]);
    loop {
        match rx.recv_timeout(debounce) {
            Ok(path) => {
                batch.insert(path);
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                return Some(batch);
            }
        }
    }
}
