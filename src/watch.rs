use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path};
use std::time::Duration;
use tokio::sync::mpsc;

/// Watches a working tree and emits one refresh signal per quiet period.
///
/// Bursts of raw filesystem events (editor saves, checkouts) are coalesced:
/// after the first event the debounce task keeps draining until `debounce`
/// elapses with no further event, then signals once.
pub struct ChangeWatcher {
    // Kept alive so watching continues.
    _watcher: RecommendedWatcher,
    signal_rx: mpsc::UnboundedReceiver<()>,
}

impl ChangeWatcher {
    pub fn new(root: &Path, debounce: Duration) -> Result<Self> {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel::<()>();
        let root_buf = root.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
            if let Ok(event) = result {
                if event.paths.iter().any(|p| is_relevant(&root_buf, p)) {
                    let _ = raw_tx.send(());
                }
            }
        })
        .context("Failed to create file watcher")?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;

        let signal_rx = spawn_debounce(raw_rx, debounce);

        Ok(Self {
            _watcher: watcher,
            signal_rx,
        })
    }

    /// Resolves once per coalesced burst of changes.
    pub async fn changed(&mut self) -> Option<()> {
        self.signal_rx.recv().await
    }
}

fn spawn_debounce(
    mut raw_rx: mpsc::UnboundedReceiver<()>,
    debounce: Duration,
) -> mpsc::UnboundedReceiver<()> {
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while raw_rx.recv().await.is_some() {
            // Drain until a quiet period elapses.
            loop {
                match tokio::time::timeout(debounce, raw_rx.recv()).await {
                    Ok(Some(())) => continue,
                    Ok(None) => return,
                    Err(_) => break,
                }
            }
            if signal_tx.send(()).is_err() {
                return;
            }
        }
    });

    signal_rx
}

/// Changes under `.git/` are plumbing noise, except the index: staging and
/// commits move it, and the staged view must follow.
fn is_relevant(root: &Path, path: &Path) -> bool {
    let relative = match path.strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => return true,
    };
    let mut components = relative.components();
    match components.next() {
        Some(Component::Normal(first)) if first == ".git" => {
            matches!(components.next(), Some(Component::Normal(second)) if second == "index")
                && components.next().is_none()
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relevance_filter() {
        let root = PathBuf::from("/repo");
        assert!(is_relevant(&root, &root.join("src/main.rs")));
        assert!(is_relevant(&root, &root.join(".git/index")));
        assert!(!is_relevant(&root, &root.join(".git/objects/ab/cdef")));
        assert!(!is_relevant(&root, &root.join(".git/HEAD.lock")));
    }

    #[tokio::test]
    async fn test_burst_coalesces_to_one_signal() {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let mut signal_rx = spawn_debounce(raw_rx, Duration::from_millis(20));

        for _ in 0..10 {
            raw_tx.send(()).unwrap();
        }
        tokio::time::timeout(Duration::from_secs(1), signal_rx.recv())
            .await
            .expect("signal within a second")
            .expect("channel open");
        // No second signal pending after the burst settled.
        assert!(signal_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_separate_bursts_signal_separately() {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let mut signal_rx = spawn_debounce(raw_rx, Duration::from_millis(10));

        raw_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), signal_rx.recv())
            .await
            .unwrap()
            .unwrap();

        raw_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), signal_rx.recv())
            .await
            .unwrap()
            .unwrap();
    }
}
