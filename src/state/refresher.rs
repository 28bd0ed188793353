use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Re-requests one page on a fixed period while it is running.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    request: NetworkRequest,
    period: Duration,
}

/// Stops the refresher when cancelled or dropped.
pub struct RefreshHandle(JoinHandle<()>);

impl RefreshHandle {
    pub fn cancel(&self) {
        self.0.abort();
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl PeriodicRefresher {
    pub fn new(
        network_requests: mpsc::Sender<NetworkRequest>,
        request: NetworkRequest,
        period: Duration,
    ) -> Self {
        Self { network_requests, request, period }
    }

    pub fn spawn(self) -> RefreshHandle {
        RefreshHandle(tokio::spawn(self.run()))
    }

    async fn run(self) {
        let mut ticker = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if self.network_requests.send(self.request).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sends_after_each_full_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle =
            PeriodicRefresher::new(tx, NetworkRequest::LoadToday, Duration::from_secs(30)).spawn();

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(rx.try_recv().is_err(), "no request before the first period");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(NetworkRequest::LoadToday));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(rx.try_recv().ok(), Some(NetworkRequest::LoadToday));

        drop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_refresher_goes_quiet() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle =
            PeriodicRefresher::new(tx, NetworkRequest::LoadResults, Duration::from_secs(5)).spawn();
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(rx.recv().await.is_none(), "sender dropped with the aborted task");
    }
}
