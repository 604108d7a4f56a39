//! Background fetcher for non-blocking catalog requests.
//!
//! Runs HTTP and file reads in a separate thread to avoid blocking the UI.

use super::client::CatalogClient;
use super::types::{Addon, AddonError, ResourceRequest};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Result of a background fetch operation.
#[derive(Debug)]
pub struct FetchResult {
    /// Request the result belongs to.
    pub request: ResourceRequest,
    /// Listed addons or the failure.
    pub outcome: Result<Vec<Addon>, AddonError>,
}

/// Request for a background fetch operation.
#[derive(Debug, Clone)]
struct FetchRequest {
    request: ResourceRequest,
    force_refresh: bool,
}

/// Background fetcher for catalog requests.
///
/// Runs requests in a dedicated thread to avoid blocking the main UI thread.
pub struct BackgroundFetcher {
    /// Sender for requests to the background thread.
    request_tx: Sender<FetchRequest>,
    /// Receiver for results from the background thread.
    result_rx: Receiver<FetchResult>,
    /// Handle to the background thread.
    _thread_handle: JoinHandle<()>,
}

impl BackgroundFetcher {
    /// Creates a new background fetcher.
    ///
    /// # Arguments
    /// * `timeout_secs` - Per-request timeout for HTTP catalogs.
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<FetchRequest>();
        let (result_tx, result_rx) = mpsc::channel::<FetchResult>();

        let thread_handle = thread::spawn(move || {
            info!("[ADDON-FETCHER] Background thread started");
            let client = CatalogClient::new(timeout_secs);

            Self::run_fetch_loop(&request_rx, &result_tx, &client);

            info!("[ADDON-FETCHER] Background thread exiting");
        });

        Self {
            request_tx,
            result_rx,
            _thread_handle: thread_handle,
        }
    }

    /// Runs the fetch loop in the background thread.
    fn run_fetch_loop(
        request_rx: &Receiver<FetchRequest>,
        result_tx: &Sender<FetchResult>,
        client: &CatalogClient,
    ) {
        // Process requests until the channel is closed
        while let Ok(FetchRequest {
            request,
            force_refresh,
        }) = request_rx.recv()
        {
            debug!("[ADDON-FETCHER] Received request: {:?}", request);

            let outcome = client.fetch_catalog(&request, force_refresh);
            match &outcome {
                Ok(addons) => info!("[ADDON-FETCHER] Fetched {} addons", addons.len()),
                Err(e) => warn!("[ADDON-FETCHER] Failed to fetch catalog: {}", e),
            }

            if result_tx.send(FetchResult { request, outcome }).is_err() {
                warn!("[ADDON-FETCHER] Result channel closed, exiting");
                break;
            }
        }
    }

    /// Requests fetching a catalog.
    ///
    /// This is non-blocking. Call `poll_result()` to check for completion.
    pub fn request_catalog(&self, request: ResourceRequest, force_refresh: bool) {
        info!(
            "[ADDON-FETCHER] Requesting catalog {}/{} ({})",
            request.base, request.path.id, request.path.type_name
        );

        if let Err(e) = self.request_tx.send(FetchRequest {
            request,
            force_refresh,
        }) {
            warn!("[ADDON-FETCHER] Failed to send request: {}", e);
        }
    }

    /// Polls for a result from the background thread.
    ///
    /// Returns `Some(result)` if a result is available, `None` otherwise.
    pub fn poll_result(&self) -> Option<FetchResult> {
        match self.result_rx.try_recv() {
            Ok(result) => {
                debug!("[ADDON-FETCHER] Received result");
                Some(result)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                warn!("[ADDON-FETCHER] Result channel disconnected");
                None
            }
        }
    }
}
