//! HTTP-to-backend streaming bridge.
//!
//! A request is resolved into a backend path and a set of response headers, then the
//! backend writes the file into a counting sink whose chunks become the response body.
//!
//! Headers precede the body, so the counted length can only be sent while the response
//! is still uncommitted. The bridge holds up to `response_buffer_size` bytes: transfers
//! that finish within that budget get an exact `Content-Length` and clean 404/500 errors.
//! Larger transfers commit a 200 and stream the rest chunked; a backend failure after that
//! point can only abort the connection, which the client sees as a truncated body.

use std::sync::Arc;

use actix_web::http::header::CONTENT_LENGTH;
use actix_web::web::{Bytes, BytesMut};
use actix_web::{HttpResponse, ResponseError};
use futures_util::stream;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::config::BridgeSettings;
use crate::error::{BridgeError, BridgeResult, FetchError};
use crate::models::RequestDescriptor;
use crate::services::fetcher::FileFetcher;

pub mod headers;
pub mod observer;
pub mod path;
pub mod sink;

pub use headers::{KEY_CONTENT_TYPE, KEY_FILE_NAME, ResponseHeaders};
pub use observer::{BridgeObserver, TracingObserver};
pub use path::{ROUTING_PREFIX, translate_path};
pub use sink::{ChannelWriter, CountingWriter};

/// Serves bridged downloads. Cheap to clone; shared across workers.
#[derive(Clone)]
pub struct Bridge {
    fetcher: Arc<dyn FileFetcher>,
    observer: Arc<dyn BridgeObserver>,
    settings: BridgeSettings,
}

impl Bridge {
    /// Create a bridge that reports outcomes through `tracing`.
    pub fn new(fetcher: Arc<dyn FileFetcher>, settings: BridgeSettings) -> Self {
        Self {
            fetcher,
            observer: Arc::new(TracingObserver),
            settings,
        }
    }

    /// Replace the outcome observer.
    pub fn with_observer(mut self, observer: Arc<dyn BridgeObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn fetcher(&self) -> &dyn FileFetcher {
        self.fetcher.as_ref()
    }

    /// Serve one request. Every failure is mapped to a response here; none is retried.
    pub async fn handle(&self, request: &RequestDescriptor) -> HttpResponse {
        match self.try_handle(request).await {
            Ok(response) => response,
            Err(err) => self.reject(request.url(), err),
        }
    }

    /// Report a failure that happened before any response was sent and map it to a status.
    pub fn reject(&self, url: &str, err: BridgeError) -> HttpResponse {
        self.observer.request_failed(url, &err, false);
        err.error_response()
    }

    async fn try_handle(&self, request: &RequestDescriptor) -> BridgeResult<HttpResponse> {
        let headers = ResponseHeaders::from_query(request.query())?;
        let backend_path = translate_path(request.path(), ROUTING_PREFIX)?;

        let mut transfer = Transfer::start(
            Arc::clone(&self.fetcher),
            backend_path.to_string(),
            self.settings.channel_capacity,
        );

        let mut buffered = BytesMut::new();
        while let Some(chunk) = transfer.chunks.recv().await {
            buffered.extend_from_slice(&chunk);
            if buffered.len() > self.settings.response_buffer_size {
                return Ok(self.commit(request, &headers, buffered.freeze(), transfer));
            }
        }

        let count = finish(transfer.outcome).await?;
        self.observer.transfer_completed(&transfer.path, count);

        let mut builder = HttpResponse::Ok();
        headers.apply(&mut builder);
        Ok(builder
            .insert_header((CONTENT_LENGTH, count))
            .body(buffered.freeze()))
    }

    /// Send the status and headers now and stream the remainder of the transfer.
    fn commit(
        &self,
        request: &RequestDescriptor,
        headers: &ResponseHeaders,
        prefix: Bytes,
        transfer: Transfer,
    ) -> HttpResponse {
        debug!(
            path = %transfer.path,
            buffered = prefix.len(),
            "Response buffer exceeded, committing response"
        );

        let committed = Committed {
            prefix: Some(prefix),
            transfer,
            observer: Arc::clone(&self.observer),
            url: request.url().to_string(),
        };

        let body = stream::unfold(Some(committed), |state| async move {
            let mut state = state?;
            if let Some(prefix) = state.prefix.take() {
                return Some((Ok(prefix), Some(state)));
            }
            match state.transfer.chunks.recv().await {
                Some(chunk) => Some((Ok(chunk), Some(state))),
                None => match finish(state.transfer.outcome).await {
                    Ok(count) => {
                        state.observer.transfer_completed(&state.transfer.path, count);
                        None
                    }
                    Err(err) => {
                        state.observer.request_failed(&state.url, &err, true);
                        Some((Err(err), None))
                    }
                },
            }
        });

        let mut builder = HttpResponse::Ok();
        headers.apply(&mut builder);
        builder.streaming(body)
    }
}

/// A backend fetch running in its own task.
struct Transfer {
    path: String,
    chunks: mpsc::Receiver<Bytes>,
    outcome: oneshot::Receiver<Result<u64, FetchError>>,
}

impl Transfer {
    fn start(fetcher: Arc<dyn FileFetcher>, path: String, capacity: usize) -> Self {
        let (sender, chunks) = mpsc::channel(capacity);
        let (done, outcome) = oneshot::channel();
        let task_path = path.clone();

        tokio::spawn(async move {
            let mut sink = CountingWriter::new(ChannelWriter::new(sender));
            let result = match fetcher.fetch(&task_path, &mut sink).await {
                Ok(()) => sink
                    .shutdown()
                    .await
                    .map(|()| sink.count())
                    .map_err(FetchError::from),
                Err(err) => Err(err),
            };
            // The channel must be closed before the outcome is observable.
            drop(sink);
            let _ = done.send(result);
        });

        Self {
            path,
            chunks,
            outcome,
        }
    }
}

/// State of a committed response body.
struct Committed {
    prefix: Option<Bytes>,
    transfer: Transfer,
    observer: Arc<dyn BridgeObserver>,
    url: String,
}

async fn finish(outcome: oneshot::Receiver<Result<u64, FetchError>>) -> BridgeResult<u64> {
    match outcome.await {
        Ok(result) => result.map_err(BridgeError::from),
        Err(_) => Err(BridgeError::Backend(
            "Backend fetch ended without reporting a result".to_string(),
        )),
    }
}
