//! Decoder pool (§2.5 / §4.5).
//!
//! A fixed-size pool of OS-thread workers, each with its own heap region
//! and no shared mutable state with the driver — requests and responses
//! move by ownership transfer only, same contract as the "web workers"
//! described in §9. Dispatch is round-robin; completion is correlated by a
//! monotonically increasing request id via a `tokio::sync::oneshot`
//! channel per request, so `decode()` returns a plain awaitable future
//! without needing an async runtime running inside the pool itself.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::container::EncodingType;
use crate::error::PipelineError;
use crate::rle;

/// One decode request. `body` is the owned slice the caller sliced out of
/// the container's image stream — `max(8 KiB, width * height * 2)` bytes
/// starting at the image's body offset, per the transfer discipline.
pub struct DecodeRequest {
    pub body: Vec<u8>,
    pub width: u16,
    pub height: u16,
    pub encoding: EncodingType,
    pub palette_group_offset: u16,
    pub trim_top: u32,
    pub trim_bottom: u32,
}

/// Result of one decode, correlated back to its request by `id`.
#[derive(Debug, Clone)]
pub struct DecodedIndices {
    pub id: u64,
    pub width: u16,
    pub inner_height: u16,
    pub indices: Vec<u16>,
}

enum WorkerMsg {
    Decode {
        id: u64,
        req: DecodeRequest,
        respond: tokio::sync::oneshot::Sender<DecodedIndices>,
    },
    Ping(tokio::sync::oneshot::Sender<()>),
    Terminate,
}

/// Parallel decode pool. Pool size is `min(available_parallelism, 8)`.
pub struct DecoderPool {
    senders: Vec<mpsc::Sender<WorkerMsg>>,
    handles: Vec<JoinHandle<()>>,
    next_id: AtomicU64,
    next_worker: AtomicUsize,
    destroyed: AtomicBool,
}

impl DecoderPool {
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.clamp(1, 8);
        let mut senders = Vec::with_capacity(worker_count);
        let mut handles = Vec::with_capacity(worker_count);

        for worker_idx in 0..worker_count {
            let (tx, rx) = mpsc::channel::<WorkerMsg>();
            let handle = std::thread::Builder::new()
                .name(format!("sprite-decode-{worker_idx}"))
                .spawn(move || worker_loop(rx))
                .expect("failed to spawn decoder worker thread");
            senders.push(tx);
            handles.push(handle);
        }

        Self {
            senders,
            handles,
            next_id: AtomicU64::new(0),
            next_worker: AtomicUsize::new(0),
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.senders.len()
    }

    /// Dispatch a decode request round-robin over workers. Returns an
    /// awaitable that resolves with the decoded indices. There is no
    /// ordering guarantee between requests; the caller reconstructs
    /// ordering by awaiting in its own preferred sequence (§4.8).
    pub fn decode(
        &self,
        req: DecodeRequest,
    ) -> impl std::future::Future<Output = Result<DecodedIndices, PipelineError>> + 'static {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = tokio::sync::oneshot::channel();

        if self.destroyed.load(Ordering::Acquire) {
            // Reject immediately rather than queue onto a dead worker.
            drop(tx);
        } else {
            let worker_idx = self.next_worker.fetch_add(1, Ordering::Relaxed) % self.senders.len();
            let _ = self.senders[worker_idx].send(WorkerMsg::Decode { id, req, respond: tx });
        }

        async move { rx.await.map_err(|_| PipelineError::PoolDestroyed) }
    }

    /// Dispatches a zero-size ping to every worker so first-use latency
    /// (thread spin-up, allocator warmup) is paid eagerly instead of on
    /// the first real decode.
    pub async fn warm_up(&self) {
        let mut receivers = Vec::with_capacity(self.senders.len());
        for sender in &self.senders {
            let (tx, rx) = tokio::sync::oneshot::channel();
            if sender.send(WorkerMsg::Ping(tx)).is_ok() {
                receivers.push(rx);
            }
        }
        for rx in receivers {
            let _ = rx.await;
        }
    }

    /// Terminates all workers and rejects every pending future. This is
    /// the only cancellation path; there is no per-request cancellation.
    pub fn destroy(mut self) {
        self.destroyed.store(true, Ordering::Release);
        for sender in self.senders.drain(..) {
            let _ = sender.send(WorkerMsg::Terminate);
        }
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(rx: mpsc::Receiver<WorkerMsg>) {
    while let Ok(msg) = rx.recv() {
        match msg {
            WorkerMsg::Decode { id, req, respond } => {
                let indices = rle::decode(
                    &req.body,
                    req.width,
                    req.height,
                    req.encoding,
                    req.palette_group_offset,
                    req.trim_top,
                    req.trim_bottom,
                );
                let inner_height = (req.height as u32)
                    .saturating_sub(req.trim_top)
                    .saturating_sub(req.trim_bottom) as u16;
                let _ = respond.send(DecodedIndices {
                    id,
                    width: req.width,
                    inner_height,
                    indices,
                });
            }
            WorkerMsg::Ping(respond) => {
                let _ = respond.send(());
            }
            WorkerMsg::Terminate => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(body: Vec<u8>, width: u16, height: u16) -> DecodeRequest {
        DecodeRequest {
            body,
            width,
            height,
            encoding: EncodingType::Rle,
            palette_group_offset: 0,
            trim_top: 0,
            trim_bottom: 0,
        }
    }

    #[tokio::test]
    async fn decode_round_trips_through_worker() {
        let pool = DecoderPool::new(2);
        let result = pool.decode(req(vec![0, 4], 2, 2)).await.unwrap();
        assert_eq!(result.indices, vec![0, 0, 0, 0]);
        assert_eq!(result.inner_height, 2);
        pool.destroy();
    }

    #[tokio::test]
    async fn warm_up_pings_every_worker_without_error() {
        let pool = DecoderPool::new(4);
        pool.warm_up().await;
        pool.destroy();
    }

    #[tokio::test]
    async fn pool_size_clamped_to_eight() {
        let pool = DecoderPool::new(99);
        assert_eq!(pool.worker_count(), 8);
        pool.destroy();
    }

    #[tokio::test]
    async fn requests_get_distinct_monotonic_ids() {
        let pool = DecoderPool::new(2);
        let a = pool.decode(req(vec![5], 1, 1)).await.unwrap();
        let b = pool.decode(req(vec![6], 1, 1)).await.unwrap();
        assert!(b.id > a.id);
        pool.destroy();
    }
}
