//! Background resampling thread.
//!
//! The render loop never blocks on sampling: requests go down one channel,
//! results come back on another and are polled once per frame. While a
//! request is being computed newer ones queue up; only the newest queued
//! request is computed next.

use orbital_core::{run_resample, OrbitalError, ResampleRequest, ResampleResult};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Instant;

pub type WorkerMessage = Result<ResampleResult, OrbitalError>;

pub struct ResampleWorker {
    requests: Sender<ResampleRequest>,
    results: Receiver<WorkerMessage>,
    _handle: thread::JoinHandle<()>,
}

impl ResampleWorker {
    pub fn spawn() -> anyhow::Result<Self> {
        let (req_tx, req_rx) = mpsc::channel::<ResampleRequest>();
        let (res_tx, res_rx) = mpsc::channel::<WorkerMessage>();
        let handle = thread::Builder::new()
            .name("resampler".into())
            .spawn(move || worker_loop(req_rx, res_tx))?;
        Ok(Self {
            requests: req_tx,
            results: res_rx,
            _handle: handle,
        })
    }

    pub fn submit(&self, request: ResampleRequest) -> Result<(), OrbitalError> {
        self.requests
            .send(request)
            .map_err(|_| OrbitalError::WorkerDisconnected)
    }

    /// Next finished message, if any. A dead worker surfaces as an error.
    pub fn poll(&self) -> Option<WorkerMessage> {
        match self.results.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(OrbitalError::WorkerDisconnected)),
        }
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<WorkerMessage> {
        self.results.recv_timeout(timeout).ok()
    }
}

/// Keep only the newest request that is already waiting behind `first`.
fn coalesce(first: ResampleRequest, queue: &Receiver<ResampleRequest>) -> ResampleRequest {
    let mut newest = first;
    let mut curves_needed = first.curves_needed;
    while let Ok(next) = queue.try_recv() {
        log::debug!("skipping queued resample #{}", newest.generation);
        curves_needed |= next.curves_needed;
        newest = next;
    }
    // a skipped request may have been the one that changed (n, l)
    newest.curves_needed = curves_needed;
    newest
}

fn worker_loop(requests: Receiver<ResampleRequest>, results: Sender<WorkerMessage>) {
    while let Ok(first) = requests.recv() {
        let request = coalesce(first, &requests);
        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_resample(&request)));
        let message = match outcome {
            Ok(result) => {
                log::info!(
                    "resample #{} done in {:.1} ms (peak {:.3e})",
                    request.generation,
                    started.elapsed().as_secs_f64() * 1e3,
                    result.field.peak()
                );
                Ok(result)
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "panic".to_string());
                Err(OrbitalError::ResampleFailed {
                    generation: request.generation,
                    reason,
                })
            }
        };
        if results.send(message).is_err() {
            break;
        }
    }
    log::debug!("resample worker exiting");
}
