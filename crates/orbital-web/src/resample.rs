//! Deferred resampling on the main thread.
//!
//! A request first yields to the browser for one short timer tick so the
//! loading indicator is painted, then runs the sampler to completion. No
//! borrow of the frame context is held across the await.

use crate::constants::LOADING_PAINT_DELAY_MS;
use crate::frame::FrameContext;
use instant::Instant;
use orbital_core::{run_resample, OrbitalError, QuantumState, ResampleRequest};
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

type Shared = Rc<RefCell<FrameContext<'static>>>;

/// Ask for `state` and schedule the work if the pipeline wants it.
pub fn request(ctx: &Shared, state: QuantumState) {
    let req = {
        let mut c = ctx.borrow_mut();
        let req = c.pipeline.request(state);
        c.refresh_status();
        req
    };
    if let Some(req) = req {
        spawn_local(run(ctx.clone(), req));
    }
}

async fn run(ctx: Shared, req: ResampleRequest) {
    if let Err(e) = next_tick(LOADING_PAINT_DELAY_MS).await {
        log::warn!("timer tick failed: {:?}", e);
    }
    if ctx.borrow().pipeline.latest_generation() != req.generation {
        log::debug!("skipping superseded resample #{}", req.generation);
        return;
    }

    let started = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| run_resample(&req)));
    let mut c = ctx.borrow_mut();
    match outcome {
        Ok(result) => {
            log::info!(
                "resample #{} finished in {:.1} ms",
                req.generation,
                started.elapsed().as_secs_f64() * 1000.0
            );
            c.accept(result);
        }
        Err(_) => c.fail(&OrbitalError::ResampleFailed {
            generation: req.generation,
            reason: "sampler panicked".into(),
        }),
    }
}

/// Resolve after `ms` milliseconds via `setTimeout`.
async fn next_tick(ms: i32) -> Result<(), JsValue> {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| match web::window() {
        Some(w) => {
            if w
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .is_err()
            {
                let _ = resolve.call0(&JsValue::NULL);
            }
        }
        None => {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    JsFuture::from(promise).await.map(|_| ())
}
