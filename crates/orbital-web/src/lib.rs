#![cfg(target_arch = "wasm32")]
mod constants;
mod controls;
mod dom;
mod frame;
mod input;
mod plot;
mod render;
mod resample;

use constants::{LEGEND_SELECTOR, PLOT_CANVAS_ID, VOLUME_CANVAS_ID};
use controls::{flash_patch, theme_patch, wheel_notches, Slider, Stepper, FLASH_TOGGLE_ID, THEME_SELECT_ID};
use frame::FrameContext;
use input::{pointer_canvas_css, DragState};
use instant::Instant;
use orbital_core::{
    CursorState, FieldPipeline, OrbitCamera, RenderParams, RenderParamsPatch, Series,
    VisualizerConfig,
};
use plot::PlotCanvas;
use render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type Shared = Rc<RefCell<FrameContext<'static>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbital-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = canvas_by_id(&document, VOLUME_CANVAS_ID)?;
    let plot_canvas = canvas_by_id(&document, PLOT_CANVAS_ID)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    dom::sync_canvas_backing_size(&plot_canvas);
    {
        let canvas = canvas.clone();
        let plot_canvas = plot_canvas.clone();
        dom::add_event_listener(&window, "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&canvas);
            dom::sync_canvas_backing_size(&plot_canvas);
        });
    }

    let plot_ctx = plot_canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context on #{PLOT_CANVAS_ID}"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = VisualizerConfig::default();
    // Leak a canvas clone to satisfy the 'static lifetime of the surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let gpu = GpuState::new(leaked_canvas, config.initial_params).await?;

    let legend = collect_legend(&document);
    let ctx: Shared = Rc::new(RefCell::new(FrameContext {
        gpu,
        pipeline: FieldPipeline::new(config.resolution, config.curve_samples),
        camera: OrbitCamera::default(),
        cursor: CursorState::default(),
        drag: DragState::default(),
        bound_scale: orbital_core::bound_scale(config.initial_state.n()),
        canvas: canvas.clone(),
        plot: PlotCanvas::new(plot_canvas.clone(), plot_ctx),
        document: document.clone(),
        legend: legend.clone(),
        start: Instant::now(),
    }));

    sync_controls(&document, &config.initial_params);
    wire_controls(&document, &ctx);
    wire_orbit(&canvas, &ctx);
    wire_plot_cursor(&plot_canvas, &ctx);
    wire_legend(&legend, &ctx);

    resample::request(&ctx, config.initial_state);
    frame::start_loop(ctx);
    Ok(())
}

fn sync_controls(document: &web::Document, params: &RenderParams) {
    dom::set_input_value(document, Slider::Exposure.element_id(), &params.exposure.to_string());
    dom::set_input_value(document, Slider::Threshold.element_id(), &params.threshold.to_string());
    dom::set_input_value(document, Slider::Slice.element_id(), &params.slice.to_string());
    dom::set_select_value(document, THEME_SELECT_ID, &params.theme.index().to_string());
    dom::set_checked(document, FLASH_TOGGLE_ID, params.charge_flash);
}

fn apply_patch(ctx: &Shared, patch: RenderParamsPatch) {
    ctx.borrow_mut().gpu.volume.set_params(patch);
}

fn wire_controls(document: &web::Document, ctx: &Shared) {
    for stepper in Stepper::ALL {
        let ctx = ctx.clone();
        dom::add_click_listener(document, stepper.element_id(), move || {
            let next = stepper.apply(ctx.borrow().pipeline.desired());
            resample::request(&ctx, next);
        });
    }
    for slider in Slider::ALL {
        let ctx = ctx.clone();
        dom::add_input_listener(document, slider.element_id(), move |raw| {
            if let Some(patch) = slider.patch(&raw) {
                apply_patch(&ctx, patch);
            }
        });
    }
    {
        let ctx = ctx.clone();
        dom::add_select_listener(document, THEME_SELECT_ID, move |raw| {
            apply_patch(&ctx, theme_patch(&raw))
        });
    }
    {
        let ctx = ctx.clone();
        dom::add_checkbox_listener(document, FLASH_TOGGLE_ID, move |checked| {
            apply_patch(&ctx, flash_patch(checked))
        });
    }
}

fn wire_orbit(canvas: &web::HtmlCanvasElement, ctx: &Shared) {
    {
        let ctx = ctx.clone();
        let target = canvas.clone();
        dom::add_event_listener(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let at = pointer_canvas_css(&ev, &target);
            ctx.borrow_mut().drag.begin(ev.pointer_id(), at);
            let _ = target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        });
    }
    {
        let ctx = ctx.clone();
        let target = canvas.clone();
        dom::add_event_listener(canvas, "pointermove", move |ev: web::PointerEvent| {
            let at = pointer_canvas_css(&ev, &target);
            let mut c = ctx.borrow_mut();
            if let Some(delta) = c.drag.moved(ev.pointer_id(), at) {
                c.camera.orbit(delta.x, delta.y);
            }
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let ctx = ctx.clone();
        dom::add_event_listener(canvas, event, move |ev: web::PointerEvent| {
            ctx.borrow_mut().drag.end(ev.pointer_id());
        });
    }
    {
        let ctx = ctx.clone();
        dom::add_event_listener(canvas, "wheel", move |ev: web::WheelEvent| {
            ev.prevent_default();
            let notches = wheel_notches(ev.delta_y(), ev.delta_mode());
            ctx.borrow_mut().camera.zoom(notches);
        });
    }
}

fn wire_plot_cursor(plot_canvas: &web::HtmlCanvasElement, ctx: &Shared) {
    // Touch input has no hover, so a press positions the cursor too.
    for event in ["pointermove", "pointerdown"] {
        let ctx = ctx.clone();
        let target = plot_canvas.clone();
        dom::add_event_listener(plot_canvas, event, move |ev: web::PointerEvent| {
            let at = pointer_canvas_css(&ev, &target);
            let mut c = ctx.borrow_mut();
            let layout = c.plot.layout();
            let r_max = c.pipeline.curves().map(|curves| curves.r_max);
            match r_max {
                Some(r_max) => c.cursor.hover(&layout, at.x, r_max),
                None => c.cursor.leave(),
            }
        });
    }
    let ctx = ctx.clone();
    dom::add_event_listener(plot_canvas, "pointerleave", move |_: web::PointerEvent| {
        ctx.borrow_mut().cursor.leave();
    });
}

fn collect_legend(document: &web::Document) -> Vec<web::Element> {
    let Ok(nodes) = document.query_selector_all(LEGEND_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

fn wire_legend(legend: &[web::Element], ctx: &Shared) {
    for el in legend {
        let series = el
            .get_attribute("data-series")
            .and_then(|key| Series::from_key(&key));
        let Some(series) = series else {
            log::warn!("legend entry without a known data-series");
            continue;
        };
        {
            let ctx = ctx.clone();
            dom::add_event_listener(el, "pointerenter", move |_: web::PointerEvent| {
                ctx.borrow_mut().set_active_legend(Some(series));
            });
        }
        let ctx = ctx.clone();
        dom::add_event_listener(el, "pointerleave", move |_: web::PointerEvent| {
            ctx.borrow_mut().set_active_legend(None);
        });
    }
}
