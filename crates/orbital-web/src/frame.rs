use crate::constants::{LABEL_ID, LOADING_ID};
use crate::controls::quantum_readouts;
use crate::dom;
use crate::input::DragState;
use crate::plot::PlotCanvas;
use crate::render::GpuState;
use instant::Instant;
use orbital_core::{
    build_plot, orbital_label, CursorState, FieldPipeline, OrbitCamera, OrbitalError,
    ResampleResult, Series,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the page handlers and the animation loop share.
pub struct FrameContext<'a> {
    pub gpu: GpuState<'a>,
    pub pipeline: FieldPipeline,
    pub camera: OrbitCamera,
    pub cursor: CursorState,
    pub drag: DragState,
    pub bound_scale: f64,
    pub canvas: web::HtmlCanvasElement,
    pub plot: PlotCanvas,
    pub document: web::Document,
    pub legend: Vec<web::Element>,
    pub start: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn accept(&mut self, result: ResampleResult) {
        let Some(accepted) = self.pipeline.accept(result) else {
            return;
        };
        match self.gpu.upload(&accepted.field) {
            Ok(()) => {
                let bound_scale = accepted.field.bound_scale();
                if self.pipeline.commit(accepted) {
                    self.bound_scale = bound_scale;
                    if let Some(curves) = self.pipeline.curves() {
                        self.cursor.clamp_to(curves.r_max);
                    }
                }
            }
            Err(e) => self.pipeline.fail(&e),
        }
        self.refresh_status();
    }

    pub fn fail(&mut self, error: &OrbitalError) {
        self.pipeline.fail(error);
        self.refresh_status();
    }

    /// Label, readouts and the loading indicator.
    pub fn refresh_status(&self) {
        let desired = self.pipeline.desired();
        dom::set_text(&self.document, LABEL_ID, &orbital_label(&desired));
        for (id, text) in quantum_readouts(&desired) {
            dom::set_text(&self.document, id, &text);
        }
        if let Some(el) = self.document.get_element_by_id(LOADING_ID) {
            dom::set_class(&el, "active", self.pipeline.is_loading());
        }
    }

    pub fn set_active_legend(&mut self, series: Option<Series>) {
        self.cursor.active_legend = series;
        for el in &self.legend {
            let key = el.get_attribute("data-series");
            let on = series.is_some_and(|s| key.as_deref() == Some(s.key()));
            dom::set_class(el, "active", on);
        }
    }

    pub fn frame(&mut self) {
        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        let (w, h) = self.gpu.size();
        self.camera.set_viewport(w, h);
        self.camera.update();

        let time = self.start.elapsed().as_secs_f32();
        let sphere_scale = self.cursor.sphere_scale(self.bound_scale);
        match self.gpu.render(&self.camera.camera(), time, sphere_scale) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.gpu.reconfigure(),
            Err(e) => log::warn!("frame skipped: {e:?}"),
        }

        let layout = self.plot.layout();
        let geom = self
            .pipeline
            .curves()
            .map(|curves| build_plot(curves, &self.cursor, &layout));
        self.plot
            .draw(&layout, geom.as_ref(), dom::device_pixel_ratio());
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Tick) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
