mod constants;
mod controls;
mod gpu;
mod overlay;
mod worker;

use anyhow::Context;
use std::time::Instant;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::WindowBuilder;

use constants::{WINDOW_SIZE, WINDOW_TITLE};
use controls::{action_for_key, apply_quantum, params_patch, Action};
use gpu::{FrameInputs, GpuState};
use orbital_core::{
    build_plot, orbital_label, CursorState, FieldPipeline, OrbitCamera, OrbitalError,
    QuantumState, Series, VisualizerConfig,
};
use overlay::{build_overlay, PlotPanel};
use worker::ResampleWorker;

#[derive(Default)]
struct PointerState {
    x: f32,
    y: f32,
    dragging: bool,
}

struct App<'w> {
    gpu: GpuState<'w>,
    camera: OrbitCamera,
    pipeline: FieldPipeline,
    worker: ResampleWorker,
    cursor: CursorState,
    pointer: PointerState,
    bound_scale: f64,
    start: Instant,
    title: String,
}

impl<'w> App<'w> {
    fn request(&mut self, state: QuantumState) {
        let Some(req) = self.pipeline.request(state) else {
            return;
        };
        if let Err(e) = self.worker.submit(req) {
            self.pipeline.fail(&e);
        }
    }

    fn handle_action(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return false;
        }
        if action == Action::CycleLegend {
            self.cursor.active_legend = Series::cycle(self.cursor.active_legend);
            return true;
        }
        if let Some(next) = apply_quantum(action, self.pipeline.desired()) {
            self.request(next);
        } else if let Some(patch) = params_patch(action, self.gpu.volume.params()) {
            self.gpu.volume.set_params(patch);
            let p = self.gpu.volume.params();
            log::info!(
                "exposure={:.2} threshold={:.3} slice={:.2} theme={:?} flash={}",
                p.exposure,
                p.threshold,
                p.slice,
                p.theme,
                p.charge_flash
            );
        }
        true
    }

    fn drain_results(&mut self) {
        while let Some(message) = self.worker.poll() {
            match message {
                Ok(result) => {
                    let Some(accepted) = self.pipeline.accept(result) else {
                        continue;
                    };
                    if let Err(e) = self.gpu.upload(&accepted.field) {
                        self.pipeline.fail(&e);
                        continue;
                    }
                    let bound_scale = accepted.field.bound_scale();
                    if !self.pipeline.commit(accepted) {
                        continue;
                    }
                    self.bound_scale = bound_scale;
                    if let Some(curves) = self.pipeline.curves() {
                        self.cursor.clamp_to(curves.r_max);
                    }
                }
                Err(e) => {
                    let disconnected = e == OrbitalError::WorkerDisconnected;
                    self.pipeline.fail(&e);
                    if disconnected {
                        break;
                    }
                }
            }
        }
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        let (dx, dy) = (x - self.pointer.x, y - self.pointer.y);
        self.pointer.x = x;
        self.pointer.y = y;
        if self.pointer.dragging {
            self.camera.orbit(dx, dy);
            return;
        }
        let (w, h) = self.gpu.size();
        let panel = PlotPanel::for_window(w, h);
        match (panel.local(x, y), self.pipeline.curves()) {
            (Some((lx, _)), Some(curves)) => {
                let r_max = curves.r_max;
                self.cursor.hover(&panel.layout(), lx, r_max);
            }
            _ => self.cursor.leave(),
        }
    }

    fn pointer_button(&mut self, pressed: bool) {
        let (w, h) = self.gpu.size();
        let over_plot = PlotPanel::for_window(w, h)
            .local(self.pointer.x, self.pointer.y)
            .is_some();
        self.pointer.dragging = pressed && !over_plot;
    }

    fn update_title(&mut self) {
        let mut title = format!(
            "{} | {}",
            WINDOW_TITLE,
            orbital_label(&self.pipeline.desired())
        );
        if self.pipeline.is_loading() {
            title.push_str(" | sampling…");
        }
        if title != self.title {
            self.gpu.window.set_title(&title);
            self.title = title;
        }
    }

    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.drain_results();
        self.update_title();
        self.camera.update();

        let (w, h) = self.gpu.size();
        self.camera.set_viewport(w, h);
        let panel = PlotPanel::for_window(w, h);
        let overlay = self
            .pipeline
            .curves()
            .map(|curves| build_overlay(&panel, &build_plot(curves, &self.cursor, &panel.layout())));
        let inputs = FrameInputs {
            time: self.start.elapsed().as_secs_f32(),
            sphere_scale: self.cursor.sphere_scale(self.bound_scale),
            overlay: overlay.as_ref(),
        };
        self.gpu.render(&self.camera.camera(), &inputs)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = VisualizerConfig::default();
    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
        .build(&event_loop)
        .context("creating window")?;

    let gpu = pollster::block_on(GpuState::new(&window, config.initial_params))?;
    let mut app = App {
        gpu,
        camera: OrbitCamera::default(),
        pipeline: FieldPipeline::new(config.resolution, config.curve_samples),
        worker: ResampleWorker::spawn()?,
        cursor: CursorState::default(),
        pointer: PointerState::default(),
        bound_scale: orbital_core::bound_scale(config.initial_state.n()),
        start: Instant::now(),
        title: String::new(),
    };
    app.request(config.initial_state);
    log::info!(
        "keys: arrows n/l, [ ] m, E/D exposure, T/G threshold, S/X slice, C theme, F flash, Tab legend"
    );

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => app.gpu.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(action) = action_for_key(code) {
                        if !app.handle_action(action) {
                            elwt.exit();
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                app.pointer_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::CursorLeft { .. } => app.cursor.leave(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => app.pointer_button(state == ElementState::Pressed),
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                app.camera.zoom(notches);
            }
            _ => {}
        },
        Event::AboutToWait => match app.frame() {
            Ok(_) => app.gpu.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => app.gpu.resize(app.gpu.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(_) => {}
        },
        _ => {}
    })?;
    Ok(())
}
