use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlCanvasElement, PointerEvent};
use yew::prelude::*;

use super::viewport_size;
use crate::render::{SceneError, SceneRenderer};
use crate::scene::{OrbitCamera, SceneSpec};

const MAX_PIXEL_RATIO: f64 = 2.0;
const MAX_FRAME_SECONDS: f32 = 0.1;

/// Per-frame state shared between the animation frame callback and listeners.
struct FrameLoop {
    renderer: SceneRenderer,
    canvas: HtmlCanvasElement,
    camera: RefCell<OrbitCamera>,
    // (first frame, previous frame) timestamps in milliseconds.
    clock: Cell<Option<(f64, f64)>>,
    pointer: Cell<Option<(f64, f64)>>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl FrameLoop {
    fn fit_to_viewport(&self) {
        let (width, height) = viewport_size();
        let ratio = window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .clamp(1.0, MAX_PIXEL_RATIO);
        let pixel_width = (width * ratio).round() as u32;
        let pixel_height = (height * ratio).round() as u32;

        if self.canvas.width() != pixel_width || self.canvas.height() != pixel_height {
            self.canvas.set_width(pixel_width);
            self.canvas.set_height(pixel_height);
            self.renderer.resize(pixel_width, pixel_height);
        }
    }

    fn tick(&self, timestamp: f64) {
        let (start, previous) = self.clock.get().unwrap_or((timestamp, timestamp));
        self.clock.set(Some((start, timestamp)));

        let dt = (((timestamp - previous) / 1000.0) as f32).clamp(0.0, MAX_FRAME_SECONDS);
        let elapsed = ((timestamp - start) / 1000.0) as f32;

        let mut camera = self.camera.borrow_mut();
        camera.update(dt);
        self.renderer.render(&camera, elapsed);
    }

    fn pointer_down(&self, x: f64, y: f64) {
        self.pointer.set(Some((x, y)));
    }

    fn pointer_move(&self, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.pointer.get() else {
            return;
        };
        self.pointer.set(Some((x, y)));
        let (_, height) = viewport_size();
        self.camera
            .borrow_mut()
            .drag((x - last_x) as f32, (y - last_y) as f32, height as f32);
    }

    fn pointer_up(&self) {
        self.pointer.set(None);
    }
}

fn schedule(frame_loop: &Rc<FrameLoop>) {
    let next = Rc::clone(frame_loop);
    let handle = request_animation_frame(move |timestamp| {
        next.frame.borrow_mut().take();
        next.tick(timestamp);
        schedule(&next);
    });
    *frame_loop.frame.borrow_mut() = Some(handle);
}

fn pointer_position(event: &Event) -> Option<(f64, f64)> {
    let event = event.dyn_ref::<PointerEvent>()?;
    Some((f64::from(event.client_x()), f64::from(event.client_y())))
}

/// A running background: renderer, frame callback and listeners. Dropping it
/// cancels the frame loop and releases the GL resources.
struct SceneRuntime {
    frame_loop: Rc<FrameLoop>,
    _listeners: Vec<EventListener>,
}

impl SceneRuntime {
    fn start(canvas: HtmlCanvasElement, spec: SceneSpec) -> Result<Self, SceneError> {
        let win = window().ok_or(SceneError::Unsupported)?;
        let renderer = SceneRenderer::new(&canvas, spec)?;
        let frame_loop = Rc::new(FrameLoop {
            camera: RefCell::new(renderer.camera()),
            renderer,
            canvas: canvas.clone(),
            clock: Cell::new(None),
            pointer: Cell::new(None),
            frame: RefCell::new(None),
        });
        frame_loop.fit_to_viewport();

        let listeners = vec![
            {
                let frame_loop = Rc::clone(&frame_loop);
                EventListener::new(&win, "resize", move |_| frame_loop.fit_to_viewport())
            },
            {
                let frame_loop = Rc::clone(&frame_loop);
                EventListener::new(&canvas, "pointerdown", move |event| {
                    if let Some((x, y)) = pointer_position(event) {
                        frame_loop.pointer_down(x, y);
                    }
                })
            },
            {
                let frame_loop = Rc::clone(&frame_loop);
                EventListener::new(&win, "pointermove", move |event| {
                    if let Some((x, y)) = pointer_position(event) {
                        frame_loop.pointer_move(x, y);
                    }
                })
            },
            {
                let frame_loop = Rc::clone(&frame_loop);
                EventListener::new(&win, "pointerup", move |_| frame_loop.pointer_up())
            },
            {
                let frame_loop = Rc::clone(&frame_loop);
                EventListener::new(&win, "pointercancel", move |_| frame_loop.pointer_up())
            },
        ];

        schedule(&frame_loop);

        Ok(Self {
            frame_loop,
            _listeners: listeners,
        })
    }
}

impl Drop for SceneRuntime {
    fn drop(&mut self) {
        // The pending callback holds a clone of the loop; cancelling it frees both.
        self.frame_loop.frame.borrow_mut().take();
    }
}

/// Markup of the background layer; empty once the scene has failed.
pub(crate) fn scene_layer(failed: bool, canvas_ref: NodeRef) -> Html {
    if failed {
        return Html::default();
    }

    html! {
        <div class="scene-layer" aria-hidden="true">
            <canvas ref={canvas_ref} class="scene-canvas"></canvas>
        </div>
    }
}

/// Fixed full-viewport canvas behind the page. Renders nothing when WebGL2
/// is unavailable or the scene fails to build.
#[function_component(SceneBackground)]
pub fn scene_background() -> Html {
    let canvas_ref = use_node_ref();
    let failed = use_state(|| false);

    {
        let canvas_ref = canvas_ref.clone();
        let failed = failed.clone();
        use_effect_with((), move |_| {
            let runtime = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or(SceneError::MissingCanvas)
                .and_then(|canvas| SceneRuntime::start(canvas, SceneSpec::default()));

            let runtime = match runtime {
                Ok(runtime) => Some(runtime),
                Err(error) => {
                    log::warn!("background scene disabled: {error}");
                    failed.set(true);
                    None
                }
            };

            move || drop(runtime)
        });
    }

    scene_layer(*failed, canvas_ref)
}
