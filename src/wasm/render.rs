use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Document, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlUniformLocation};

use super::assets::load_bitmap;
use super::events;
use super::program::load_program;
use super::texture::TextureUnit;
use crate::config::Config;
use crate::crop::{crop, CroppedFrame, Viewport};
use crate::error::Result;
use crate::frame::{CancelToken, FrameLoop, FrameTarget, FrameUniforms, Tick};
use crate::input::InputState;

const IMAGE_UNIT: u32 = 0;
const OFFSETS_UNIT: u32 = 1;

// Two triangles covering clip space.
const QUAD: [f32; 12] = [
    -1.0, -1.0, //
    -1.0, 1.0, //
    1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    1.0, 1.0, //
];

thread_local! {
    static CANCEL: RefCell<Option<CancelToken>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = Config::default();
    console_log::init_with_level(config.log_level).ok();

    let already_running = CANCEL.with(|cell| cell.borrow().is_some());
    if already_running {
        return Ok(());
    }
    let cancel = CancelToken::new();
    CANCEL.with(|cell| *cell.borrow_mut() = Some(cancel.clone()));

    spawn_local(async move {
        if let Err(e) = run(config, cancel).await {
            log::error!("startup failed: {e}");
        }
    });
    Ok(())
}

/// Cancels the frame loop. The next scheduled tick sees the flag and draws
/// nothing further.
#[wasm_bindgen]
pub fn stop() {
    CANCEL.with(|cell| {
        if let Some(cancel) = cell.borrow().as_ref() {
            cancel.cancel();
        }
    });
}

async fn run(config: Config, cancel: CancelToken) -> Result<()> {
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0) as u32;
    let height = window.inner_height()?.as_f64().unwrap_or(0.0) as u32;
    let viewport = Viewport::new(width, height)?;
    let canvas = canvas(&document, &config.canvas_id, viewport)?;
    log::info!("viewport {width}x{height}");

    let input = Rc::new(RefCell::new(InputState::new()));
    events::listen(&document, input.clone(), viewport)?;

    let image = load_bitmap(&config.image_uri).await?;
    let offsets = load_bitmap(&config.offsets_uri).await?;

    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into::<GL>()
        .map_err(JsValue::from)?;
    let program = load_program(&gl, &config.vertex_shader_uri, &config.fragment_shader_uri).await?;
    bind_quad(&gl, &program)?;

    let image_unit = TextureUnit::bind(&gl, IMAGE_UNIT, gl.get_uniform_location(&program, "u_image").as_ref())?;
    image_unit.upload(&gl, &crop(&image, viewport, 0.0))?;
    let offsets_unit =
        TextureUnit::bind(&gl, OFFSETS_UNIT, gl.get_uniform_location(&program, "u_offsets").as_ref())?;

    let target = GlTarget {
        time: gl.get_uniform_location(&program, "u_time"),
        mouse: gl.get_uniform_location(&program, "u_mouse"),
        wheel: gl.get_uniform_location(&program, "u_wheel"),
        offsets: offsets_unit,
        gl,
    };
    let mut frames = FrameLoop::new(offsets, viewport, cancel);
    frames.start(now(&window));
    log::info!("frame loop running");
    animate(frames, target, input)
}

fn canvas(document: &Document, id: &str, viewport: Viewport) -> Result<HtmlCanvasElement> {
    let canvas = match document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    {
        Some(canvas) => canvas,
        None => {
            let canvas = document
                .create_element("canvas")?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(JsValue::from)?;
            canvas.set_id(id);
            canvas.style().set_property("position", "fixed")?;
            let body = document.body().ok_or("no body")?;
            body.style().set_property("margin", "0")?;
            body.append_child(&canvas)?;
            canvas
        }
    };
    canvas.set_width(viewport.width());
    canvas.set_height(viewport.height());
    Ok(canvas)
}

fn bind_quad(gl: &GL, program: &WebGlProgram) -> Result<()> {
    let position = gl.get_attrib_location(program, "a_position");
    if position < 0 {
        return Err("a_position attribute not found".into());
    }

    let buffer = gl.create_buffer().ok_or("unable to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(&QUAD[..]), GL::STATIC_DRAW);

    let vao = gl.create_vertex_array().ok_or("unable to create vertex array")?;
    gl.bind_vertex_array(Some(&vao));
    gl.enable_vertex_attrib_array(position as u32);
    gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
    Ok(())
}

fn now(window: &web_sys::Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

struct GlTarget {
    gl: GL,
    offsets: TextureUnit,
    time: Option<WebGlUniformLocation>,
    mouse: Option<WebGlUniformLocation>,
    wheel: Option<WebGlUniformLocation>,
}

impl FrameTarget for GlTarget {
    fn upload_offsets(&mut self, frame: &CroppedFrame) -> Result<()> {
        self.offsets.upload(&self.gl, frame)
    }

    fn write_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<()> {
        self.gl.uniform1f(self.time.as_ref(), uniforms.time);
        self.gl.uniform2f(self.mouse.as_ref(), uniforms.mouse[0], uniforms.mouse[1]);
        self.gl.uniform2f(self.wheel.as_ref(), uniforms.wheel[0], uniforms.wheel[1]);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.gl.draw_arrays(GL::TRIANGLES, 0, 6);
        Ok(())
    }
}

/// Drives `frames` from `requestAnimationFrame` until it reports [`Tick::Stop`].
fn animate(mut frames: FrameLoop, mut target: GlTarget, input: Rc<RefCell<InputState>>) -> Result<()> {
    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. The closure is created first and
    // stored afterwards, hence the `Option`.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(window) = window() else {
            log::error!("window went away, stopping frame loop");
            return;
        };
        let snapshot = input.borrow().snapshot();
        match frames.tick(now(&window), snapshot, &mut target) {
            Ok(Tick::Continue) => {}
            Ok(Tick::Stop) => return,
            Err(e) => {
                log::error!("frame failed, stopping: {e}");
                return;
            }
        }

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(e) = window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut()>));

    let window = window().ok_or("no window")?;
    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    Ok(())
}
