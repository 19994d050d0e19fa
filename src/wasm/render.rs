//! WebGL2 renderer for [`SceneModel`] and the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlTexture, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::{SiteError, SiteResult};
use crate::scene::camera::OrbitCamera;
use crate::scene::recipes::Part;
use crate::scene::SceneModel;

use super::dom;

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;
uniform mat4 u_view_proj;
uniform mat4 u_model;
uniform mat4 u_normal;
out vec3 v_world;
out vec3 v_normal;
out vec2 v_uv;
void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = mat3(u_normal) * a_normal;
    v_uv = a_uv;
    gl_Position = u_view_proj * world;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
in vec3 v_world;
in vec3 v_normal;
in vec2 v_uv;
uniform vec3 u_eye;
uniform vec3 u_color;
uniform float u_opacity;
uniform float u_metalness;
uniform float u_roughness;
uniform bool u_unlit;
uniform bool u_textured;
uniform sampler2D u_board;
out vec4 out_color;

const vec3 KEY_DIR = normalize(vec3(5.0, 10.0, 5.0));
const vec3 FILL_DIR = normalize(vec3(-5.0, 5.0, -5.0));

void main() {
    vec3 base = u_textured ? texture(u_board, v_uv).rgb : u_color;
    if (u_unlit) {
        out_color = vec4(base, u_opacity);
        return;
    }
    vec3 n = normalize(gl_FrontFacing ? v_normal : -v_normal);
    vec3 v = normalize(u_eye - v_world);
    float key = max(dot(n, KEY_DIR), 0.0);
    float fill = max(dot(n, FILL_DIR), 0.0) * 0.3;
    float shininess = mix(64.0, 4.0, u_roughness);
    float spec = pow(max(dot(n, normalize(KEY_DIR + v)), 0.0), shininess) * mix(0.04, 0.9, u_metalness);
    vec3 diffuse = base * (0.25 + 0.8 * key + fill) * (1.0 - 0.5 * u_metalness);
    out_color = vec4(diffuse + vec3(spec), u_opacity);
}
"#;

const CLEAR: [f32; 3] = [0.039, 0.059, 0.039];

struct GpuMesh {
    vao: WebGlVertexArrayObject,
    count: i32,
}

struct Uniforms {
    view_proj: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    normal: Option<WebGlUniformLocation>,
    eye: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    unlit: Option<WebGlUniformLocation>,
    textured: Option<WebGlUniformLocation>,
    board: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name| gl.get_uniform_location(program, name);
        Self {
            view_proj: at("u_view_proj"),
            model: at("u_model"),
            normal: at("u_normal"),
            eye: at("u_eye"),
            color: at("u_color"),
            opacity: at("u_opacity"),
            metalness: at("u_metalness"),
            roughness: at("u_roughness"),
            unlit: at("u_unlit"),
            textured: at("u_textured"),
            board: at("u_board"),
        }
    }
}

pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    uniforms: Uniforms,
    meshes: Vec<GpuMesh>,
    board: WebGlTexture,
}

fn compile(gl: &GL, kind: u32, source: &str) -> SiteResult<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(SiteError::Unsupported("shader objects"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        Err(SiteError::Shader(gl.get_shader_info_log(&shader).unwrap_or_default()))
    }
}

fn link(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> SiteResult<WebGlProgram> {
    let program = gl.create_program().ok_or(SiteError::Unsupported("program objects"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    if gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        Err(SiteError::Link(gl.get_program_info_log(&program).unwrap_or_default()))
    }
}

fn upload(gl: &GL, part: &Part) -> SiteResult<GpuMesh> {
    let vao = gl.create_vertex_array().ok_or(SiteError::Unsupported("vertex arrays"))?;
    gl.bind_vertex_array(Some(&vao));

    let attribute = |location: u32, size: i32, data: Vec<f32>| -> SiteResult<()> {
        let buffer = gl.create_buffer().ok_or(SiteError::Unsupported("buffers"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(data.as_slice()), GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
        Ok(())
    };
    let mesh = &part.mesh;
    attribute(0, 3, mesh.positions.iter().flatten().copied().collect())?;
    attribute(1, 3, mesh.normals.iter().flatten().copied().collect())?;
    attribute(2, 2, mesh.uvs.iter().flatten().copied().collect())?;

    let indices = gl.create_buffer().ok_or(SiteError::Unsupported("buffers"))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    gl.buffer_data_with_array_buffer_view(
        GL::ELEMENT_ARRAY_BUFFER,
        &Uint32Array::from(mesh.indices.as_slice()),
        GL::STATIC_DRAW,
    );
    gl.bind_vertex_array(None);
    Ok(GpuMesh { vao, count: mesh.indices.len() as i32 })
}

fn board_texture(gl: &GL, source: &HtmlCanvasElement) -> SiteResult<WebGlTexture> {
    let texture = gl.create_texture().ok_or(SiteError::Unsupported("textures"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_u32_and_u32_and_html_canvas_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        source,
    )?;
    gl.generate_mipmap(GL::TEXTURE_2D);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR_MIPMAP_LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    Ok(texture)
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, scene: &SceneModel, board: &HtmlCanvasElement) -> SiteResult<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(SiteError::Unsupported("WebGL2"))?
            .dyn_into()
            .map_err(|_| SiteError::Unsupported("WebGL2"))?;

        let vs = compile(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link(&gl, &vs, &fs)?;
        let uniforms = Uniforms::locate(&gl, &program);

        let meshes = scene.catalog().iter().map(|part| upload(&gl, part)).collect::<SiteResult<Vec<_>>>()?;
        let board = board_texture(&gl, board)?;
        log::info!("renderer ready: {} meshes on the GPU", meshes.len());

        Ok(Self { gl, canvas, program, uniforms, meshes, board })
    }

    /// Matches the drawing buffer to the canvas' CSS size. Returns the
    /// new size in CSS pixels.
    pub fn fit(&self) -> (f32, f32) {
        let ratio = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let (w, h) = (self.canvas.client_width().max(1), self.canvas.client_height().max(1));
        let (pw, ph) = ((f64::from(w) * ratio) as u32, (f64::from(h) * ratio) as u32);
        if self.canvas.width() != pw || self.canvas.height() != ph {
            self.canvas.set_width(pw);
            self.canvas.set_height(ph);
        }
        (w as f32, h as f32)
    }

    pub fn draw(&self, scene: &SceneModel, camera: &OrbitCamera) {
        let gl = &self.gl;
        let u = &self.uniforms;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear_color(CLEAR[0], CLEAR[1], CLEAR[2], 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.enable(GL::DEPTH_TEST);
        gl.disable(GL::CULL_FACE);
        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(u.view_proj.as_ref(), false, &camera.view_projection().to_cols_array());
        gl.uniform3fv_with_f32_array(u.eye.as_ref(), &camera.eye().to_array());
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.board));
        gl.uniform1i(u.board.as_ref(), 0);

        for draw in scene.frame() {
            let Some(mesh) = self.meshes.get(draw.mesh.0) else { continue };
            let m = scene.material(draw.mesh);
            let opacity = m.opacity * draw.fade;
            // Translucent parts test depth but do not write it.
            gl.depth_mask(opacity >= 1.0);
            gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, &draw.world.to_cols_array());
            let normal = draw.world.inverse().transpose();
            gl.uniform_matrix4fv_with_f32_array(u.normal.as_ref(), false, &normal.to_cols_array());
            gl.uniform3fv_with_f32_array(u.color.as_ref(), &m.color);
            gl.uniform1f(u.opacity.as_ref(), opacity);
            gl.uniform1f(u.metalness.as_ref(), m.metalness);
            gl.uniform1f(u.roughness.as_ref(), m.roughness);
            gl.uniform1i(u.unlit.as_ref(), i32::from(m.unlit));
            gl.uniform1i(u.textured.as_ref(), i32::from(m.textured));
            gl.bind_vertex_array(Some(&mesh.vao));
            gl.draw_elements_with_i32(GL::TRIANGLES, mesh.count, GL::UNSIGNED_INT, 0);
        }
        gl.bind_vertex_array(None);
        gl.depth_mask(true);
    }
}

/// Calls `frame` with the `requestAnimationFrame` timestamp on every
/// frame, forever.
pub fn start_loop(mut frame: impl FnMut(f64) + 'static) -> SiteResult<()> {
    // The closure has to reach itself to reschedule, so it lives in a
    // shared slot that it borrows on each call.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let again = slot.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        frame(now);
        let scheduled = dom::window().and_then(|w| {
            let next = again.borrow();
            let cb = next.as_ref().ok_or(SiteError::Unsupported("frame callback"))?;
            Ok(w.request_animation_frame(cb.as_ref().unchecked_ref())?)
        });
        if let Err(e) = scheduled {
            log::error!("frame loop stopped: {e}");
        }
    }) as Box<dyn FnMut(f64)>));

    let first = slot.borrow();
    let cb = first.as_ref().ok_or(SiteError::Unsupported("frame callback"))?;
    dom::window()?.request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}
