use glam::{Mat3, Mat4};
use js_sys::{Float32Array, Uint16Array};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::geometry::Mesh;
use crate::scene::{FloatingPrimitive, OrbitCamera, SceneSpec, Starfield};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no canvas to draw into")]
    MissingCanvas,
    #[error("WebGL2 is not available")]
    Unsupported,
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("shader program failed to link: {0}")]
    ProgramLink(String),
    #[error("could not allocate {0}")]
    Allocation(&'static str),
}

const MESH_VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_view_projection;
uniform mat3 u_normal_matrix;
out vec3 v_world;
out vec3 v_normal;
void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = normalize(u_normal_matrix * a_normal);
    gl_Position = u_view_projection * world;
}
"#;

const MESH_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec3 v_world;
in vec3 v_normal;
uniform vec3 u_color;
uniform float u_roughness;
uniform float u_metalness;
uniform vec3 u_camera;
uniform float u_ambient;
uniform vec3 u_environment;
uniform vec3 u_light_position[2];
uniform vec3 u_light_color[2];
uniform float u_light_intensity[2];
out vec4 o_color;
void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_camera - v_world);
    vec3 diffuse = u_color * (1.0 - u_metalness);
    vec3 specular = mix(vec3(0.04), u_color, u_metalness);
    float shininess = mix(256.0, 4.0, u_roughness);
    vec3 lit = u_color * u_ambient + specular * u_environment;
    for (int i = 0; i < 2; i++) {
        vec3 l = normalize(u_light_position[i] - v_world);
        float ndl = max(dot(n, l), 0.0);
        vec3 h = normalize(l + v);
        float highlight = pow(max(dot(n, h), 0.0), shininess) * (shininess + 8.0) / 25.13;
        lit += u_light_color[i] * u_light_intensity[i] * ndl * (diffuse + specular * highlight);
    }
    o_color = vec4(pow(lit, vec3(1.0 / 2.2)), 1.0);
}
"#;

const STAR_VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;
layout(location = 2) in float a_size;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;
out vec3 v_color;
void main() {
    vec4 view_position = u_view * vec4(a_position, 1.0);
    gl_PointSize = a_size * (30.0 / -view_position.z) * (3.0 + sin(u_time + 100.0));
    v_color = a_color;
    gl_Position = u_projection * view_position;
}
"#;

const STAR_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec3 v_color;
uniform bool u_fade;
out vec4 o_color;
void main() {
    float opacity = 1.0;
    if (u_fade) {
        float d = distance(gl_PointCoord, vec2(0.5));
        opacity = 1.0 / (1.0 + exp(16.0 * (d - 0.25)));
    }
    o_color = vec4(v_color, opacity);
}
"#;

/// Shader object deleted when dropped. Once attached and linked, the program
/// keeps what it needs.
struct Shader {
    gl: GL,
    shader: WebGlShader,
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.gl.delete_shader(Some(&self.shader));
    }
}

/// Linked program deleted when dropped.
struct Program {
    gl: GL,
    program: WebGlProgram,
}

impl Drop for Program {
    fn drop(&mut self) {
        self.gl.delete_program(Some(&self.program));
    }
}

fn compile_shader(gl: &GL, stage: u32, source: &str) -> Result<Shader, SceneError> {
    let shader = Shader {
        gl: gl.clone(),
        shader: gl
            .create_shader(stage)
            .ok_or(SceneError::Allocation("shader"))?,
    };
    gl.shader_source(&shader.shader, source);
    gl.compile_shader(&shader.shader);

    if gl
        .get_shader_parameter(&shader.shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Ok(shader);
    }

    Err(SceneError::ShaderCompile {
        stage: if stage == GL::VERTEX_SHADER {
            "vertex"
        } else {
            "fragment"
        },
        log: gl.get_shader_info_log(&shader.shader).unwrap_or_default(),
    })
}

fn link_program(gl: &GL, vertex: &str, fragment: &str) -> Result<Program, SceneError> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment)?;
    let program = Program {
        gl: gl.clone(),
        program: gl
            .create_program()
            .ok_or(SceneError::Allocation("shader program"))?,
    };
    gl.attach_shader(&program.program, &vertex.shader);
    gl.attach_shader(&program.program, &fragment.shader);
    gl.link_program(&program.program);

    if gl
        .get_program_parameter(&program.program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Ok(program);
    }

    Err(SceneError::ProgramLink(
        gl.get_program_info_log(&program.program).unwrap_or_default(),
    ))
}

fn upload_f32(gl: &GL, location: u32, components: i32, data: &[f32]) -> Result<WebGlBuffer, SceneError> {
    let buffer = gl
        .create_buffer()
        .ok_or(SceneError::Allocation("vertex buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(data), GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, components, GL::FLOAT, false, 0, 0);
    Ok(buffer)
}

struct LightUniforms {
    position: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    intensity: Option<WebGlUniformLocation>,
}

struct MeshProgram {
    program: Program,
    model: Option<WebGlUniformLocation>,
    view_projection: Option<WebGlUniformLocation>,
    normal_matrix: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    camera: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    environment: Option<WebGlUniformLocation>,
    lights: [LightUniforms; 2],
}

impl MeshProgram {
    fn new(gl: &GL) -> Result<Self, SceneError> {
        let program = link_program(gl, MESH_VERTEX_SHADER, MESH_FRAGMENT_SHADER)?;
        let uniform = |name: &str| gl.get_uniform_location(&program.program, name);
        let light = |index: usize| LightUniforms {
            position: uniform(&format!("u_light_position[{index}]")),
            color: uniform(&format!("u_light_color[{index}]")),
            intensity: uniform(&format!("u_light_intensity[{index}]")),
        };

        Ok(Self {
            model: uniform("u_model"),
            view_projection: uniform("u_view_projection"),
            normal_matrix: uniform("u_normal_matrix"),
            color: uniform("u_color"),
            roughness: uniform("u_roughness"),
            metalness: uniform("u_metalness"),
            camera: uniform("u_camera"),
            ambient: uniform("u_ambient"),
            environment: uniform("u_environment"),
            lights: [light(0), light(1)],
            program,
        })
    }
}

struct StarProgram {
    program: Program,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    fade: Option<WebGlUniformLocation>,
}

impl StarProgram {
    fn new(gl: &GL) -> Result<Self, SceneError> {
        let program = link_program(gl, STAR_VERTEX_SHADER, STAR_FRAGMENT_SHADER)?;
        let uniform = |name: &str| gl.get_uniform_location(&program.program, name);

        Ok(Self {
            view: uniform("u_view"),
            projection: uniform("u_projection"),
            time: uniform("u_time"),
            fade: uniform("u_fade"),
            program,
        })
    }
}

/// Vertex array plus the buffers it references, deleted together on drop.
struct GpuGeometry {
    gl: GL,
    vao: WebGlVertexArrayObject,
    buffers: Vec<WebGlBuffer>,
    count: i32,
}

impl GpuGeometry {
    fn bound(gl: &GL, count: usize) -> Result<Self, SceneError> {
        let vao = gl
            .create_vertex_array()
            .ok_or(SceneError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        Ok(Self {
            gl: gl.clone(),
            vao,
            buffers: Vec::new(),
            count: count as i32,
        })
    }

    fn from_mesh(gl: &GL, mesh: &Mesh) -> Result<Self, SceneError> {
        let mut geometry = Self::bound(gl, mesh.indices.len())?;
        geometry.buffers.push(upload_f32(gl, 0, 3, &mesh.positions)?);
        geometry.buffers.push(upload_f32(gl, 1, 3, &mesh.normals)?);

        let indices = gl
            .create_buffer()
            .ok_or(SceneError::Allocation("index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        gl.buffer_data_with_array_buffer_view(
            GL::ELEMENT_ARRAY_BUFFER,
            &Uint16Array::from(mesh.indices.as_slice()),
            GL::STATIC_DRAW,
        );
        geometry.buffers.push(indices);
        gl.bind_vertex_array(None);

        Ok(geometry)
    }

    fn from_stars(gl: &GL, stars: &Starfield) -> Result<Self, SceneError> {
        let mut geometry = Self::bound(gl, stars.count())?;
        geometry.buffers.push(upload_f32(gl, 0, 3, &stars.positions)?);
        geometry.buffers.push(upload_f32(gl, 1, 3, &stars.colors)?);
        geometry.buffers.push(upload_f32(gl, 2, 1, &stars.sizes)?);
        gl.bind_vertex_array(None);

        Ok(geometry)
    }
}

impl Drop for GpuGeometry {
    fn drop(&mut self) {
        self.gl.bind_vertex_array(None);
        self.gl.delete_vertex_array(Some(&self.vao));
        for buffer in &self.buffers {
            self.gl.delete_buffer(Some(buffer));
        }
    }
}

/// Owns every GL resource of the background. Each part frees itself on drop,
/// so a failure half-way through `new` releases what was already built.
pub struct SceneRenderer {
    gl: GL,
    spec: SceneSpec,
    mesh_program: MeshProgram,
    star_program: StarProgram,
    primitives: Vec<(FloatingPrimitive, GpuGeometry)>,
    stars: GpuGeometry,
}

impl SceneRenderer {
    pub fn new(canvas: &HtmlCanvasElement, spec: SceneSpec) -> Result<Self, SceneError> {
        let gl: GL = canvas
            .get_context("webgl2")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into().ok())
            .ok_or(SceneError::Unsupported)?;

        let mesh_program = MeshProgram::new(&gl)?;
        let star_program = StarProgram::new(&gl)?;
        let primitives = spec
            .primitives
            .iter()
            .map(|primitive| {
                GpuGeometry::from_mesh(&gl, &primitive.shape.mesh()).map(|geometry| (*primitive, geometry))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let stars = GpuGeometry::from_stars(&gl, &spec.stars.generate())?;

        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        log::debug!(
            "scene ready: {} primitives, {} stars",
            primitives.len(),
            stars.count
        );

        Ok(Self {
            gl,
            spec,
            mesh_program,
            star_program,
            primitives,
            stars,
        })
    }

    /// Initial camera for the loop that drives this renderer.
    pub fn camera(&self) -> OrbitCamera {
        self.spec.camera
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    pub fn render(&self, camera: &OrbitCamera, elapsed: f32) {
        let gl = &self.gl;
        let width = gl.drawing_buffer_width().max(1) as f32;
        let height = gl.drawing_buffer_height().max(1) as f32;
        let view = camera.view();
        let projection = camera.projection(width / height);

        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        self.draw_stars(&view, &projection, elapsed);
        self.draw_primitives(&(projection * view), camera, elapsed);
    }

    fn draw_stars(&self, view: &Mat4, projection: &Mat4, elapsed: f32) {
        let gl = &self.gl;
        let program = &self.star_program;

        gl.disable(GL::DEPTH_TEST);
        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE);

        gl.use_program(Some(&program.program.program));
        gl.uniform_matrix4fv_with_f32_array(program.view.as_ref(), false, &view.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(program.projection.as_ref(), false, &projection.to_cols_array());
        gl.uniform1f(program.time.as_ref(), self.spec.stars.shader_time(elapsed));
        gl.uniform1i(program.fade.as_ref(), i32::from(self.spec.stars.fade));

        gl.bind_vertex_array(Some(&self.stars.vao));
        gl.draw_arrays(GL::POINTS, 0, self.stars.count);
        gl.bind_vertex_array(None);
    }

    fn draw_primitives(&self, view_projection: &Mat4, camera: &OrbitCamera, elapsed: f32) {
        let gl = &self.gl;
        let program = &self.mesh_program;
        let lighting = &self.spec.lighting;

        gl.disable(GL::BLEND);
        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::CULL_FACE);

        gl.use_program(Some(&program.program.program));
        gl.uniform_matrix4fv_with_f32_array(
            program.view_projection.as_ref(),
            false,
            &view_projection.to_cols_array(),
        );
        gl.uniform3fv_with_f32_array(program.camera.as_ref(), &camera.eye().to_array());
        gl.uniform1f(program.ambient.as_ref(), lighting.ambient);
        gl.uniform3fv_with_f32_array(program.environment.as_ref(), &lighting.environment);
        for (uniforms, light) in program.lights.iter().zip(&lighting.points) {
            gl.uniform3fv_with_f32_array(uniforms.position.as_ref(), &light.position);
            gl.uniform3fv_with_f32_array(uniforms.color.as_ref(), &light.color);
            gl.uniform1f(uniforms.intensity.as_ref(), light.intensity);
        }

        for (primitive, geometry) in &self.primitives {
            let model = primitive.model_matrix(elapsed);
            let normal_matrix = Mat3::from_mat4(model).inverse().transpose();
            gl.uniform_matrix4fv_with_f32_array(program.model.as_ref(), false, &model.to_cols_array());
            gl.uniform_matrix3fv_with_f32_array(
                program.normal_matrix.as_ref(),
                false,
                &normal_matrix.to_cols_array(),
            );
            gl.uniform3fv_with_f32_array(program.color.as_ref(), &primitive.material.color);
            gl.uniform1f(program.roughness.as_ref(), primitive.material.roughness);
            gl.uniform1f(program.metalness.as_ref(), primitive.material.metalness);

            gl.bind_vertex_array(Some(&geometry.vao));
            gl.draw_elements_with_i32(GL::TRIANGLES, geometry.count, GL::UNSIGNED_SHORT, 0);
        }
        gl.bind_vertex_array(None);
    }
}
