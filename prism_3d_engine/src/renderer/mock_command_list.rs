/// Recording CommandList for unit tests (no GPU required)
///
/// Every call is appended to `commands` as a short string, so tests can
/// assert on the exact submission sequence. A command name can be set to
/// fail, to exercise error propagation.

#[cfg(test)]
use glam::{Mat4, Vec3};
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::engine_bail;
#[cfg(test)]
use crate::resource::{Material, Mesh, ShaderHandle, UniformLocation};
#[cfg(test)]
use super::command_list::{CommandList, Viewport};

#[cfg(test)]
pub struct MockCommandList {
    pub commands: Vec<String>,
    /// Last uploaded instance data, as matrices
    pub instance_data: Vec<Mat4>,
    /// Every vertex passed to `draw_lines`
    pub line_vertices: Vec<Vec3>,
    /// Command name that returns a BackendError
    pub fail_on: Option<&'static str>,
}

#[cfg(test)]
impl MockCommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            instance_data: Vec::new(),
            line_vertices: Vec::new(),
            fail_on: None,
        }
    }

    /// Commands whose name starts with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&mut self, name: &'static str, command: String) -> Result<()> {
        if self.fail_on == Some(name) {
            engine_bail!("prism3d::mock", "{} refused by mock backend", name);
        }
        self.commands.push(command);
        Ok(())
    }
}

#[cfg(test)]
impl CommandList for MockCommandList {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record("set_viewport", format!("set_viewport({}x{})", viewport.width, viewport.height))
    }

    fn clear(&mut self) -> Result<()> {
        self.record("clear", "clear".to_string())
    }

    fn bind_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.record("bind_shader", format!("bind_shader({})", shader.0))
    }

    fn apply_material(&mut self, material: &Material) -> Result<()> {
        self.record("apply_material", format!("apply_material({})", material.name()))
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, _value: &Mat4) -> Result<()> {
        self.record("set_uniform_mat4", format!("set_uniform_mat4({})", location.0))
    }

    fn bind_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        self.record("bind_mesh", format!("bind_mesh({})", mesh.name()))
    }

    fn upload_instance_data(&mut self, data: &[u8]) -> Result<()> {
        self.record("upload_instance_data", format!("upload_instance_data({} bytes)", data.len()))?;
        self.instance_data = data
            .chunks_exact(std::mem::size_of::<Mat4>())
            .map(bytemuck::pod_read_unaligned::<Mat4>)
            .collect();
        Ok(())
    }

    fn bind_mesh_instanced(&mut self, mesh: &Mesh) -> Result<()> {
        self.record("bind_mesh_instanced", format!("bind_mesh_instanced({})", mesh.name()))
    }

    fn draw(&mut self, mesh: &Mesh) -> Result<()> {
        self.record("draw", format!("draw({})", mesh.name()))
    }

    fn draw_instanced(&mut self, mesh: &Mesh, instance_count: u32) -> Result<()> {
        self.record("draw_instanced", format!("draw_instanced({}, {})", mesh.name(), instance_count))
    }

    fn unbind_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        self.record("unbind_mesh", format!("unbind_mesh({})", mesh.name()))
    }

    fn draw_lines(&mut self, vertices: &[Vec3], _view_projection: &Mat4) -> Result<()> {
        self.record("draw_lines", format!("draw_lines({})", vertices.len()))?;
        self.line_vertices.extend_from_slice(vertices);
        Ok(())
    }
}
