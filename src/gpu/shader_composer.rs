use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::HorizonError;

/// A WGSL shader shipped with the crate: source plus the path used in
/// composer diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    /// Human-readable label for the wgpu shader module.
    pub label: &'static str,
    /// WGSL source, possibly containing `#import` directives.
    pub source: &'static str,
    /// Path reported in composer errors.
    pub file_path: &'static str,
}

/// Unlit event-horizon sphere.
pub const HORIZON_SHADER: ShaderSource = ShaderSource {
    label: "Horizon Shader",
    source: include_str!("../../assets/shaders/horizon.wgsl"),
    file_path: "horizon.wgsl",
};

/// Textured accretion disk.
pub const DISK_SHADER: ShaderSource = ShaderSource {
    label: "Disk Shader",
    source: include_str!("../../assets/shaders/disk.wgsl"),
    file_path: "disk.wgsl",
};

/// Camera-facing halo quad.
pub const BILLBOARD_SHADER: ShaderSource = ShaderSource {
    label: "Billboard Shader",
    source: include_str!("../../assets/shaders/billboard.wgsl"),
    file_path: "billboard.wgsl",
};

/// Instanced point-sprite starfield.
pub const STARS_SHADER: ShaderSource = ShaderSource {
    label: "Stars Shader",
    source: include_str!("../../assets/shaders/stars.wgsl"),
    file_path: "stars.wgsl",
};

/// Every shader the renderer builds a pipeline from.
pub const ALL_SHADERS: [ShaderSource; 4] =
    [HORIZON_SHADER, DISK_SHADER, BILLBOARD_SHADER, STARS_SHADER];

/// Shared modules, in dependency order.
const MODULES: &[(&str, &str)] = &[(
    include_str!("../../assets/shaders/modules/common.wgsl"),
    "modules/common.wgsl",
)];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Consuming shaders use `#import horizon::common::{...}` to pull in the
/// shared camera/object uniforms. The composer produces `naga::Module` IR
/// directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with all shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, HorizonError> {
        let mut composer = Composer::default();
        for (source, file_path) in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source,
                    file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    HorizonError::Shader(format!(
                        "failed to register shader module '{file_path}': {e}"
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose `shader` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        shader: &ShaderSource,
    ) -> Result<wgpu::ShaderModule, HorizonError> {
        let naga_module = self.compose_naga(shader.source, shader.file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shader.label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a
    /// wgpu shader module. Useful for testing shader composition without a
    /// GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, HorizonError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                HorizonError::Shader(format!(
                    "failed to compose shader '{file_path}': {e}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in ALL_SHADERS {
            let module = composer
                .compose_naga(shader.source, shader.file_path)
                .unwrap_or_else(|e| panic!("{}: {e}", shader.file_path));
            let entry_points: Vec<_> =
                module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(entry_points.contains(&"vs_main"), "{}", shader.label);
            assert!(entry_points.contains(&"fs_main"), "{}", shader.label);
        }
    }

    #[test]
    fn broken_shader_reports_path() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("fn broken( {", "broken.wgsl")
            .unwrap_err();
        assert!(err.to_string().contains("broken.wgsl"));
    }
}
