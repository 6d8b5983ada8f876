//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Why the hero scene could not be started in the current environment.
///
/// The hero is a progressive enhancement: every variant here is expected on
/// some pages and callers treat it as a quiet no-op, not a failure.
#[derive(Debug)]
pub enum Unavailable {
    /// No element with the given id exists in the page.
    Container(String),
    /// Neither WebGPU nor WebGL2 (nor a native adapter) is available.
    Renderer,
    /// A GPU was advertised but the device could not be created.
    Gpu(RenderContextError),
    /// No global `window`/`document` (e.g. running in a worker).
    NoWindow,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(id) => write!(f, "no container with id '{id}'"),
            Self::Renderer => write!(f, "no rendering backend available"),
            Self::Gpu(e) => write!(f, "GPU unavailable: {e}"),
            Self::NoWindow => write!(f, "no global window"),
        }
    }
}

impl std::error::Error for Unavailable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors produced by the horizon crate.
#[derive(Debug)]
pub enum HorizonError {
    /// The environment lacks something the hero needs.
    Unavailable(Unavailable),
    /// The surface could not provide a frame and cannot be recovered.
    Surface(wgpu::SurfaceError),
    /// WGSL composition failure.
    Shader(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// An option value outside its usable range.
    InvalidOption {
        /// Dotted path of the offending field.
        field: String,
        /// What the value must satisfy.
        reason: String,
    },
    /// Viewer event-loop failure.
    Viewer(String),
}

impl HorizonError {
    /// Whether this error only means "the hero cannot run here".
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl fmt::Display for HorizonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "hero unavailable: {e}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOption { field, reason } => {
                write!(f, "invalid option {field}: {reason}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for HorizonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Unavailable> for HorizonError {
    fn from(e: Unavailable) -> Self {
        Self::Unavailable(e)
    }
}

impl From<RenderContextError> for HorizonError {
    fn from(e: RenderContextError) -> Self {
        Self::Unavailable(Unavailable::Gpu(e))
    }
}

impl From<std::io::Error> for HorizonError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
