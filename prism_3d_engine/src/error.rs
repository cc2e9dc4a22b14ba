//! Error types for the Prism3D engine
//!
//! Geometry never fails with an error: degenerate inputs yield sentinel
//! values (`Aabb::EMPTY`, `None`, an empty visible list). Errors are reserved
//! for API misuse on the scene graph arena and for command submission
//! failures reported by a rendering backend.

use std::fmt;

/// Result type for Prism3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Stale node key, or an edit that would break tree ownership
    InvalidNode(String),

    /// Invalid resource description (mesh, material)
    InvalidResource(String),

    /// Command submission failed in the rendering backend
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error (with file:line) and build an `Error` value.
///
/// The first form builds an `Error::BackendError`; the second form takes
/// the variant to build explicitly.
///
/// ```ignore
/// let err = engine_err!("prism3d::SceneGraph", "Node {:?} not found", key);
/// let err = engine_err!(InvalidNode, "prism3d::SceneGraph", "Node {:?} not found", key);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism3d::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism3d::Error::BackendError(message)
    }};
}

/// Log an error and return it from the current function.
///
/// ```ignore
/// engine_bail!(InvalidNode, "prism3d::SceneGraph", "Node {:?} not found", key);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
