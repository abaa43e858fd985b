pub mod extrude;
pub mod generate;
pub mod params;
pub mod record;
pub mod registry;
pub mod shapes;

pub mod errors {
    use thiserror::Error;

    use crate::shapes::ShapeKind;

    #[derive(Debug, Error)]
    pub enum EngineError {
        #[error("invalid parameter `{field}`: {message}")]
        InvalidParameter { field: String, message: String },
        #[error("shape type `{0}` is not registered")]
        UnknownShape(String),
        #[error("shape `{0}` has no solid model")]
        ExtrusionUnsupported(ShapeKind),
    }

    impl EngineError {
        pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
            Self::InvalidParameter {
                field: field.into(),
                message: message.into(),
            }
        }
    }
}

pub use errors::EngineError;
pub use generate::{ViewLayout, ViewSet, generate};
pub use params::{Opening, RawParameters, ShapeParameters, Wall};
pub use registry::{ShapeRegistry, resolve};
pub use shapes::{CadObject, ShapeKind, View};
