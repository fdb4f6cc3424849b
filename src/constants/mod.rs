pub mod templates;

pub use templates::{MarkScheme, QuestionTemplates};
