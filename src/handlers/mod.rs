pub mod health_handler;
pub mod question_handler;

pub use health_handler::{health_check, health_check_live};
pub use question_handler::{
    delete_question, document_insights, generate_questions, get_question, list_questions,
};
