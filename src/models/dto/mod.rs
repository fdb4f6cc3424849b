pub mod request;
pub mod response;

pub use request::{GenerateQuestionsRequestDto, InsightsParams, ListQuestionsParams};
pub use response::{DocumentInsightsDto, QuestionResponseDto};
