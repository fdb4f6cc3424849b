/// Placeholder substituted by [`render`].
pub const SLOT: &str = "{}";

pub const DEFAULT_BLANK_MARKER: &str = "______";

/// Marks awarded per question kind.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkScheme {
    pub mcq: f64,
    pub true_false: f64,
    pub short_definition: f64,
    pub short_sentence: f64,
    pub long_answer: f64,
    pub fill_blank: f64,
    pub programming: f64,
}

impl Default for MarkScheme {
    fn default() -> Self {
        Self {
            mcq: 1.0,
            true_false: 0.5,
            short_definition: 2.0,
            short_sentence: 3.0,
            long_answer: 5.0,
            fill_blank: 1.0,
            programming: 10.0,
        }
    }
}

/// Phrasing used by the question generators. Built once and only read.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionTemplates {
    pub definition_prompts: Vec<String>,
    pub long_answer_verbs: Vec<String>,
    pub long_answer_placeholder: String,
    pub long_answer_explanation: String,
    pub programming_keywords: Vec<String>,
    pub programming_prompt: String,
    pub programming_answer: String,
    pub programming_explanation: String,
    pub true_statement_explanation: String,
    pub distractor_placeholder: String,
    pub blank_marker: String,
    pub marks: MarkScheme,
}

impl Default for QuestionTemplates {
    fn default() -> Self {
        Self {
            definition_prompts: strings(&["Define {}.", "What is meant by {}?", "Explain the term {}."]),
            long_answer_verbs: strings(&[
                "Explain in detail",
                "Discuss",
                "Describe",
                "Analyze",
                "Compare and contrast",
                "Evaluate",
            ]),
            long_answer_placeholder:
                "A comprehensive answer should cover the key aspects of {} as discussed in the material."
                    .to_string(),
            long_answer_explanation: "This is an open-ended question requiring detailed explanation."
                .to_string(),
            programming_keywords: strings(&[
                "algorithm",
                "function",
                "program",
                "code",
                "implement",
                "write",
                "develop",
                "class",
                "method",
            ]),
            programming_prompt: "Write a program to {}".to_string(),
            programming_answer: "Implementation should follow standard programming practices."
                .to_string(),
            programming_explanation: "Evaluate based on correctness, efficiency, and code quality."
                .to_string(),
            true_statement_explanation: "This statement is directly from the source material."
                .to_string(),
            distractor_placeholder: "Alternative definition".to_string(),
            blank_marker: DEFAULT_BLANK_MARKER.to_string(),
            marks: MarkScheme::default(),
        }
    }
}

pub fn render(template: &str, value: &str) -> String {
    template.replacen(SLOT, value, 1)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
