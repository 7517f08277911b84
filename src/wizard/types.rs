use serde::{Deserialize, Serialize};

/// Request body shared by translate and judge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub wizard_texts: [String; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgementResult {
    pub text: String,
    pub score: i64,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

/// Judge fields extracted from the model's reply
#[derive(Debug, Clone, PartialEq)]
pub struct Judgement {
    pub score: i64,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

/// System and user instruction sent to the model
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}
