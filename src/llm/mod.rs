pub mod completion_interface;
pub mod openai_compatible_llm;
pub mod llm_factory;
#[cfg(test)]
pub mod mock_llm;

pub use completion_interface::*;
pub use llm_factory::LLMFactory;
