//! Prompt templates sent to advisors

mod template;

pub use template::PromptTemplate;
