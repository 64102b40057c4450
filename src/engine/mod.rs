pub mod answer_matcher;
pub mod dialogue_processor;
pub mod evaluator;
pub mod llm_client;
pub mod prompt_builder;
pub mod response_parser;
