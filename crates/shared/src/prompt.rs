//! Prompt composition for one ask action.
//!
//! The full prompt is always the same four parts in order: context text,
//! separator, the user's question, and a fixed instruction suffix. Built
//! fresh for every request, never mutated afterwards.

pub const QUESTION_SEPARATOR: &str = "\n\n---\n\nQUESTION:\n";

pub const INSTRUCTION_SUFFIX: &str =
    "\n\nProvide complete, production-ready code with detailed comments.";

pub fn compose(context_text: &str, question: &str) -> String {
    let mut prompt =
        String::with_capacity(context_text.len() + QUESTION_SEPARATOR.len() + question.len() + INSTRUCTION_SUFFIX.len());
    prompt.push_str(context_text);
    prompt.push_str(QUESTION_SEPARATOR);
    prompt.push_str(question);
    prompt.push_str(INSTRUCTION_SUFFIX);
    prompt
}
