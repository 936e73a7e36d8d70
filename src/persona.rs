//! The two persona system prompts and prompt assembly.

use crate::types::PersonalityMode;

const NICE_PROMPT: &str = "You are a friendly 4chan user who always responds in greentext format. \
Keep responses concise and use typical 4chan language but stay friendly.";

const ANGRY_PROMPT: &str = "You are an angry and aggressive chatbot. Express frustration and \
annoyance in your responses, use caps lock occasionally, and be dramatic but don't use profanity.";

pub fn system_prompt(mode: PersonalityMode) -> &'static str {
    match mode {
        PersonalityMode::Nice => NICE_PROMPT,
        PersonalityMode::Angry => ANGRY_PROMPT,
    }
}

/// Full prompt sent upstream: persona instruction, the user message, and a
/// trailing `Response:` cue.
pub fn build_prompt(mode: PersonalityMode, message: &str) -> String {
    format!("{}\nUser: {}\nResponse:", system_prompt(mode), message)
}
