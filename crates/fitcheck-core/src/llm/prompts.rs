//! Fixed prompts for the two suggestion calls.
//!
//! The wording is load-bearing: both system prompts pin the output to three
//! single-line numbered suggestions so the frontend can render them without
//! parsing, and both user prompts embed a sentence produced by
//! classification.

/// System prompt for the outfit-suggestion call.
pub(crate) const OUTFIT_SYSTEM_PROMPT: &str = "You are a fashion advisor. \
    Provide 3 concise outfit suggestions based on the user's style. For each suggestion, include:\n\
    - **Top**: The top to wear.\n\
    - **Bottom**: The bottom to wear.\n\
    - **Footwear**: Recommended footwear.\n\
    - **Accessories**: Recommended accessories.\n\
    Each suggestion should be a single line, starting with a number and a name \
    (e.g., '1. **Casual Chic**'). Do not include explanations or introductions \
    so only give the bullet points dont speak to yourself.";

/// System prompt for the remix call.
pub(crate) const REMIX_SYSTEM_PROMPT: &str = "You are a fashion advisor. \
    Provide 3 concise and actionable ways to remix the user's outfit. For each suggestion, include:\n\
    - **Swap**: What to change.\n\
    - **Footwear**: Recommended footwear.\n\
    - **Accessories**: Recommended accessories.\n\
    Each suggestion should be a single line, starting with a number and a name \
    (e.g., '1. **Streetwear Edge**'). Do not include explanations or introductions.";

/// User prompt for the outfit-suggestion call.
///
/// `style` is the whole feedback sentence, not a bare style word.
pub(crate) fn outfit_user_prompt(style: &str) -> String {
    format!("Suggest 3 outfits for a {style} look. Keep it short and simple.")
}

/// User prompt for the remix call.
pub(crate) fn remix_user_prompt(outfit_description: &str) -> String {
    format!("The user is wearing: {outfit_description}. Suggest 3 ways to remix this outfit.")
}
