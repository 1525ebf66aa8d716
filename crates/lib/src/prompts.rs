//! # Default Scoring Prompts
//!
//! The default prompt templates for the suspicion scoring task. Both can be
//! overridden by the server's `config.yml` or `prompt.yml`.

/// The system prompt. It fixes the persona and the reply format.
pub const SCORING_SYSTEM_PROMPT: &str = r#"You are a helpful AI that examines streaming, encyclopedia and social media data to determine if a music artist might be "fake" (AI-generated, a ghost profile or a content-farm alias).
Return JSON with fields: "score" (0 to 100) and "analysis" (short text). Do not add any other text."#;

/// The user prompt.
///
/// Placeholders: `{name}`, `{followers}`, `{popularity}`, `{monthly_listeners}`,
/// `{verified}`, `{genres}`, `{wikipedia}`, `{social}`
pub const SCORING_USER_PROMPT: &str = r#"Artist Data:
Name: {name}
Spotify Followers: {followers}
Spotify Popularity: {popularity}
Monthly Listeners: {monthly_listeners}
Verified: {verified}
Genres: {genres}
Wikipedia Presence: {wikipedia}
Instagram Presence: {social}

Instructions:
1. "score" should be an integer 0-100 (higher = more suspicious).
2. "analysis" is a short explanation.
3. An Instagram profile was looked up by guessing the handle from the artist name, so it may belong to someone else."#;
