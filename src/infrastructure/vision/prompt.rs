const VIDEO_STARTER: &str =
    "These are frames from a video that a user want me to process from CCTV. ";
const IMAGE_STARTER: &str = "This is an image a user want me to process. ";
const HTML_INSTRUCTION: &str = ", The answer must be formatted in HTML. Also don't include any description outside the html. Since I will embed the html in another web app, don't put it inside html or body tags.";

/// Wraps the user's question with the media framing and the HTML answer contract.
pub fn frame_prompt(question: &str, is_video: bool) -> String {
    let starter = if is_video { VIDEO_STARTER } else { IMAGE_STARTER };
    format!("{starter}{}{HTML_INSTRUCTION}", question.trim())
}

/// Pulls a human-readable message out of a provider's JSON error body.
pub(super) fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .or_else(|| value.get("message"))
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "provider returned an empty error body".to_string()
            } else {
                trimmed.to_string()
            }
        })
}
