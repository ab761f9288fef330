use sightline::infrastructure::vision::frame_prompt;

#[test]
fn given_image_question_when_framing_then_uses_image_starter_and_html_contract() {
    let prompt = frame_prompt("  How many people?  ", false);

    assert!(prompt.starts_with("This is an image a user want me to process. How many people?"));
    assert!(prompt.contains("formatted in HTML"));
    assert!(!prompt.contains("CCTV"));
}

#[test]
fn given_video_question_when_framing_then_mentions_video_frames() {
    let prompt = frame_prompt("Who left the building?", true);

    assert!(prompt.starts_with("These are frames from a video"));
    assert!(prompt.contains("Who left the building?"));
}
