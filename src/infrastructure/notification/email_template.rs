use crate::application::services::result_normalizer::escape_html;
use crate::domain::{MediaKind, UsageRecord};

pub struct RenderedEmail {
    pub subject: &'static str,
    pub html_body: String,
}

pub fn subject_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "Image Processing Result",
        MediaKind::Video => "Video Processing Result",
    }
}

/// Swaps the file extension of a video URL for `.jpg`, which the CDN serves as a poster frame.
pub fn video_thumbnail_url(file_url: &str) -> String {
    let last_segment = file_url.rfind('/').map_or(0, |slash| slash + 1);
    match file_url[last_segment..].rfind('.') {
        Some(dot) => format!("{}.jpg", &file_url[..last_segment + dot]),
        None => format!("{file_url}.jpg"),
    }
}

/// Removes a surrounding Markdown code fence such as ```` ```html ... ``` ````.
pub fn strip_code_fence(answer: &str) -> &str {
    let trimmed = answer.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

pub fn render(record: &UsageRecord, kind: MediaKind) -> RenderedEmail {
    let file_url = escape_html(&record.file_url);
    let media_html = match kind {
        MediaKind::Image => format!(
            r#"<p>Image: <a href="{file_url}"><img src="{file_url}" height="300px"/></a></p>"#
        ),
        MediaKind::Video => format!(
            r#"<p>Video: <a href="{file_url}"><img src="{}" height="300px"/></a></p>"#,
            escape_html(&video_thumbnail_url(&record.file_url))
        ),
    };

    let html_body = format!(
        "<p>Model Used: {model}</p>\n\
         <p>Date: {date}</p>\n\
         <p>Question: {question}</p>\n\
         {media_html}\n\
         <p>Answer: {answer}</p>\n\
         <br>\n\
         <p>Best Regards,</p>\n\
         <p>John UK</p>\n",
        model = record.model,
        date = record.created_at.to_rfc3339(),
        question = escape_html(&record.question_text),
        answer = strip_code_fence(&record.answer_text),
    );

    RenderedEmail {
        subject: subject_for(kind),
        html_body,
    }
}
