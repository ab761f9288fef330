//! Renders structured provider results as the same kind of HTML fragment the
//! free-text backends return. Empty categories produce no markup at all.

use crate::domain::{AsticaAnalysis, GoogleVisionAnalysis, RekognitionDetections, ScoredLabel};

const TITLE: &str = "<h1>Image Analysis Results</h1>";

pub fn google_vision_html(analysis: &GoogleVisionAnalysis) -> String {
    let mut html = vec![TITLE.to_string()];

    push_scored_section(&mut html, "Detected Labels", &analysis.labels);
    push_scored_section(&mut html, "Detected Objects", &analysis.objects);

    if !analysis.texts.is_empty() {
        html.push("<h2>Detected Texts</h2>".to_string());
        html.push("<ul>".to_string());
        for text in &analysis.texts {
            html.push(format!("<li>{}</li>", escape_html(text)));
        }
        html.push("</ul>".to_string());
    }

    if !analysis.faces.is_empty() {
        html.push("<h2>Detected Faces and Emotions</h2>".to_string());
        for (index, face) in analysis.faces.iter().enumerate() {
            html.push(format!("<h3>Face {}</h3>", index + 1));
            html.push("<ul>".to_string());
            for (emotion, likelihood) in face.entries() {
                html.push(format!("<li>{}: {}</li>", emotion, escape_html(likelihood)));
            }
            html.push("</ul>".to_string());
        }
    }

    html.join("\n")
}

pub fn astica_html(analysis: &AsticaAnalysis) -> String {
    let mut html = vec![TITLE.to_string()];

    if let Some(description) = analysis
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        html.push("<h2>Description</h2>".to_string());
        html.push(format!("<p>{}</p>", escape_html(description)));
    }

    push_scored_section(&mut html, "Detected Objects", &analysis.objects);

    if let Some(moderation) = analysis.moderation {
        html.push("<h2>Moderate</h2>".to_string());
        html.push("<ul>".to_string());
        html.push(format!(
            "<li>Is adult content?: {}</li>",
            title_case_bool(moderation.is_adult_content)
        ));
        html.push(format!(
            "<li>Is racy content?: {}</li>",
            title_case_bool(moderation.is_racy_content)
        ));
        html.push(format!(
            "<li>Is gory content?: {}</li>",
            title_case_bool(moderation.is_gory_content)
        ));
        html.push("</ul>".to_string());
    }

    if !analysis.faces.is_empty() {
        html.push("<h2>Detected Faces and Emotions</h2>".to_string());
        for face in &analysis.faces {
            html.push("<h3>Face</h3>".to_string());
            html.push("<ul>".to_string());
            if let Some(age) = face.age {
                html.push(format!("<li>Age: {}</li>", age));
            }
            if let Some(gender) = face.gender.as_deref() {
                html.push(format!("<li>Gender: {}</li>", escape_html(gender)));
            }
            html.push("</ul>".to_string());
        }
    }

    html.join("\n")
}

/// Plain sentence used for Rekognition, which only yields label and text lists.
pub fn rekognition_description(detections: &RekognitionDetections) -> String {
    let mut description = String::from("This image contains: ");
    if !detections.labels.is_empty() {
        description.push_str(&detections.labels.join(", "));
    }
    if !detections.texts.is_empty() {
        description.push_str(" and the following text: ");
        description.push_str(&detections.texts.join(", "));
    }
    description
}

fn push_scored_section(html: &mut Vec<String>, heading: &str, items: &[ScoredLabel]) {
    if items.is_empty() {
        return;
    }
    html.push(format!("<h2>{}</h2>", heading));
    html.push("<ul>".to_string());
    for item in items {
        html.push(format!(
            "<li>{}: {:.2}% confidence</li>",
            escape_html(&item.name),
            item.confidence
        ));
    }
    html.push("</ul>".to_string());
}

fn title_case_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
