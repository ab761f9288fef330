use sightline::application::services::result_normalizer::{
    astica_html, escape_html, google_vision_html, rekognition_description,
};
use sightline::domain::{
    AsticaAnalysis, FaceDemographics, FaceEmotions, GoogleVisionAnalysis, Moderation,
    RekognitionDetections, ScoredLabel,
};

#[test]
fn given_two_labels_only_when_rendering_google_then_single_labels_section() {
    let analysis = GoogleVisionAnalysis {
        labels: vec![ScoredLabel::new("Cat", 98.0), ScoredLabel::new("Pet", 91.0)],
        ..Default::default()
    };

    let html = google_vision_html(&analysis);

    assert_eq!(html.matches("<h2>").count(), 1);
    assert_eq!(html.matches("<h2>Detected Labels</h2>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 2);
    assert!(html.contains("<li>Cat: 98.00% confidence</li>"));
    assert!(html.contains("<li>Pet: 91.00% confidence</li>"));
}

#[test]
fn given_no_faces_when_rendering_google_then_omits_faces_section() {
    let analysis = GoogleVisionAnalysis {
        objects: vec![ScoredLabel::new("Car", 75.5)],
        texts: vec!["STOP".into()],
        ..Default::default()
    };

    let html = google_vision_html(&analysis);

    assert!(html.contains("<h2>Detected Objects</h2>"));
    assert!(html.contains("<h2>Detected Texts</h2>"));
    assert!(!html.contains("Faces"));
    assert!(!html.contains("Detected Labels"));
}

#[test]
fn given_faces_when_rendering_google_then_numbers_each_face() {
    let face = FaceEmotions {
        joy: "VERY_LIKELY".into(),
        sorrow: "VERY_UNLIKELY".into(),
        anger: "UNLIKELY".into(),
        surprise: "POSSIBLE".into(),
    };
    let analysis = GoogleVisionAnalysis {
        faces: vec![face.clone(), face],
        ..Default::default()
    };

    let html = google_vision_html(&analysis);

    assert!(html.contains("<h2>Detected Faces and Emotions</h2>"));
    assert!(html.contains("<h3>Face 1</h3>"));
    assert!(html.contains("<h3>Face 2</h3>"));
    assert!(html.contains("<li>Joy: VERY_LIKELY</li>"));
    assert!(html.contains("<li>Surprise: POSSIBLE</li>"));
}

#[test]
fn given_empty_analysis_when_rendering_google_then_only_title_remains() {
    let html = google_vision_html(&GoogleVisionAnalysis::default());

    assert_eq!(html, "<h1>Image Analysis Results</h1>");
}

#[test]
fn given_full_astica_result_when_rendering_then_includes_every_section() {
    let analysis = AsticaAnalysis {
        description: Some("A person walking a dog".into()),
        objects: vec![ScoredLabel::new("dog", 87.25)],
        moderation: Some(Moderation {
            is_adult_content: false,
            is_racy_content: false,
            is_gory_content: true,
        }),
        faces: vec![FaceDemographics {
            age: Some(34),
            gender: Some("Female".into()),
        }],
    };

    let html = astica_html(&analysis);

    assert!(html.contains("<h2>Description</h2>\n<p>A person walking a dog</p>"));
    assert!(html.contains("<li>dog: 87.25% confidence</li>"));
    assert!(html.contains("<li>Is adult content?: False</li>"));
    assert!(html.contains("<li>Is gory content?: True</li>"));
    assert!(html.contains("<h3>Face</h3>"));
    assert!(html.contains("<li>Age: 34</li>"));
    assert!(html.contains("<li>Gender: Female</li>"));
}

#[test]
fn given_astica_without_moderation_or_faces_when_rendering_then_omits_them() {
    let analysis = AsticaAnalysis {
        description: Some("An empty street".into()),
        ..Default::default()
    };

    let html = astica_html(&analysis);

    assert!(!html.contains("Moderate"));
    assert!(!html.contains("Faces"));
    assert!(!html.contains("Detected Objects"));
}

#[test]
fn given_labels_and_text_when_describing_rekognition_then_joins_both() {
    let detections = RekognitionDetections {
        labels: vec!["Car".into(), "Road".into()],
        texts: vec!["STOP".into()],
    };

    assert_eq!(
        rekognition_description(&detections),
        "This image contains: Car, Road and the following text: STOP"
    );
}

#[test]
fn given_markup_in_provider_text_when_escaping_then_neutralises_it() {
    assert_eq!(
        escape_html(r#"<script>"x" & 'y'</script>"#),
        "&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"
    );
}
