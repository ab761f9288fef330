//! Structured results from the backends that do not answer in free text.

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLabel {
    pub name: String,
    /// Already expressed as a percentage.
    pub confidence: f64,
}

impl ScoredLabel {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceEmotions {
    pub joy: String,
    pub sorrow: String,
    pub anger: String,
    pub surprise: String,
}

impl FaceEmotions {
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("Joy", self.joy.as_str()),
            ("Sorrow", self.sorrow.as_str()),
            ("Anger", self.anger.as_str()),
            ("Surprise", self.surprise.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoogleVisionAnalysis {
    pub labels: Vec<ScoredLabel>,
    pub objects: Vec<ScoredLabel>,
    pub texts: Vec<String>,
    pub faces: Vec<FaceEmotions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moderation {
    pub is_adult_content: bool,
    pub is_racy_content: bool,
    pub is_gory_content: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceDemographics {
    pub age: Option<u32>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsticaAnalysis {
    pub description: Option<String>,
    pub objects: Vec<ScoredLabel>,
    pub moderation: Option<Moderation>,
    pub faces: Vec<FaceDemographics>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RekognitionDetections {
    pub labels: Vec<String>,
    pub texts: Vec<String>,
}
