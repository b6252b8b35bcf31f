//! Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use granite_regulate::adapters::asana::{TaskReceipt, TaskTracker};
use granite_regulate::adapters::speech::{
    SpeechAlternative, SpeechRecognition, SpeechResult, Transcriber,
};
use granite_regulate::adapters::watsonx::ViolationAnalyzer;
use granite_regulate::domain::ServiceError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Single-page PDF with one line of Helvetica text
pub fn make_test_pdf(text: &str) -> Vec<u8> {
    use lopdf::dictionary;
    use lopdf::{Document, Object, Stream};

    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    });

    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        page.set("Parent", pages_id);
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Transcriber returning a fixed transcript and remembering the staged file
#[derive(Default)]
pub struct FakeTranscriber {
    pub transcript: Option<String>,
    pub fail: bool,
    pub staged: Mutex<Vec<(PathBuf, String)>>,
}

impl FakeTranscriber {
    pub fn saying(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.staged
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(
        &self,
        audio: &Path,
        content_type: &str,
    ) -> Result<SpeechRecognition, ServiceError> {
        assert!(audio.exists(), "audio must be staged before transcription");
        self.staged
            .lock()
            .unwrap()
            .push((audio.to_path_buf(), content_type.to_string()));

        if self.fail {
            return Err(ServiceError::ServerError {
                status: 503,
                message: "speech service unavailable".to_string(),
            });
        }

        Ok(SpeechRecognition {
            results: self
                .transcript
                .iter()
                .map(|t| SpeechResult {
                    alternatives: vec![SpeechAlternative {
                        transcript: t.clone(),
                        confidence: Some(0.93),
                    }],
                    is_final: true,
                })
                .collect(),
        })
    }
}

/// Analyzer with a canned answer that records what it was asked
pub struct FakeAnalyzer {
    pub answer: String,
    pub seen: Mutex<Vec<String>>,
}

impl FakeAnalyzer {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ViolationAnalyzer for FakeAnalyzer {
    async fn analyze(&self, text: &str) -> Result<String, ServiceError> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.answer.clone())
    }
}

/// Task tracker that records tasks, optionally failing every call
#[derive(Default)]
pub struct FakeTracker {
    pub fail: bool,
    pub tasks: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TaskTracker for FakeTracker {
    async fn create_task(&self, name: &str, notes: &str) -> Result<TaskReceipt, ServiceError> {
        self.tasks
            .lock()
            .unwrap()
            .push((name.to_string(), notes.to_string()));
        if self.fail {
            return Err(ServiceError::AuthenticationFailed("bad token".to_string()));
        }
        Ok(TaskReceipt {
            gid: "1209".to_string(),
        })
    }
}
