//! Integration tests for the end-to-end pipeline.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use newsprint::error::Result;
use newsprint::service::Prompt;
use newsprint::{
    ContentType, Error, MediaType, MessagesApi, Pipeline, PipelineOptions, ServiceStructurer,
    Structurer, Table, TextRecognizer, TextSource, VisionRecognizer,
};

const STRUCTURED_REPLY: &str = r#"```json
{
  "metadata": {"newspaper_name": "El Martillo", "date": "1916-08-05", "issue_number": 1609, "location": "Chiclayo, Perú"},
  "content": [
    {"headline": "EL PERIODISMO DEPARTAMENTAL", "section": "Main article", "type": "article", "author": "F. A. Herrera", "text_excerpt": "En ninguna otra sección"},
    {"headline": "RÓMULO MENCHOLA", "section": "Advertisements", "type": "advertisement", "author": null, "text_excerpt": "VENDEDOR Y COBRADOR"}
  ]
}
```"#;

/// Mock messages API answering by token budget: transcriptions get page
/// text, structuring requests get a document.
struct MockApi {
    structure_reply: String,
    prompts: Mutex<Vec<u32>>,
}

impl MockApi {
    fn new(structure_reply: &str) -> Self {
        Self {
            structure_reply: structure_reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl MessagesApi for MockApi {
    fn complete(&self, prompt: &Prompt) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.max_tokens);
        if prompt.max_tokens == newsprint::acquire::TRANSCRIBE_MAX_TOKENS {
            Ok("PERIÓDICO EL MARTILLO\nEdición No. 1609".to_string())
        } else {
            Ok(self.structure_reply.clone())
        }
    }
}

/// Recognizer counting its calls.
struct CountingRecognizer {
    calls: AtomicUsize,
}

impl TextRecognizer for CountingRecognizer {
    fn recognize(&self, _image: &[u8], _media_type: MediaType) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("Artículo reconocido con texto suficiente\n==========\nMáquinas SINGER al contado".to_string())
    }
}

fn write_png(path: &Path) {
    std::fs::write(path, b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR").unwrap();
}

#[test]
fn test_sample_run_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions::new()
        .with_image(dir.path().join("page_01.png"))
        .with_output_dir(dir.path());

    let report = Pipeline::new(options.clone(), Structurer::heuristic())
        .run()
        .unwrap();

    assert_eq!(report.source, TextSource::Sample);
    assert_eq!(report.structurer, "heuristic");
    assert_eq!(report.record_count(), 9);
    assert_eq!(
        report.type_counts,
        vec![(ContentType::Article, 8), (ContentType::Advertisement, 1)]
    );

    let transcript = std::fs::read_to_string(options.transcript_path()).unwrap();
    assert!(transcript.contains("FULL EXTRACTED TEXT - EL MARTILLO (Edition 1609)"));
    assert!(transcript.contains("PERIÓDICO EL MARTILLO"));

    let table = Table::read_csv(options.csv_path()).unwrap();
    assert_eq!(table.len(), 9);

    for name in [
        "visualization_content_distribution.png",
        "visualization_text_lengths.png",
        "visualization_statistics.png",
    ] {
        let bytes = std::fs::read(dir.path().join(name)).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", name);
    }
}

#[test]
fn test_image_without_credential_fails_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("page_01.png");
    write_png(&image);
    let out = dir.path().join("out");

    let options = PipelineOptions::new().with_image(&image).with_output_dir(&out);
    let err = Pipeline::from_config(options.clone(), None)
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, Error::MissingCredential(_)));
    assert!(!options.transcript_path().exists());
    assert!(!options.json_path().exists());
}

#[test]
fn test_image_with_recognizer() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("page_01.png");
    write_png(&image);

    let recognizer = Arc::new(CountingRecognizer {
        calls: AtomicUsize::new(0),
    });
    let options = PipelineOptions::new().with_image(&image).with_output_dir(dir.path());
    let report = Pipeline::new(options, Structurer::heuristic())
        .with_recognizer(recognizer.clone())
        .run()
        .unwrap();

    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.source, TextSource::Image(image));
    assert_eq!(report.record_count(), 2);
}

#[test]
fn test_service_path_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("page_01.png");
    write_png(&image);

    let api = Arc::new(MockApi::new(STRUCTURED_REPLY));
    let options = PipelineOptions::new().with_image(&image).with_output_dir(dir.path());
    let report = Pipeline::new(
        options.clone(),
        Structurer::Service(ServiceStructurer::new(api.clone())),
    )
    .with_recognizer(Arc::new(VisionRecognizer::new(api.clone())))
    .run()
    .unwrap();

    assert_eq!(*api.prompts.lock().unwrap(), vec![4096, 8000]);
    assert_eq!(report.structurer, "service");
    assert_eq!(report.record_count(), 2);
    assert_eq!(report.document.content[1].author, "");

    let json = std::fs::read_to_string(options.json_path()).unwrap();
    assert!(json.contains("RÓMULO MENCHOLA"));
}

#[test]
fn test_structuring_failure_aborts_before_json() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions::new()
        .with_image(dir.path().join("missing.png"))
        .with_output_dir(dir.path());

    let api = Arc::new(MockApi::new("I could not find any JSON here."));
    let err = Pipeline::new(
        options.clone(),
        Structurer::Service(ServiceStructurer::new(api)),
    )
    .run()
    .unwrap_err();

    assert!(matches!(err, Error::Json(_)));
    assert!(options.transcript_path().exists());
    assert!(!options.json_path().exists());
    assert!(!options.csv_path().exists());
    assert!(!dir.path().join("visualization_statistics.png").exists());
}

#[test]
fn test_empty_service_document_stops_at_charts() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions::new()
        .with_image(dir.path().join("missing.png"))
        .with_output_dir(dir.path());

    let api = Arc::new(MockApi::new(r#"{"metadata": {}, "content": []}"#));
    let err = Pipeline::new(
        options.clone(),
        Structurer::Service(ServiceStructurer::new(api)),
    )
    .run()
    .unwrap_err();

    assert!(matches!(err, Error::EmptyTable));
    assert!(options.csv_path().exists());
}
