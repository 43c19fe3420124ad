//! End-to-end processing of one page: text, structure, tables, charts.

use crate::acquire::{AcquiredText, TextAcquirer, TextRecognizer, TextSource, VisionRecognizer};
use crate::error::Result;
use crate::export::{self, transcript_title, Table};
use crate::model::{ContentType, StructuredDocument};
use crate::render::{ChartRenderer, ChartStyle};
use crate::service::{AnthropicClient, ServiceConfig};
use crate::structure::{SegmenterRules, ServiceStructurer, Structurer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default page image.
pub const DEFAULT_IMAGE_PATH: &str = "data/el_martillo/page_01.png";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data/el_martillo";

/// Transcript file name.
pub const TRANSCRIPT_FILE: &str = "texto_completo_extraido.txt";

/// Suffix of the structured JSON file, after the page's file stem.
pub const JSON_SUFFIX: &str = "_structured.json";

/// Suffix of the CSV table file, after the page's file stem.
pub const CSV_SUFFIX: &str = "_structured.csv";

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Page image to transcribe
    pub image_path: PathBuf,

    /// Directory receiving every output file
    pub output_dir: PathBuf,

    /// Rules for the offline segmenter and the default page identity
    pub rules: SegmenterRules,

    /// Chart styling; the subtitle is replaced by the page caption
    pub chart_style: ChartStyle,

    /// Transcript banner title (derived from the page identity when unset)
    pub transcript_title: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            rules: SegmenterRules::default(),
            chart_style: ChartStyle::default(),
            transcript_title: None,
        }
    }
}

impl PipelineOptions {
    /// Create options with the default paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page image path.
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = path.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the segmenter rules.
    pub fn with_rules(mut self, rules: SegmenterRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the chart style.
    pub fn with_chart_style(mut self, style: ChartStyle) -> Self {
        self.chart_style = style;
        self
    }

    /// Set the transcript banner title.
    pub fn with_transcript_title(mut self, title: impl Into<String>) -> Self {
        self.transcript_title = Some(title.into());
        self
    }

    pub fn transcript_path(&self) -> PathBuf {
        self.output_dir.join(TRANSCRIPT_FILE)
    }

    /// `<stem>_structured.json`, named after the page identity in the rules.
    pub fn json_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", self.rules.identity.file_stem(), JSON_SUFFIX))
    }

    /// `<stem>_structured.csv`, named after the page identity in the rules.
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", self.rules.identity.file_stem(), CSV_SUFFIX))
    }
}

/// Pipeline stage, reported to the progress callback before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquire,
    Structure,
    Export,
    Charts,
}

impl Stage {
    /// Number of stages in a run.
    pub const COUNT: u64 = 4;

    /// Short description for progress output.
    pub fn describe(&self) -> &'static str {
        match self {
            Stage::Acquire => "Extracting text...",
            Stage::Structure => "Structuring content...",
            Stage::Export => "Writing JSON and CSV...",
            Stage::Charts => "Rendering charts...",
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Where the text came from
    pub source: TextSource,

    /// Strategy that structured the text
    pub structurer: &'static str,

    /// The structured page
    pub document: StructuredDocument,

    /// Records per type, in order of first appearance
    pub type_counts: Vec<(ContentType, usize)>,

    pub transcript_path: PathBuf,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub chart_paths: Vec<PathBuf>,
}

impl PipelineReport {
    /// Number of records produced.
    pub fn record_count(&self) -> usize {
        self.document.len()
    }

    /// Every file written, in order of creation.
    pub fn artifacts(&self) -> Vec<&Path> {
        let mut paths = vec![
            self.transcript_path.as_path(),
            self.json_path.as_path(),
            self.csv_path.as_path(),
        ];
        paths.extend(self.chart_paths.iter().map(PathBuf::as_path));
        paths
    }
}

type ProgressFn = dyn Fn(Stage) + Send + Sync;

/// Sequences acquisition, structuring, export and chart rendering.
///
/// # Example
///
/// ```no_run
/// use newsprint::{Pipeline, PipelineOptions, Structurer};
///
/// let report = Pipeline::new(PipelineOptions::default(), Structurer::heuristic()).run()?;
/// println!("{} records", report.record_count());
/// # Ok::<(), newsprint::Error>(())
/// ```
pub struct Pipeline {
    options: PipelineOptions,
    structurer: Structurer,
    acquirer: TextAcquirer,
    progress: Option<Box<ProgressFn>>,
}

impl Pipeline {
    /// Create a pipeline without a recognizer.
    pub fn new(options: PipelineOptions, structurer: Structurer) -> Self {
        Self {
            options,
            structurer,
            acquirer: TextAcquirer::new(),
            progress: None,
        }
    }

    /// Wire a pipeline to the messages service when a configuration is given.
    ///
    /// With a configuration both transcription and structuring use the
    /// service; without one, text comes from the demonstration sample (or
    /// fails for an existing image) and is structured offline.
    pub fn from_config(options: PipelineOptions, config: Option<ServiceConfig>) -> Result<Self> {
        match config {
            Some(config) => {
                log::info!("Using the messages service ({})", config.model);
                let client = Arc::new(AnthropicClient::new(config)?);
                let structurer = Structurer::Service(ServiceStructurer::new(client.clone()));
                Ok(Self::new(options, structurer)
                    .with_recognizer(Arc::new(VisionRecognizer::new(client))))
            }
            None => {
                let structurer = Structurer::from_credential(None, options.rules.clone())?;
                Ok(Self::new(options, structurer))
            }
        }
    }

    /// Attach a recognizer for existing page images.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.acquirer = self.acquirer.with_recognizer(recognizer);
        self
    }

    /// Call `progress` as each stage begins.
    pub fn with_progress(mut self, progress: impl Fn(Stage) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn structurer(&self) -> &Structurer {
        &self.structurer
    }

    /// Run every stage.
    ///
    /// A structuring failure stops the run after the transcript is written,
    /// before any JSON, CSV or chart output.
    pub fn run(&self) -> Result<PipelineReport> {
        let options = &self.options;
        std::fs::create_dir_all(&options.output_dir)?;

        self.report(Stage::Acquire);
        let acquired = self.acquirer.acquire(&options.image_path)?;
        let transcript_path = options.transcript_path();
        self.write_transcript(&transcript_path, &acquired)?;

        self.report(Stage::Structure);
        let document = self.structurer.structure(&acquired.text)?;
        log::info!(
            "{} structurer produced {} records",
            self.structurer.name(),
            document.len()
        );

        self.report(Stage::Export);
        let json_path = options.json_path();
        export::write_json(&json_path, &document)?;
        let table = Table::from_document(&document);
        let csv_path = options.csv_path();
        export::write_csv(&csv_path, &table)?;

        self.report(Stage::Charts);
        let style = options
            .chart_style
            .clone()
            .with_subtitle(document.metadata.caption());
        let chart_paths = ChartRenderer::new(style).render_all(&table, &options.output_dir)?;

        Ok(PipelineReport {
            source: acquired.source,
            structurer: self.structurer.name(),
            type_counts: table.type_counts(),
            document,
            transcript_path,
            json_path,
            csv_path,
            chart_paths,
        })
    }

    fn write_transcript(&self, path: &Path, acquired: &AcquiredText) -> Result<()> {
        let title = self
            .options
            .transcript_title
            .clone()
            .unwrap_or_else(|| transcript_title(&self.options.rules.identity));
        export::write_transcript(path, &acquired.text, &title)
    }

    fn report(&self, stage: Stage) {
        log::debug!("Stage {:?}", stage);
        if let Some(progress) = &self.progress {
            progress(stage);
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("structurer", &self.structurer.name())
            .field("acquirer", &self.acquirer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageMetadata;
    use std::sync::Mutex;

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert_eq!(options.image_path, PathBuf::from("data/el_martillo/page_01.png"));
        assert_eq!(
            options.csv_path(),
            PathBuf::from("data/el_martillo/el_martillo_1609_structured.csv")
        );
        assert_eq!(
            options.json_path().file_name().unwrap(),
            "el_martillo_1609_structured.json"
        );
        assert_eq!(options.transcript_path().file_name().unwrap(), "texto_completo_extraido.txt");
    }

    #[test]
    fn test_output_names_follow_identity() {
        let identity = PageMetadata::new("La Industria", None, Some(7), "Chiclayo, Perú");
        let options = PipelineOptions::new()
            .with_output_dir("out")
            .with_rules(SegmenterRules::default().with_identity(identity));
        assert_eq!(options.json_path(), PathBuf::from("out/la_industria_7_structured.json"));
        assert_eq!(options.csv_path(), PathBuf::from("out/la_industria_7_structured.csv"));
    }

    #[test]
    fn test_run_reports_stages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let options = PipelineOptions::new()
            .with_image(dir.path().join("missing.png"))
            .with_output_dir(dir.path().join("out"));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let report = Pipeline::new(options, Structurer::heuristic())
            .with_progress(move |stage| sink.lock().unwrap().push(stage))
            .run()
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Stage::Acquire, Stage::Structure, Stage::Export, Stage::Charts]
        );
        assert_eq!(report.source, TextSource::Sample);
        assert_eq!(report.artifacts().len(), 6);
        for path in report.artifacts() {
            assert!(path.exists(), "{} missing", path.display());
        }
    }

    #[test]
    fn test_from_config_without_credential() {
        let pipeline = Pipeline::from_config(PipelineOptions::default(), None).unwrap();
        assert_eq!(pipeline.structurer().name(), "heuristic");
    }
}
