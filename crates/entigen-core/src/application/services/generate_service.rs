//! Generate Service - main application orchestrator.
//!
//! Coordinates one generation run:
//! 1. Parse the sample text into JSON
//! 2. Infer schemas and render files (pure, in the domain)
//! 3. Write every file into its layer's folder through the `Filesystem` port
//!
//! `run_interactive` drives the same steps from a `Prompter`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Prompter},
    },
    domain::{
        Emitter, GeneratedFiles, Inferencer, Layer, SchemaRegistry, naming::canonical_root_name,
    },
    error::EntigenResult,
};

/// Destination folders, one per layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub entity_dir: PathBuf,
    pub model_dir: PathBuf,
}

impl OutputDirs {
    pub fn new(entity_dir: impl Into<PathBuf>, model_dir: impl Into<PathBuf>) -> Self {
        Self {
            entity_dir: entity_dir.into(),
            model_dir: model_dir.into(),
        }
    }

    /// Both layers into the same folder.
    pub fn single(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(dir.clone(), dir)
    }

    pub fn dir_for(&self, layer: Layer) -> &Path {
        match layer {
            Layer::Entity => &self.entity_dir,
            Layer::Model => &self.model_dir,
        }
    }
}

/// Outcome of a write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    /// Class names that were inferred more than once; the last shape won.
    pub collisions: Vec<String>,
}

/// Main generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    inferencer: Inferencer,
    emitter: Emitter,
}

impl GenerateService {
    pub fn new(filesystem: Box<dyn Filesystem>, inferencer: Inferencer, emitter: Emitter) -> Self {
        Self {
            filesystem,
            inferencer,
            emitter,
        }
    }

    /// Parse sample text. Parsing happens before any inference.
    pub fn parse_sample(text: &str) -> EntigenResult<Value> {
        serde_json::from_str(text).map_err(|e| {
            ApplicationError::InvalidJson {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Run inference only.
    pub fn infer(&self, class_name: &str, sample: &Value) -> EntigenResult<SchemaRegistry> {
        Ok(self.inferencer.infer(class_name, sample)?)
    }

    /// Infer and render without touching the filesystem.
    ///
    /// Import prefixes are the emitter's own; [`GenerateService::generate`]
    /// derives unset ones from the output folders.
    pub fn plan(&self, class_name: &str, sample: &Value) -> EntigenResult<GeneratedFiles> {
        let registry = self.inferencer.infer(class_name, sample)?;
        self.render(class_name, &registry, &self.emitter)
    }

    /// Plan and write in one go.
    #[instrument(skip_all, fields(class = %class_name))]
    pub fn generate(
        &self,
        class_name: &str,
        sample: &Value,
        dirs: &OutputDirs,
    ) -> EntigenResult<GenerationReport> {
        let registry = self.inferencer.infer(class_name, sample)?;
        self.render_and_write(class_name, &registry, dirs)
    }

    /// Write each file into the folder of its layer, overwriting.
    #[instrument(
        skip_all,
        fields(
            files = files.len(),
            entity_dir = %dirs.entity_dir.display(),
            model_dir = %dirs.model_dir.display()
        )
    )]
    pub fn write(&self, files: GeneratedFiles, dirs: &OutputDirs) -> EntigenResult<GenerationReport> {
        let mut report = GenerationReport::default();

        for layer in [Layer::Entity, Layer::Model] {
            if files.in_layer(layer).next().is_some() {
                self.filesystem.create_dir_all(dirs.dir_for(layer))?;
            }
        }

        for file in files {
            let path = dirs.dir_for(file.layer).join(file.file_name());
            if self.filesystem.exists(&path) {
                debug!(path = %path.display(), "overwriting existing file");
            }
            self.filesystem.write_file(&path, &file.content)?;
            report.written.push(path);
        }

        info!(written = report.written.len(), "files written");
        Ok(report)
    }

    /// Prompt-driven run: class name, JSON, entity folder, model folder.
    ///
    /// The sample is parsed and inferred before any folder is asked for, so
    /// a bad sample never leads to a folder prompt. Rendering waits for the
    /// folders so imports match where the files land.
    #[instrument(skip_all)]
    pub fn run_interactive(&self, prompter: &dyn Prompter) -> EntigenResult<GenerationReport> {
        let class_name = required(
            prompter.ask_string("Class name", "Enter the main class name (e.g., UserEntity)")?,
            "class name",
        )?;
        let text = required(
            prompter.ask_string("JSON sample", "Paste the JSON data to generate classes from")?,
            "JSON sample",
        )?;

        let sample = Self::parse_sample(&text)?;
        let registry = self.inferencer.infer(&class_name, &sample)?;

        let entity_dir = prompter
            .pick_directory("Select folder for the entity files")?
            .ok_or(ApplicationError::Cancelled {
                step: "entity folder",
            })?;
        let model_dir = prompter
            .pick_directory("Select folder for the model files")?
            .ok_or(ApplicationError::Cancelled {
                step: "model folder",
            })?;

        self.render_and_write(&class_name, &registry, &OutputDirs::new(entity_dir, model_dir))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn render_and_write(
        &self,
        class_name: &str,
        registry: &SchemaRegistry,
        dirs: &OutputDirs,
    ) -> EntigenResult<GenerationReport> {
        let emitter = self.emitter.for_folders(&dirs.entity_dir, &dirs.model_dir);
        let files = self.render(class_name, registry, &emitter)?;
        let mut report = self.write(files, dirs)?;
        report.collisions = registry.collisions().to_vec();
        Ok(report)
    }

    fn render(
        &self,
        class_name: &str,
        registry: &SchemaRegistry,
        emitter: &Emitter,
    ) -> EntigenResult<GeneratedFiles> {
        let root = canonical_root_name(class_name, self.inferencer.convention())?;
        let files = emitter.render(&root, registry)?;

        if !registry.collisions().is_empty() {
            warn!(
                collisions = ?registry.collisions(),
                "some nested classes share a name; only the last shape of each was kept"
            );
        }
        info!(
            root = %root,
            schemas = registry.len(),
            files = files.len(),
            "generation planned"
        );
        Ok(files)
    }
}

fn required(answer: Option<String>, step: &'static str) -> EntigenResult<String> {
    match answer {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ApplicationError::Cancelled { step }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{MockFilesystem, MockPrompter},
        domain::DomainError,
        error::EntigenError,
    };
    use mockall::{Sequence, predicate::eq};
    use serde_json::json;

    fn service(fs: MockFilesystem) -> GenerateService {
        GenerateService::new(Box::new(fs), Inferencer::default(), Emitter::default())
    }

    fn permissive_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    #[test]
    fn parse_sample_reports_invalid_json() {
        let err = GenerateService::parse_sample("{\"a\": ").unwrap_err();
        assert!(matches!(
            err,
            EntigenError::Application(ApplicationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn plan_does_not_touch_the_filesystem() {
        // No expectations: any call would panic.
        let svc = service(MockFilesystem::new());
        let files = svc.plan("User", &json!({"address": {"city": "x"}})).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn generate_writes_each_layer_to_its_folder() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all()
            .with(eq(Path::new("/out/entities")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all()
            .with(eq(Path::new("/out/models")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file()
            .with(eq(Path::new("/out/entities/address_entity.dart")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("/out/entities/user_entity.dart")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(
                eq(Path::new("/out/models/user_model.dart")),
                mockall::predicate::function(|content: &str| content.contains("class UserModel")),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let dirs = OutputDirs::new("/out/entities", "/out/models");
        let report = service(fs)
            .generate("UserEntity", &json!({"address": {"city": "NYC"}}), &dirs)
            .unwrap();

        assert_eq!(report.written.len(), 3);
        assert!(report.collisions.is_empty());
    }

    #[test]
    fn generate_reports_collisions() {
        let report = service(permissive_fs())
            .generate(
                "Response",
                &json!({"data": {"meta": {"data": {"page": 1}}}}),
                &OutputDirs::single("/out"),
            )
            .unwrap();
        assert_eq!(report.collisions, ["DataEntity"]);
    }

    #[test]
    fn non_object_sample_fails_before_writing() {
        let err = service(MockFilesystem::new())
            .generate("User", &json!([1, 2]), &OutputDirs::single("/out"))
            .unwrap_err();
        assert_eq!(
            err,
            EntigenError::Domain(DomainError::InvalidInputKind { found: "array" })
        );
    }

    #[test]
    fn write_failure_is_propagated() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });

        let err = service(fs)
            .generate("User", &json!({"id": 1}), &OutputDirs::single("/out"))
            .unwrap_err();
        assert!(matches!(
            err,
            EntigenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn interactive_flow_asks_in_order() {
        let mut seq = Sequence::new();
        let mut prompter = MockPrompter::new();
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "Class name")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Some("User".into())));
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "JSON sample")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Some(r#"{"uuid": "abc"}"#.into())));
        prompter
            .expect_pick_directory()
            .withf(|label| label.contains("entity"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(PathBuf::from("/e"))));
        prompter
            .expect_pick_directory()
            .withf(|label| label.contains("model"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(PathBuf::from("/m"))));

        let report = service(permissive_fs()).run_interactive(&prompter).unwrap();
        assert_eq!(
            report.written,
            [PathBuf::from("/e/user_entity.dart"), PathBuf::from("/m/user_model.dart")]
        );
    }

    #[test]
    fn interactive_imports_follow_picked_folders() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "Class name")
            .returning(|_, _| Ok(Some("User".into())));
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "JSON sample")
            .returning(|_, _| Ok(Some(r#"{"id": 1}"#.into())));
        prompter
            .expect_pick_directory()
            .withf(|label| label.contains("entity"))
            .returning(|_| Ok(Some(PathBuf::from("lib/a/entities"))));
        prompter
            .expect_pick_directory()
            .withf(|label| label.contains("model"))
            .returning(|_| Ok(Some(PathBuf::from("lib/b/models"))));

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file()
            .with(
                eq(Path::new("lib/b/models/user_model.dart")),
                mockall::predicate::function(|content: &str| {
                    content.contains("import '../../a/entities/user_entity.dart';")
                }),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(
                eq(Path::new("lib/a/entities/user_entity.dart")),
                mockall::predicate::function(|content: &str| {
                    content.contains("import '../../b/models/user_model.dart';")
                }),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let report = service(fs).run_interactive(&prompter).unwrap();
        assert_eq!(report.written.len(), 2);
    }

    #[test]
    fn interactive_empty_class_name_cancels() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_ask_string()
            .times(1)
            .returning(|_, _| Ok(Some("   ".into())));

        let err = service(MockFilesystem::new())
            .run_interactive(&prompter)
            .unwrap_err();
        assert_eq!(
            err,
            EntigenError::Application(ApplicationError::Cancelled { step: "class name" })
        );
    }

    #[test]
    fn interactive_invalid_json_stops_before_folders() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "Class name")
            .returning(|_, _| Ok(Some("User".into())));
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "JSON sample")
            .returning(|_, _| Ok(Some("not json".into())));
        prompter.expect_pick_directory().never();

        let err = service(MockFilesystem::new())
            .run_interactive(&prompter)
            .unwrap_err();
        assert!(matches!(
            err,
            EntigenError::Application(ApplicationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn interactive_dismissed_folder_cancels() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "Class name")
            .returning(|_, _| Ok(Some("User".into())));
        prompter
            .expect_ask_string()
            .withf(|prompt, _| prompt == "JSON sample")
            .returning(|_, _| Ok(Some("{}".into())));
        prompter.expect_pick_directory().returning(|_| Ok(None));

        let err = service(MockFilesystem::new())
            .run_interactive(&prompter)
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
