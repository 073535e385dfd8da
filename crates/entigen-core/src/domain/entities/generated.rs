use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Architecture layer a generated file belongs to.
///
/// The collaborator uses it to pick the output folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Entity,
    Model,
}

impl Layer {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    /// Filename stem, e.g. `user_entity`.
    pub identifier: String,
    pub class_name: String,
    pub layer: Layer,
    pub content: String,
}

impl RenderedFile {
    pub const EXTENSION: &'static str = "dart";

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.identifier, Self::EXTENSION)
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Output of one emitter run, keyed by file identifier.
///
/// Inserting an identifier that already exists overwrites the earlier file,
/// the same thing that would happen on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedFiles {
    files: IndexMap<String, RenderedFile>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Returns the file it replaced, if any.
    pub fn insert(&mut self, file: RenderedFile) -> Option<RenderedFile> {
        self.files.insert(file.identifier.clone(), file)
    }

    pub fn get(&self, identifier: &str) -> Option<&RenderedFile> {
        self.files.get(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedFile> {
        self.files.values()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn in_layer(&self, layer: Layer) -> impl Iterator<Item = &RenderedFile> {
        self.files.values().filter(move |f| f.layer == layer)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for GeneratedFiles {
    type Item = RenderedFile;
    type IntoIter = indexmap::map::IntoValues<String, RenderedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(identifier: &str, layer: Layer, content: &str) -> RenderedFile {
        RenderedFile {
            identifier: identifier.into(),
            class_name: "XEntity".into(),
            layer,
            content: content.into(),
        }
    }

    #[test]
    fn file_name_appends_extension() {
        assert_eq!(file("user_entity", Layer::Entity, "").file_name(), "user_entity.dart");
    }

    #[test]
    fn same_identifier_overwrites() {
        let mut files = GeneratedFiles::new();
        files.insert(file("data_entity", Layer::Entity, "first"));
        let replaced = files.insert(file("data_entity", Layer::Entity, "second"));

        assert_eq!(replaced.map(|f| f.content), Some("first".to_string()));
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("data_entity").unwrap().content, "second");
    }

    #[test]
    fn in_layer_filters() {
        let mut files = GeneratedFiles::new();
        files.insert(file("user_entity", Layer::Entity, ""));
        files.insert(file("user_model", Layer::Model, ""));
        files.insert(file("address_entity", Layer::Entity, ""));

        assert_eq!(files.in_layer(Layer::Entity).count(), 2);
        assert_eq!(files.in_layer(Layer::Model).count(), 1);
    }
}
