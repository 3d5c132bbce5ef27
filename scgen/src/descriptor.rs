use std::fmt;

use serde::{Deserialize, Deserializer};

pub const DEFAULT_RECORD_KIND: &str = "SC.Record.attr";

/// A single model, ready to be rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ModelDescriptor {
    pub app_label: String,
    pub model_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub meta_options: Vec<MetaOption>,
}

impl ModelDescriptor {
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        ModelDescriptor {
            app_label: app_label.into(),
            model_name: model_name.into(),
            fields: Vec::new(),
            meta_options: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn meta(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta_options.push(MetaOption {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_comments")]
    pub comments: String,
    #[serde(default = "default_record_kind")]
    pub record_kind: String,
    pub js_type: String,
    #[serde(default)]
    pub attributes: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, js_type: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            comments: String::new(),
            record_kind: default_record_kind(),
            js_type: js_type.into(),
            attributes: String::new(),
        }
    }

    pub fn record_kind(mut self, record_kind: impl Into<String>) -> Self {
        self.record_kind = record_kind.into();
        self
    }

    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    /// Sets the comments, separating paragraphs with a blank line.
    pub fn comments<I, S>(mut self, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.comments = join_paragraphs(paragraphs);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MetaOption {
    pub name: String,
    pub value: String,
}

impl fmt::Display for MetaOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

fn default_record_kind() -> String {
    DEFAULT_RECORD_KIND.to_string()
}

fn join_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paragraphs
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn deserialize_comments<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Comments {
        Text(String),
        Paragraphs(Vec<String>),
    }

    Ok(match Comments::deserialize(deserializer)? {
        Comments::Text(text) => text,
        Comments::Paragraphs(paragraphs) => join_paragraphs(paragraphs),
    })
}
