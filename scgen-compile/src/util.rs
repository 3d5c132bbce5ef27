use heck::SnakeCase;
use lazy_static::lazy_static;
use regex::Regex;

pub const GENERATED_DIR: &str = "_generated";
pub const CORE_FILE: &str = "core.js";
pub const BUILDFILE: &str = "Buildfile";
const FILE_EXTENSION: &str = ".js";

lazy_static! {
    static ref WORD_SEPARATOR: Regex = Regex::new("[^A-Za-z0-9]+").unwrap();
}

/// Returns true if `s` can be used as a script identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Returns true if `s` is a dotted path of identifiers, such as `Core.Blog`.
pub fn is_namespace(s: &str) -> bool {
    s.split('.').all(is_identifier)
}

/// Converts `send_email` to `SendEmail`, dropping any non-alphanumeric characters.
///
/// Only the first letter of each word is changed, so `URLAlias` stays as is.
pub fn camelize(s: &str) -> String {
    WORD_SEPARATOR
        .split(s)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts `BlogPost` to `blog_post`.
pub fn underscore(s: &str) -> String {
    s.to_snake_case()
}

/// Stem shared by the generated file and the subclass of a model.
pub fn file_stem(model_name: &str) -> String {
    underscore(model_name)
}

pub fn file_name(model_name: &str) -> String {
    format!("{}{}", file_stem(model_name), FILE_EXTENSION)
}

/// Path of the generated file, relative to the app directory.
pub fn generated_path(model_name: &str) -> String {
    format!("{}/{}", GENERATED_DIR, file_name(model_name))
}
