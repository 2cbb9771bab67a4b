use crate::naming::file_stem;
use crate::sanitize::{find_disallowed_char, has_invalid_ending, is_windows_reserved};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_TEMPLATE: &str = "ImageName_Template";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Template,
    Prefix,
    Suffix,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NameField::Template => "file name template",
            NameField::Prefix => "name prefix",
            NameField::Suffix => "name suffix",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("{field} contains a character that is not allowed in file names: {ch:?}")]
    IllegalCharacter { field: NameField, ch: char },
    #[error("file name template is empty")]
    EmptyTemplate,
    #[error("file name template must not end with a dot or a space: {0:?}")]
    InvalidTemplateEnding(String),
    #[error("file name template is a reserved device name: {0:?}")]
    ReservedTemplate(String),
    #[error("numbering start index must be a non-negative integer: {0:?}")]
    InvalidNumberingIndex(String),
}

/// Naming and export switches for one rename session.
///
/// Setters return whether the stored value changed. Validated setters leave the
/// previous value in place when they return an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOptions {
    template: String,
    prefix: String,
    suffix: String,
    preserve_existing_name: bool,
    preserve_existing_numbering: bool,
    add_numbering: bool,
    numbering_start_index: u32,
    sort_ascending: bool,
    overwrite_files: bool,
    create_sub_folder: bool,
    open_export_folder: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            prefix: String::new(),
            suffix: String::new(),
            preserve_existing_name: false,
            preserve_existing_numbering: false,
            add_numbering: true,
            numbering_start_index: 0,
            sort_ascending: true,
            overwrite_files: false,
            create_sub_folder: false,
            open_export_folder: false,
        }
    }
}

impl NamingOptions {
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn preserve_existing_name(&self) -> bool {
        self.preserve_existing_name
    }

    pub fn preserve_existing_numbering(&self) -> bool {
        self.preserve_existing_numbering
    }

    pub fn add_numbering(&self) -> bool {
        self.add_numbering
    }

    pub fn numbering_start_index(&self) -> u32 {
        self.numbering_start_index
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    pub fn overwrite_files(&self) -> bool {
        self.overwrite_files
    }

    pub fn create_sub_folder(&self) -> bool {
        self.create_sub_folder
    }

    pub fn open_export_folder(&self) -> bool {
        self.open_export_folder
    }

    /// The template also names the export subfolder, so it must be a usable
    /// folder name on its own.
    pub fn set_template(&mut self, value: &str) -> Result<bool, OptionsError> {
        validate_template(value)?;
        Ok(replace_string(&mut self.template, value))
    }

    /// Uses the file name (without extension) of `path` as the template.
    pub fn set_template_from_file(&mut self, path: &Path) -> Result<bool, OptionsError> {
        self.set_template(&file_stem(path))
    }

    pub fn set_prefix(&mut self, value: &str) -> Result<bool, OptionsError> {
        validate_name_part(NameField::Prefix, value)?;
        Ok(replace_string(&mut self.prefix, value))
    }

    pub fn set_suffix(&mut self, value: &str) -> Result<bool, OptionsError> {
        validate_name_part(NameField::Suffix, value)?;
        Ok(replace_string(&mut self.suffix, value))
    }

    pub fn set_preserve_existing_name(&mut self, value: bool) -> bool {
        replace(&mut self.preserve_existing_name, value)
    }

    pub fn set_preserve_existing_numbering(&mut self, value: bool) -> bool {
        replace(&mut self.preserve_existing_numbering, value)
    }

    pub fn set_add_numbering(&mut self, value: bool) -> bool {
        replace(&mut self.add_numbering, value)
    }

    pub fn set_numbering_start_index(&mut self, value: u32) -> bool {
        replace(&mut self.numbering_start_index, value)
    }

    /// Parses text input from a front end. Anything other than a non-negative
    /// integer is rejected and the current index is kept.
    pub fn set_numbering_start_index_str(&mut self, value: &str) -> Result<bool, OptionsError> {
        let parsed = value
            .trim()
            .parse::<u32>()
            .map_err(|_| OptionsError::InvalidNumberingIndex(value.to_string()))?;
        Ok(self.set_numbering_start_index(parsed))
    }

    pub fn set_sort_ascending(&mut self, value: bool) -> bool {
        replace(&mut self.sort_ascending, value)
    }

    pub fn set_overwrite_files(&mut self, value: bool) -> bool {
        replace(&mut self.overwrite_files, value)
    }

    pub fn set_create_sub_folder(&mut self, value: bool) -> bool {
        replace(&mut self.create_sub_folder, value)
    }

    pub fn set_open_export_folder(&mut self, value: bool) -> bool {
        replace(&mut self.open_export_folder, value)
    }

    /// Re-checks fields that bypassed the setters, e.g. after deserializing.
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_template(&self.template)?;
        validate_name_part(NameField::Prefix, &self.prefix)?;
        validate_name_part(NameField::Suffix, &self.suffix)?;
        Ok(())
    }
}

fn validate_template(value: &str) -> Result<(), OptionsError> {
    if value.is_empty() {
        return Err(OptionsError::EmptyTemplate);
    }
    validate_name_part(NameField::Template, value)?;
    if has_invalid_ending(value) {
        return Err(OptionsError::InvalidTemplateEnding(value.to_string()));
    }
    if is_windows_reserved(value) {
        return Err(OptionsError::ReservedTemplate(value.to_string()));
    }
    Ok(())
}

fn validate_name_part(field: NameField, value: &str) -> Result<(), OptionsError> {
    match find_disallowed_char(value) {
        Some(ch) => Err(OptionsError::IllegalCharacter { field, ch }),
        None => Ok(()),
    }
}

fn replace_string(slot: &mut String, value: &str) -> bool {
    if slot == value {
        return false;
    }
    *slot = value.to_string();
    true
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_session() {
        let options = NamingOptions::default();
        assert_eq!(options.template(), DEFAULT_TEMPLATE);
        assert!(options.add_numbering());
        assert!(options.sort_ascending());
        assert!(!options.preserve_existing_numbering());
        assert!(!options.overwrite_files());
        assert_eq!(options.numbering_start_index(), 0);
    }

    #[test]
    fn set_template_reports_change_only_once() {
        let mut options = NamingOptions::default();
        assert_eq!(options.set_template("Tex"), Ok(true));
        assert_eq!(options.set_template("Tex"), Ok(false));
        assert_eq!(options.template(), "Tex");
    }

    #[test]
    fn illegal_template_keeps_previous_value() {
        let mut options = NamingOptions::default();
        options.set_template("Valid").expect("valid template");

        for invalid in ["Invalid<\"?\">Template", "Another|Invalid*Template", "More/Invalid\\Chars"] {
            let err = options.set_template(invalid).expect_err("must be rejected");
            assert!(matches!(
                err,
                OptionsError::IllegalCharacter {
                    field: NameField::Template,
                    ..
                }
            ));
            assert_eq!(options.template(), "Valid");
        }
    }

    #[test]
    fn empty_template_is_rejected() {
        let mut options = NamingOptions::default();
        assert_eq!(options.set_template(""), Err(OptionsError::EmptyTemplate));
        assert_eq!(options.template(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn folder_relative_templates_are_rejected() {
        let mut options = NamingOptions::default();
        options.set_template("Tex").expect("valid template");

        for invalid in ["..", ".", "Tex.", "Tex "] {
            assert_eq!(
                options.set_template(invalid),
                Err(OptionsError::InvalidTemplateEnding(invalid.to_string()))
            );
            assert_eq!(options.template(), "Tex");
        }
    }

    #[test]
    fn reserved_device_names_are_rejected_as_template() {
        let mut options = NamingOptions::default();
        options.set_template("Tex").expect("valid template");

        for invalid in ["CON", "nul", "Lpt1"] {
            assert_eq!(
                options.set_template(invalid),
                Err(OptionsError::ReservedTemplate(invalid.to_string()))
            );
            assert_eq!(options.template(), "Tex");
        }
        assert_eq!(options.set_template("CONSOLE"), Ok(true));
    }

    #[test]
    fn prefix_and_suffix_may_be_cleared_but_not_illegal() {
        let mut options = NamingOptions::default();
        assert_eq!(options.set_prefix("pre_"), Ok(true));
        assert_eq!(options.set_prefix(""), Ok(true));
        assert!(options.set_suffix("a:b").is_err());
        assert_eq!(options.suffix(), "");
    }

    #[test]
    fn numbering_index_text_must_be_non_negative_integer() {
        let mut options = NamingOptions::default();
        assert_eq!(options.set_numbering_start_index_str(" 12 "), Ok(true));
        assert_eq!(options.numbering_start_index(), 12);

        for invalid in ["-1", "abc", "", "1.5"] {
            assert_eq!(
                options.set_numbering_start_index_str(invalid),
                Err(OptionsError::InvalidNumberingIndex(invalid.to_string()))
            );
            assert_eq!(options.numbering_start_index(), 12);
        }
    }

    #[test]
    fn template_from_file_uses_stem() {
        let mut options = NamingOptions::default();
        options
            .set_template_from_file(Path::new("/assets/Rock_Albedo.png"))
            .expect("stem is a valid template");
        assert_eq!(options.template(), "Rock_Albedo");
    }

    #[test]
    fn validate_catches_deserialized_garbage() {
        let options: NamingOptions =
            toml::from_str("template = \"bad|name\"").expect("must deserialize");
        assert!(options.validate().is_err());

        let options: NamingOptions = toml::from_str("template = \"..\"").expect("must deserialize");
        assert_eq!(
            options.validate(),
            Err(OptionsError::InvalidTemplateEnding("..".to_string()))
        );

        let options: NamingOptions = toml::from_str("prefix = \"ok_\"").expect("must deserialize");
        assert!(options.validate().is_ok());
        assert_eq!(options.template(), DEFAULT_TEMPLATE);
    }
}
