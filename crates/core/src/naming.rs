use crate::options::NamingOptions;
use std::path::Path;

/// A computed file name and the numbering cursor to use for the next file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFile {
    pub name: String,
    pub cursor: u64,
}

/// Derives the exported file name for `original_path`.
///
/// Name layout: `{prefix}{base}{suffix}[_{numbering}]{.ext}` where `base` is either the
/// template or the original stem. Existing numbering wins over generated numbering, and
/// only generated numbering advances the cursor. The cursor is wider than the
/// configured start index so a full batch never wraps or repeats a number.
pub fn compute_name(original_path: &Path, cursor: u64, options: &NamingOptions) -> NamedFile {
    let (stem, extension) = split_file_name(original_path);

    let mut name = String::new();
    name.push_str(options.prefix());
    if options.preserve_existing_name() {
        name.push_str(&stem);
    } else {
        name.push_str(options.template());
    }
    name.push_str(options.suffix());

    let existing = if options.preserve_existing_numbering() {
        extract_numbering(&stem)
    } else {
        None
    };

    let mut next_cursor = cursor;
    if let Some(numbering) = existing {
        name.push('_');
        name.push_str(numbering);
    } else if options.add_numbering() {
        name.push_str(&format!("_{:02}", cursor));
        next_cursor = cursor + 1;
    }

    name.push_str(&extension);

    NamedFile {
        name,
        cursor: next_cursor,
    }
}

/// Name a single file as if it were the first one of a processing pass.
pub fn preview_name(original_path: &Path, options: &NamingOptions) -> String {
    compute_name(
        original_path,
        u64::from(options.numbering_start_index()),
        options,
    )
    .name
}

/// Trailing run of ASCII digits in `stem`, verbatim.
pub fn extract_numbering(stem: &str) -> Option<&str> {
    let digits = stem
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    Some(&stem[stem.len() - digits..])
}

pub(crate) fn file_stem(path: &Path) -> String {
    split_file_name(path).0
}

/// Splits a file name at its last dot. A leading dot counts, so `.gitignore`
/// is all extension; a trailing dot alone is not an extension.
fn split_file_name(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => (name[..dot].to_string(), name[dot..].to_string()),
        Some(dot) => (name[..dot].to_string(), String::new()),
        None => (name, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_with_template(template: &str) -> NamingOptions {
        let mut options = NamingOptions::default();
        options.set_template(template).expect("valid template");
        options
    }

    #[test]
    fn extract_numbering_takes_trailing_digits_only() {
        assert_eq!(extract_numbering("IMG_0012"), Some("0012"));
        assert_eq!(extract_numbering("frame-7"), Some("7"));
        assert_eq!(extract_numbering("shot42"), Some("42"));
        assert_eq!(extract_numbering("v2_final"), None);
        assert_eq!(extract_numbering(""), None);
        assert_eq!(extract_numbering("Текстура_003"), Some("003"));
    }

    #[test]
    fn generated_numbering_is_zero_padded_and_advances() {
        let options = options_with_template("Tex");
        let first = compute_name(Path::new("/in/a.png"), 0, &options);
        assert_eq!(first.name, "Tex_00.png");
        assert_eq!(first.cursor, 1);

        let wide = compute_name(Path::new("/in/b.png"), 123, &options);
        assert_eq!(wide.name, "Tex_123.png");
        assert_eq!(wide.cursor, 124);
    }

    #[test]
    fn existing_numbering_wins_and_keeps_cursor() {
        let mut options = options_with_template("Tex");
        options.set_preserve_existing_numbering(true);

        let named = compute_name(Path::new("/in/rock_007.png"), 5, &options);
        assert_eq!(named.name, "Tex_007.png");
        assert_eq!(named.cursor, 5);

        let fallback = compute_name(Path::new("/in/rock.png"), 5, &options);
        assert_eq!(fallback.name, "Tex_05.png");
        assert_eq!(fallback.cursor, 6);
    }

    #[test]
    fn numbering_can_be_disabled() {
        let mut options = options_with_template("Tex");
        options.set_add_numbering(false);
        let named = compute_name(Path::new("/in/a.png"), 3, &options);
        assert_eq!(named.name, "Tex.png");
        assert_eq!(named.cursor, 3);
    }

    #[test]
    fn prefix_suffix_and_preserved_name_compose() {
        let mut options = options_with_template("Tex");
        options.set_prefix("T_").expect("valid prefix");
        options.set_suffix("_D").expect("valid suffix");
        options.set_preserve_existing_name(true);

        let named = compute_name(Path::new("/in/Rock.png"), 1, &options);
        assert_eq!(named.name, "T_Rock_D_01.png");
    }

    #[test]
    fn extension_is_preserved_verbatim() {
        let options = options_with_template("Mesh");
        assert_eq!(
            compute_name(Path::new("/in/model.FBX"), 0, &options).name,
            "Mesh_00.FBX"
        );
        assert_eq!(
            compute_name(Path::new("/in/archive.tar.gz"), 0, &options).name,
            "Mesh_00.gz"
        );
        assert_eq!(
            compute_name(Path::new("/in/README"), 0, &options).name,
            "Mesh_00"
        );
        assert_eq!(
            compute_name(Path::new("/in/.gitignore"), 0, &options).name,
            "Mesh_00.gitignore"
        );
        assert_eq!(
            compute_name(Path::new("/in/trailing."), 0, &options).name,
            "Mesh_00"
        );
    }

    #[test]
    fn dotfile_stem_is_empty_when_name_is_preserved() {
        let mut options = options_with_template("Tex");
        options.set_preserve_existing_name(true);
        options.set_add_numbering(false);
        let named = compute_name(Path::new("/in/.env"), 0, &options);
        assert_eq!(named.name, ".env");
    }

    #[test]
    fn numbering_continues_past_start_index_range() {
        let options = options_with_template("Tex");
        let first = compute_name(Path::new("/in/a.png"), u64::from(u32::MAX), &options);
        let second = compute_name(Path::new("/in/b.png"), first.cursor, &options);
        assert_eq!(first.name, "Tex_4294967295.png");
        assert_eq!(second.name, "Tex_4294967296.png");
        assert_ne!(first.name, second.name);
    }

    #[test]
    fn preview_starts_at_configured_index() {
        let mut options = options_with_template("Tex");
        options.set_numbering_start_index(9);
        assert_eq!(preview_name(Path::new("/in/a.jpg"), &options), "Tex_09.jpg");
    }
}
