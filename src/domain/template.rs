//! Template tree model
//!
//! A template is read into a list of [`TemplateEntry`] values and written back
//! out under a new root. The only transformation is the ignore-file rename.

/// Name of the ignore file as stored in templates (npm strips `.gitignore` on publish).
pub const PACKAGE_IGNORE: &str = ".npmignore";

/// Name the ignore file gets in the generated project.
pub const VCS_IGNORE: &str = ".gitignore";

/// One node of a template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    File { name: String, contents: String },
    Directory { name: String, children: Vec<TemplateEntry> },
}

impl TemplateEntry {
    pub fn file(name: impl Into<String>, contents: impl Into<String>) -> Self {
        TemplateEntry::File {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub fn dir(name: impl Into<String>, children: Vec<TemplateEntry>) -> Self {
        TemplateEntry::Directory {
            name: name.into(),
            children,
        }
    }

    /// Name as found in the template.
    pub fn name(&self) -> &str {
        match self {
            TemplateEntry::File { name, .. } | TemplateEntry::Directory { name, .. } => name,
        }
    }

    /// Name to use in the generated project.
    pub fn output_name(&self) -> &str {
        match self {
            TemplateEntry::File { name, .. } => output_file_name(name),
            TemplateEntry::Directory { name, .. } => name,
        }
    }

    /// Count of files in this subtree.
    pub fn file_count(&self) -> usize {
        match self {
            TemplateEntry::File { .. } => 1,
            TemplateEntry::Directory { children, .. } => {
                children.iter().map(TemplateEntry::file_count).sum()
            }
        }
    }
}

/// Build a tree from `/`-separated relative file paths and their contents.
///
/// Intermediate directories are implied by the paths; siblings are sorted by
/// name at every level.
pub fn tree_from_files<I>(files: I) -> Vec<TemplateEntry>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut root = Vec::new();
    for (path, contents) in files {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        insert(&mut root, &parts, contents);
    }
    sort_tree(&mut root);
    root
}

fn insert(entries: &mut Vec<TemplateEntry>, parts: &[&str], contents: String) {
    match parts {
        [] => {}
        [name] => entries.push(TemplateEntry::file(*name, contents)),
        [dir, rest @ ..] => {
            let existing = entries.iter().position(|e| {
                matches!(e, TemplateEntry::Directory { name, .. } if name.as_str() == *dir)
            });
            let index = match existing {
                Some(index) => index,
                None => {
                    entries.push(TemplateEntry::dir(*dir, Vec::new()));
                    entries.len() - 1
                }
            };
            if let TemplateEntry::Directory { children, .. } = &mut entries[index] {
                insert(children, rest, contents);
            }
        }
    }
}

fn sort_tree(entries: &mut [TemplateEntry]) {
    entries.sort_by(|a, b| a.name().cmp(b.name()));
    for entry in entries.iter_mut() {
        if let TemplateEntry::Directory { children, .. } = entry {
            sort_tree(children);
        }
    }
}

/// Apply the filename rewrite rule.
pub fn output_file_name(name: &str) -> &str {
    if name == PACKAGE_IGNORE {
        VCS_IGNORE
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_npmignore_when_output_name_then_gitignore() {
        let entry = TemplateEntry::file(".npmignore", "node_modules\n");
        assert_eq!(entry.output_name(), ".gitignore");
        assert_eq!(entry.name(), ".npmignore");
    }

    #[test]
    fn given_directory_named_npmignore_when_output_name_then_unchanged() {
        let entry = TemplateEntry::dir(".npmignore", vec![]);
        assert_eq!(entry.output_name(), ".npmignore");
    }

    #[test]
    fn given_similar_names_when_output_name_then_unchanged() {
        assert_eq!(output_file_name("npmignore"), "npmignore");
        assert_eq!(output_file_name(".npmignore.bak"), ".npmignore.bak");
        assert_eq!(output_file_name("app.js"), "app.js");
    }

    #[test]
    fn given_nested_tree_when_counting_then_counts_files_only() {
        let tree = TemplateEntry::dir(
            "root",
            vec![
                TemplateEntry::file("a", ""),
                TemplateEntry::dir("sub", vec![TemplateEntry::file("b", "")]),
                TemplateEntry::dir("empty", vec![]),
            ],
        );
        assert_eq!(tree.file_count(), 2);
    }

    #[test]
    fn given_flat_paths_when_building_tree_then_directories_nested_and_sorted() {
        let files = vec![
            ("router/routes.js".to_string(), "r".to_string()),
            ("app.js".to_string(), "a".to_string()),
            ("views/partials/head.html".to_string(), "h".to_string()),
            (".npmignore".to_string(), "n".to_string()),
            ("router/index.js".to_string(), "i".to_string()),
        ];

        let tree = tree_from_files(files);

        assert_eq!(
            tree,
            vec![
                TemplateEntry::file(".npmignore", "n"),
                TemplateEntry::file("app.js", "a"),
                TemplateEntry::dir(
                    "router",
                    vec![
                        TemplateEntry::file("index.js", "i"),
                        TemplateEntry::file("routes.js", "r"),
                    ]
                ),
                TemplateEntry::dir(
                    "views",
                    vec![TemplateEntry::dir(
                        "partials",
                        vec![TemplateEntry::file("head.html", "h")]
                    )]
                ),
            ]
        );
    }
}
