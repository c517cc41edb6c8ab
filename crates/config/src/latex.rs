use serde::{Deserialize, Serialize};

/// Settings for the LaTeX output backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatexElements {
    pub papersize: String,
    pub figure_align: String,
    /// Passed through to `\documentclass` as extra options
    pub extraclassoptions: String,
}

impl Default for LatexElements {
    fn default() -> Self {
        Self {
            papersize: "a4paper".into(),
            figure_align: "htbp".into(),
            // Chapters may start on any page, not just odd ones
            extraclassoptions: "openany".into(),
        }
    }
}

/// One generated LaTeX document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatexDocument {
    /// Name of the document the output starts from, without suffix
    pub start_doc: String,
    /// Output file name
    pub target_name: String,
    pub title: String,
    pub author: String,
    /// LaTeX document class, e.g. `manual` or `howto`
    pub document_class: String,
}

impl LatexDocument {
    /// The plugin manual, rooted at the index page
    pub fn manual() -> Self {
        Self {
            start_doc: "index".into(),
            target_name: "yamcs-maven-plugin.tex".into(),
            title: "Yamcs Maven Plugin".into(),
            author: "Space Applications Services".into(),
            document_class: "manual".into(),
        }
    }
}
