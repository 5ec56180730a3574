use std::fmt;

use crate::markup::{walk, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    CSharp,
    VbNet,
    Cpp,
}

impl Language {
    /// Classify from the `class` attribute of a `<code>` element.
    pub fn from_class(class: &str) -> Self {
        if class.contains("vbnet") {
            Language::VbNet
        } else if class.contains("cpp") {
            Language::Cpp
        } else {
            Language::CSharp
        }
    }

    pub fn fence_tag(self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::VbNet => "vbnet",
            Language::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fence_tag())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub language: Language,
    pub code: String,
}

/// One "Syntax" card with its declarations in every language variant.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxBlock {
    pub snippets: Vec<Snippet>,
}

impl SyntaxBlock {
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("## Syntax\n\n");
        for s in &self.snippets {
            md.push_str(&format!("```{}\n{}\n```\n\n", s.language, s.code));
        }
        md
    }
}

/// Every syntax section under `root`, in document order. Sections without
/// a single non-empty snippet are left out.
pub fn extract(root: &Element) -> Vec<SyntaxBlock> {
    walk::find_all(root, &|e| e.has_class("card-title") && e.text().contains("Syntax"))
        .into_iter()
        .filter_map(|title| {
            let card = walk::find_ancestor(root, title, &|e| e.has_class("card"))?;
            let snippets: Vec<Snippet> = walk::find_all(card, &|e| e.has_class("code-snippet"))
                .into_iter()
                .filter_map(snippet)
                .collect();
            if snippets.is_empty() {
                None
            } else {
                Some(SyntaxBlock { snippets })
            }
        })
        .collect()
}

fn snippet(container: &Element) -> Option<Snippet> {
    let code_el = walk::find(container, &|e| e.is("code"))?;
    // whitespace inside code is significant; only outer blank lines go
    let raw = code_el.text();
    let code = raw.trim_start_matches(|c: char| c == '\n' || c == '\r').trim_end();
    if code.trim().is_empty() {
        return None;
    }
    Some(Snippet {
        language: Language::from_class(code_el.attr("class").unwrap_or("")),
        code: code.to_string(),
    })
}
