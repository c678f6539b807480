//! Summary artifact format.
//!
//! Every section, in declaration order, is written as a banner line, a blank
//! line, its newline-joined body and a `---` separator. The same layout is
//! used for the segmented and preprocessed inspection artifacts.

use casebrief_core::Section;
use casebrief_ingest::{clean_sections, Sections};

use crate::types::SummaryMap;

const RULE: &str = "========================================";
const SEPARATOR: &str = "\n\n---\n\n";

/// Banner line for a section, without the trailing blank line.
pub fn banner(section: Section) -> String {
    format!("{RULE} Section: {} {RULE}", section.banner_name())
}

/// Render any section → lines mapping in the banner layout.
pub fn render_sections<'a, I, L>(sections: I) -> String
where
    I: IntoIterator<Item = (Section, L)>,
    L: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for (section, lines) in sections {
        out.push_str(&banner(section));
        out.push_str("\n\n");
        let body: Vec<&str> = lines.into_iter().collect();
        out.push_str(&body.join("\n"));
        out.push_str(SEPARATOR);
    }
    out
}

/// Serialize a summary. Empty sections still get their banner.
pub fn assemble(summary: &SummaryMap) -> String {
    render_sections(
        summary
            .iter()
            .map(|(section, sentences)| (section, sentences.iter().map(String::as_str))),
    )
}

/// Render the cleaned token lines of every non-title section, one space-joined
/// line per sentence. Title is not cleaned and has no block.
pub fn render_preprocessed(sections: &Sections) -> String {
    let cleaned: Vec<(Section, Vec<String>)> = clean_sections(sections)
        .into_iter()
        .map(|(section, sentences)| {
            (section, sentences.iter().map(|tokens| tokens.join(" ")).collect())
        })
        .collect();
    render_sections(
        cleaned
            .iter()
            .map(|(section, lines)| (*section, lines.iter().map(String::as_str))),
    )
}

/// Read an artifact back into a summary map.
///
/// A section whose banner is absent comes back empty.
pub fn parse(artifact: &str) -> SummaryMap {
    let mut summary = SummaryMap::default();
    for section in Section::ALL {
        let header = format!("{}\n\n", banner(section));
        let Some(start) = artifact.find(&header) else {
            continue;
        };
        let rest = &artifact[start + header.len()..];
        let body = match rest.find(SEPARATOR) {
            Some(end) => &rest[..end],
            None => rest.trim_end(),
        };
        let sentences = body
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        summary.set(section, sentences);
    }
    summary
}
