use std::{
    fs::{read_dir, read_to_string},
    io::{Error, Result},
    path::Path,
};

use aho_corasick::{AhoCorasick, MatchKind};

/// Swaps emoji for inline SVG, using files named after their code points
/// (e.g. `1f622.svg`, `261d-fe0f.svg`).
pub struct EmojiParser {
    svg_tags: Vec<String>,
    aho_corasick: AhoCorasick,
}

impl EmojiParser {
    pub fn new(svg_directory: &Path) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut svg_tags = Vec::new();

        for entry in read_dir(svg_directory)? {
            let path = entry?.path();
            let Some(character_pattern) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(".svg"))
                .and_then(code_points_to_string)
            else {
                continue;
            };

            match read_to_string(&path) {
                Ok(svg) => {
                    svg_tags.push(svg_tag(&character_pattern, &svg));
                    patterns.push(character_pattern);
                }
                Err(error) => log::warn!("skipping emoji {}: {error}", path.display()),
            }
        }

        log::debug!("loaded {} emoji from {}", patterns.len(), svg_directory.display());

        Ok(Self {
            svg_tags,
            aho_corasick: AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostLongest)
                .build(&patterns)
                .map_err(Error::other)?,
        })
    }

    pub fn inline(&self, haystack: &str) -> String {
        let mut inlined_content = String::with_capacity(haystack.len());
        self.aho_corasick.replace_all_with(
            haystack,
            &mut inlined_content,
            |found, _, destination| {
                destination.push_str(&self.svg_tags[found.pattern().as_usize()]);
                true
            },
        );
        inlined_content
    }
}

fn code_points_to_string(stem: &str) -> Option<String> {
    stem.split('-')
        .map(|code_point| {
            u32::from_str_radix(code_point, 16)
                .ok()
                .and_then(char::from_u32)
        })
        .collect()
}

fn svg_tag(emoji: &str, svg: &str) -> String {
    let body = svg
        .lines()
        .filter(|line| {
            let line_trim = line.trim_start();
            !line_trim.starts_with("<?xml") && !line_trim.starts_with("<!--")
        })
        .collect::<Vec<_>>()
        .join("\n");

    match body.trim_start().strip_prefix("<svg") {
        Some(rest) => format!(
            "<svg class=\"emoji\" draggable=\"false\" style=\"height: 1em; width: 1em; margin: 0 .05em 0 .1em; vertical-align: -0.1em;\" alt=\"{emoji}\"{rest}"
        ),
        // Not an svg document, keep the plain character.
        None => emoji.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;

    const CRYING: &str = "<?xml version=\"1.0\"?>\n<svg viewBox=\"0 0 36 36\"><circle r=\"18\"/></svg>";

    #[test]
    fn inlines_known_emoji() {
        let directory = tempfile::tempdir().unwrap();
        write(directory.path().join("1f622.svg"), CRYING).unwrap();

        let parser = EmojiParser::new(directory.path()).unwrap();
        let inlined = parser.inline("Ooops, no results 😢");

        assert!(inlined.starts_with("Ooops, no results <svg class=\"emoji\""));
        assert!(inlined.contains("alt=\"😢\" viewBox=\"0 0 36 36\""));
        assert!(!inlined.contains("<?xml"));
    }

    #[test]
    fn prefers_the_longest_sequence() {
        let directory = tempfile::tempdir().unwrap();
        write(directory.path().join("261d.svg"), "<svg id=\"bare\"></svg>").unwrap();
        write(directory.path().join("261d-fe0f.svg"), "<svg id=\"full\"></svg>").unwrap();

        let parser = EmojiParser::new(directory.path()).unwrap();

        assert!(parser.inline("☝️").contains("id=\"full\""));
        assert!(parser.inline("☝").contains("id=\"bare\""));
    }

    #[test]
    fn leaves_unknown_emoji_and_other_files_alone() {
        let directory = tempfile::tempdir().unwrap();
        write(directory.path().join("1f622.svg"), CRYING).unwrap();
        write(directory.path().join("README.md"), "not an emoji").unwrap();
        write(directory.path().join("zzzz.svg"), CRYING).unwrap();

        let parser = EmojiParser::new(directory.path()).unwrap();

        assert_eq!(parser.inline("Start searching... ☝️"), "Start searching... ☝️");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let directory = tempfile::tempdir().unwrap();

        assert!(EmojiParser::new(&directory.path().join("nowhere")).is_err());
    }
}
