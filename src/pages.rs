use std::path::Path;

use crate::{
    emojis::EmojiParser,
    model::{Status, ViewItem, ViewModel},
};

pub const PAGE_TITLE: &str = "Search an image or meme";
pub const PLACEHOLDER_COUNT: usize = 8;

const TEMPLATE: &str = include_str!("../assets/templates/template.html");

pub struct PageRenderer {
    emojis: Option<EmojiParser>,
}

impl PageRenderer {
    /// Emoji are inlined from `<assets>/emoji` when that directory exists.
    pub fn new(assets: &Path) -> Self {
        let emoji_directory = assets.join("emoji");
        let emojis = EmojiParser::new(&emoji_directory)
            .inspect_err(|error| {
                log::warn!(
                    "emoji inlining disabled, {}: {error}",
                    emoji_directory.display()
                )
            })
            .ok();

        Self { emojis }
    }

    pub fn without_emojis() -> Self {
        Self { emojis: None }
    }

    pub fn render(&self, view_model: &ViewModel) -> String {
        let content = match view_model.status {
            Status::EmptySearch => self.info("Start searching...", "☝️", "point up emoji"),
            Status::NoResults => self.info("Ooops, no results", "😢", "crying emoji"),
            Status::ResultsFound => results(&view_model.items),
        };

        page(PAGE_TITLE, &view_model.search_term, &content)
    }

    pub fn render_upstream_failure(&self, search_term: &str) -> String {
        let content = self.info(
            "Search is unavailable right now, try again in a moment",
            "😢",
            "crying emoji",
        );

        page(PAGE_TITLE, search_term, &content)
    }

    pub fn render_not_found(&self) -> String {
        let content = self.info("Nothing lives here", "😢", "crying emoji");

        page("Not found", "", &content)
    }

    fn info(&self, message: &str, emoji: &str, label: &str) -> String {
        let emoji = match &self.emojis {
            Some(parser) => parser.inline(emoji),
            None => emoji.to_owned(),
        };

        format!(
            "<p class=\"info\">{} <span role=\"img\" aria-label=\"{label}\">{emoji}</span></p>",
            escape_html(message)
        )
    }
}

fn results(items: &[ViewItem]) -> String {
    let tiles = items
        .iter()
        .map(|ViewItem { id, name, image, url }| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\" class=\"placeholder\" data-id=\"{}\"><img src=\"{}\" alt=\"{}\" /></a>",
                escape_html(url),
                escape_html(id),
                escape_html(image),
                escape_html(name),
            )
        })
        .collect::<String>();

    format!("<div class=\"results\">{tiles}</div>")
}

fn loading_placeholders() -> String {
    let tiles = "<div class=\"placeholder\"></div>".repeat(PLACEHOLDER_COUNT);
    format!("<template id=\"loading\"><div class=\"results\">{tiles}</div></template>")
}

fn page(title: &str, search_term: &str, content: &str) -> String {
    let html = format!(
        "<div class=\"container\">\
         <form method=\"get\" action=\"/\" class=\"search-form\">\
         <input value=\"{}\" placeholder=\"Search a image or meme...\" autocomplete=\"off\" name=\"search\" type=\"search\" />\
         <button type=\"submit\">Search</button>\
         </form>\
         <div id=\"content\">{content}</div>\
         {}\
         </div>",
        escape_html(search_term),
        loading_placeholders(),
    );

    TEMPLATE
        .replace("{{title}}", &escape_html(title))
        .replace("{{html}}", &html)
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ViewItem {
        ViewItem {
            id: id.into(),
            name: format!("Meme {id}"),
            image: format!("http://x/{id}.png"),
            url: format!("http://x/{id}"),
        }
    }

    #[test]
    fn empty_search_prompts_for_input() {
        let html = PageRenderer::without_emojis().render(&ViewModel::empty_search());

        assert!(html.contains("Start searching... <span role=\"img\" aria-label=\"point up emoji\">☝️</span>"));
        assert!(html.contains("value=\"\""));
        assert!(html.contains("<title>Search an image or meme</title>"));
    }

    #[test]
    fn no_results_keeps_the_term_in_the_form() {
        let html = PageRenderer::without_emojis().render(&ViewModel::no_results("zzz"));

        assert!(html.contains("Ooops, no results"));
        assert!(html.contains("value=\"zzz\""));
    }

    #[test]
    fn results_link_out_in_order() {
        let view_model = ViewModel::results_found("cat", vec![item("1"), item("2")]);

        let html = PageRenderer::without_emojis().render(&view_model);

        let first = html.find("<img src=\"http://x/1.png\" alt=\"Meme 1\" />").unwrap();
        let second = html.find("<img src=\"http://x/2.png\" alt=\"Meme 2\" />").unwrap();
        assert!(first < second);
        assert!(html.contains("<a href=\"http://x/1\" target=\"_blank\" rel=\"noreferrer\""));
        assert!(!html.contains("class=\"info\""));
    }

    #[test]
    fn loading_template_has_eight_tiles() {
        let html = PageRenderer::without_emojis().render(&ViewModel::empty_search());

        assert_eq!(html.matches("<div class=\"placeholder\"></div>").count(), 8);
    }

    #[test]
    fn untrusted_text_is_escaped() {
        let mut evil = item("1");
        evil.name = "\"><script>alert(1)</script>".into();
        let view_model = ViewModel::results_found("<b>&", vec![evil]);

        let html = PageRenderer::without_emojis().render(&view_model);

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("value=\"&lt;b&gt;&amp;\""));
        assert!(html.contains("alt=\"&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;\""));
    }

    #[test]
    fn emoji_are_inlined_only_in_messages() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::create_dir(directory.path().join("emoji")).unwrap();
        std::fs::write(
            directory.path().join("emoji/1f622.svg"),
            "<svg viewBox=\"0 0 36 36\"></svg>",
        )
        .unwrap();

        let renderer = PageRenderer::new(directory.path());
        let html = renderer.render(&ViewModel::no_results("😢"));

        assert!(html.contains("aria-label=\"crying emoji\"><svg class=\"emoji\""));
        assert!(html.contains("value=\"😢\""));
    }

    #[test]
    fn upstream_failure_says_so() {
        let html = PageRenderer::without_emojis().render_upstream_failure("cat");

        assert!(html.contains("Search is unavailable right now"));
        assert!(html.contains("value=\"cat\""));
    }
}
