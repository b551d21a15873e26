use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use serde::Serialize;
use tera::{Context, Tera};

use crate::guide::{CityGuide, Description, Topic};

pub const DEFAULT_CITY: &str = "Rio de Janeiro";

const PAGE_TEMPLATE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/page.html"));
const PAGE: &str = "page.html";

/// Renders model output written in markdown. Raw HTML from the model is shown
/// as text, never interpreted, and link or image targets outside
/// http(s)/mailto are emptied.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(tag) => Event::Start(sanitize_tag(tag)),
        Event::End(tag) => Event::End(sanitize_tag(tag)),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn sanitize_tag(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link(kind, dest, title) => Tag::Link(kind, safe_destination(dest), title),
        Tag::Image(kind, dest, title) => Tag::Image(kind, safe_destination(dest), title),
        other => other,
    }
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_destination(&dest) {
        dest
    } else {
        CowStr::Borrowed("")
    }
}

/// Relative targets are allowed; absolute ones only with an http(s) or mailto scheme.
/// Whitespace and control characters are ignored, as browsers do when parsing schemes.
fn is_safe_destination(dest: &str) -> bool {
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match cleaned.find([':', '/', '?', '#']) {
        Some(idx) if cleaned[idx..].starts_with(':') => {
            let scheme = cleaned[..idx].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}

#[derive(Serialize)]
struct TopicOption {
    label: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct GuideView {
    city: String,
    description_html: Option<String>,
    description_error: Option<String>,
    best_season_html: Option<String>,
    dishes_html: Option<String>,
    failure: Option<String>,
}

impl From<&CityGuide> for GuideView {
    fn from(guide: &CityGuide) -> Self {
        let (description_html, description_error) = match &guide.description {
            Description::Text(text) => (Some(markdown_to_html(text)), None),
            Description::Failed(error) => (None, Some(error.clone())),
        };

        Self {
            city: guide.city.clone(),
            description_html,
            description_error,
            best_season_html: guide.best_season.as_deref().map(markdown_to_html),
            dishes_html: guide.dishes.as_deref().map(markdown_to_html),
            failure: guide.failure.clone(),
        }
    }
}

#[derive(Serialize)]
struct PageView<'a> {
    city: &'a str,
    topics: Vec<TopicOption>,
    guide: Option<GuideView>,
}

impl<'a> PageView<'a> {
    fn new(city: &'a str, selected: Topic, guide: Option<GuideView>) -> Self {
        Self {
            city,
            topics: Topic::ALL
                .into_iter()
                .map(|topic| TopicOption {
                    label: topic.label(),
                    selected: topic == selected,
                })
                .collect(),
            guide,
        }
    }
}

pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE, PAGE_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// The empty form.
    pub fn form(&self, city: &str, topic: Topic) -> Result<String, tera::Error> {
        self.render(&PageView::new(city, topic, None))
    }

    /// The form followed by the generated guide.
    pub fn guide(&self, guide: &CityGuide) -> Result<String, tera::Error> {
        self.render(&PageView::new(
            &guide.city,
            guide.topic,
            Some(GuideView::from(guide)),
        ))
    }

    fn render(&self, view: &PageView<'_>) -> Result<String, tera::Error> {
        self.tera.render(PAGE, &Context::from_serialize(view)?)
    }
}
