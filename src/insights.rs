use std::fmt;

use crate::models::PageSnapshot;

const MIN_WORD_COUNT: usize = 300;
const MIN_TITLE_CHARS: usize = 20;

/// One SEO recommendation. Variants are declared in the order the rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight {
    ThinContent,
    MissingHeading,
    MissingMetaDescription,
    MissingHttps,
    ShortTitle,
    Adequate,
}

impl Insight {
    pub fn message(self) -> &'static str {
        match self {
            Insight::ThinContent => {
                "Content is too thin. Add more paragraphs or explanation."
            }
            Insight::MissingHeading => {
                "No H1 (main heading) found. Add an H1 heading for SEO."
            }
            Insight::MissingMetaDescription => {
                "Meta description is missing. Add one to improve click-through rate."
            }
            Insight::MissingHttps => {
                "The site is not using HTTPS. Enable SSL for security and SEO."
            }
            Insight::ShortTitle => "Title is too short. Use a more descriptive title.",
            Insight::Adequate => {
                "Page structure is adequate. Focus on backlinks and content optimization."
            }
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub fn generate_insights(snapshot: &PageSnapshot) -> Vec<Insight> {
    let title_chars = snapshot
        .title
        .as_deref()
        .map(|t| t.chars().count())
        .unwrap_or(0);

    let rules = [
        (snapshot.word_count < MIN_WORD_COUNT, Insight::ThinContent),
        (snapshot.heading.is_none(), Insight::MissingHeading),
        (
            snapshot.meta_description.is_none(),
            Insight::MissingMetaDescription,
        ),
        (!snapshot.is_https, Insight::MissingHttps),
        (title_chars < MIN_TITLE_CHARS, Insight::ShortTitle),
    ];

    let insights: Vec<Insight> = rules
        .into_iter()
        .filter_map(|(fired, insight)| fired.then_some(insight))
        .collect();

    if insights.is_empty() {
        vec![Insight::Adequate]
    } else {
        insights
    }
}
