//! Built-in template catalog
//!
//! These templates are compiled into the binary and never change while the
//! process runs. Saving one copies it into the personal collection.

use tracing::debug;

use crate::filter;
use crate::record::TemplateRecord;

/// A compiled-in template entry
struct Entry {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    body: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "1",
        title: "Social media copywriting",
        category: "Marketing",
        description: "Posts for Instagram, Facebook, VK",
        body: "Write a post for [social network] about [topic]. Target audience: [audience]. \
               Tone: [friendly/professional/inspiring]. Add 3-5 hashtags.",
    },
    Entry {
        id: "2",
        title: "Code review",
        category: "Programming",
        description: "Check and improve code",
        body: "Review the following [programming language] code: [code]. Find possible bugs, \
               suggest optimizations and readability improvements.",
    },
    Entry {
        id: "3",
        title: "Idea generation",
        category: "Creative",
        description: "Brainstorming and creative ideas",
        body: "Suggest 10 creative ideas for [project/business/content] in the [niche] niche. \
               Take current trends and the interests of [target audience] into account.",
    },
    Entry {
        id: "4",
        title: "Email campaign",
        category: "Marketing",
        description: "Letters for email marketing",
        body: "Write a sales email for [product/service]. The subject line must be catchy. \
               Include a call to action and personalization for [audience segment].",
    },
    Entry {
        id: "5",
        title: "Educational content",
        category: "Education",
        description: "Explaining complex topics in plain language",
        body: "Explain [complex topic] in simple words for a [beginner/intermediate/advanced] \
               learner. Use analogies and real-life examples. Add practical advice.",
    },
    Entry {
        id: "6",
        title: "SEO optimization",
        category: "Marketing",
        description: "Texts for search engine optimization",
        body: "Write an SEO-optimized text about [topic], [word count] words long. \
               Keywords: [keyword list]. Include H2 and H3 subheadings.",
    },
    Entry {
        id: "7",
        title: "Character creation",
        category: "Creative",
        description: "Designing a character for a story",
        body: "Create a detailed character for [genre: fantasy/sci-fi/mystery]. Describe their \
               appearance, personality, motivation, backstory and speech patterns. Age: [age].",
    },
    Entry {
        id: "8",
        title: "Skills summary",
        category: "Career",
        description: "Describing professional skills",
        body: "Write a professional skills summary for a resume. Position: [position]. \
               Years of experience: [years]. Key achievements: [achievements]. Style: brief and concrete.",
    },
];

/// Read-only ordered set of templates shipped with the application
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<TemplateRecord>,
}

impl Catalog {
    /// The compiled-in catalog
    pub fn builtin() -> Self {
        let records = ENTRIES
            .iter()
            .map(|e| TemplateRecord::new(e.id, e.title, e.category, e.description, e.body))
            .collect::<Vec<_>>();
        debug!(count = records.len(), "Catalog::builtin: loaded");
        Self { records }
    }

    /// All templates in catalog order
    pub fn list(&self) -> &[TemplateRecord] {
        &self.records
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        filter::categories(&self.records)
    }

    /// Look up a template by id
    pub fn get(&self, id: &str) -> Option<&TemplateRecord> {
        debug!(%id, "Catalog::get: called");
        self.records.iter().find(|r| r.id == id)
    }

    /// Templates matching a search query and category selection
    pub fn filter(&self, query: &str, category: &str) -> Vec<&TemplateRecord> {
        filter::filter(&self.records, query, category)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
