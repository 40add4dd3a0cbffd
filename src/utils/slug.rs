use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| compile(r"[^a-z0-9 ]+"));
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| compile(r"-+"));

/// Used when a name has nothing left after slugifying
const FALLBACK_SLUG: &str = "player";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid slug pattern {pattern}: {e}"))
}

/// URL-safe identifier for a player name
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lower, "");
    let dashed = stripped.replace(' ', "-");
    DASH_RUNS.replace_all(&dashed, "-").into_owned()
}

fn base_slug(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// One slug per player name. Names are assigned in sorted order; a slug
/// that is already taken gets the first free `-2`, `-3`, ... suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlugMap {
    slugs: BTreeMap<String, String>,
}

impl SlugMap {
    pub fn new<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sorted: BTreeSet<&str> = names.into_iter().collect();
        let mut taken: BTreeSet<String> = BTreeSet::new();
        let mut slugs = BTreeMap::new();

        for name in sorted {
            let base = base_slug(name);
            let mut slug = base.clone();
            let mut suffix = 2;
            while taken.contains(&slug) {
                slug = format!("{}-{}", base, suffix);
                suffix += 1;
            }
            taken.insert(slug.clone());
            slugs.insert(name.to_string(), slug);
        }

        Self { slugs }
    }

    pub fn slug(&self, name: &str) -> String {
        self.slugs.get(name).cloned().unwrap_or_else(|| base_slug(name))
    }

    pub fn url(&self, name: &str) -> String {
        format!("/players/{}", self.slug(name))
    }

    /// (name, slug) pairs ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slugs.iter().map(|(name, slug)| (name.as_str(), slug.as_str()))
    }
}
