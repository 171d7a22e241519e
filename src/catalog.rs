//! Category catalog
//!
//! Maps every quality category to the five recommendation texts that describe
//! scores 1 through 5. The built-in table covers the categories the scanner
//! produces; deployments can swap it for a JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{SitelensError, SitelensResult};
use crate::models::{Score, MAX_SCORE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    /// Recommendation text per score, index 0 = score 1.
    pub scores: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct CategoryCatalog {
    categories: Vec<CategoryEntry>,
}

/// Unchecked wire form; every deserialized catalog passes through `check`.
#[derive(Deserialize)]
struct RawCatalog {
    categories: Vec<CategoryEntry>,
}

impl TryFrom<RawCatalog> for CategoryCatalog {
    type Error = SitelensError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.categories)
    }
}

const BUILTIN: &[(&str, [&str; 5])] = &[
    (
        "First Impressions & Branding",
        [
            "Lacks professional design and messaging. Recommend full redesign.",
            "Unclear offer. Suggest branding update, clearer value prop, and trust elements.",
            "Decent design, but needs polish. Recommend refining layout and visuals.",
            "Strong branding with minor design updates suggested.",
            "Excellent branding. No improvements needed.",
        ],
    ),
    (
        "User Experience (UX)",
        [
            "Confusing journey. Full UX overhaul needed.",
            "Navigation and flow inconsistent. Suggest restructuring.",
            "Usable, but some friction. Recommend usability testing.",
            "Good UX with minor friction points. Suggest tweaks.",
            "Excellent UX. No changes needed.",
        ],
    ),
    (
        "Performance & Speed",
        [
            "Extremely slow. Recommend full optimization (hosting, images, scripts).",
            "Slow load times. Suggest compressing assets and optimizing code.",
            "Acceptable speed. Room for improvement with lazy loading/CDN.",
            "Good performance with small issues to address.",
            "Excellent performance. No changes needed.",
        ],
    ),
    (
        "Mobile Responsiveness",
        [
            "Poor experience on mobile. Recommend responsive redesign.",
            "Major mobile issues. Redesign mobile layout and fix touch elements.",
            "Responsive but with usability gaps. Suggest mobile-specific adjustments.",
            "Good responsiveness. Test and refine further.",
            "Perfect mobile design. No improvements needed.",
        ],
    ),
    (
        "SEO & Visibility",
        [
            "No SEO foundations. Recommend full setup (meta, sitemap, schema).",
            "Minimal SEO. Recommend on-page SEO and metadata improvements.",
            "Basic SEO setup. Recommend keyword and content optimization.",
            "Good SEO. Suggest content strategy enhancements.",
            "Excellent SEO. No improvements needed.",
        ],
    ),
    (
        "Security & Compliance",
        [
            "No HTTPS or compliance. Urgent fixes needed (SSL, policy, updates).",
            "Basic security but missing compliance features. Recommend updates.",
            "Secure but outdated components. Suggest plugin/CMS updates.",
            "Secure with minor improvements needed.",
            "Fully secure and compliant. No changes needed.",
        ],
    ),
    (
        "Accessibility",
        [
            "No accessibility. Recommend WCAG audit and full compliance plan.",
            "Major issues (contrast, keyboard nav). Recommend improvements.",
            "Some basics present. Suggest screen reader and contrast review.",
            "Mostly compliant. Suggest accessibility testing tools.",
            "Fully compliant and accessible. Great work!",
        ],
    ),
    (
        "Analytics & Conversions",
        [
            "No tracking. Recommend GA4, goal setup, CRM integration.",
            "Basic analytics only. Add events and conversion goals.",
            "Some tracking in place. Recommend UTM and funnel tracking.",
            "Well-tracked site. Suggest dashboards and heatmaps.",
            "Excellent analytics. Fully optimized.",
        ],
    ),
];

impl Default for CategoryCatalog {
    fn default() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, texts)| CategoryEntry {
                name: (*name).to_string(),
                scores: texts.iter().map(|t| (*t).to_string()).collect(),
            })
            .collect();
        Self { categories }
    }
}

impl CategoryCatalog {
    /// Build a catalog, rejecting entries without exactly one text per score
    /// and duplicate names.
    pub fn new(categories: Vec<CategoryEntry>) -> SitelensResult<Self> {
        let catalog = Self { categories };
        catalog.check()?;
        Ok(catalog)
    }

    /// Parse a catalog from its JSON form.
    pub fn from_json(json: &str) -> SitelensResult<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.categories)
    }

    pub fn load(path: &Path) -> SitelensResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SitelensError::io(e, Some(path.to_path_buf())))?;
        let catalog = Self::from_json(&json)?;
        log::debug!("Loaded {} categories from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    fn check(&self) -> SitelensResult<()> {
        for (idx, entry) in self.categories.iter().enumerate() {
            if entry.scores.len() != usize::from(MAX_SCORE) {
                return Err(SitelensError::Catalog(format!(
                    "'{}' has {} recommendation texts, expected {}",
                    entry.name,
                    entry.scores.len(),
                    MAX_SCORE
                )));
            }
            if self.categories[..idx].iter().any(|e| e.name == entry.name) {
                return Err(SitelensError::Catalog(format!(
                    "'{}' is listed more than once",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|e| e.name == category)
    }

    /// Recommendation text for a category at a given score.
    pub fn recommendation(&self, category: &str, score: Score) -> SitelensResult<&str> {
        self.get(category)
            .and_then(|entry| entry.scores.get(score.catalog_index()))
            .map(String::as_str)
            .ok_or_else(|| SitelensError::UnknownCategory(category.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
