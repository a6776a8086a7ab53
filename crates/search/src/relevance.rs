//! Relevance scoring for food search results.
//!
//! The score is a sum of independent terms (see [`ScoreBreakdown`]) clamped
//! at zero and deliberately left uncapped above, so that strong matches pull
//! clearly away from borderline ones. Terms overlap on purpose: an exact name
//! match earns both the similarity ceiling and the exact-name bonus.

use crate::model::{DataType, RawCandidate};
use crate::similarity::similarity_lowercase;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Per query word (longer than two chars) found in the brand, multi-word queries only.
pub const BRAND_WORD_BONUS: f64 = 0.5;
/// Brand contains the whole single-word query.
pub const BRAND_QUERY_BONUS: f64 = 0.4;
/// Name equals the query.
pub const EXACT_NAME_BONUS: f64 = 0.5;
/// Single-word query appears as a whole token of the name.
pub const TOKEN_MATCH_BONUS: f64 = 0.4;
/// Name starts with the query.
pub const PREFIX_BONUS: f64 = 0.3;
/// Name mentions a restaurant chain.
pub const CHAIN_PENALTY: f64 = -0.4;
/// Name describes a compound or prepared dish.
pub const COMPLEX_DISH_PENALTY: f64 = -0.3;
/// Name reads like an ingredient list (three or more comma segments).
pub const INGREDIENT_LIST_PENALTY: f64 = -0.15;
/// Name carries a parenthetical.
pub const PARENTHETICAL_PENALTY: f64 = -0.05;
/// Name mentions a canonical cut of meat or fish.
pub const BASIC_CUT_BONUS: f64 = 0.35;
/// Name mentions a plain preparation.
pub const BASIC_PREPARATION_BONUS: f64 = 0.15;

/// Restaurant and fast-food chains.
pub const CHAIN_BRANDS: &[&str] = &[
    "mcdonald's",
    "mcdonalds",
    "burger king",
    "wendy's",
    "taco bell",
    "kfc",
    "subway",
    "starbucks",
    "domino's",
    "pizza hut",
    "papa john's",
    "chick-fil-a",
    "dunkin",
    "panera",
    "chipotle",
    "popeyes",
    "arby's",
    "dairy queen",
    "applebee's",
    "denny's",
    "olive garden",
    "little caesars",
];

/// Compound dishes and prepared meals.
pub const COMPLEX_DISH_TERMS: &[&str] = &[
    "sandwich",
    "burrito",
    "casserole",
    "lasagna",
    "pizza",
    "soup",
    "stew",
    "salad",
    "wrap",
    "taco",
    "burger",
    "nuggets",
    "pot pie",
    "stir fry",
    "stir-fry",
    "entree",
    "frozen meal",
    "tv dinner",
    "breaded",
    "with sauce",
    "with gravy",
];

/// Canonical cuts of meat, poultry and fish.
pub const BASIC_CUTS: &[&str] = &[
    "chicken breast",
    "chicken thigh",
    "chicken drumstick",
    "chicken wing",
    "turkey breast",
    "ground beef",
    "ground turkey",
    "ground chicken",
    "ground pork",
    "beef sirloin",
    "ribeye",
    "flank steak",
    "pork chop",
    "pork loin",
    "pork tenderloin",
    "salmon fillet",
    "tuna steak",
    "cod fillet",
];

/// Plain, minimally processed preparations.
pub const BASIC_PREPARATIONS: &[&str] =
    &["raw", "fresh", "plain", "lean", "ground", "boneless", "unseasoned"];

/// Bonus per source category, most trusted first.
pub const DATA_SOURCE_PRIORITY: &[(DataType, f64)] = &[
    (DataType::Foundation, 0.25),
    (DataType::SrLegacy, 0.20),
    (DataType::Survey, 0.10),
    (DataType::Branded, 0.0),
];

static BUILTIN_TABLES: Lazy<ScoringTables> = Lazy::new(ScoringTables::default);

/// Word-count adjustment for a name with `words` words.
#[must_use]
pub fn word_count_adjustment(words: usize) -> f64 {
    match words {
        0..=2 => 0.30,
        3..=4 => 0.15,
        5..=6 => 0.05,
        7 => 0.0,
        _ => -0.20,
    }
}

/// Bonus attached to one source category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourcePriority {
    /// Source category
    pub data_type: DataType,
    /// Score added for records of this category
    pub bonus: f64,
}

/// Lookup tables driving the domain-specific terms.
///
/// Entries are matched as lowercase substrings of the food name. Tables can
/// be loaded from TOML (any omitted table keeps its built-in value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTables {
    /// Restaurant chains
    pub chain_brands: Vec<String>,
    /// Compound-dish terms
    pub complex_terms: Vec<String>,
    /// Canonical cuts
    pub basic_cuts: Vec<String>,
    /// Plain preparations
    pub basic_preparations: Vec<String>,
    /// Per-source bonus
    pub source_priority: Vec<SourcePriority>,
}

impl Default for ScoringTables {
    fn default() -> Self {
        let owned = |terms: &[&str]| terms.iter().map(|t| (*t).to_string()).collect();
        Self {
            chain_brands: owned(CHAIN_BRANDS),
            complex_terms: owned(COMPLEX_DISH_TERMS),
            basic_cuts: owned(BASIC_CUTS),
            basic_preparations: owned(BASIC_PREPARATIONS),
            source_priority: DATA_SOURCE_PRIORITY
                .iter()
                .map(|&(data_type, bonus)| SourcePriority { data_type, bonus })
                .collect(),
        }
    }
}

impl ScoringTables {
    /// Shared instance of the built-in tables
    #[must_use]
    pub fn builtin() -> &'static ScoringTables {
        &BUILTIN_TABLES
    }

    /// Lowercase and trim every term so matching stays case-insensitive.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.chain_brands,
            &mut self.complex_terms,
            &mut self.basic_cuts,
            &mut self.basic_preparations,
        ] {
            for term in list.iter_mut() {
                *term = term.trim().to_lowercase();
            }
            list.retain(|term| !term.is_empty());
        }
        self
    }

    /// Bonus for a source category; unknown categories get nothing.
    #[must_use]
    pub fn source_bonus(&self, data_type: DataType) -> f64 {
        self.source_priority
            .iter()
            .find(|entry| entry.data_type == data_type)
            .map_or(0.0, |entry| entry.bonus)
    }
}

/// Contribution of every scoring term for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    /// Name/query similarity in `[0, 1]`
    pub similarity: f64,
    /// Brand match
    pub brand: f64,
    /// Exact name match
    pub exact_name: f64,
    /// Whole-token match of a single-word query
    pub token_match: f64,
    /// Name starts with the query
    pub prefix: f64,
    /// Source category priority
    pub source_priority: f64,
    /// Word-count adjustment
    pub word_count: f64,
    /// Chain restaurant penalty
    pub chain: f64,
    /// Compound dish penalty
    pub complex_dish: f64,
    /// Ingredient-list penalty
    pub ingredient_list: f64,
    /// Parenthetical penalty
    pub parenthetical: f64,
    /// Canonical cut bonus
    pub basic_cut: f64,
    /// Plain preparation bonus
    pub basic_preparation: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms before clamping
    #[must_use]
    pub fn unclamped(&self) -> f64 {
        self.similarity
            + self.brand
            + self.exact_name
            + self.token_match
            + self.prefix
            + self.source_priority
            + self.word_count
            + self.chain
            + self.complex_dish
            + self.ingredient_list
            + self.parenthetical
            + self.basic_cut
            + self.basic_preparation
    }

    /// Relevance score: the sum floored at zero, no upper cap
    #[must_use]
    pub fn total(&self) -> f64 {
        self.unclamped().max(0.0)
    }
}

/// Scores provider records against a query.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    tables: ScoringTables,
}

impl RelevanceScorer {
    /// Scorer over custom tables
    #[must_use]
    pub fn new(tables: ScoringTables) -> Self {
        Self {
            tables: tables.normalized(),
        }
    }

    /// Tables in use
    #[must_use]
    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    /// Relevance of `candidate` to `query`; never negative.
    #[must_use]
    pub fn score(&self, candidate: &RawCandidate, query: &str) -> f64 {
        self.breakdown(candidate, query).total()
    }

    /// Every term of the score, for diagnostics and tuning.
    #[must_use]
    pub fn breakdown(&self, candidate: &RawCandidate, query: &str) -> ScoreBreakdown {
        let name = candidate.description.trim().to_lowercase();
        let query = query.trim().to_lowercase();
        let brand = candidate.brand_text().map(|b| b.to_lowercase());
        let multi_word = query.contains(char::is_whitespace);

        let mut terms = ScoreBreakdown {
            similarity: similarity_lowercase(&name, &query),
            brand: brand.as_deref().map_or(0.0, |b| brand_bonus(b, &query, multi_word)),
            source_priority: self.tables.source_bonus(candidate.data_type),
            word_count: word_count_adjustment(name.split_whitespace().count()),
            ..ScoreBreakdown::default()
        };

        if name == query {
            terms.exact_name = EXACT_NAME_BONUS;
        }

        if !multi_word
            && name
                .split(|c: char| c.is_whitespace() || c == ',')
                .any(|token| !token.is_empty() && token == query)
        {
            terms.token_match = TOKEN_MATCH_BONUS;
        }

        if name.starts_with(&query) {
            terms.prefix = PREFIX_BONUS;
        }

        if contains_any(&name, &self.tables.chain_brands) {
            terms.chain = CHAIN_PENALTY;
        }

        if contains_any(&name, &self.tables.complex_terms) {
            terms.complex_dish = COMPLEX_DISH_PENALTY;
        }

        if name.contains(',') && name.split(',').count() > 2 {
            terms.ingredient_list = INGREDIENT_LIST_PENALTY;
        }

        if name.contains('(') && name.contains(')') {
            terms.parenthetical = PARENTHETICAL_PENALTY;
        }

        if contains_any(&name, &self.tables.basic_cuts) {
            terms.basic_cut = BASIC_CUT_BONUS;
        }

        if contains_any(&name, &self.tables.basic_preparations) {
            terms.basic_preparation = BASIC_PREPARATION_BONUS;
        }

        terms
    }
}

fn brand_bonus(brand: &str, query: &str, multi_word: bool) -> f64 {
    if multi_word {
        let matches = query
            .split_whitespace()
            .filter(|word| word.chars().count() > 2 && brand.contains(word))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let bonus = matches as f64 * BRAND_WORD_BONUS;
        bonus
    } else if brand.contains(query) {
        BRAND_QUERY_BONUS
    } else {
        0.0
    }
}

fn contains_any(name: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| name.contains(term.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn foundation(name: &str) -> RawCandidate {
        RawCandidate::new(1, name, DataType::Foundation)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < EPS, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_word_count_table() {
        assert_close(word_count_adjustment(1), 0.30);
        assert_close(word_count_adjustment(2), 0.30);
        assert_close(word_count_adjustment(3), 0.15);
        assert_close(word_count_adjustment(4), 0.15);
        assert_close(word_count_adjustment(5), 0.05);
        assert_close(word_count_adjustment(6), 0.05);
        assert_close(word_count_adjustment(7), 0.0);
        assert_close(word_count_adjustment(8), -0.20);
        assert_close(word_count_adjustment(30), -0.20);
    }

    #[test]
    fn test_exact_single_word_match_stacks() {
        let terms = RelevanceScorer::default().breakdown(&foundation("Banana"), "banana");

        assert_close(terms.similarity, 1.0);
        assert_close(terms.exact_name, 0.5);
        assert_close(terms.token_match, 0.4);
        assert_close(terms.prefix, 0.3);
        assert_close(terms.source_priority, 0.25);
        assert_close(terms.word_count, 0.30);
        assert_close(terms.total(), 2.75);
    }

    #[test]
    fn test_multi_word_brand_bonus_stacks() {
        let candidate = RawCandidate::new(2, "Greek yogurt, vanilla", DataType::Branded)
            .with_brand_owner("Chobani Greek Kitchen");
        let terms = RelevanceScorer::default().breakdown(&candidate, "chobani greek");
        assert_close(terms.brand, 1.0);
    }

    #[test]
    fn test_multi_word_brand_ignores_short_words() {
        let candidate = RawCandidate::new(2, "Cereal", DataType::Branded).with_brand_owner("Kellogg Co");
        let terms = RelevanceScorer::default().breakdown(&candidate, "co kellogg");
        assert_close(terms.brand, 0.5);
    }

    #[test]
    fn test_single_word_brand_bonus_does_not_stack() {
        let candidate = RawCandidate::new(3, "Protein bar", DataType::Branded)
            .with_brand_owner("Quest Nutrition Quest");
        let terms = RelevanceScorer::default().breakdown(&candidate, "quest");
        assert_close(terms.brand, 0.4);
    }

    #[test]
    fn test_token_match_splits_on_commas() {
        let scorer = RelevanceScorer::default();
        let terms = scorer.breakdown(&foundation("Apples,raw,with skin"), "raw");
        assert_close(terms.token_match, 0.4);

        let terms = scorer.breakdown(&foundation("Strawberries"), "straw");
        assert_close(terms.token_match, 0.0);
    }

    #[test]
    fn test_token_match_requires_single_word_query() {
        let terms = RelevanceScorer::default().breakdown(&foundation("Peanut butter"), "peanut butter");
        assert_close(terms.token_match, 0.0);
        assert_close(terms.exact_name, 0.5);
    }

    #[test]
    fn test_source_priority_table() {
        let scorer = RelevanceScorer::default();
        for (data_type, bonus) in [
            (DataType::Foundation, 0.25),
            (DataType::SrLegacy, 0.20),
            (DataType::Survey, 0.10),
            (DataType::Branded, 0.0),
            (DataType::Other, 0.0),
        ] {
            let candidate = RawCandidate::new(1, "Oats", data_type);
            assert_close(scorer.breakdown(&candidate, "oats").source_priority, bonus);
        }
    }

    #[test]
    fn test_penalties_apply_once() {
        let candidate = RawCandidate::new(
            9,
            "Burger King Whopper sandwich with burger sauce, Subway style (large), extra, onions",
            DataType::Branded,
        );
        let terms = RelevanceScorer::default().breakdown(&candidate, "whopper");

        assert_close(terms.chain, -0.4);
        assert_close(terms.complex_dish, -0.3);
        assert_close(terms.ingredient_list, -0.15);
        assert_close(terms.parenthetical, -0.05);
        assert_close(terms.word_count, -0.20);
    }

    #[test]
    fn test_two_comma_segments_are_not_an_ingredient_list() {
        let terms = RelevanceScorer::default().breakdown(&foundation("Bananas, raw"), "banana");
        assert_close(terms.ingredient_list, 0.0);
    }

    #[test]
    fn test_boosts() {
        let terms = RelevanceScorer::default()
            .breakdown(&foundation("Chicken breast, boneless, skinless, raw"), "chicken breast");
        assert_close(terms.basic_cut, 0.35);
        assert_close(terms.basic_preparation, 0.15);
    }

    #[test]
    fn test_score_is_floored_at_zero() {
        let candidate = RawCandidate::new(
            7,
            "KFC family meal bucket with gravy and biscuits (12 pc), fried, assorted, sides",
            DataType::Branded,
        );
        let scorer = RelevanceScorer::default();
        let terms = scorer.breakdown(&candidate, "zucchini");

        assert!(terms.unclamped() < 0.0);
        assert_eq!(scorer.score(&candidate, "zucchini"), 0.0);
    }

    #[test]
    fn test_exact_name_and_cut_beat_plain_record() {
        let scorer = RelevanceScorer::default();
        let record = foundation("Chicken breast");
        let terms = scorer.breakdown(&record, "chicken breast");
        assert_close(terms.exact_name, 0.5);
        assert_close(terms.basic_cut, 0.35);

        let plain = ScoreBreakdown {
            exact_name: 0.0,
            basic_cut: 0.0,
            ..terms
        };
        assert_close(terms.total() - plain.total(), 0.85);
        assert_close(scorer.score(&record, "chicken breast"), terms.total());
    }

    #[test]
    fn test_long_branded_name_takes_word_count_penalty() {
        let candidate = RawCandidate::new(
            4,
            "banana flavored frozen dessert mix with artificial color, prepared",
            DataType::Branded,
        )
        .with_brand_owner("Dessert Co");
        let scorer = RelevanceScorer::default();
        let terms = scorer.breakdown(&candidate, "banana");
        assert_close(terms.word_count, -0.20);

        let without_word_count = ScoreBreakdown {
            word_count: 0.0,
            ..terms
        };
        assert_close(
            scorer.score(&candidate, "banana"),
            without_word_count.total() - 0.20,
        );
    }

    #[test]
    fn test_custom_tables_are_normalized() {
        let tables = ScoringTables {
            chain_brands: vec!["  Mercadona ".to_string(), String::new()],
            ..ScoringTables::default()
        };
        let scorer = RelevanceScorer::new(tables);
        assert_eq!(scorer.tables().chain_brands, vec!["mercadona".to_string()]);

        let terms = scorer.breakdown(&foundation("Mercadona tortilla"), "tortilla");
        assert_close(terms.chain, -0.4);
    }

    #[test]
    fn test_tables_deserialize_with_defaults() {
        let json = r#"{"basic_cuts": ["pechuga de pollo"]}"#;
        let tables: ScoringTables = serde_json::from_str(json).unwrap();
        assert_eq!(tables.basic_cuts, vec!["pechuga de pollo".to_string()]);
        assert_eq!(tables.chain_brands.len(), CHAIN_BRANDS.len());
        assert_close(tables.source_bonus(DataType::SrLegacy), 0.20);
    }

    #[test]
    fn test_builtin_matches_default() {
        assert_eq!(ScoringTables::builtin(), &ScoringTables::default());
    }
}
