//! Built-in configuration for Latvian warehouse dictation: a damaged-products
//! form and a stock-taking form.

use crate::config::MatchConfig;
use crate::forms::{Form, FormCatalog, KeywordAttribute};
use crate::fuzzy::FuzzyConfig;
use crate::pattern::{BestOfSpec, LiteralSpec, PatternSpec};

pub const KEYWORD: &str = "dokumenta atslēgvārds";
pub const PRODUCT: &str = "produkta nosaukums";
pub const AMOUNT: &str = "svars, skaitlis";
pub const UNIT: &str = "svars, mērvienība";
pub const PERSON: &str = "atbildīgā persona";
pub const TIME: &str = "laiks";

const DAMAGED_KEYWORD: &str = "bojāts produkts";
const STOCK_KEYWORD: &str = "atlikumu uzskaite";

const PRODUCTS: [&str; 3] = ["liellopa karbonāde", "piens", "olīveļļa"];
const NUMBER_WORDS: [&str; 11] = [
    "viens", "divi", "trīs", "četri", "pieci", "seši", "septiņi", "astoņi", "deviņi", "desmit", "simts",
];
const UNITS: [&str; 6] = ["kg", "g", "l", "kilograms", "grams", "litrs"];
const PEOPLE: [&str; 2] = ["haralds", "juris"];

/// Cheap insertions, expensive deletions and substitutions.
fn strict() -> FuzzyConfig {
    FuzzyConfig::new(3).with_weights(1, 5, 5)
}

fn keyword(text: &str) -> PatternSpec {
    LiteralSpec::text(text)
        .fuzzy(FuzzyConfig::new(3))
        .window(2, 3)
        .named(KEYWORD)
        .into()
}

fn product() -> PatternSpec {
    BestOfSpec::new(PRODUCTS, FuzzyConfig::new(3).with_weights(1, 5, 2))
        .window(1, 3)
        .named(PRODUCT)
        .into()
}

fn amount() -> PatternSpec {
    PatternSpec::alternation(vec![
        LiteralSpec::regex(r"\d+").into(),
        LiteralSpec::regex(r"\d+,\d+").into(),
        LiteralSpec::regex(r"\d+\.\d+").into(),
        BestOfSpec::new(NUMBER_WORDS, strict()).window(1, 2).record_text().into(),
    ])
    .named(AMOUNT)
}

fn unit() -> PatternSpec {
    BestOfSpec::new(UNITS, strict()).window(1, 2).named(UNIT).into()
}

fn person() -> PatternSpec {
    BestOfSpec::new(PEOPLE, strict()).window(1, 2).named(PERSON).into()
}

/// Root pattern: whichever form's keyword opens the transcript.
pub fn default_pattern() -> PatternSpec {
    PatternSpec::alternation(vec![
        PatternSpec::sequence(vec![keyword(DAMAGED_KEYWORD), product(), amount(), unit(), person()])
            .named("bojātu produktu veidlapa")
            .skip_recording(),
        PatternSpec::sequence(vec![keyword(STOCK_KEYWORD), product(), amount(), unit()])
            .named("atlikumu uzskaites veidlapa")
            .skip_recording(),
    ])
    .named("viss")
    .skip_recording()
}

pub fn default_forms() -> FormCatalog {
    let form = |name: &str, value: &str, columns: &[&str]| Form {
        name: name.to_owned(),
        keyword: KeywordAttribute {
            key: KEYWORD.to_owned(),
            value: value.to_owned(),
        },
        columns: columns.iter().map(|c| (*c).to_owned()).collect(),
        datetime_field: Some(TIME.to_owned()),
    };
    FormCatalog::new(vec![
        form("Bojāti produkti", DAMAGED_KEYWORD, &[PRODUCT, AMOUNT, UNIT, PERSON]),
        form("Atlikumu uzskaite", STOCK_KEYWORD, &[PRODUCT, AMOUNT, UNIT]),
    ])
}

pub fn default_config() -> MatchConfig {
    MatchConfig {
        pattern: default_pattern(),
        forms: default_forms(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::match_map::MatchMap;
    use crate::pattern::pattern_match;

    fn extract(text: &str) -> Option<MatchMap> {
        let pattern = default_pattern().build().unwrap();
        pattern_match(&pattern, text)
    }

    fn map(entries: &[(&str, &str)]) -> MatchMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_damaged_product() {
        assert_eq!(
            extract("Bojāts produkts piens 2 litri haralds"),
            Some(map(&[
                (KEYWORD, "bojāts produkts"),
                (PRODUCT, "piens"),
                (AMOUNT, "2"),
                (UNIT, "litrs"),
                (PERSON, "haralds"),
            ]))
        );
    }

    #[test]
    fn test_misheard_product_and_decimal_amount() {
        assert_eq!(
            extract("Bojāts produkts lielop karbonādu 1,32 kg Haralds"),
            Some(map(&[
                (KEYWORD, "bojāts produkts"),
                (PRODUCT, "liellopa karbonāde"),
                (AMOUNT, "1,32"),
                (UNIT, "kg"),
                (PERSON, "haralds"),
            ]))
        );
    }

    #[test]
    fn test_spoken_number_keeps_heard_text() {
        let matches = extract("Bojāts produkts piens divi litri haralds.").unwrap();
        assert_eq!(matches.get(AMOUNT), Some("divi"));
        assert_eq!(matches.get(UNIT), Some("litrs"));
    }

    #[test]
    fn test_truncated_person_still_picks_closest() {
        let matches = extract("Bojāts produkts lielop karbonādu 1,32 kg h").unwrap();
        assert_eq!(matches.get(PERSON), Some("haralds"));
    }

    #[test]
    fn test_stock_taking() {
        assert_eq!(
            extract("Atlikumu uzskaite piens 2 kg"),
            Some(map(&[
                (KEYWORD, "atlikumu uzskaite"),
                (PRODUCT, "piens"),
                (AMOUNT, "2"),
                (UNIT, "kg"),
            ]))
        );
    }

    #[test]
    fn test_unrelated_speech() {
        assert_eq!(extract("labdien kā jums iet"), None);
    }

    #[test]
    fn test_routes_to_matching_form() {
        let forms = default_forms();
        let now = Utc.with_ymd_and_hms(2023, 11, 2, 14, 30, 0).unwrap();

        let damaged = extract("Bojāts produkts piens 2 litri haralds").unwrap();
        let record = forms.record(&damaged, &now).unwrap();
        assert_eq!(record.form, "Bojāti produkti");
        assert_eq!(record.values.get(PERSON).map(String::as_str), Some("haralds"));
        assert_eq!(record.values.get(TIME).map(String::as_str), Some("23/11/02 14:30:00"));

        let stock = extract("Atlikumu uzskaite olīveļļa 5,5 litri").unwrap();
        let record = forms.record(&stock, &now).unwrap();
        assert_eq!(record.form, "Atlikumu uzskaite");
        assert_eq!(record.values.len(), 4);
    }

    #[test]
    fn test_default_config_survives_json() {
        let config = default_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = crate::config::MatchConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
        parsed.build_pattern().unwrap();
    }
}
