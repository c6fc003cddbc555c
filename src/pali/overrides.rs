// WHY: Hand-maintained exceptions for terms the automatic pipeline gets wrong
// Built once, never mutated; callers needing extra entries merge into a copy

use std::collections::HashMap;
use std::sync::OnceLock;

/// Tokens that conflate several root-text words, keyed by sanitized spelling
const COMPOUNDS: &[(&str, &[&str])] = &[
    ("methunadhammo", &["methuna", "dhammo"]),
    // glossed as gāma alone in BuPj2
    ("gāmūpacāro", &["gāma"]),
    // Pc34 spelling
    ("paṭigaṇheyya", &["paṭiggaṇheyya"]),
];

/// Exact raw terms mapped to the tokens to match instead
const MANUAL_NORMALIZATIONS: &[(&[&str], &[&str])] = &[
    // Bhikkhu Sg rules
    (&["So", "bhikkhu", "samanubhāsitabbo—"], &["samanubhāsitabbo"]),
    (&["So", "bhikkhu", "samanubhāsitabbo."], &["samanubhāsitabbo"]),
    (&["Te", "bhikkhū", "samanubhāsitabbā."], &["samanubhāsitabbā"]),
    (&["Cakkhussa", "raho", "nāma"], &["raho"]),
    (&["Sotassa", "raho", "nāma"], &["raho"]),
    // Bhikkhu Np rules
    (&["Imehi", "paccekacīvaracetāpannehīti"], &["paccekacīvaracetāpannehi"]),
    (
        &["no", "ce", "abhinipphādeti,", "tattha", "gantvā", "tuṇhībhūtena", "uddissa", "ṭhātabbaṁ."],
        &["tuṇhībhūtena", "uddissa", "ṭhātabbaṁ"],
    ),
    (
        &[
            "Accekaṁ",
            "maññamānena",
            "bhikkhunā",
            "paṭiggahetabbaṁ",
            "paṭiggahetvā",
            "yāva",
            "cīvarakālasamayaṁ",
            "nikkhipitabbanti",
        ],
        &["accekaṁ", "maññamānena", "bhikkhunā", "paṭiggahetabbaṁ"],
    ),
    // Bhikkhu Pc rules
    (&["Asantaṁ", "nāma", "bhikkhuṁ"], &["santa"]),
    (&["Punapavāraṇāpi", "sāditabbāti"], &["punapavāraṇa"]),
    (&["Niccapavāraṇāpi", "sāditabbāti"], &["niccapavāraṇa"]),
    (&["Aññatra", "tathā", "rūpappaccayāti"], &["aññatra", "tathārūpappaccayā"]),
    (&["Adhikaraṇaṁ", "nāma"], &["dhikaraṇa"]),
    // Bhikkhu Pd rules
    (
        &["Bhikkhū", "paneva", "kulesu", "nimantitā", "bhuñjantīti"],
        &["bhikkhu", "paneva", "kulesu"],
    ),
    (
        &[
            "Tehi",
            "bhikkhūhi",
            "sā",
            "bhikkhunī",
            "apasādetabbā—",
            "“apasakka",
            "tāva,",
            "bhagini,",
            "yāva",
            "bhikkhū",
            "bhuñjantī”ti.",
        ],
        &["apasādetabbā", "apasakka", "tāva", "bhagini", "yāva", "bhikkhū", "bhuñjanti"],
    ),
    // Bhikkhunī Pj rules
    (&["Sā", "bhikkhunī", "samanubhāsitabbā."], &["samanubhāsitabbā"]),
    // Bhikkhunī Sg rules
    (&["Tā", "bhikkhuniyo", "samanubhāsitabbā."], &["samanubhāsitabbā"]),
    // Bhikkhunī Pc rules
    (&["Ehāyye", "imaṁ", "adhikaraṇaṁ", "vūpasamehīti"], &["vūpasamehi"]),
    // word order differs in the rule itself
    (&["Anāpucchā", "ārāmaṁ", "paviseyyāti"], &["ārāmaṁ", "anāpucchā", "paviseyya"]),
];

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Compound-expansion and manual-normalization tables consulted by the term normalizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTables {
    compounds: HashMap<String, Vec<String>>,
    manual: HashMap<Vec<String>, Vec<String>>,
}

impl OverrideTables {
    /// Tables with no entries at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fresh copy of the built-in tables
    pub fn new() -> Self {
        let compounds = COMPOUNDS
            .iter()
            .map(|(key, parts)| (key.to_string(), owned(parts)))
            .collect();
        let manual = MANUAL_NORMALIZATIONS
            .iter()
            .map(|(term, normalized)| (owned(term), owned(normalized)))
            .collect();
        Self { compounds, manual }
    }

    /// Process-wide built-in tables, built on first use and read-only afterwards
    pub fn builtin() -> &'static OverrideTables {
        static BUILTIN: OnceLock<OverrideTables> = OnceLock::new();
        BUILTIN.get_or_init(OverrideTables::new)
    }

    /// Add or replace a compound split
    pub fn with_compound(mut self, token: impl Into<String>, parts: Vec<String>) -> Self {
        self.compounds.insert(token.into(), parts);
        self
    }

    /// Add or replace a manual normalization for an exact raw term
    pub fn with_manual(mut self, term: Vec<String>, normalized: Vec<String>) -> Self {
        self.manual.insert(term, normalized);
        self
    }

    /// Replacement tokens for a compound, if `token` is one
    pub fn compound(&self, token: &str) -> Option<&[String]> {
        self.compounds.get(token).map(Vec::as_slice)
    }

    /// Manual normalization for a raw term, compared token by token for exact equality
    pub fn manual<S: AsRef<str>>(&self, term: &[S]) -> Option<&[String]> {
        let key: Vec<String> = term.iter().map(|t| t.as_ref().to_string()).collect();
        self.manual.get(&key).map(Vec::as_slice)
    }

    pub fn compound_count(&self) -> usize {
        self.compounds.len()
    }

    pub fn manual_count(&self) -> usize {
        self.manual.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_loaded() {
        let tables = OverrideTables::builtin();
        assert_eq!(tables.compound_count(), COMPOUNDS.len());
        assert_eq!(tables.manual_count(), MANUAL_NORMALIZATIONS.len());
        assert!(std::ptr::eq(tables, OverrideTables::builtin()));
    }

    #[test]
    fn test_compound_lookup() {
        let tables = OverrideTables::builtin();
        assert_eq!(
            tables.compound("methunadhammo"),
            Some(&["methuna".to_string(), "dhammo".to_string()][..])
        );
        assert_eq!(tables.compound("methuna"), None);
    }

    #[test]
    fn test_manual_lookup_is_exact() {
        let tables = OverrideTables::builtin();
        assert_eq!(
            tables.manual(&["Adhikaraṇaṁ", "nāma"]),
            Some(&["dhikaraṇa".to_string()][..])
        );
        // case and punctuation are part of the key
        assert_eq!(tables.manual(&["adhikaraṇaṁ", "nāma"]), None);
        assert_eq!(tables.manual(&["So", "bhikkhu", "samanubhāsitabbo"]), None);
    }

    #[test]
    fn test_merging_leaves_builtin_untouched() {
        let extended = OverrideTables::builtin()
            .clone()
            .with_compound("yathādhammo", vec!["yathā".into(), "dhammo".into()])
            .with_manual(vec!["Tiṇavatthārakena".into()], vec!["tiṇavatthāraka".into()]);

        assert_eq!(extended.compound_count(), COMPOUNDS.len() + 1);
        assert_eq!(extended.manual_count(), MANUAL_NORMALIZATIONS.len() + 1);
        assert!(OverrideTables::builtin().compound("yathādhammo").is_none());
    }

    #[test]
    fn test_empty_tables() {
        let tables = OverrideTables::empty();
        assert_eq!(tables.compound_count(), 0);
        assert!(tables.manual(&["Adhikaraṇaṁ", "nāma"]).is_none());
    }
}
