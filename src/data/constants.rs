//! Environment variant table and emphasis styling.

use phf::phf_map;

/// Theorem-like environment variants the labeler numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVariant {
    Theorem,
    Corollary,
    Lemma,
    Proposition,
    Conjecture,
    Definition,
    Example,
    Problem,
    Exercise,
    Solution,
    Remark,
    Claim,
    Fact,
}

impl EnvVariant {
    /// Display name, also the identifier prefix ("Theorem_2.1").
    pub fn name(self) -> &'static str {
        match self {
            EnvVariant::Theorem => "Theorem",
            EnvVariant::Corollary => "Corollary",
            EnvVariant::Lemma => "Lemma",
            EnvVariant::Proposition => "Proposition",
            EnvVariant::Conjecture => "Conjecture",
            EnvVariant::Definition => "Definition",
            EnvVariant::Example => "Example",
            EnvVariant::Problem => "Problem",
            EnvVariant::Exercise => "Exercise",
            EnvVariant::Solution => "Solution",
            EnvVariant::Remark => "Remark",
            EnvVariant::Claim => "Claim",
            EnvVariant::Fact => "Fact",
        }
    }

    /// Emphasis used for the prepended label; `Plain` for unmapped variants.
    pub fn style(self) -> EmphasisStyle {
        ENV_EMPHASIS
            .get(self.name())
            .copied()
            .unwrap_or(EmphasisStyle::Plain)
    }
}

/// How an environment label is emphasized in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisStyle {
    Bold,
    Italic,
    Plain,
}

/// Variant → emphasis style. Total over the built-in variants except
/// `Remark`, which renders its label without emphasis.
pub static ENV_EMPHASIS: phf::Map<&'static str, EmphasisStyle> = phf_map! {
    "Theorem" => EmphasisStyle::Bold,
    "Corollary" => EmphasisStyle::Bold,
    "Lemma" => EmphasisStyle::Italic,
    "Proposition" => EmphasisStyle::Bold,
    "Conjecture" => EmphasisStyle::Bold,
    "Definition" => EmphasisStyle::Bold,
    "Example" => EmphasisStyle::Bold,
    "Problem" => EmphasisStyle::Bold,
    "Exercise" => EmphasisStyle::Bold,
    "Solution" => EmphasisStyle::Bold,
    "Claim" => EmphasisStyle::Bold,
    "Fact" => EmphasisStyle::Bold,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remark_falls_back_to_plain() {
        assert_eq!(EnvVariant::Remark.style(), EmphasisStyle::Plain);
    }

    #[test]
    fn lemma_is_italic() {
        assert_eq!(EnvVariant::Lemma.style(), EmphasisStyle::Italic);
    }
}
