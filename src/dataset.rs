//! Dataset provider: the wide-form MIC table.
//!
//! A [`Dataset`] is an injected parameter rather than a process-wide global,
//! so the reshape and chart pipeline can be tested against arbitrary tables.
//! [`Dataset::burtin`] supplies the built-in 16-species table (Burtin, 1951).

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Gram stain classification of a bacterial species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GramStain {
    /// Gram-positive (retains crystal violet stain).
    Positive,
    /// Gram-negative.
    Negative,
}

impl GramStain {
    /// Lowercase label used in tables, tooltips, and legends.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GramStain::Positive => "positive",
            GramStain::Negative => "negative",
        }
    }
}

impl std::fmt::Display for GramStain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One wide-form record: a species, its Gram stain, and one MIC value per
/// antibiotic.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Species name (unique key within a dataset).
    pub species: String,
    /// Gram stain classification.
    pub gram_stain: GramStain,
    mic: HashMap<String, f64>,
}

impl Record {
    /// Create a record from (antibiotic, MIC) pairs.
    #[must_use]
    pub fn new(species: impl Into<String>, gram_stain: GramStain, mic: &[(&str, f64)]) -> Self {
        Self {
            species: species.into(),
            gram_stain,
            mic: mic.iter().map(|&(name, value)| (name.to_string(), value)).collect(),
        }
    }

    /// MIC value for an antibiotic, if present.
    #[must_use]
    pub fn mic(&self, antibiotic: &str) -> Option<f64> {
        self.mic.get(antibiotic).copied()
    }
}

/// A wide-form MIC table: an authored, ordered antibiotic list plus one
/// record per species.
#[derive(Debug, Clone)]
pub struct Dataset {
    antibiotics: Vec<String>,
    records: Vec<Record>,
}

/// Title of the built-in chart.
pub const BURTIN_TITLE: &str = "Penicillin\u{2019}s Edge Against Gram-Positive Pathogens";

/// Markdown intro paragraph shown above the built-in chart.
pub const BURTIN_INTRO: &str = "\
This interactive chart visualizes how three antibiotics\u{2014}**Penicillin**, \
**Streptomycin**, and **Neomycin**\u{2014}perform against 16 bacterial species, \
categorized by **Gram stain** (positive or negative). Lower MIC values \
(log scale) reflect greater potency.";

/// Caption shown below the built-in chart.
pub const BURTIN_CAPTION: &str = "\
MIC is log-scaled\u{2014}lower values indicate stronger potency. Penicillin \
stands out with high efficacy against Gram-positive bacteria.";

impl Dataset {
    /// Create a dataset from an antibiotic list and records.
    #[must_use]
    pub fn new(antibiotics: &[&str], records: Vec<Record>) -> Self {
        Self { antibiotics: antibiotics.iter().map(|s| (*s).to_string()).collect(), records }
    }

    /// The authored, ordered antibiotic names.
    #[must_use]
    pub fn antibiotics(&self) -> &[String] {
        &self.antibiotics
    }

    /// The wide-form records.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Validate the table: every record must carry a strictly positive MIC
    /// value for every declared antibiotic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMic`] for an absent value and
    /// [`Error::NonPositiveMic`] for a value unusable on a log scale.
    pub fn validate(&self) -> Result<()> {
        for record in &self.records {
            for antibiotic in &self.antibiotics {
                match record.mic(antibiotic) {
                    None => {
                        return Err(Error::MissingMic {
                            species: record.species.clone(),
                            antibiotic: antibiotic.clone(),
                        })
                    }
                    Some(value) if value <= 0.0 => {
                        return Err(Error::NonPositiveMic {
                            species: record.species.clone(),
                            antibiotic: antibiotic.clone(),
                            value,
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// The built-in 16-species table of MIC values (\u{3bc}g/mL) for
    /// Penicillin, Streptomycin, and Neomycin.
    #[must_use]
    pub fn burtin() -> Self {
        use GramStain::{Negative, Positive};

        let records = vec![
            Record::new(
                "Aerobacter aerogenes",
                Negative,
                &[("Penicillin", 870.0), ("Streptomycin", 1.0), ("Neomycin", 1.6)],
            ),
            Record::new(
                "Bacillus anthracis",
                Positive,
                &[("Penicillin", 0.001), ("Streptomycin", 0.01), ("Neomycin", 0.007)],
            ),
            Record::new(
                "Brucella abortus",
                Negative,
                &[("Penicillin", 1.0), ("Streptomycin", 2.0), ("Neomycin", 0.02)],
            ),
            Record::new(
                "Diplococcus pneumoniae",
                Positive,
                &[("Penicillin", 0.005), ("Streptomycin", 11.0), ("Neomycin", 10.0)],
            ),
            Record::new(
                "Escherichia coli",
                Negative,
                &[("Penicillin", 100.0), ("Streptomycin", 0.4), ("Neomycin", 0.1)],
            ),
            Record::new(
                "Klebsiella pneumoniae",
                Negative,
                &[("Penicillin", 850.0), ("Streptomycin", 1.2), ("Neomycin", 1.0)],
            ),
            Record::new(
                "Mycobacterium tuberculosis",
                Negative,
                &[("Penicillin", 800.0), ("Streptomycin", 5.0), ("Neomycin", 2.0)],
            ),
            Record::new(
                "Proteus vulgaris",
                Negative,
                &[("Penicillin", 3.0), ("Streptomycin", 0.1), ("Neomycin", 0.1)],
            ),
            Record::new(
                "Pseudomonas aeruginosa",
                Negative,
                &[("Penicillin", 850.0), ("Streptomycin", 2.0), ("Neomycin", 0.4)],
            ),
            Record::new(
                "Salmonella (Eberthella) typhosa",
                Negative,
                &[("Penicillin", 1.0), ("Streptomycin", 0.4), ("Neomycin", 0.008)],
            ),
            Record::new(
                "Salmonella schottmuelleri",
                Negative,
                &[("Penicillin", 10.0), ("Streptomycin", 0.8), ("Neomycin", 0.09)],
            ),
            Record::new(
                "Staphylococcus albus",
                Positive,
                &[("Penicillin", 0.007), ("Streptomycin", 0.1), ("Neomycin", 0.001)],
            ),
            Record::new(
                "Staphylococcus aureus",
                Positive,
                &[("Penicillin", 0.03), ("Streptomycin", 0.03), ("Neomycin", 0.001)],
            ),
            Record::new(
                "Streptococcus fecalis",
                Positive,
                &[("Penicillin", 1.0), ("Streptomycin", 1.0), ("Neomycin", 0.1)],
            ),
            Record::new(
                "Streptococcus hemolyticus",
                Positive,
                &[("Penicillin", 0.001), ("Streptomycin", 14.0), ("Neomycin", 10.0)],
            ),
            Record::new(
                "Streptococcus viridans",
                Positive,
                &[("Penicillin", 0.005), ("Streptomycin", 10.0), ("Neomycin", 40.0)],
            ),
        ];

        Self::new(&["Penicillin", "Streptomycin", "Neomycin"], records)
    }
}
