//! Reshaper: wide table to long observations, plus optional jitter.
//!
//! [`melt`] turns one record per species into one observation per
//! (species, antibiotic) pair, validating values as it goes so a bad table
//! fails here instead of surfacing as a broken log axis later. [`Jitter`]
//! adds the cosmetic positional noise used by the jittered chart layout.

use crate::dataset::{Dataset, GramStain, Record};
use crate::error::{Error, Result};
use crate::table::Table;

/// Highlight group label for antibiotics not matched by the focus predicate.
pub const OTHER_GROUP: &str = "Other";

/// One long-form observation: a (species, antibiotic) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Species name, copied through from the record.
    pub species: String,
    /// Gram stain, copied through from the record.
    pub gram_stain: GramStain,
    /// Which antibiotic this row came from.
    pub antibiotic: String,
    /// MIC value for this pair. Strictly positive.
    pub mic: f64,
    /// Highlight group: the antibiotic's own name when it matches the focus
    /// predicate, [`OTHER_GROUP`] otherwise.
    pub highlight: String,
    /// Jittered axis position (category index plus noise). Cosmetic only;
    /// set by [`Jitter::apply`], never by [`melt`].
    pub jittered_position: Option<f64>,
}

/// Reshape a wide dataset into long observations.
///
/// Output length is records × antibiotics, in record-major order following
/// the authored antibiotic list. `is_focus` decides the highlight group per
/// antibiotic name.
///
/// # Errors
///
/// Fails fast on a missing value ([`Error::MissingMic`]) or a value that
/// cannot go on a log scale ([`Error::NonPositiveMic`]).
pub fn melt<F>(dataset: &Dataset, is_focus: F) -> Result<Vec<Observation>>
where
    F: Fn(&str) -> bool,
{
    let mut observations = Vec::with_capacity(dataset.records().len() * dataset.antibiotics().len());

    for record in dataset.records() {
        for antibiotic in dataset.antibiotics() {
            let mic = record.mic(antibiotic).ok_or_else(|| Error::MissingMic {
                species: record.species.clone(),
                antibiotic: antibiotic.clone(),
            })?;

            if mic <= 0.0 {
                return Err(Error::NonPositiveMic {
                    species: record.species.clone(),
                    antibiotic: antibiotic.clone(),
                    value: mic,
                });
            }

            let highlight =
                if is_focus(antibiotic) { antibiotic.clone() } else { OTHER_GROUP.to_string() };

            observations.push(Observation {
                species: record.species.clone(),
                gram_stain: record.gram_stain,
                antibiotic: antibiotic.clone(),
                mic,
                highlight,
                jittered_position: None,
            });
        }
    }

    Ok(observations)
}

/// Re-assemble wide records from observations, preserving first-seen species
/// order. Inverse of [`melt`]; used by the round-trip fidelity tests.
#[must_use]
pub fn widen(observations: &[Observation]) -> Vec<Record> {
    let mut order: Vec<&str> = Vec::new();
    for obs in observations {
        if !order.contains(&obs.species.as_str()) {
            order.push(&obs.species);
        }
    }

    order
        .iter()
        .map(|species| {
            let rows: Vec<&Observation> =
                observations.iter().filter(|o| o.species == *species).collect();
            let pairs: Vec<(&str, f64)> =
                rows.iter().map(|o| (o.antibiotic.as_str(), o.mic)).collect();
            Record::new(*species, rows[0].gram_stain, &pairs)
        })
        .collect()
}

/// Uniform positional jitter around each antibiotic's stable category index.
///
/// The noise source is a small splitmix-style generator: clock-seeded by
/// default (layout varies run to run, matching the cosmetic intent), or
/// fixed via [`Jitter::with_seed`] for reproducible layouts and tests.
#[derive(Debug, Clone)]
pub struct Jitter {
    amount: f64,
    state: u64,
}

/// Default jitter half-range.
pub const DEFAULT_JITTER: f64 = 0.2;

impl Jitter {
    /// Clock-seeded jitter with the given half-range.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0x5EED, |d| d.as_nanos() as u64);
        Self::with_seed(amount, seed)
    }

    /// Deterministically seeded jitter.
    #[must_use]
    pub fn with_seed(amount: f64, seed: u64) -> Self {
        Self { amount: amount.abs(), state: seed }
    }

    /// The jitter half-range.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform draw in [-1, 1).
    fn next_unit(&mut self) -> f64 {
        let mantissa = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        mantissa * 2.0 - 1.0
    }

    /// Assign `jittered_position` on every observation: the antibiotic's
    /// index in `antibiotics` plus independent noise in ±amount. No other
    /// field is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAntibiotic`] if an observation names an
    /// antibiotic outside the authored list.
    pub fn apply(&mut self, antibiotics: &[String], observations: &mut [Observation]) -> Result<()> {
        for obs in observations.iter_mut() {
            let index = antibiotics
                .iter()
                .position(|a| *a == obs.antibiotic)
                .ok_or_else(|| Error::UnknownAntibiotic { name: obs.antibiotic.clone() })?;
            obs.jittered_position = Some(index as f64 + self.amount * self.next_unit());
        }
        Ok(())
    }
}

/// Build the primary layer's table from observations.
///
/// Columns: `species`, `gram_stain`, `antibiotic`, `mic`, `highlight`, and
/// `position` when every observation carries a jittered position.
#[must_use]
pub fn observations_table(observations: &[Observation]) -> Table {
    let mut table = Table::new();

    let species: Vec<&str> = observations.iter().map(|o| o.species.as_str()).collect();
    let gram: Vec<&str> = observations.iter().map(|o| o.gram_stain.as_str()).collect();
    let antibiotic: Vec<&str> = observations.iter().map(|o| o.antibiotic.as_str()).collect();
    let mic: Vec<f64> = observations.iter().map(|o| o.mic).collect();
    let highlight: Vec<&str> = observations.iter().map(|o| o.highlight.as_str()).collect();

    table.add_text_column("species", &species);
    table.add_text_column("gram_stain", &gram);
    table.add_text_column("antibiotic", &antibiotic);
    table.add_num_column("mic", &mic);
    table.add_text_column("highlight", &highlight);

    let positions: Option<Vec<f64>> =
        observations.iter().map(|o| o.jittered_position).collect();
    if let Some(positions) = positions {
        table.add_num_column("position", &positions);
    }

    table
}
