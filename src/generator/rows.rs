// Random alphanumeric rows for the table seeder

use rand::distr::Alphanumeric;
use rand::Rng;

use super::{ROW_CONTENT_LEN, ROW_TITLE_LEN};
use crate::domain::RandomRow;

/// Generate a string of `len` characters drawn from `[A-Za-z0-9]`.
pub fn random_alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

pub fn generate_rows<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<RandomRow> {
    (0..count)
        .map(|_| RandomRow {
            title: random_alphanumeric(rng, ROW_TITLE_LEN),
            content: random_alphanumeric(rng, ROW_CONTENT_LEN),
        })
        .collect()
}
