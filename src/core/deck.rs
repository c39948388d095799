//! Deck Builder: tag, merge and shuffle the two phrase sets

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Builder;

use crate::types::{Deck, Label, PhraseId, PhraseRecord};

/// Build a shuffled deck from authentic and fabricated texts.
///
/// Every text becomes one record with a fresh tagged identifier and trimmed
/// text. Identifiers and order both come from `rng`.
pub fn build_deck<A, F, R>(authentic: A, fabricated: F, rng: &mut R) -> Deck
where
    A: IntoIterator,
    A::Item: AsRef<str>,
    F: IntoIterator,
    F::Item: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut deck: Deck = Vec::new();
    tag_into(&mut deck, Label::Authentic, authentic, rng);
    tag_into(&mut deck, Label::Fabricated, fabricated, rng);

    // Fisher-Yates, uniform over all orderings
    deck.shuffle(rng);
    deck
}

fn tag_into<I, R>(deck: &mut Deck, label: Label, texts: I, rng: &mut R)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    R: Rng + ?Sized,
{
    for text in texts {
        deck.push(PhraseRecord {
            id: fresh_id(label, rng),
            text: text.as_ref().trim().to_string(),
        });
    }
}

/// Random v4 UUID drawn from `rng`, tagged with `label`
fn fresh_id<R: Rng + ?Sized>(label: Label, rng: &mut R) -> PhraseId {
    let bytes: [u8; 16] = rng.gen();
    PhraseId::tagged(label, Builder::from_random_bytes(bytes).into_uuid())
}
