//! Judge: decide a guess from the identifier tag alone

use crate::types::{decode_tag, PhraseId, Verdict};
use crate::Result;

/// Judge `guess_is_authentic` against the label encoded in `phrase_id`.
///
/// Stateless; untagged identifiers are rejected with
/// [`GameError::UnknownIdentifierTag`](crate::GameError::UnknownIdentifierTag).
pub fn judge(phrase_id: &str, guess_is_authentic: bool) -> Result<Verdict> {
    let actual_is_authentic = decode_tag(phrase_id)?.is_authentic();
    Ok(Verdict {
        correct: actual_is_authentic == guess_is_authentic,
        actual_is_authentic,
    })
}

/// Where the round controller sends decisions to be judged
pub trait Referee {
    fn judge(&self, id: &PhraseId, guess_is_authentic: bool) -> Result<Verdict>;
}

/// In-process referee decoding tags directly
#[derive(Debug, Clone, Copy, Default)]
pub struct TagReferee;

impl Referee for TagReferee {
    fn judge(&self, id: &PhraseId, guess_is_authentic: bool) -> Result<Verdict> {
        judge(id.as_str(), guess_is_authentic)
    }
}
