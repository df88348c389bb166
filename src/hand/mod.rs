//! Hand Evaluator: best five-card poker hand from hole and community cards.
//!
//! ## Ordering
//!
//! Royal Flush > Straight Flush > Four of a Kind > Full House > Flush >
//! Straight > Three of a Kind > Two Pair > One Pair > High Card, then the
//! tie-break vector element-wise. The wheel (A-2-3-4-5) is a 5-high
//! straight. Fewer than five cards is [`Evaluation::Incomplete`].

mod evaluator;

pub use evaluator::{
    compare_hands, evaluate, multiples_category, recolor, Evaluation, HandCategory, HandValue, MadeHand,
};
