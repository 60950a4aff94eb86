use rust_decimal::{Decimal, RoundingStrategy};

/// Round to scale 2, half-up, per spec.md §9 ("all rounding is half-up").
/// `rust_decimal`'s `MidpointAwayFromZero` strategy is half-up for the
/// non-negative amounts this ledger only ever rounds.
pub fn round_half_up_2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
