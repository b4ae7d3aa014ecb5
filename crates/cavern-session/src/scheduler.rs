//! Turn scheduler: who acts next.
//!
//! Rotation is fixed and ascending by join order. Eliminated players are
//! skipped. There is no priority and no weighting.

use cavern_protocol::PlayerId;

/// Returns the index of the next player to act after `from`.
///
/// Steps one position forward, then keeps stepping while the player
/// there is not alive, giving up after one full rotation of skips. When
/// nobody is alive the result is simply where the rotation stopped; the
/// scheduler does not decide that a game is over.
///
/// Returns 0 for an empty order.
pub fn next_turn(order: &[PlayerId], from: usize, is_alive: impl Fn(&PlayerId) -> bool) -> usize {
    let len = order.len();
    if len == 0 {
        return 0;
    }

    let mut index = (from + 1) % len;
    let mut skips = 0;
    while !is_alive(&order[index]) && skips < len {
        index = (index + 1) % len;
        skips += 1;
    }
    index
}
