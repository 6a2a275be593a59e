/// Direction of a manual carousel or lightbox step
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Direction {
    Forward,
    Backward,
}

/// Wraps `index` one step in `direction` over `len` items. `len` must not be 0.
pub fn step(index: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => (index + 1) % len,
        Direction::Backward => (index + len - 1) % len,
    }
}

/// Read-only snapshot of everything the renderer and input layer look at.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ViewState<'a> {
    pub active_index: usize,
    pub slide_count: usize,
    pub caption: &'a str,
    pub modal_open: bool,
    pub revealed_text: &'a str,
    pub reveal_complete: bool,
    pub selected: Option<usize>,
    pub gallery_len: usize,
    pub confetti_running: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step(2, 3, Direction::Forward), 0);
        assert_eq!(step(0, 3, Direction::Backward), 2);
        assert_eq!(step(0, 1, Direction::Forward), 0);
        assert_eq!(step(0, 1, Direction::Backward), 0);
    }
}
