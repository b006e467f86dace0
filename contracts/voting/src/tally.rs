//! Winner selection.
//!
//! A single left-to-right scan over vote counts. A later proposal replaces
//! the running leader when its count is greater than **or equal to** the
//! leader's, so an exact tie goes to the higher index.

/// The proposal currently leading the scan.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Leader {
    pub proposal_id: u32,
    pub vote_count: u32,
}

/// Returns the winning proposal for the given counts, `None` when empty.
pub fn leader<I>(vote_counts: I) -> Option<Leader>
where
    I: IntoIterator<Item = u32>,
{
    let mut best: Option<Leader> = None;
    for (id, vote_count) in (0u32..).zip(vote_counts) {
        match best {
            Some(current) if vote_count < current.vote_count => {}
            _ => {
                best = Some(Leader {
                    proposal_id: id,
                    vote_count,
                })
            }
        }
    }
    best
}
