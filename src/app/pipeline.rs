//! Shared "search pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! request validation -> rate grid -> candidate search -> ranked output
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{Candidate, SearchRequest};
use crate::fit::{find_candidates, rate_step};

/// All computed outputs of a single search run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub request: SearchRequest,
    /// Step resolved from the rate range width (for reporting/exports).
    pub rate_step: f64,
    /// Ranked, deduplicated candidates (0..=10 items).
    pub candidates: Vec<Candidate>,
}

/// Execute the search and bundle the outputs for presentation.
///
/// An empty candidate list is a normal outcome, not an error; callers must
/// present it distinctly from "still calculating" and from invalid input.
pub fn run_search(request: &SearchRequest) -> RunOutput {
    let candidates = find_candidates(request);
    RunOutput {
        request: *request,
        rate_step: rate_step(request.max_rate - request.min_rate),
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_search_resolves_the_rate_step_from_the_range() {
        let request = SearchRequest {
            target: 10000.0,
            min_rate: 9400.0,
            max_rate: 9600.0,
        };
        let run = run_search(&request);
        assert_eq!(run.rate_step, 0.2);
        assert_eq!(run.request, request);
    }

    #[test]
    fn run_search_passes_empty_results_through() {
        let request = SearchRequest {
            target: 1.0,
            min_rate: 9400.0,
            max_rate: 9600.0,
        };
        assert!(run_search(&request).candidates.is_empty());
    }
}
