//! Sources of comparison decisions
//!
//! The session never asks the user anything itself. Whoever drives it
//! supplies a [`ComparisonJudge`] that decides each comparison: an
//! interactive prompt, a queued UI event or a scripted test.

use crate::types::{ComparisonRequest, Winner};
use std::collections::VecDeque;

/// Decides pairwise comparisons on behalf of the user
pub trait ComparisonJudge {
    /// Decide one comparison, or return `None` to skip it
    fn judge(&mut self, request: &ComparisonRequest) -> Option<Winner>;
}

impl<F> ComparisonJudge for F
where
    F: FnMut(&ComparisonRequest) -> Option<Winner>,
{
    fn judge(&mut self, request: &ComparisonRequest) -> Option<Winner> {
        self(request)
    }
}

/// Judge that replays a fixed list of decisions
///
/// Once the script runs out every further comparison is skipped. Every
/// request seen is recorded.
#[derive(Debug, Default)]
pub struct ScriptedJudge {
    decisions: VecDeque<Option<Winner>>,
    requests: Vec<ComparisonRequest>,
}

impl ScriptedJudge {
    pub fn new(decisions: impl IntoIterator<Item = Option<Winner>>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    /// Judge that always picks the same side
    pub fn repeating(winner: Winner, count: usize) -> Self {
        Self::new(std::iter::repeat(Some(winner)).take(count))
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> &[ComparisonRequest] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }
}

impl ComparisonJudge for ScriptedJudge {
    fn judge(&mut self, request: &ComparisonRequest) -> Option<Winner> {
        self.requests.push(request.clone());
        self.decisions.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;

    fn request() -> ComparisonRequest {
        ComparisonRequest {
            dimension: Dimension::Prestige,
            first: "New".to_string(),
            second: "Old".to_string(),
        }
    }

    #[test]
    fn test_scripted_judge_replays_then_skips() {
        let mut judge = ScriptedJudge::new([Some(Winner::First), None, Some(Winner::Second)]);

        assert_eq!(judge.judge(&request()), Some(Winner::First));
        assert_eq!(judge.judge(&request()), None);
        assert_eq!(judge.judge(&request()), Some(Winner::Second));
        assert_eq!(judge.remaining(), 0);
        assert_eq!(judge.judge(&request()), None);
        assert_eq!(judge.requests().len(), 4);
    }

    #[test]
    fn test_closure_judge() {
        let mut calls = 0;
        let mut judge = |req: &ComparisonRequest| {
            calls += 1;
            (req.dimension == Dimension::Prestige).then_some(Winner::Second)
        };

        assert_eq!(judge.judge(&request()), Some(Winner::Second));
        drop(judge);
        assert_eq!(calls, 1);
    }
}
