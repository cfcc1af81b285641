use std::cmp::Ordering;

use tracing::debug;

use crate::filter::{Filter, FilterMode};
use crate::scoring::AttentionScorer;

use super::session::SessionState;
use super::types::{Decision, PassReport};

/// Runs one full filtering pass over every known post.
///
/// Visibility is recomputed from a shown baseline, then the filters are folded
/// in insertion order, each mutating the pass-local visibility:
///
/// - hide(T): posts at or above the threshold are marked hidden; posts below it
///   keep their current value, so hides accumulate across hide filters;
/// - show(K): all posts are ranked by relevance descending (stable, so ties
///   keep insertion order) and the first K form the retain-set; every post is
///   then decided, in-set shown and out-of-set hidden.
///
/// Last writer wins per post. With no filters, the baseline stands and every
/// post resets to shown. The fold makes the ordering rule an explicit reduction
/// rather than a property of incidental mutation order.
pub fn run_pass(
    session: &mut SessionState,
    filters: &[Filter],
    scorer: &AttentionScorer,
    seq: u64,
) -> (Vec<Decision>, PassReport) {
    let total = session.len();
    let mut visible = vec![true; total];

    for filter in filters {
        match filter.mode {
            FilterMode::Hide => apply_hide(session, filter, scorer, &mut visible),
            FilterMode::Show => apply_show(session, filter, scorer, &mut visible),
        }
    }

    let mut decisions = Vec::with_capacity(total);
    let mut hidden = 0usize;
    for (post, &show) in session.posts_mut().iter_mut().zip(&visible) {
        post.visible = show;
        if !show {
            hidden += 1;
        }
        decisions.push(Decision {
            id: post.id.clone(),
            visible: show,
        });
    }

    let report = PassReport { seq, total, hidden };
    (decisions, report)
}

fn apply_hide(
    session: &SessionState,
    filter: &Filter,
    scorer: &AttentionScorer,
    visible: &mut [bool],
) {
    let mut marked = 0usize;
    for (post, slot) in session.posts().iter().zip(visible.iter_mut()) {
        let relevance = scorer.relevance(&post.text, &filter.query_vector);
        if relevance >= filter.threshold {
            *slot = false;
            marked += 1;
        }
    }
    debug!(
        query = %filter.query,
        threshold = filter.threshold,
        marked,
        "Applied hide filter"
    );
}

fn apply_show(
    session: &SessionState,
    filter: &Filter,
    scorer: &AttentionScorer,
    visible: &mut [bool],
) {
    let mut ranked: Vec<(usize, f32)> = session
        .posts()
        .iter()
        .enumerate()
        .map(|(index, post)| (index, scorer.relevance(&post.text, &filter.query_vector)))
        .collect();

    // Stable sort: equal scores keep insertion order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    for slot in visible.iter_mut() {
        *slot = false;
    }
    for &(index, _) in ranked.iter().take(filter.top_k) {
        visible[index] = true;
    }

    debug!(
        query = %filter.query,
        top_k = filter.top_k,
        retained = filter.top_k.min(ranked.len()),
        "Applied show filter"
    );
}
