// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The propose-and-reject skeleton shared by stable marriage, resident-optimal
//! hospital-resident and the first phase of stable roommates.
//!
//! Free proposers are popped from a LIFO worklist. A popped proposer offers
//! itself to the head of its working list. A reviewer at capacity first
//! evicts its worst held proposal, then holds the new one unconditionally.
//! The correctness of the unconditional hold rests on the deletion that
//! follows: once a reviewer is at capacity, every proposer it ranks below
//! its worst held proposal is struck from both lists, so anyone who reaches
//! it afterwards is necessarily better than whoever gets evicted.
//!
//! A proposal the reviewer cannot take at all (it does not rank the proposer,
//! or has no capacity) is a rejection: the pair is struck and the proposer
//! goes back on the worklist. Every step shrinks some working list, so the
//! loop terminates after at most as many steps as there are list entries.

use crate::{market::ProposalMarket, session::SolveSession, worklist::Worklist};

/// Runs the skeleton until no free proposer has anyone left to propose to.
pub fn propose_and_reject<M>(market: &mut M, session: &mut SolveSession<'_>)
where
    M: ProposalMarket,
{
    let mut worklist: Worklist<M::Proposer> = market.proposers().into_iter().collect();

    while let Some(proposer) = worklist.pop() {
        let Some(reviewer) = market.favourite(proposer) else {
            continue;
        };
        session.proposal(proposer.into(), reviewer.into());

        if !market.accepts(reviewer, proposer) || !market.has_capacity(reviewer) {
            market.forget_pair(proposer, reviewer);
            session.rejection(proposer.into(), reviewer.into());
            worklist.push(proposer);
            continue;
        }

        let worst = if market.is_full(reviewer) {
            market.worst_held(reviewer)
        } else {
            None
        };
        if let Some(worst) = worst {
            market.release(reviewer, worst);
            session.eviction(worst.into(), reviewer.into());
            worklist.push(worst);
        }

        market.hold(reviewer, proposer);

        if market.is_full(reviewer) {
            for successor in market.successors(reviewer) {
                market.forget_pair(successor, reviewer);
                session.deletion(successor.into(), reviewer.into());
            }
        }
    }
}
