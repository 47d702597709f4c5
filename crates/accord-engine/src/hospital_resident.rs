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

//! Hospital-optimal deferred acceptance.
//!
//! The resident-optimal direction is the shared skeleton run on a
//! `BipartiteMarket`; this module holds the dual. Hospitals make the offers:
//! a hospital is free while it has spare capacity and still ranks a resident
//! it does not already hold. After every offer the free set is recomputed in
//! input order and the last free hospital moves next. A resident always takes
//! the offer (anything it ranks below its current hospital has already been
//! struck), leaves its previous hospital, and strikes every hospital it ranks
//! below the new one.

use crate::{role::Ranking, session::SolveSession};
use accord_model::{
    capacitated::{Capacitated, CapacitatedPlayer},
    index::{HospitalIndex, ResidentIndex},
    player::Player,
};

/// The last hospital, in input order, that can still make an offer, with the
/// resident it offers to.
fn next_offer(
    hospitals: &[CapacitatedPlayer<ResidentIndex>],
) -> Option<(HospitalIndex, ResidentIndex)> {
    hospitals
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, hospital)| !hospital.is_full())
        .find_map(|(index, hospital)| {
            hospital
                .favourite_unmatched()
                .map(|resident| (HospitalIndex::new(index), resident))
        })
}

/// Runs hospital-optimal deferred acceptance to completion.
pub fn hospital_optimal(
    residents: &mut [Player<HospitalIndex>],
    hospitals: &mut [CapacitatedPlayer<ResidentIndex>],
    session: &mut SolveSession<'_>,
) {
    while let Some((hospital, resident)) = next_offer(hospitals) {
        session.proposal(hospital.get(), resident.get());

        if !residents[resident.get()].accepts(hospital) {
            hospitals[hospital.get()].drop_candidate(resident);
            residents[resident.get()].drop_candidate(hospital);
            session.rejection(hospital.get(), resident.get());
            continue;
        }

        if let Some(previous) = residents[resident.get()].partner() {
            hospitals[previous.get()].unmatch(resident);
            session.eviction(previous.get(), resident.get());
        }

        residents[resident.get()].match_with(hospital);
        hospitals[hospital.get()].match_with(resident);

        for successor in residents[resident.get()].successors() {
            residents[resident.get()].drop_candidate(successor);
            hospitals[successor.get()].drop_candidate(resident);
            session.deletion(resident.get(), successor.get());
        }
    }
}
