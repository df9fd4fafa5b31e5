// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


use std::collections::HashSet;
use axioms::ballot_metadata::{CandidateIndex, NumberOfCandidates};
use axioms::ballot_paper::{Ballot, Preference};
use axioms::electorate::{simplify, Electorate};
use axioms::errors::ElectionError;
use axioms::random_util::RankingGenerator;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn ballot(s:&str) -> Ballot { s.parse().unwrap() }
fn c(v:&[usize]) -> Vec<CandidateIndex> { v.iter().map(|&i|CandidateIndex(i)).collect() }

#[test]
fn test_prefers() {
    let b = ballot("2>0");
    let p = |x:usize,y:usize| b.prefers(CandidateIndex(x),CandidateIndex(y));
    // both ranked
    assert_eq!(p(2,0),Preference::Prefers(CandidateIndex(2)));
    assert_eq!(p(0,2),Preference::Prefers(CandidateIndex(2)));
    // one ranked
    assert_eq!(p(0,1),Preference::Prefers(CandidateIndex(0)));
    assert_eq!(p(1,0),Preference::Prefers(CandidateIndex(0)));
    // neither ranked
    assert_eq!(p(1,3),Preference::Indifferent);
    assert_eq!(p(2,2),Preference::Indifferent);
    // blank ballot
    assert_eq!(Ballot::default().prefers(CandidateIndex(0),CandidateIndex(1)),Preference::Indifferent);
}

#[test]
fn test_prefers_consistent_after_restriction() {
    let b = ballot("3>1>0>2");
    let keep : HashSet<CandidateIndex> = c(&[0,1,2]).into_iter().collect();
    let restricted = b.restrict(&keep);
    assert_eq!(restricted,ballot("1>0>2"));
    for x in 0..3 {
        for y in 0..3 {
            assert_eq!(b.prefers(CandidateIndex(x),CandidateIndex(y)),restricted.prefers(CandidateIndex(x),CandidateIndex(y)));
        }
    }
}

#[test]
fn test_display_and_parse() {
    let b = ballot(" 4 > 1>0 ");
    assert_eq!(b.ranking(),&c(&[4,1,0])[..]);
    assert_eq!(b.to_string(),"4>1>0");
    assert_eq!(b.len(),3);
    assert_eq!(b.position(CandidateIndex(0)),Some(2));
    assert_eq!(b.position(CandidateIndex(2)),None);
    assert!(Ballot::default().is_empty());
}

#[test]
fn test_simplify_is_idempotent() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let electorate = Electorate::new(200,NumberOfCandidates(6),&RankingGenerator::Uniform,&mut rng).unwrap();
    for subset in electorate.restriction_subsets().unwrap() {
        let once = simplify(electorate.ballots(),subset);
        let twice = simplify(&once,subset);
        assert_eq!(once,twice);
        for b in &once { assert!(b.ranking().iter().all(|candidate|subset.contains(candidate))); }
    }
}

#[test]
fn test_electorate_construction_errors() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    assert!(matches!(Electorate::new(10,NumberOfCandidates(0),&RankingGenerator::Uniform,&mut rng),Err(ElectionError::InvalidParameters(_))));
    let coalitions = RankingGenerator::coalition(vec![2,2],false).unwrap();
    assert!(matches!(Electorate::new(10,NumberOfCandidates(5),&coalitions,&mut rng),Err(ElectionError::InvalidParameters(_))));
    // even with no voters the parameters are checked.
    assert!(matches!(Electorate::new(0,NumberOfCandidates(5),&coalitions,&mut rng),Err(ElectionError::InvalidParameters(_))));
    assert!(matches!(Electorate::from_ballots(vec![],NumberOfCandidates(0)),Err(ElectionError::InvalidParameters(_))));
    let empty = Electorate::new(0,NumberOfCandidates(4),&coalitions,&mut rng).unwrap();
    assert_eq!(empty.num_votes(),0);
    assert_eq!(empty.num_candidates(),NumberOfCandidates(4));
}

#[test]
#[should_panic]
fn test_ballot_outside_candidate_range_panics() {
    let _ = Electorate::from_ballots(vec![ballot("0>3")],NumberOfCandidates(3));
}

#[test]
fn test_pairs() {
    let electorate = Electorate::from_ballots(vec![],NumberOfCandidates(3)).unwrap();
    assert_eq!(electorate.pairs(),vec![(CandidateIndex(0),CandidateIndex(1)),(CandidateIndex(0),CandidateIndex(2)),(CandidateIndex(1),CandidateIndex(2))]);
    let one = Electorate::from_ballots(vec![],NumberOfCandidates(1)).unwrap();
    assert!(one.pairs().is_empty());
}
