// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


//! An election profile: all the votes in one simulated election.

use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use log::trace;
use once_cell::unsync::OnceCell;
use rand::Rng;
use crate::ballot_metadata::{CandidateIndex, NumberOfCandidates};
use crate::ballot_paper::Ballot;
use crate::errors::ElectionError;
use crate::random_util::RankingGenerator;

/// The largest number of alternatives for which the restriction subsets will be enumerated.
/// There are 2^K of them, so this is already far more than is practical to check.
pub const MAX_ALTERNATIVES_FOR_SUBSETS : usize = 24;

/// The votes in one election, over a fixed set of alternatives.
///
/// Immutable once made. The subsets of alternatives used to test axioms are computed the
/// first time they are needed, and then shared by all the checks on this electorate.
#[derive(Clone,Debug)]
pub struct Electorate {
    ballots : Vec<Ballot>,
    num_candidates : NumberOfCandidates,
    restriction_subsets : OnceCell<Vec<Vec<CandidateIndex>>>,
}

impl Electorate {
    /// Make a random electorate of `num_votes` voters over `num_candidates` alternatives.
    pub fn new<R:Rng>(num_votes:usize,num_candidates:NumberOfCandidates,generator:&RankingGenerator,rng:&mut R) -> Result<Self,ElectionError> {
        if num_candidates.0<1 { return Err(ElectionError::InvalidParameters("an election needs at least one alternative".to_string())); }
        generator.check_compatible(num_candidates)?;
        let mut ballots = Vec::with_capacity(num_votes);
        for _ in 0..num_votes {
            ballots.push(Ballot::generate(generator,num_candidates,rng)?);
        }
        trace!("Generated {} ballots over {} alternatives using {:?}",num_votes,num_candidates,generator);
        Ok(Electorate{ ballots, num_candidates, restriction_subsets: OnceCell::new() })
    }

    /// Make an electorate from explicitly given ballots.
    ///
    /// Panics if a ballot ranks an alternative that is not one of the `num_candidates` alternatives.
    pub fn from_ballots(ballots:Vec<Ballot>,num_candidates:NumberOfCandidates) -> Result<Self,ElectionError> {
        if num_candidates.0<1 { return Err(ElectionError::InvalidParameters("an election needs at least one alternative".to_string())); }
        for ballot in &ballots { ballot.assert_within(num_candidates); }
        Ok(Electorate{ ballots, num_candidates, restriction_subsets: OnceCell::new() })
    }

    pub fn ballots(&self) -> &[Ballot] { &self.ballots }
    pub fn num_votes(&self) -> usize { self.ballots.len() }
    pub fn num_candidates(&self) -> NumberOfCandidates { self.num_candidates }
    /// All the alternatives, in ascending order.
    pub fn all_candidates(&self) -> Vec<CandidateIndex> { self.num_candidates.all() }

    /// Every subset S of the alternatives with 2 ≤ |S| < K, each exactly once,
    /// sorted within each subset, smaller subsets first and lexicographic within a size.
    pub fn restriction_subsets(&self) -> Result<&[Vec<CandidateIndex>],ElectionError> {
        self.restriction_subsets.get_or_try_init(||restriction_subsets(self.num_candidates)).map(|subsets|subsets.as_slice())
    }

    /// Every pair of distinct alternatives, lower index first.
    pub fn pairs(&self) -> Vec<(CandidateIndex,CandidateIndex)> {
        let mut res = Vec::new();
        for a in 0..self.num_candidates.0 {
            for b in a+1..self.num_candidates.0 { res.push((CandidateIndex(a),CandidateIndex(b))); }
        }
        res
    }

    /// The ballots with every alternative not in `remaining` removed.
    pub fn simplify(&self,remaining:&[CandidateIndex]) -> Vec<Ballot> { simplify(&self.ballots,remaining) }
}

/// One line per ballot.
impl Display for Electorate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for ballot in &self.ballots { writeln!(f,"{}",ballot)?; }
        Ok(())
    }
}

/// Restrict each ballot to the alternatives in `remaining`, keeping the relative order of preferences.
/// ```
/// use axioms::ballot_metadata::CandidateIndex;
/// use axioms::ballot_paper::Ballot;
/// use axioms::electorate::simplify;
/// let ballots : Vec<Ballot> = vec!["3>0>2>1".parse().unwrap(),"1".parse().unwrap()];
/// let simplified = simplify(&ballots,&[CandidateIndex(0),CandidateIndex(2)]);
/// assert_eq!(simplified,vec!["0>2".parse::<Ballot>().unwrap(),Ballot::default()]);
/// ```
pub fn simplify(ballots:&[Ballot],remaining:&[CandidateIndex]) -> Vec<Ballot> {
    let keep : HashSet<CandidateIndex> = remaining.iter().copied().collect();
    ballots.iter().map(|ballot|ballot.restrict(&keep)).collect()
}

/// Every subset of the K alternatives with at least 2 and fewer than K members.
pub fn restriction_subsets(num_candidates:NumberOfCandidates) -> Result<Vec<Vec<CandidateIndex>>,ElectionError> {
    let n = num_candidates.0;
    if n>MAX_ALTERNATIVES_FOR_SUBSETS {
        return Err(ElectionError::InvalidParameters(format!("{} alternatives is too many to check every subset of; the limit is {}",n,MAX_ALTERNATIVES_FOR_SUBSETS)));
    }
    let mut res = vec![];
    for size in 2..n { add_combinations(n,size,&mut res); }
    Ok(res)
}

/// Add all size-k subsets of 0..n to res, in lexicographic order. Requires 0<k≤n.
fn add_combinations(n:usize,k:usize,res:&mut Vec<Vec<CandidateIndex>>) {
    let mut indices : Vec<usize> = (0..k).collect();
    loop {
        res.push(indices.iter().map(|&i|CandidateIndex(i)).collect());
        // rightmost index that is not already as high as it can go.
        match (0..k).rev().find(|&i|indices[i]<n-k+i) {
            None => return,
            Some(i) => {
                indices[i]+=1;
                for j in i+1..k { indices[j]=indices[j-1]+1; }
            }
        }
    }
}
