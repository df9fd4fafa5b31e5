// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


//! Information about a single vote. That is, one voter's ranking of some of the alternatives.

use crate::ballot_metadata::{CandidateIndex, NumberOfCandidates};
use crate::errors::ElectionError;
use crate::random_util::RankingGenerator;
use rand::Rng;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// The answer to "which of these two alternatives does this voter like more?"
#[derive(Copy,Clone,Debug,Eq,PartialEq,Hash)]
pub enum Preference {
    Prefers(CandidateIndex),
    Indifferent,
}

/// A ranked vote. Alternatives are listed most preferred first.
///
/// Alternatives not listed are unranked. An unranked alternative is less preferred
/// than any ranked alternative, and the voter is indifferent between unranked alternatives.
#[derive(Clone,Default)]
pub struct Ballot {
    ranking : Vec<CandidateIndex>,
    /// memo of answers to prefers(a,b). Belongs to this ballot alone.
    preference_cache : RefCell<HashMap<(CandidateIndex,CandidateIndex),Preference>>,
}

impl Ballot {
    /// Make a ballot from a list of alternatives, most preferred first.
    ///
    /// Panics if an alternative is listed twice.
    pub fn new(ranking:Vec<CandidateIndex>) -> Self {
        let mut seen = HashSet::with_capacity(ranking.len());
        for &candidate in &ranking {
            assert!(seen.insert(candidate),"Alternative {} appears more than once in ballot {:?}",candidate,ranking);
        }
        Ballot{ ranking, preference_cache: RefCell::default() }
    }

    /// Make a random ballot over `num_candidates` alternatives using the given way of generating rankings.
    pub fn generate<R:Rng>(generator:&RankingGenerator,num_candidates:NumberOfCandidates,rng:&mut R) -> Result<Self,ElectionError> {
        Ok(Ballot::new(generator.generate_rank(num_candidates,rng)?))
    }

    /// the ranked alternatives, most preferred first.
    pub fn ranking(&self) -> &[CandidateIndex] { &self.ranking }
    /// the number of ranked alternatives.
    pub fn len(&self) -> usize { self.ranking.len() }
    pub fn is_empty(&self) -> bool { self.ranking.is_empty() }
    /// position (0 = first choice) of the given alternative, or None if unranked.
    pub fn position(&self,candidate:CandidateIndex) -> Option<usize> { self.ranking.iter().position(|&c|c==candidate) }
    pub fn contains(&self,candidate:CandidateIndex) -> bool { self.ranking.contains(&candidate) }

    /// The most preferred alternative that is not excluded, if any.
    /// ```
    /// use std::collections::HashSet;
    /// use axioms::ballot_metadata::CandidateIndex;
    /// use axioms::ballot_paper::Ballot;
    /// let ballot : Ballot = "2>0>1".parse().unwrap();
    /// assert_eq!(ballot.first_choice(&HashSet::new()),Some(CandidateIndex(2)));
    /// assert_eq!(ballot.first_choice(&HashSet::from([CandidateIndex(2)])),Some(CandidateIndex(0)));
    /// assert_eq!(ballot.first_choice(&HashSet::from([CandidateIndex(0),CandidateIndex(1),CandidateIndex(2)])),None);
    /// ```
    pub fn first_choice(&self,excluded:&HashSet<CandidateIndex>) -> Option<CandidateIndex> {
        self.ranking.iter().copied().find(|c|!excluded.contains(c))
    }

    /// The most preferred alternative amongst the given continuing alternatives, if any.
    pub fn first_choice_amongst(&self,continuing:&HashSet<CandidateIndex>) -> Option<CandidateIndex> {
        self.ranking.iter().copied().find(|c|continuing.contains(c))
    }

    /// Which of `a` and `b` this voter prefers.
    ///
    /// If both are ranked, the earlier one. If only one is ranked, that one. If neither (or a==b), indifferent.
    pub fn prefers(&self,a:CandidateIndex,b:CandidateIndex) -> Preference {
        if a==b { return Preference::Indifferent; }
        if let Some(&cached) = self.preference_cache.borrow().get(&(a,b)) { return cached; }
        let res = match (self.position(a),self.position(b)) {
            (Some(pos_a),Some(pos_b)) => Preference::Prefers(if pos_a<pos_b {a} else {b}),
            (Some(_),None) => Preference::Prefers(a),
            (None,Some(_)) => Preference::Prefers(b),
            (None,None) => Preference::Indifferent,
        };
        self.preference_cache.borrow_mut().insert((a,b),res);
        res
    }

    /// The ballot with only the alternatives in `keep`, retaining relative order.
    pub fn restrict(&self,keep:&HashSet<CandidateIndex>) -> Ballot {
        Ballot{
            ranking: self.ranking.iter().copied().filter(|c|keep.contains(c)).collect(),
            preference_cache: RefCell::default(),
        }
    }

    /// Panic unless every ranked alternative is one of the `num_candidates` alternatives.
    pub(crate) fn assert_within(&self,num_candidates:NumberOfCandidates) {
        for &candidate in &self.ranking {
            assert!(num_candidates.contains(candidate),"Ballot {} ranks alternative {} but there are only {} alternatives",self,candidate,num_candidates);
        }
    }
}

impl PartialEq for Ballot {
    fn eq(&self, other: &Self) -> bool { self.ranking==other.ranking }
}
impl Eq for Ballot {}

impl fmt::Debug for Ballot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f,"Ballot({})",self) }
}

impl From<Ballot> for Vec<CandidateIndex> {
    fn from(ballot: Ballot) -> Self { ballot.ranking }
}

/// Written as preferences separated by `>`, e.g. `2>0>1`. A blank ballot is the empty string.
impl Display for Ballot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,"{}",self.ranking.iter().map(|c|c.to_string()).collect::<Vec<_>>().join(">"))
    }
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ParseBallotError {
    #[error("Not an alternative number : {0}")]
    NotInteger(#[from] ParseIntError),
    #[error("Alternative {0} listed more than once")]
    Repeated(CandidateIndex),
}

impl FromStr for Ballot {
    type Err = ParseBallotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() { return Ok(Ballot::default()); }
        let mut ranking : Vec<CandidateIndex> = vec![];
        for pref in s.split('>') {
            let candidate : CandidateIndex = pref.trim().parse()?;
            if ranking.contains(&candidate) { return Err(ParseBallotError::Repeated(candidate)); }
            ranking.push(candidate);
        }
        Ok(Ballot::new(ranking))
    }
}
