// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


//! Social choice functions, turning a set of ballots into a societal ranking of the alternatives.
//!
//! All the rules here are anonymous (the order of ballots is irrelevant) and deterministic.
//! Ties are resolved by a stable sort; see [ScoringMethod::ranking] for the details.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use log::trace;
use num::{BigInt, BigRational, Zero};
use serde::{Deserialize, Serialize};
use crate::ballot_metadata::CandidateIndex;
use crate::ballot_paper::Ballot;
use crate::electorate::simplify;
use crate::errors::ElectionError;

/// Alternatives, most favoured by society first. May be just the winner.
pub type SocietalRanking = Vec<CandidateIndex>;

/// Something that can compute a societal ranking from some ballots.
pub trait SocialChoiceFunction {
    /// A human readable name, used when reporting results.
    fn name(&self) -> String;

    /// Rank `candidates` (which must be distinct) given the ballots.
    /// Alternatives on ballots that are not in `candidates` are ignored.
    ///
    /// Fails only if there are no candidates. A single candidate is always the whole result.
    fn evaluate(&self,ballots:&[Ballot],candidates:&[CandidateIndex]) -> Result<SocietalRanking,ElectionError>;
}

/// The weight a Borda count gives to a ranked position.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum BordaWeight {
    /// position i of n gets n-i.
    Linear,
    /// position i of n gets n-i-1, so last place gets nothing.
    Tournament,
    /// position i gets 1/(i+1), as used in Nauru.
    Dowdall,
}

impl BordaWeight {
    /// The weight, as an exact fraction, for the 0 based `position` when there are `num_candidates` being considered.
    /// ```
    /// use num::BigRational;
    /// use axioms::rules::BordaWeight;
    /// let r = |n:i64,d:i64| BigRational::new(n.into(),d.into());
    /// assert_eq!(BordaWeight::Linear.weight(0,3),r(3,1));
    /// assert_eq!(BordaWeight::Tournament.weight(2,3),r(0,1));
    /// assert_eq!(BordaWeight::Dowdall.weight(2,3),r(1,3));
    /// ```
    pub fn weight(self,position:usize,num_candidates:usize) -> BigRational {
        match self {
            BordaWeight::Linear => BigRational::from_integer(BigInt::from(num_candidates-position)),
            BordaWeight::Tournament => BigRational::from_integer(BigInt::from(num_candidates-position-1)),
            BordaWeight::Dowdall => BigRational::new(BigInt::from(1),BigInt::from(position+1)),
        }
    }

    /// Total score for each candidate, in ascending candidate order.
    pub fn scores(self,ballots:&[Ballot],candidates:&[CandidateIndex]) -> Vec<(CandidateIndex,BigRational)> {
        borda_scores(ballots,candidates,|position,n|self.weight(position,n))
    }

    /// Candidates by descending score; ties go to the lower candidate index.
    fn ranking(self,ballots:&[Ballot],candidates:&[CandidateIndex]) -> SocietalRanking {
        // Integer weights don't need the overhead of rationals.
        match self {
            BordaWeight::Linear => sort_by_score(borda_scores(ballots,candidates,|position,n|(n-position) as u64)),
            BordaWeight::Tournament => sort_by_score(borda_scores(ballots,candidates,|position,n|(n-position-1) as u64)),
            BordaWeight::Dowdall => sort_by_score(self.scores(ballots,candidates)),
        }
    }
}

/// Sum the weights each candidate gets from each ballot. Positions are counted amongst `candidates` only.
/// The result is in ascending candidate order.
fn borda_scores<T:Zero+AddAssign>(ballots:&[Ballot],candidates:&[CandidateIndex],weight:impl Fn(usize,usize)->T) -> Vec<(CandidateIndex,T)> {
    let mut in_order : Vec<CandidateIndex> = candidates.to_vec();
    in_order.sort();
    let index_of : HashMap<CandidateIndex,usize> = in_order.iter().enumerate().map(|(i,&c)|(c,i)).collect();
    let n = in_order.len();
    let mut scores : Vec<T> = (0..n).map(|_|T::zero()).collect();
    for ballot in ballots {
        for (position,&index) in ballot.ranking().iter().filter_map(|c|index_of.get(c)).enumerate() {
            scores[index]+=weight(position,n);
        }
    }
    in_order.into_iter().zip(scores).collect()
}

/// Highest score first. Stable, so equal scores keep their existing relative order.
fn sort_by_score<T:Ord>(mut scores:Vec<(CandidateIndex,T)>) -> SocietalRanking {
    scores.sort_by(|(_,a),(_,b)|b.cmp(a));
    scores.into_iter().map(|(c,_)|c).collect()
}

/// First preference counts for each candidate, in the order given. Ballots with no candidate ranked count for no one.
pub fn plurality_tallies(ballots:&[Ballot],candidates:&[CandidateIndex]) -> Vec<usize> {
    let continuing : HashSet<CandidateIndex> = candidates.iter().copied().collect();
    let index_of : HashMap<CandidateIndex,usize> = candidates.iter().enumerate().map(|(i,&c)|(c,i)).collect();
    let mut tallies = vec![0;candidates.len()];
    for ballot in ballots {
        if let Some(first) = ballot.first_choice_amongst(&continuing) { tallies[index_of[&first]]+=1; }
    }
    tallies
}

/// How candidates get scored, before any runoff or truncation.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum ScoringMethod {
    /// First past the post.
    Plurality,
    Borda(BordaWeight),
}

impl ScoringMethod {
    /// The full ranking of `candidates` by this method.
    ///
    /// Plurality ties keep the order of `candidates`. Borda ties resolve to ascending candidate index,
    /// regardless of the order of `candidates`.
    pub fn ranking(self,ballots:&[Ballot],candidates:&[CandidateIndex]) -> SocietalRanking {
        match self {
            ScoringMethod::Plurality => {
                let tallies = plurality_tallies(ballots,candidates);
                sort_by_score(candidates.iter().copied().zip(tallies).collect())
            }
            ScoringMethod::Borda(weight) => weight.ranking(ballots,candidates),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ScoringMethod::Plurality => "FirstPastThePost",
            ScoringMethod::Borda(BordaWeight::Linear) => "BordaCount",
            ScoringMethod::Borda(BordaWeight::Tournament) => "TournamentStyleBordaCount",
            ScoringMethod::Borda(BordaWeight::Dowdall) => "DowdallBordaCount",
        }
    }
}

/// A voting rule: a scoring method, optionally applied as an instant runoff, optionally truncated to just the winner.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub struct VotingRule {
    pub method : ScoringMethod,
    /// Repeatedly eliminate the lowest ranked candidate until 2 are left, then take the top of those.
    #[serde(default)]
    pub instant_runoff : bool,
    /// Only return the top candidate.
    #[serde(default)]
    pub winner_only : bool,
}

impl VotingRule {
    pub fn new(method:ScoringMethod) -> Self { VotingRule{ method, instant_runoff: false, winner_only: false } }
    pub fn plurality() -> Self { Self::new(ScoringMethod::Plurality) }
    /// Instant runoff voting, which is a runoff over plurality.
    pub fn instant_runoff() -> Self { Self::plurality().with_instant_runoff() }
    pub fn borda(weight:BordaWeight) -> Self { Self::new(ScoringMethod::Borda(weight)) }
    pub fn with_instant_runoff(self) -> Self { VotingRule{ instant_runoff: true, ..self } }
    pub fn with_winner_only(self) -> Self { VotingRule{ winner_only: true, ..self } }

    /// Run the instant runoff process, returning the winner and the candidates eliminated, in order of elimination.
    ///
    /// With 2 candidates left, the winner is the top of the scoring method's ranking, so there are at most
    /// `candidates.len()-2` eliminations. A single candidate wins without any eliminations.
    pub fn instant_runoff_eliminations(&self,ballots:&[Ballot],candidates:&[CandidateIndex]) -> Result<(CandidateIndex,Vec<CandidateIndex>),ElectionError> {
        if candidates.is_empty() { return Err(ElectionError::InvalidCandidateCount); }
        let mut eliminated = vec![];
        let mut remaining : Vec<CandidateIndex> = candidates.to_vec();
        let mut ballots : Cow<[Ballot]> = Cow::Borrowed(ballots);
        loop {
            let ranking = self.method.ranking(&ballots,&remaining);
            if remaining.len()<=2 { return Ok((ranking[0],eliminated)); }
            remaining = ranking;
            if let Some(lowest) = remaining.pop() {
                trace!("{} eliminates {} leaving {:?}",self,lowest,remaining);
                eliminated.push(lowest);
            }
            ballots = Cow::Owned(simplify(&ballots,&remaining));
        }
    }
}

impl SocialChoiceFunction for VotingRule {
    fn name(&self) -> String {
        let mut name = if self.instant_runoff && self.method==ScoringMethod::Plurality { "InstantRunoff".to_string() } else { self.method.name().to_string() };
        if self.instant_runoff && self.method!=ScoringMethod::Plurality { name.push_str("; instant runoff"); }
        if self.winner_only { name.push_str("; first place only"); }
        name
    }

    fn evaluate(&self,ballots:&[Ballot],candidates:&[CandidateIndex]) -> Result<SocietalRanking,ElectionError> {
        if candidates.is_empty() { return Err(ElectionError::InvalidCandidateCount); }
        assert_eq!(candidates.len(),candidates.iter().collect::<HashSet<_>>().len(),"Repeated candidate in {:?}",candidates);
        if candidates.len()==1 { return Ok(candidates.to_vec()); }
        let mut ranking = if self.instant_runoff {
            vec![self.instant_runoff_eliminations(ballots,candidates)?.0]
        } else {
            self.method.ranking(ballots,candidates)
        };
        if self.winner_only { ranking.truncate(1); }
        Ok(ranking)
    }
}

impl Display for VotingRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&self.name()) }
}

/// Use an arbitrary function as a social choice function, e.g. to test an axiom checker.
///
/// The function is only called with at least 2 candidates.
pub struct FnRule<F> {
    name : String,
    function : F,
}

impl <F:Fn(&[Ballot],&[CandidateIndex])->SocietalRanking> FnRule<F> {
    pub fn new(name:impl Into<String>,function:F) -> Self { FnRule{ name: name.into(), function } }
}

impl <F:Fn(&[Ballot],&[CandidateIndex])->SocietalRanking> SocialChoiceFunction for FnRule<F> {
    fn name(&self) -> String { self.name.clone() }

    fn evaluate(&self, ballots: &[Ballot], candidates: &[CandidateIndex]) -> Result<SocietalRanking, ElectionError> {
        match candidates.len() {
            0 => Err(ElectionError::InvalidCandidateCount),
            1 => Ok(candidates.to_vec()),
            _ => Ok((self.function)(ballots,candidates)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballots(votes:&[&str]) -> Vec<Ballot> { votes.iter().map(|v|v.parse().unwrap()).collect() }
    fn c(v:&[usize]) -> Vec<CandidateIndex> { v.iter().map(|&i|CandidateIndex(i)).collect() }

    #[test]
    fn test_borda_positions_ignore_non_candidates() {
        let votes = ballots(&["3>0>1","1>3"]);
        let scores = BordaWeight::Linear.scores(&votes,&c(&[1,0]));
        let as_int : Vec<(usize,i64)> = scores.into_iter().map(|(c,s)|(c.0,s.to_integer().try_into().unwrap())).collect();
        // 0 is first of 2 and 1 second on the first ballot, 1 is first on the second.
        assert_eq!(as_int,vec![(0,2),(1,3)]);
    }

    #[test]
    fn test_plurality_tallies_follow_candidate_order() {
        let votes = ballots(&["2>0","0","","1>2","2"]);
        assert_eq!(plurality_tallies(&votes,&c(&[2,0,1])),vec![2,1,1]);
        assert_eq!(plurality_tallies(&votes,&c(&[0,1])),vec![2,1]);
    }
}
